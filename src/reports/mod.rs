// ABOUTME: Assessment report assembly and human-readable text rendering
// ABOUTME: Combines weather, engine verdict, and explanation into one persisted record
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

//! Assessment reports
//!
//! A report captures everything one assessment produced: the weather data it
//! ran against, the engine's full output (including the reserved empty
//! `reasons` list), and the narrative explanation. Reports serialize to JSON
//! for the file log and render to text for the terminal.

mod log;

pub use log::ReportLog;

use crate::engine::SafetyAssessment;
use crate::llm::{Explanation, ExplanationSource};
use crate::models::WeatherSnapshot;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use uuid::Uuid;

/// A comprehensive record of a single safety assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier
    pub report_id: String,

    /// When the report was generated (UTC)
    pub generated_at_utc: DateTime<Utc>,

    /// The location as entered by the user (after sanitization)
    pub location_name: String,

    /// The date the assessment covers
    pub assessment_date: NaiveDate,

    /// The weather data the assessment ran against
    pub weather: WeatherSnapshot,

    /// The engine's full output
    pub assessment: SafetyAssessment,

    /// Narrative explanation of the verdict
    pub explanation: Explanation,
}

impl AssessmentReport {
    /// Assemble a report from one assessment run
    #[must_use]
    pub fn new(
        location_name: impl Into<String>,
        assessment_date: NaiveDate,
        weather: WeatherSnapshot,
        assessment: SafetyAssessment,
        explanation: Explanation,
    ) -> Self {
        Self {
            report_id: format!("rep_{}", Uuid::new_v4().simple()),
            generated_at_utc: Utc::now(),
            location_name: location_name.into(),
            assessment_date,
            weather,
            assessment,
            explanation,
        }
    }
}

const RULE_HEAVY: &str =
    "======================================================================";
const RULE_LIGHT: &str =
    "----------------------------------------------------------------------";

fn reading(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".into(), |v| v.to_string())
}

/// Render a report as human-readable text
#[must_use]
pub fn render_text(report: &AssessmentReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out, "TRAILGUARD - OUTDOOR SAFETY ASSESSMENT REPORT");
    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Location: {}", report.location_name);
    let _ = writeln!(out, "Assessment Date: {}", report.assessment_date);
    let _ = writeln!(out, "Generated: {}", report.generated_at_utc.to_rfc3339());
    let _ = writeln!(out, "Report ID: {}", report.report_id);
    let _ = writeln!(out);

    let current = &report.weather.current;
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "WEATHER CONDITIONS");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(
        out,
        "Temperature: {}°C (Feels like: {}°C)",
        reading(current.temp_c),
        reading(current.feelslike_c)
    );
    let _ = writeln!(out, "Wind Speed: {} mph", reading(current.wind_mph));
    let _ = writeln!(out, "Precipitation: {} mm", reading(current.precip_mm));
    let _ = writeln!(out, "UV Index: {}", reading(current.uv));
    let _ = writeln!(out);

    let day = &report.weather.forecast_day.day;
    let _ = writeln!(
        out,
        "Daily Chance of Rain: {}%",
        reading(day.daily_chance_of_rain)
    );
    let _ = writeln!(
        out,
        "Temperature Range: {}°C - {}°C",
        reading(day.mintemp_c),
        reading(day.maxtemp_c)
    );
    let _ = writeln!(out);

    let assessment = &report.assessment;
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "HEURISTIC ANALYSIS");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "Decision: {}", assessment.decision);
    if let Some(score) = assessment.weighted_score {
        let _ = writeln!(out, "Safety Score: {score:.1}/100");
    }
    if !assessment.hard_stop_reasons.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Hard Stop Warnings:");
        for warning in &assessment.hard_stop_reasons {
            let _ = writeln!(out, "  !! {warning}");
        }
    }
    if !assessment.reasons.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Reasoning:");
        for reason in &assessment.reasons {
            let _ = writeln!(out, "  - {reason}");
        }
    }
    if !assessment.notes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Notes: {}", assessment.notes);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "AI ANALYSIS");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "{}", report.explanation.text);
    if report.explanation.source == ExplanationSource::Fallback {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "(Generated without AI assistance; standard guidance shown.)"
        );
    }
    let _ = writeln!(out, "{RULE_HEAVY}");

    out
}
