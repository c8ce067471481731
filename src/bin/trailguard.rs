// ABOUTME: Trailguard CLI assessing outdoor activity safety for a location and date
// ABOUTME: Orchestrates fetch, evaluation, explanation, report rendering, and file logging
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

//! Trailguard command-line interface

use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

use trailguard::config::SafetyConfig;
use trailguard::engine::SafetyEngine;
use trailguard::errors::{AppError, AppResult};
use trailguard::llm::{Explanation, ExplanationService, GeminiProvider};
use trailguard::logging::{self, LoggingConfig};
use trailguard::providers::WeatherApiClient;
use trailguard::reports::{render_text, AssessmentReport, ReportLog};
use trailguard::utils::validation::sanitize_location_input;

/// Assess whether the weather makes an outdoor activity safe
#[derive(Debug, Parser)]
#[command(name = "trailguard", version, about)]
struct Cli {
    /// Location to assess (city name, postal code, or "lat,lon")
    location: String,

    /// Date to assess (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Skip appending the report to the assessment log
    #[arg(long)]
    no_log: bool,

    /// Override the assessment log file location
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&LoggingConfig::from_env()) {
        eprintln!("warning: could not install logger: {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error[{}]: {}", e.code, e.message);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let location = sanitize_location_input(&cli.location);
    if location.is_empty() {
        return Err(AppError::invalid_input(
            "location must contain letters, digits, spaces, commas, or hyphens",
        ));
    }

    let config = SafetyConfig::from_env()
        .map_err(|e| AppError::new(trailguard::errors::ErrorCode::ConfigInvalid, e.to_string()))?;
    let engine = SafetyEngine::new(config);

    let mut weather = WeatherApiClient::from_env()?;
    let snapshot = weather.fetch_forecast(&location, cli.date).await?;
    info!(location = %snapshot.location.name, "Fetched forecast");

    let metrics = snapshot.to_metrics();
    let assessment = engine.evaluate(&metrics);
    info!(decision = %assessment.decision, score = ?assessment.weighted_score, "Assessment complete");

    let explanation = match GeminiProvider::from_env() {
        Ok(provider) => {
            ExplanationService::new(Box::new(provider))
                .explain(&snapshot, &assessment)
                .await
        }
        Err(e) => {
            warn!(error = %e, "No LLM provider configured, using canned explanation");
            Explanation::fallback(assessment.decision)
        }
    };

    let assessment_date = cli.date.unwrap_or_else(|| Utc::now().date_naive());
    let report = AssessmentReport::new(location, assessment_date, snapshot, assessment, explanation);

    if !cli.no_log {
        let log = ReportLog::new(cli.log_file.unwrap_or_else(ReportLog::default_path));
        if let Err(e) = log.append(&report) {
            warn!(error = %e, "Could not append report to the assessment log");
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}
