// ABOUTME: Heuristic safety engine mapping weather metrics to a GO/MAYBE/NO-GO verdict
// ABOUTME: Pure, synchronous decision logic with hard-stop overrides and data-sufficiency handling
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

//! # Heuristic Safety Engine
//!
//! The engine is the one component with real branching logic: it classifies
//! each weather metric into a risk category, combines the categories into a
//! weighted composite score, and resolves a final decision with two
//! overrides layered on top of the score:
//!
//! 1. **Hard stops** — any single dangerous reading (extreme wind, extreme
//!    heat or cold, heavy rain) forces NO-GO regardless of how favorable the
//!    composite score is.
//! 2. **Data sufficiency** — with no metrics available the verdict is
//!    NO DATA; with exactly one metric (and no hard stop) it is
//!    INSUFFICIENT DATA, because a single signal is never trusted on its
//!    own.
//!
//! The engine holds no state across calls and performs no IO: identical
//! input always yields identical output.

use crate::config::SafetyConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score awarded to a Green category
const GREEN_SCORE: f64 = 100.0;
/// Score awarded to an Amber category
const AMBER_SCORE: f64 = 50.0;
/// Score awarded to a Red category
const RED_SCORE: f64 = 0.0;

/// Composite score at or above which conditions are favorable
const GO_SCORE_FLOOR: f64 = 75.0;
/// Composite score at or above which conditions are marginal
const MAYBE_SCORE_FLOOR: f64 = 50.0;

/// Weather metrics consumed by one assessment
///
/// Every field is independently optional: `None` means the reading was not
/// available, which is distinct from a reading of zero. Absent metrics are
/// never defaulted to a category; they simply are not evaluated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherMetrics {
    /// Wind speed in miles per hour
    pub wind_mph: Option<f64>,

    /// Felt temperature in degrees Celsius
    ///
    /// One value serves as both heat-index and wind-chill signal; upstream
    /// data sources supply the same reading for both.
    pub feels_like_c: Option<f64>,

    /// Probability of precipitation as a percentage (0-100)
    pub precip_chance_pct: Option<f64>,

    /// Precipitation rate in millimetres per hour
    pub precip_rate_mm_hr: Option<f64>,

    /// UV index
    pub uv_index: Option<f64>,
}

/// Risk category for a single evaluated metric
///
/// A metric with no available reading stays `NotEvaluated`; the distinction
/// between "no data" and "evaluated but borderline" is carried in the type,
/// not in a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    /// No reading was available for this metric
    NotEvaluated,
    /// Conditions are benign for this metric
    Green,
    /// Conditions carry moderate risk for this metric
    Amber,
    /// Conditions are severe for this metric
    Red,
}

impl MetricCategory {
    /// Score contributed by this category, or `None` when not evaluated
    #[must_use]
    pub const fn score(self) -> Option<f64> {
        match self {
            Self::NotEvaluated => None,
            Self::Green => Some(GREEN_SCORE),
            Self::Amber => Some(AMBER_SCORE),
            Self::Red => Some(RED_SCORE),
        }
    }
}

/// Categorization result for a single metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricAssessment {
    /// The risk category assigned to the metric
    pub category: MetricCategory,

    /// Hard-stop reason, present only when the Red category was reached via
    /// a designated hard-stop threshold
    pub hard_stop: Option<String>,
}

impl MetricAssessment {
    const fn not_evaluated() -> Self {
        Self {
            category: MetricCategory::NotEvaluated,
            hard_stop: None,
        }
    }

    const fn of(category: MetricCategory) -> Self {
        Self {
            category,
            hard_stop: None,
        }
    }

    fn stopped(reason: String) -> Self {
        Self {
            category: MetricCategory::Red,
            hard_stop: Some(reason),
        }
    }
}

/// Final safety decision label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Conditions are favorable
    #[serde(rename = "GO")]
    Go,
    /// Conditions are marginal; proceed with caution
    #[serde(rename = "MAYBE")]
    Maybe,
    /// Conditions are unsafe or unfavorable
    #[serde(rename = "NO-GO")]
    NoGo,
    /// Only one metric was available; the assessment is unreliable
    #[serde(rename = "INSUFFICIENT DATA")]
    InsufficientData,
    /// No metrics were available at all
    #[serde(rename = "NO DATA")]
    NoData,
}

impl Decision {
    /// The decision label as consumers render it
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::Maybe => "MAYBE",
            Self::NoGo => "NO-GO",
            Self::InsufficientData => "INSUFFICIENT DATA",
            Self::NoData => "NO DATA",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one safety assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    /// The final decision label
    pub decision: Decision,

    /// Composite weighted score, absent only when no metrics were evaluated
    pub weighted_score: Option<f64>,

    /// Hard-stop reasons in evaluation order (wind, thermal, precipitation, UV)
    pub hard_stop_reasons: Vec<String>,

    /// Free-form notes accompanying the decision
    pub notes: String,

    /// Reserved for future per-metric reasoning; always empty today but part
    /// of the serialized contract report consumers read
    pub reasons: Vec<String>,
}

/// Heuristic safety engine
///
/// Holds the injected threshold and weight tables; owns no other state.
/// Evaluation borrows the engine immutably, so a single instance may be
/// shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct SafetyEngine {
    config: SafetyConfig,
}

impl SafetyEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub const fn new(config: SafetyConfig) -> Self {
        Self { config }
    }

    /// Create an engine with the default threshold and weight tables
    #[must_use]
    pub fn with_default_config() -> Self {
        Self::new(SafetyConfig::default())
    }

    /// The configuration this engine was built with
    #[must_use]
    pub const fn config(&self) -> &SafetyConfig {
        &self.config
    }

    /// Categorize wind speed and check for the wind hard stop
    #[must_use]
    pub fn categorize_wind(&self, wind_mph: Option<f64>) -> MetricAssessment {
        let Some(wind) = wind_mph else {
            return MetricAssessment::not_evaluated();
        };
        let thresholds = &self.config.wind;
        if wind >= thresholds.red_mph {
            return MetricAssessment::stopped(format!(
                "Wind speed is at a dangerous level (>= {} mph).",
                thresholds.red_mph
            ));
        }
        if wind >= thresholds.amber_mph {
            return MetricAssessment::of(MetricCategory::Amber);
        }
        MetricAssessment::of(MetricCategory::Green)
    }

    /// Categorize thermal stress (heat and cold) from the felt temperature
    ///
    /// Heat branches are checked before cold branches; the first matching
    /// threshold wins.
    #[must_use]
    pub fn categorize_thermal(&self, feels_like_c: Option<f64>) -> MetricAssessment {
        let Some(felt) = feels_like_c else {
            return MetricAssessment::not_evaluated();
        };
        let thresholds = &self.config.thermal;
        if felt >= thresholds.heat_red_c {
            return MetricAssessment::stopped(format!(
                "Extreme heat warning (feels like >= {}°C).",
                thresholds.heat_red_c
            ));
        }
        if felt >= thresholds.heat_amber_c {
            return MetricAssessment::of(MetricCategory::Amber);
        }
        if felt <= thresholds.cold_red_c {
            return MetricAssessment::stopped(format!(
                "Extreme cold warning (feels like <= {}°C).",
                thresholds.cold_red_c
            ));
        }
        if felt <= thresholds.cold_amber_c {
            return MetricAssessment::of(MetricCategory::Amber);
        }
        MetricAssessment::of(MetricCategory::Green)
    }

    /// Categorize precipitation risk from chance and rate
    ///
    /// Two-stage: the chance gates whether rain matters at all; above the
    /// gate the rate dominates. A high chance with an unknown rate lands on
    /// Amber — never Green, never Red.
    #[must_use]
    pub fn categorize_precip(
        &self,
        chance_pct: Option<f64>,
        rate_mm_hr: Option<f64>,
    ) -> MetricAssessment {
        let Some(chance) = chance_pct else {
            return MetricAssessment::not_evaluated();
        };
        let thresholds = &self.config.precip;
        if chance <= thresholds.low_chance_pct {
            return MetricAssessment::of(MetricCategory::Green);
        }
        let Some(rate) = rate_mm_hr else {
            return MetricAssessment::of(MetricCategory::Amber);
        };
        if rate > thresholds.heavy_rate_mm_hr {
            return MetricAssessment::stopped(format!(
                "Heavy precipitation rate (> {:.1} mm/hr).",
                thresholds.heavy_rate_mm_hr
            ));
        }
        if rate >= thresholds.moderate_rate_mm_hr {
            return MetricAssessment::of(MetricCategory::Amber);
        }
        MetricAssessment::of(MetricCategory::Green)
    }

    /// Categorize UV exposure risk
    ///
    /// A severe UV reading zeroes its score contribution but never attaches
    /// a hard stop: UV alone does not veto an activity.
    #[must_use]
    pub fn categorize_uv(&self, uv_index: Option<f64>) -> MetricAssessment {
        let Some(uv) = uv_index else {
            return MetricAssessment::not_evaluated();
        };
        let thresholds = &self.config.uv;
        if uv >= thresholds.red_index {
            return MetricAssessment::of(MetricCategory::Red);
        }
        if uv >= thresholds.amber_index {
            return MetricAssessment::of(MetricCategory::Amber);
        }
        MetricAssessment::of(MetricCategory::Green)
    }

    /// Run the full safety assessment over one metrics record
    ///
    /// Total over its input domain: any combination of present and absent
    /// readings produces a decision, never an error or panic.
    #[must_use]
    pub fn evaluate(&self, metrics: &WeatherMetrics) -> SafetyAssessment {
        let weights = &self.config.weights;
        // Evaluation order fixes the order of hard-stop reasons.
        let readings = [
            (weights.wind, self.categorize_wind(metrics.wind_mph)),
            (weights.thermal, self.categorize_thermal(metrics.feels_like_c)),
            (
                weights.precipitation,
                self.categorize_precip(metrics.precip_chance_pct, metrics.precip_rate_mm_hr),
            ),
            (weights.uv, self.categorize_uv(metrics.uv_index)),
        ];

        let mut total_score = 0.0;
        let mut evaluated = 0usize;
        let mut hard_stop_reasons = Vec::new();
        for (weight, assessment) in readings {
            if let Some(score) = assessment.category.score() {
                total_score += score * weight;
                evaluated += 1;
            }
            if let Some(reason) = assessment.hard_stop {
                hard_stop_reasons.push(reason);
            }
        }

        if evaluated == 0 {
            return SafetyAssessment {
                decision: Decision::NoData,
                weighted_score: None,
                hard_stop_reasons: Vec::new(),
                notes: "No weather metrics were available for assessment.".into(),
                reasons: Vec::new(),
            };
        }

        let (mut decision, mut notes) = if hard_stop_reasons.is_empty() {
            if total_score >= GO_SCORE_FLOOR {
                (Decision::Go, "Conditions are favorable for your activity.")
            } else if total_score >= MAYBE_SCORE_FLOOR {
                (
                    Decision::Maybe,
                    "Conditions are marginal. Proceed with caution and be prepared for changes.",
                )
            } else {
                (
                    Decision::NoGo,
                    "Conditions are unfavorable. It is not recommended to proceed.",
                )
            }
        } else {
            (
                Decision::NoGo,
                "Assessment resulted in a NO-GO due to one or more hard-stop conditions.",
            )
        };

        // A lone metric is never trusted, however well it scored. A lone
        // dangerous reading, on the other hand, is still actionable.
        if evaluated == 1 && hard_stop_reasons.is_empty() {
            decision = Decision::InsufficientData;
            notes = "Only one weather metric was available. The assessment may not be reliable.";
        }

        SafetyAssessment {
            decision,
            weighted_score: Some(total_score),
            hard_stop_reasons,
            notes: notes.into(),
            reasons: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_scores_are_fixed() {
        assert_eq!(MetricCategory::Green.score(), Some(100.0));
        assert_eq!(MetricCategory::Amber.score(), Some(50.0));
        assert_eq!(MetricCategory::Red.score(), Some(0.0));
        assert_eq!(MetricCategory::NotEvaluated.score(), None);
    }

    #[test]
    fn test_default_hard_stop_texts() {
        let engine = SafetyEngine::with_default_config();
        assert_eq!(
            engine.categorize_wind(Some(40.0)).hard_stop.as_deref(),
            Some("Wind speed is at a dangerous level (>= 32 mph).")
        );
        assert_eq!(
            engine.categorize_thermal(Some(45.0)).hard_stop.as_deref(),
            Some("Extreme heat warning (feels like >= 41°C).")
        );
        assert_eq!(
            engine.categorize_thermal(Some(-30.0)).hard_stop.as_deref(),
            Some("Extreme cold warning (feels like <= -28°C).")
        );
        assert_eq!(
            engine
                .categorize_precip(Some(80.0), Some(5.0))
                .hard_stop
                .as_deref(),
            Some("Heavy precipitation rate (> 4.0 mm/hr).")
        );
    }

    #[test]
    fn test_uv_red_has_no_hard_stop() {
        let engine = SafetyEngine::with_default_config();
        let assessment = engine.categorize_uv(Some(11.0));
        assert_eq!(assessment.category, MetricCategory::Red);
        assert!(assessment.hard_stop.is_none());
    }

    #[test]
    fn test_high_chance_unknown_rate_is_amber() {
        let engine = SafetyEngine::with_default_config();
        let assessment = engine.categorize_precip(Some(60.0), None);
        assert_eq!(assessment.category, MetricCategory::Amber);
        assert!(assessment.hard_stop.is_none());
    }
}
