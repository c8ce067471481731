// ABOUTME: Configuration-driven thresholds and weights for the safety engine replacing magic numbers
// ABOUTME: Provides type-safe, environment-configurable parameters for metric categorization and scoring
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Safety configuration errors
#[derive(Debug, Error)]
pub enum SafetyConfigError {
    /// A threshold table is internally inconsistent
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// The metric weights are out of range or do not sum to 1.0
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// An environment override could not be parsed as a number
    #[error("Invalid value for {0}: {1}")]
    InvalidEnvValue(&'static str, String),
}

/// Wind speed thresholds in miles per hour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindThresholds {
    /// Wind speed at or above which conditions are moderately risky
    pub amber_mph: f64,

    /// Wind speed at or above which activity must not proceed (hard stop)
    pub red_mph: f64,
}

/// Felt-temperature thresholds in degrees Celsius
///
/// One felt-temperature signal covers both heat and cold stress; the heat
/// branch is checked before the cold branch, first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermalThresholds {
    /// Felt temperature at or above which heat stress is moderate
    pub heat_amber_c: f64,

    /// Felt temperature at or above which heat is dangerous (hard stop)
    pub heat_red_c: f64,

    /// Felt temperature at or below which cold stress is moderate
    pub cold_amber_c: f64,

    /// Felt temperature at or below which cold is dangerous (hard stop)
    pub cold_red_c: f64,
}

/// Precipitation thresholds: chance gate plus rate bands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecipThresholds {
    /// Chance of rain (percent) at or below which rain risk is ignored
    pub low_chance_pct: f64,

    /// Rate (mm/hr) at or above which rain is a moderate risk
    pub moderate_rate_mm_hr: f64,

    /// Rate (mm/hr) strictly above which rain is dangerous (hard stop)
    pub heavy_rate_mm_hr: f64,
}

/// UV index thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UvThresholds {
    /// UV index at or above which exposure risk is moderate
    pub amber_index: f64,

    /// UV index at or above which exposure risk is severe
    ///
    /// UV never produces a hard stop: a severe reading zeroes its score
    /// contribution but does not veto the activity on its own.
    pub red_index: f64,
}

/// Weights for combining metric scores into the composite safety score
///
/// Weights must sum to 1.0. Missing metrics contribute zero weight and zero
/// score; the composite is never renormalized over the metrics present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricWeights {
    /// Weight for the wind metric (0.0-1.0)
    pub wind: f64,
    /// Weight for the thermal-stress metric (0.0-1.0)
    pub thermal: f64,
    /// Weight for the precipitation metric (0.0-1.0)
    pub precipitation: f64,
    /// Weight for the UV metric (0.0-1.0)
    pub uv: f64,
}

/// Main safety engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Wind thresholds
    pub wind: WindThresholds,
    /// Thermal-stress thresholds
    pub thermal: ThermalThresholds,
    /// Precipitation thresholds
    pub precip: PrecipThresholds,
    /// UV thresholds
    pub uv: UvThresholds,
    /// Metric weights
    pub weights: MetricWeights,
}

impl Default for WindThresholds {
    fn default() -> Self {
        Self {
            amber_mph: 20.0,
            red_mph: 32.0,
        }
    }
}

impl Default for ThermalThresholds {
    fn default() -> Self {
        Self {
            heat_amber_c: 27.0,
            heat_red_c: 41.0,
            cold_amber_c: -10.0,
            cold_red_c: -28.0,
        }
    }
}

impl Default for PrecipThresholds {
    fn default() -> Self {
        Self {
            low_chance_pct: 20.0,
            moderate_rate_mm_hr: 0.5,
            heavy_rate_mm_hr: 4.0,
        }
    }
}

impl Default for UvThresholds {
    fn default() -> Self {
        Self {
            amber_index: 3.0,
            red_index: 8.0,
        }
    }
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            wind: 0.20,
            thermal: 0.35,
            precipitation: 0.40,
            uv: 0.05,
        }
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            wind: WindThresholds::default(),
            thermal: ThermalThresholds::default(),
            precip: PrecipThresholds::default(),
            uv: UvThresholds::default(),
            weights: MetricWeights::default(),
        }
    }
}

/// Tolerance when checking that weights sum to 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

impl SafetyConfig {
    /// Load configuration from environment variables
    ///
    /// Starts from [`SafetyConfig::default`] and applies any `TRAILGUARD_*`
    /// overrides, then validates the result. Supported variables:
    ///
    /// - `TRAILGUARD_WIND_AMBER_MPH`, `TRAILGUARD_WIND_RED_MPH`
    /// - `TRAILGUARD_HEAT_AMBER_C`, `TRAILGUARD_HEAT_RED_C`,
    ///   `TRAILGUARD_COLD_AMBER_C`, `TRAILGUARD_COLD_RED_C`
    /// - `TRAILGUARD_PRECIP_LOW_CHANCE_PCT`,
    ///   `TRAILGUARD_PRECIP_MODERATE_RATE`, `TRAILGUARD_PRECIP_HEAVY_RATE`
    /// - `TRAILGUARD_UV_AMBER`, `TRAILGUARD_UV_RED`
    /// - `TRAILGUARD_WEIGHT_WIND`, `TRAILGUARD_WEIGHT_THERMAL`,
    ///   `TRAILGUARD_WEIGHT_PRECIP`, `TRAILGUARD_WEIGHT_UV`
    ///
    /// # Errors
    ///
    /// Returns an error if an override is set but not a valid number, or if
    /// the resulting configuration fails [`SafetyConfig::validate`].
    pub fn from_env() -> Result<Self, SafetyConfigError> {
        let mut config = Self::default();

        apply_env_override("TRAILGUARD_WIND_AMBER_MPH", &mut config.wind.amber_mph)?;
        apply_env_override("TRAILGUARD_WIND_RED_MPH", &mut config.wind.red_mph)?;
        apply_env_override("TRAILGUARD_HEAT_AMBER_C", &mut config.thermal.heat_amber_c)?;
        apply_env_override("TRAILGUARD_HEAT_RED_C", &mut config.thermal.heat_red_c)?;
        apply_env_override("TRAILGUARD_COLD_AMBER_C", &mut config.thermal.cold_amber_c)?;
        apply_env_override("TRAILGUARD_COLD_RED_C", &mut config.thermal.cold_red_c)?;
        apply_env_override(
            "TRAILGUARD_PRECIP_LOW_CHANCE_PCT",
            &mut config.precip.low_chance_pct,
        )?;
        apply_env_override(
            "TRAILGUARD_PRECIP_MODERATE_RATE",
            &mut config.precip.moderate_rate_mm_hr,
        )?;
        apply_env_override(
            "TRAILGUARD_PRECIP_HEAVY_RATE",
            &mut config.precip.heavy_rate_mm_hr,
        )?;
        apply_env_override("TRAILGUARD_UV_AMBER", &mut config.uv.amber_index)?;
        apply_env_override("TRAILGUARD_UV_RED", &mut config.uv.red_index)?;
        apply_env_override("TRAILGUARD_WEIGHT_WIND", &mut config.weights.wind)?;
        apply_env_override("TRAILGUARD_WEIGHT_THERMAL", &mut config.weights.thermal)?;
        apply_env_override(
            "TRAILGUARD_WEIGHT_PRECIP",
            &mut config.weights.precipitation,
        )?;
        apply_env_override("TRAILGUARD_WEIGHT_UV", &mut config.weights.uv)?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for internal consistency
    ///
    /// # Errors
    ///
    /// Returns an error if any weight is outside `[0, 1]`, the weights do
    /// not sum to 1.0, or a threshold table is inverted.
    pub fn validate(&self) -> Result<(), SafetyConfigError> {
        let weights = [
            ("wind", self.weights.wind),
            ("thermal", self.weights.thermal),
            ("precipitation", self.weights.precipitation),
            ("uv", self.weights.uv),
        ];
        for (name, weight) in weights {
            if !(0.0..=1.0).contains(&weight) {
                return Err(SafetyConfigError::InvalidWeights(format!(
                    "{name} weight must be between 0 and 1, got {weight}"
                )));
            }
        }
        let sum: f64 = weights.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(SafetyConfigError::InvalidWeights(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }

        if self.wind.amber_mph >= self.wind.red_mph {
            return Err(SafetyConfigError::InvalidThreshold(
                "wind amber_mph must be below red_mph".into(),
            ));
        }
        if self.thermal.heat_amber_c >= self.thermal.heat_red_c {
            return Err(SafetyConfigError::InvalidThreshold(
                "thermal heat_amber_c must be below heat_red_c".into(),
            ));
        }
        if self.thermal.cold_amber_c <= self.thermal.cold_red_c {
            return Err(SafetyConfigError::InvalidThreshold(
                "thermal cold_amber_c must be above cold_red_c".into(),
            ));
        }
        if self.thermal.heat_amber_c <= self.thermal.cold_amber_c {
            return Err(SafetyConfigError::InvalidThreshold(
                "thermal heat_amber_c must be above cold_amber_c".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.precip.low_chance_pct) {
            return Err(SafetyConfigError::InvalidThreshold(
                "precip low_chance_pct must be a percentage".into(),
            ));
        }
        if self.precip.moderate_rate_mm_hr >= self.precip.heavy_rate_mm_hr {
            return Err(SafetyConfigError::InvalidThreshold(
                "precip moderate_rate_mm_hr must be below heavy_rate_mm_hr".into(),
            ));
        }
        if self.uv.amber_index >= self.uv.red_index {
            return Err(SafetyConfigError::InvalidThreshold(
                "uv amber_index must be below red_index".into(),
            ));
        }

        Ok(())
    }
}

/// Replace `target` with the parsed value of `key` when the variable is set
fn apply_env_override(key: &'static str, target: &mut f64) -> Result<(), SafetyConfigError> {
    if let Ok(raw) = env::var(key) {
        *target = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| SafetyConfigError::InvalidEnvValue(key, raw))?;
    }
    Ok(())
}
