// ABOUTME: Unit tests for the safety configuration tables
// ABOUTME: Validates defaults, weight/threshold validation, and environment overrides
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use trailguard::config::SafetyConfig;

#[test]
fn test_default_config_validates() {
    let config = SafetyConfig::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_tables_match_documented_values() {
    let config = SafetyConfig::default();
    assert!((config.wind.amber_mph - 20.0).abs() < f64::EPSILON);
    assert!((config.wind.red_mph - 32.0).abs() < f64::EPSILON);
    assert!((config.thermal.heat_amber_c - 27.0).abs() < f64::EPSILON);
    assert!((config.thermal.heat_red_c - 41.0).abs() < f64::EPSILON);
    assert!((config.thermal.cold_amber_c - -10.0).abs() < f64::EPSILON);
    assert!((config.thermal.cold_red_c - -28.0).abs() < f64::EPSILON);
    assert!((config.precip.low_chance_pct - 20.0).abs() < f64::EPSILON);
    assert!((config.precip.moderate_rate_mm_hr - 0.5).abs() < f64::EPSILON);
    assert!((config.precip.heavy_rate_mm_hr - 4.0).abs() < f64::EPSILON);
    assert!((config.uv.amber_index - 3.0).abs() < f64::EPSILON);
    assert!((config.uv.red_index - 8.0).abs() < f64::EPSILON);

    let weights = &config.weights;
    let sum = weights.wind + weights.thermal + weights.precipitation + weights.uv;
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn test_invalid_weight_sum_is_rejected() {
    let mut config = SafetyConfig::default();
    config.weights.wind = 0.8;
    assert!(config.validate().is_err());
}

#[test]
fn test_out_of_range_weight_is_rejected() {
    let mut config = SafetyConfig::default();
    config.weights.uv = -0.05;
    config.weights.wind = 0.30;
    assert!(config.validate().is_err());
}

#[test]
fn test_inverted_wind_thresholds_are_rejected() {
    let mut config = SafetyConfig::default();
    config.wind.amber_mph = 40.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_inverted_cold_thresholds_are_rejected() {
    let mut config = SafetyConfig::default();
    config.thermal.cold_amber_c = -30.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_inverted_precip_rates_are_rejected() {
    let mut config = SafetyConfig::default();
    config.precip.moderate_rate_mm_hr = 5.0;
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn test_environment_overrides_are_applied() {
    std::env::set_var("TRAILGUARD_WIND_RED_MPH", "40");
    std::env::set_var("TRAILGUARD_UV_AMBER", "4.5");

    let config = SafetyConfig::from_env().unwrap();
    assert!((config.wind.red_mph - 40.0).abs() < f64::EPSILON);
    assert!((config.uv.amber_index - 4.5).abs() < f64::EPSILON);

    std::env::remove_var("TRAILGUARD_WIND_RED_MPH");
    std::env::remove_var("TRAILGUARD_UV_AMBER");
}

#[test]
#[serial]
fn test_unparsable_environment_override_is_an_error() {
    std::env::set_var("TRAILGUARD_WIND_RED_MPH", "gusty");
    assert!(SafetyConfig::from_env().is_err());
    std::env::remove_var("TRAILGUARD_WIND_RED_MPH");
}

#[test]
#[serial]
fn test_inconsistent_environment_override_fails_validation() {
    // Red below the default amber of 20.
    std::env::set_var("TRAILGUARD_WIND_RED_MPH", "10");
    assert!(SafetyConfig::from_env().is_err());
    std::env::remove_var("TRAILGUARD_WIND_RED_MPH");
}
