// ABOUTME: Configuration module for the Trailguard safety engine
// ABOUTME: Re-exports the injected threshold/weight tables and their validation errors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

//! Configuration for the safety engine: threshold tables and metric weights,
//! injected at engine construction rather than read from globals.

mod safety;

pub use safety::{
    MetricWeights, PrecipThresholds, SafetyConfig, SafetyConfigError, ThermalThresholds,
    UvThresholds, WindThresholds,
};
