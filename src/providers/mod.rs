// ABOUTME: External data provider clients consumed by the assessment pipeline
// ABOUTME: Currently a single weather forecast provider; the module mirrors a provider-per-file layout
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

//! External data providers

/// WeatherAPI.com forecast client
pub mod weather;

pub use weather::{WeatherApiClient, WeatherApiConfig};
