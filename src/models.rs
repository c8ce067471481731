// ABOUTME: Lean weather domain models shared between the provider client, engine, and reports
// ABOUTME: Deserializes the subset of the forecast payload the assessment actually consumes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

//! Weather domain models
//!
//! Only the fields the assessment pipeline consumes are modeled; everything
//! else in the provider payload is ignored at deserialization. Readings that
//! may be missing from the payload stay `Option` all the way through — an
//! absent reading must reach the engine as "not evaluated", never as zero.

use crate::engine::WeatherMetrics;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Resolved place a forecast applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Place name as resolved by the provider
    pub name: String,
    /// Administrative region
    #[serde(default)]
    pub region: String,
    /// Country
    #[serde(default)]
    pub country: String,
}

/// Point-in-time conditions, either "current" or the first forecast hour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature in degrees Celsius
    pub temp_c: Option<f64>,
    /// Felt temperature in degrees Celsius
    pub feelslike_c: Option<f64>,
    /// Wind speed in miles per hour
    pub wind_mph: Option<f64>,
    /// Precipitation in millimetres
    pub precip_mm: Option<f64>,
    /// UV index
    pub uv: Option<f64>,
}

/// Day-level forecast summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    /// Daily maximum temperature in degrees Celsius
    pub maxtemp_c: Option<f64>,
    /// Daily minimum temperature in degrees Celsius
    pub mintemp_c: Option<f64>,
    /// Chance of rain for the day as a percentage
    pub daily_chance_of_rain: Option<f64>,
}

/// One forecast day with its hourly breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// The calendar date this entry covers
    pub date: NaiveDate,
    /// Day-level summary values
    pub day: DaySummary,
    /// Hourly conditions; the first hour stands in for "current" when
    /// assessing a future date
    #[serde(default)]
    pub hour: Vec<CurrentConditions>,
}

/// Forecast section of the provider payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Forecast days, one entry per requested day
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

/// Raw (lean) provider forecast payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastPayload {
    /// Resolved location
    pub location: Location,
    /// Present-moment conditions; absent when the provider only returns a
    /// forecast for the requested date
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    /// Forecast days
    #[serde(default)]
    pub forecast: Forecast,
}

impl ForecastPayload {
    /// Collapse the payload into a [`WeatherSnapshot`]
    ///
    /// The first forecast hour is preferred over the provider's "current"
    /// block so that assessments of a future date describe that date rather
    /// than the present moment. Returns `None` when the payload carries no
    /// forecast days at all.
    #[must_use]
    pub fn into_snapshot(self) -> Option<WeatherSnapshot> {
        let day = self.forecast.forecastday.first()?.clone();
        let current = day
            .hour
            .first()
            .cloned()
            .or(self.current)
            .unwrap_or_default();
        Some(WeatherSnapshot {
            location: self.location,
            current,
            forecast_day: ForecastDay {
                date: day.date,
                day: day.day,
                hour: Vec::new(),
            },
        })
    }
}

/// The weather picture one assessment runs against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Resolved location
    pub location: Location,
    /// Conditions at the assessed time
    pub current: CurrentConditions,
    /// Day-level forecast for the assessed date
    pub forecast_day: ForecastDay,
}

impl WeatherSnapshot {
    /// Derive the engine's metric record from this snapshot
    ///
    /// The felt temperature feeds the engine's single thermal-stress signal;
    /// the provider's heat-index and wind-chill fields always carry the same
    /// reading, so only one is consumed. The day's chance of rain stands in
    /// for probability of precipitation and the point precipitation amount
    /// for the rate.
    #[must_use]
    pub fn to_metrics(&self) -> WeatherMetrics {
        WeatherMetrics {
            wind_mph: self.current.wind_mph,
            feels_like_c: self.current.feelslike_c,
            precip_chance_pct: self.forecast_day.day.daily_chance_of_rain,
            precip_rate_mm_hr: self.current.precip_mm,
            uv_index: self.current.uv,
        }
    }
}
