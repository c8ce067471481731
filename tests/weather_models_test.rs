// ABOUTME: Tests for lean weather payload parsing and engine metric derivation
// ABOUTME: Verifies absence propagation and the felt-temperature aliasing behavior
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use trailguard::models::ForecastPayload;

/// Representative slice of a WeatherAPI.com forecast payload, including
/// fields the lean models deliberately ignore.
const SAMPLE_PAYLOAD: &str = r#"{
    "location": {
        "name": "Chamonix",
        "region": "Auvergne-Rhone-Alpes",
        "country": "France",
        "lat": 45.92,
        "lon": 6.87,
        "tz_id": "Europe/Paris"
    },
    "current": {
        "temp_c": 14.0,
        "feelslike_c": 12.5,
        "wind_mph": 8.1,
        "precip_mm": 0.0,
        "uv": 4.0,
        "humidity": 61,
        "condition": {"text": "Partly cloudy", "code": 1003}
    },
    "forecast": {
        "forecastday": [
            {
                "date": "2025-06-14",
                "day": {
                    "maxtemp_c": 18.2,
                    "mintemp_c": 7.4,
                    "daily_chance_of_rain": 35,
                    "avghumidity": 58
                },
                "hour": [
                    {
                        "temp_c": 9.0,
                        "feelslike_c": 7.2,
                        "wind_mph": 6.9,
                        "precip_mm": 0.1,
                        "uv": 1.0,
                        "time": "2025-06-14 00:00"
                    },
                    {
                        "temp_c": 8.5,
                        "feelslike_c": 6.8,
                        "wind_mph": 7.4,
                        "precip_mm": 0.0,
                        "uv": 1.0,
                        "time": "2025-06-14 01:00"
                    }
                ]
            }
        ]
    }
}"#;

#[test]
fn test_lean_parse_of_forecast_payload() {
    let payload: ForecastPayload = serde_json::from_str(SAMPLE_PAYLOAD).unwrap();
    assert_eq!(payload.location.name, "Chamonix");
    assert_eq!(payload.location.country, "France");
    assert_eq!(payload.forecast.forecastday.len(), 1);

    let day = &payload.forecast.forecastday[0];
    assert_eq!(day.date.to_string(), "2025-06-14");
    assert_eq!(day.day.daily_chance_of_rain, Some(35.0));
    assert_eq!(day.hour.len(), 2);
}

#[test]
fn test_snapshot_prefers_first_forecast_hour() {
    let payload: ForecastPayload = serde_json::from_str(SAMPLE_PAYLOAD).unwrap();
    let snapshot = payload.into_snapshot().unwrap();
    // The first hour of the forecast day stands in for "current".
    assert_eq!(snapshot.current.temp_c, Some(9.0));
    assert_eq!(snapshot.current.feelslike_c, Some(7.2));
    assert!(snapshot.forecast_day.hour.is_empty());
}

#[test]
fn test_snapshot_falls_back_to_current_block() {
    let payload: ForecastPayload = serde_json::from_str(
        r#"{
            "location": {"name": "Oslo", "region": "", "country": "Norway"},
            "current": {"temp_c": 3.0, "feelslike_c": -1.0, "wind_mph": 12.0, "precip_mm": 0.2, "uv": 1.0},
            "forecast": {"forecastday": [{"date": "2025-11-02", "day": {"daily_chance_of_rain": 70}}]}
        }"#,
    )
    .unwrap();
    let snapshot = payload.into_snapshot().unwrap();
    assert_eq!(snapshot.current.feelslike_c, Some(-1.0));
    assert_eq!(snapshot.forecast_day.day.maxtemp_c, None);
}

#[test]
fn test_payload_without_forecast_days_yields_no_snapshot() {
    let payload: ForecastPayload = serde_json::from_str(
        r#"{"location": {"name": "Nowhere", "region": "", "country": ""}}"#,
    )
    .unwrap();
    assert!(payload.into_snapshot().is_none());
}

#[test]
fn test_metrics_derivation_preserves_felt_temperature_aliasing() {
    let payload: ForecastPayload = serde_json::from_str(SAMPLE_PAYLOAD).unwrap();
    let snapshot = payload.into_snapshot().unwrap();
    let metrics = snapshot.to_metrics();

    // The single thermal signal comes from feels-like, not air temperature.
    assert_eq!(metrics.feels_like_c, Some(7.2));
    assert_ne!(metrics.feels_like_c, snapshot.current.temp_c);

    assert_eq!(metrics.wind_mph, Some(6.9));
    assert_eq!(metrics.precip_chance_pct, Some(35.0));
    assert_eq!(metrics.precip_rate_mm_hr, Some(0.1));
    assert_eq!(metrics.uv_index, Some(1.0));
}

#[test]
fn test_missing_readings_stay_absent_in_metrics() {
    let payload: ForecastPayload = serde_json::from_str(
        r#"{
            "location": {"name": "Sparse", "region": "", "country": ""},
            "forecast": {"forecastday": [{
                "date": "2025-03-01",
                "day": {},
                "hour": [{"temp_c": 10.0}]
            }]}
        }"#,
    )
    .unwrap();
    let snapshot = payload.into_snapshot().unwrap();
    let metrics = snapshot.to_metrics();

    // Absent readings must never arrive as zero.
    assert_eq!(metrics.wind_mph, None);
    assert_eq!(metrics.feels_like_c, None);
    assert_eq!(metrics.precip_chance_pct, None);
    assert_eq!(metrics.precip_rate_mm_hr, None);
    assert_eq!(metrics.uv_index, None);
}
