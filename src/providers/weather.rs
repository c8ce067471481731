// ABOUTME: WeatherAPI.com forecast client with caching and uniform error mapping
// ABOUTME: Fetches one-day forecasts and collapses them into lean weather snapshots
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

//! Weather provider client
//!
//! Fetches a one-day forecast from WeatherAPI.com and returns the lean
//! [`WeatherSnapshot`] the rest of the pipeline consumes. All transport and
//! provider failures are translated into the [`AppError`] envelope here —
//! callers never see a raw `reqwest` error.

use crate::errors::{AppError, AppResult};
use crate::models::{ForecastPayload, WeatherSnapshot};
use crate::utils::http_client::create_client_with_timeout;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Environment variable holding the WeatherAPI.com key
const WEATHER_API_KEY_ENV: &str = "WEATHERAPI_KEY";

/// Weather API client configuration
#[derive(Debug, Clone)]
pub struct WeatherApiConfig {
    /// Base URL of the weather API
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// How long a fetched forecast stays valid in the in-memory cache
    pub cache_ttl_secs: u64,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weatherapi.com/v1".into(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
            cache_ttl_secs: 3600,
        }
    }
}

/// Error body returned by WeatherAPI.com on 4xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

/// Cached snapshot with its fetch time
#[derive(Debug, Clone)]
struct CachedSnapshot {
    snapshot: WeatherSnapshot,
    fetched_at: Instant,
}

/// WeatherAPI.com forecast client
pub struct WeatherApiClient {
    /// HTTP client for forecast requests
    client: Client,
    /// Client configuration
    config: WeatherApiConfig,
    /// API key for the weather service
    api_key: String,
    /// In-memory cache of recent forecasts
    cache: HashMap<String, CachedSnapshot>,
}

impl WeatherApiClient {
    /// Create a client with an explicit API key and configuration
    #[must_use]
    pub fn new(api_key: impl Into<String>, config: WeatherApiConfig) -> Self {
        Self {
            client: create_client_with_timeout(
                config.request_timeout_secs,
                config.connect_timeout_secs,
            ),
            config,
            api_key: api_key.into(),
            cache: HashMap::new(),
        }
    }

    /// Create a client from the `WEATHERAPI_KEY` environment variable
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG_MISSING` envelope if the variable is not set or is
    /// blank.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(WEATHER_API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                AppError::config_missing(format!(
                    "{WEATHER_API_KEY_ENV} environment variable is not set"
                ))
            })?;
        Ok(Self::new(api_key, WeatherApiConfig::default()))
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &WeatherApiConfig {
        &self.config
    }

    /// Fetch the forecast snapshot for a location and optional date
    ///
    /// A fresh cache entry for the same (location, date) pair is returned
    /// without touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error envelope when the service is unreachable, rejects
    /// the request, or returns a payload with no forecast for the date.
    pub async fn fetch_forecast(
        &mut self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> AppResult<WeatherSnapshot> {
        let cache_key = format!(
            "{}|{}",
            location.to_lowercase(),
            date.map_or_else(|| "today".into(), |d| d.to_string())
        );
        if let Some(cached) = self.cache.get(&cache_key) {
            if cached.fetched_at.elapsed() < Duration::from_secs(self.config.cache_ttl_secs) {
                debug!(location, "Serving forecast from cache");
                return Ok(cached.snapshot.clone());
            }
        }

        let snapshot = self.fetch_from_api(location, date).await?;
        let evicted = self.cache.insert(
            cache_key,
            CachedSnapshot {
                snapshot: snapshot.clone(),
                fetched_at: Instant::now(),
            },
        );
        if evicted.is_some() {
            debug!(location, "Replaced stale forecast cache entry");
        }
        Ok(snapshot)
    }

    /// Perform the actual forecast request
    async fn fetch_from_api(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> AppResult<WeatherSnapshot> {
        let url = format!("{}/forecast.json", self.config.base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("key", self.api_key.clone()),
            ("q", location.to_owned()),
            ("days", "1".into()),
            ("aqi", "no".into()),
        ];
        if let Some(date) = date {
            query.push(("dt", date.to_string()));
        }

        debug!(location, ?date, "Fetching forecast from weather service");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Weather service request failed");
                if e.is_timeout() {
                    AppError::external_unavailable(
                        "The request to the weather service timed out.",
                    )
                    .with_source(e)
                } else if e.is_connect() {
                    AppError::external_unavailable("Could not connect to the weather service.")
                        .with_source(e)
                } else {
                    AppError::external_service("weather service", e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service("weather service", "failed to read response body")
                .with_source(e)
        })?;

        if !status.is_success() {
            return Err(Self::map_status_error(status, &body));
        }

        let payload: ForecastPayload = serde_json::from_str(&body).map_err(|e| {
            AppError::new(
                crate::errors::ErrorCode::SerializationError,
                format!("unexpected weather payload: {e}"),
            )
        })?;

        payload.into_snapshot().ok_or_else(|| {
            AppError::not_found("No forecast data available for the selected date.")
        })
    }

    /// Map a non-success HTTP status to the uniform error envelope
    fn map_status_error(status: StatusCode, body: &str) -> AppError {
        match status.as_u16() {
            401 => AppError::external_auth(
                "Authentication with the weather service failed. Check your API key.",
            ),
            403 => AppError::new(
                crate::errors::ErrorCode::PermissionDenied,
                "Access to the requested weather resource is forbidden.",
            ),
            400 => {
                let detail = serde_json::from_str::<ApiErrorBody>(body)
                    .map(|b| b.error)
                    .unwrap_or_else(|_| ApiErrorDetail {
                        code: None,
                        message: "Unknown error".into(),
                    });
                AppError::invalid_input(format!(
                    "Bad request to weather service (code {}): {}",
                    detail.code.map_or_else(|| "?".into(), |c| c.to_string()),
                    detail.message
                ))
            }
            429 => {
                AppError::rate_limited("Weather service rate limit exceeded. Try again shortly.")
            }
            _ => AppError::external_service(
                "weather service",
                format!("unexpected status {status}"),
            ),
        }
    }
}
