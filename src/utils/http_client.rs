// ABOUTME: HTTP client construction with explicit timeout configuration
// ABOUTME: Keeps transport defaults in one place for all outbound API clients
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Build an HTTP client with the given request and connection timeouts
///
/// Falls back to a default client if the builder fails, so callers always
/// get a usable client.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}
