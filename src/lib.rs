// ABOUTME: Main library entry point for the Trailguard weather safety platform
// ABOUTME: Exposes the heuristic safety engine plus weather, LLM, and reporting collaborators
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

#![deny(unsafe_code)]

//! # Trailguard
//!
//! Trailguard answers one question: is the weather safe enough for your
//! outdoor activity? It fetches a forecast, runs a deterministic heuristic
//! safety assessment over a handful of weather metrics, asks an LLM for a
//! human explanation of the verdict, and assembles everything into a
//! persisted report.
//!
//! ## Architecture
//!
//! - **Engine**: pure, synchronous decision logic mapping weather metrics to
//!   a GO / MAYBE / NO-GO verdict with hard-stop overrides
//! - **Config**: injected threshold and weight tables for the engine
//! - **Providers**: WeatherAPI.com forecast client
//! - **LLM**: pluggable chat providers (Gemini) generating verdict
//!   explanations, with canned fallbacks
//! - **Reports**: assessment report assembly, text rendering, and a JSON
//!   file log
//!
//! ## Example
//!
//! ```rust
//! use trailguard::config::SafetyConfig;
//! use trailguard::engine::{SafetyEngine, WeatherMetrics};
//!
//! let engine = SafetyEngine::new(SafetyConfig::default());
//! let metrics = WeatherMetrics {
//!     wind_mph: Some(5.0),
//!     feels_like_c: Some(20.0),
//!     precip_chance_pct: Some(10.0),
//!     precip_rate_mm_hr: Some(0.0),
//!     uv_index: Some(1.0),
//! };
//! let assessment = engine.evaluate(&metrics);
//! println!("{}", assessment.decision);
//! ```

/// Injected configuration for the safety engine
pub mod config;

/// Heuristic safety decision engine
pub mod engine;

/// Unified error envelope shared by all fallible collaborators
pub mod errors;

/// LLM providers and explanation generation
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Weather domain models shared across modules
pub mod models;

/// External data provider clients
pub mod providers;

/// Assessment report assembly, rendering, and file logging
pub mod reports;

/// Small shared utilities (HTTP client construction, input sanitization)
pub mod utils;
