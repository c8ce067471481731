// ABOUTME: Small shared utilities used across the crate
// ABOUTME: HTTP client construction and user input sanitization
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

//! Shared utilities

/// HTTP client construction helpers
pub mod http_client;

/// User input sanitization
pub mod validation;
