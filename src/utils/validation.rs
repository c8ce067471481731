// ABOUTME: Sanitization of free-text user input before it reaches external services
// ABOUTME: Strips everything outside a conservative location-name character set
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

use regex::Regex;
use std::sync::OnceLock;

static DISALLOWED: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)] // literal character class, compiles unconditionally
fn disallowed_pattern() -> &'static Regex {
    DISALLOWED.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s,-]").expect("literal pattern"))
}

/// Sanitize a location query before it is sent to the weather service
///
/// Keeps letters, digits, spaces, commas, and hyphens; everything else is
/// removed and the result trimmed. An input of nothing but disallowed
/// characters collapses to an empty string, which callers reject.
#[must_use]
pub fn sanitize_location_input(location: &str) -> String {
    disallowed_pattern()
        .replace_all(location, "")
        .trim()
        .to_owned()
}
