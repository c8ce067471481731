// ABOUTME: Explanation service turning safety assessments into narrative advice
// ABOUTME: Calls an LLM provider with the advisor prompt and degrades to canned text on failure
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::prompts::{advisor_prompt, fallback_explanation};
use super::{ChatMessage, ChatRequest, LlmProvider};
use crate::engine::{Decision, SafetyAssessment};
use crate::errors::{AppError, AppResult};
use crate::models::WeatherSnapshot;

/// Maximum number of words accepted in a model explanation
pub const MAX_EXPLANATION_WORDS: usize = 350;

/// Where an explanation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    /// Generated by the configured LLM provider
    Model,
    /// Canned text keyed off the decision label
    Fallback,
}

/// Narrative explanation attached to an assessment report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    /// The explanation text
    pub text: String,
    /// Whether a model produced the text or a canned fallback was used
    pub source: ExplanationSource,
}

impl Explanation {
    /// The canned explanation for a decision
    #[must_use]
    pub fn fallback(decision: Decision) -> Self {
        Self {
            text: fallback_explanation(decision).to_owned(),
            source: ExplanationSource::Fallback,
        }
    }
}

/// Generates assessment explanations through an LLM provider
///
/// The service never fails: any provider error, and any reply that fails
/// validation, degrades to the canned fallback for the assessment's
/// decision. A rate-limited or unreachable provider therefore delays
/// nothing downstream.
pub struct ExplanationService {
    provider: Box<dyn LlmProvider>,
}

impl ExplanationService {
    /// Create a service around a provider
    #[must_use]
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Generate an explanation for one assessment
    pub async fn explain(
        &self,
        snapshot: &WeatherSnapshot,
        assessment: &SafetyAssessment,
    ) -> Explanation {
        let prompt = advisor_prompt(snapshot, assessment);
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

        match self.provider.complete(&request).await {
            Ok(response) => match validate_reply(&response.content) {
                Ok(text) => Explanation {
                    text,
                    source: ExplanationSource::Model,
                },
                Err(e) => {
                    warn!(
                        provider = self.provider.name(),
                        error = %e,
                        "Explanation reply rejected, using fallback"
                    );
                    Explanation::fallback(assessment.decision)
                }
            },
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Explanation request failed, using fallback"
                );
                Explanation::fallback(assessment.decision)
            }
        }
    }
}

/// Validate a model reply before it reaches the report
///
/// # Errors
///
/// Rejects empty/whitespace replies and replies longer than
/// [`MAX_EXPLANATION_WORDS`] words.
fn validate_reply(content: &str) -> AppResult<String> {
    let text = content.trim();
    if text.is_empty() {
        return Err(AppError::invalid_input("explanation is empty"));
    }
    let word_count = text.split_whitespace().count();
    if word_count > MAX_EXPLANATION_WORDS {
        return Err(AppError::invalid_input(format!(
            "explanation exceeds {MAX_EXPLANATION_WORDS} words (count: {word_count})"
        )));
    }
    Ok(text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_reply() {
        assert!(validate_reply("   \n").is_err());
    }

    #[test]
    fn test_rejects_overlong_reply() {
        let long = "word ".repeat(MAX_EXPLANATION_WORDS + 1);
        assert!(validate_reply(&long).is_err());
    }

    #[test]
    fn test_accepts_and_trims_normal_reply() {
        let text = validate_reply("  a short explanation  ").unwrap();
        assert_eq!(text, "a short explanation");
    }
}
