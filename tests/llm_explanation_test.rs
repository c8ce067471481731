// ABOUTME: Tests for explanation prompt construction and the fallback behavior
// ABOUTME: Uses a stub provider to exercise the service without network access
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use async_trait::async_trait;
use trailguard::engine::{Decision, SafetyEngine, WeatherMetrics};
use trailguard::errors::AppError;
use trailguard::llm::{
    prompts, ChatRequest, ChatResponse, Explanation, ExplanationService, ExplanationSource,
    LlmProvider, MAX_EXPLANATION_WORDS,
};
use trailguard::models::{
    CurrentConditions, DaySummary, ForecastDay, Location, WeatherSnapshot,
};

/// Stub provider returning a fixed reply or a fixed error
struct StubProvider {
    reply: Result<String, ()>,
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn display_name(&self) -> &'static str {
        "Stub Provider"
    }

    fn default_model(&self) -> &str {
        "stub-1"
    }

    fn available_models(&self) -> &'static [&'static str] {
        &["stub-1"]
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        match &self.reply {
            Ok(text) => Ok(ChatResponse {
                content: text.clone(),
                model: "stub-1".into(),
                usage: None,
                finish_reason: Some("STOP".into()),
            }),
            Err(()) => Err(AppError::rate_limited("stub limit")),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

fn snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        location: Location {
            name: "Banff".into(),
            region: "Alberta".into(),
            country: "Canada".into(),
        },
        current: CurrentConditions {
            temp_c: Some(18.0),
            feelslike_c: Some(17.0),
            wind_mph: Some(9.0),
            precip_mm: Some(0.0),
            uv: Some(6.0),
        },
        forecast_day: ForecastDay {
            date: "2025-07-01".parse().unwrap(),
            day: DaySummary {
                maxtemp_c: Some(22.0),
                mintemp_c: Some(9.0),
                daily_chance_of_rain: Some(15.0),
            },
            hour: Vec::new(),
        },
    }
}

#[test]
fn test_prompt_embeds_assessment_verbatim() {
    let snapshot = snapshot();
    let assessment = SafetyEngine::with_default_config().evaluate(&snapshot.to_metrics());
    let prompt = prompts::advisor_prompt(&snapshot, &assessment);

    assert!(prompt.contains("- Location: Banff"));
    assert!(prompt.contains(&format!("- Decision: {}", assessment.decision)));
    assert!(prompt.contains(&format!("- Notes: {}", assessment.notes)));
    let score = assessment.weighted_score.unwrap();
    assert!(prompt.contains(&format!("- Safety Score: {score:.1}/100")));
}

#[test]
fn test_prompt_lists_hard_stop_warnings() {
    let snapshot = snapshot();
    let assessment = SafetyEngine::with_default_config().evaluate(&WeatherMetrics {
        wind_mph: Some(40.0),
        feels_like_c: Some(20.0),
        ..WeatherMetrics::default()
    });
    let prompt = prompts::advisor_prompt(&snapshot, &assessment);
    assert!(prompt.contains("Hard-Stop Warnings:"));
    assert!(prompt.contains("Wind speed is at a dangerous level (>= 32 mph)."));
}

#[test]
fn test_prompt_renders_missing_readings_as_na() {
    let mut snapshot = snapshot();
    snapshot.current.uv = None;
    snapshot.current.wind_mph = None;
    let assessment = SafetyEngine::with_default_config().evaluate(&snapshot.to_metrics());
    let prompt = prompts::advisor_prompt(&snapshot, &assessment);
    assert!(prompt.contains("- UV Index: n/a"));
    assert!(prompt.contains("- Wind: n/a mph"));
}

#[tokio::test]
async fn test_model_reply_is_used_when_valid() {
    let snapshot = snapshot();
    let assessment = SafetyEngine::with_default_config().evaluate(&snapshot.to_metrics());
    let service = ExplanationService::new(Box::new(StubProvider {
        reply: Ok("**Weather Summary:** Looks fine.".into()),
    }));

    let explanation = service.explain(&snapshot, &assessment).await;
    assert_eq!(explanation.source, ExplanationSource::Model);
    assert_eq!(explanation.text, "**Weather Summary:** Looks fine.");
}

#[tokio::test]
async fn test_provider_failure_degrades_to_fallback() {
    let snapshot = snapshot();
    let assessment = SafetyEngine::with_default_config().evaluate(&snapshot.to_metrics());
    let service = ExplanationService::new(Box::new(StubProvider { reply: Err(()) }));

    let explanation = service.explain(&snapshot, &assessment).await;
    assert_eq!(explanation.source, ExplanationSource::Fallback);
    assert_eq!(
        explanation.text,
        prompts::fallback_explanation(assessment.decision)
    );
}

#[tokio::test]
async fn test_overlong_reply_degrades_to_fallback() {
    let snapshot = snapshot();
    let assessment = SafetyEngine::with_default_config().evaluate(&snapshot.to_metrics());
    let service = ExplanationService::new(Box::new(StubProvider {
        reply: Ok("word ".repeat(MAX_EXPLANATION_WORDS + 1)),
    }));

    let explanation = service.explain(&snapshot, &assessment).await;
    assert_eq!(explanation.source, ExplanationSource::Fallback);
}

#[test]
fn test_fallback_texts_differ_per_decision() {
    let decisions = [
        Decision::Go,
        Decision::Maybe,
        Decision::NoGo,
        Decision::InsufficientData,
        Decision::NoData,
    ];
    for (i, a) in decisions.iter().enumerate() {
        assert!(!prompts::fallback_explanation(*a).is_empty());
        for b in &decisions[i + 1..] {
            assert_ne!(
                prompts::fallback_explanation(*a),
                prompts::fallback_explanation(*b)
            );
        }
    }
    let explanation = Explanation::fallback(Decision::NoGo);
    assert_eq!(explanation.source, ExplanationSource::Fallback);
    assert_eq!(
        explanation.text,
        prompts::fallback_explanation(Decision::NoGo)
    );
}
