// ABOUTME: Prompt construction for assessment explanations and canned fallback texts
// ABOUTME: Embeds the engine's decision, score, and notes verbatim into the advisor prompt
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Trailguard Project

//! Explanation prompts
//!
//! The advisor prompt embeds the safety assessment verbatim so the model
//! explains the verdict the engine produced rather than inventing its own.
//! The canned fallbacks cover every decision label for when no model reply
//! is available.

use crate::engine::{Decision, SafetyAssessment};
use crate::models::WeatherSnapshot;
use std::fmt::Write;

/// Render an optional reading for the prompt, `n/a` when absent
fn reading(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".into(), |v| v.to_string())
}

/// Build the advisor prompt for one assessment
#[must_use]
pub fn advisor_prompt(snapshot: &WeatherSnapshot, assessment: &SafetyAssessment) -> String {
    let current = &snapshot.current;
    let score = assessment
        .weighted_score
        .map_or_else(|| "n/a".into(), |s| format!("{s:.1}"));

    let mut prompt = String::new();
    let _ = write!(
        prompt,
        "You are a helpful outdoor activities safety advisor.\n\
         Provide a brief explanation of the weather assessment, followed by 3 specific practical recommendations.\n\
         \n\
         **Weather Conditions:**\n\
         - Location: {location}\n\
         - Temperature: {temp}°C (feels like {felt}°C)\n\
         - Wind: {wind} mph\n\
         - Precipitation: {precip} mm\n\
         - UV Index: {uv}\n\
         - Chance of Rain: {chance}%\n\
         \n\
         **Safety Assessment:**\n\
         - Decision: {decision}\n\
         - Safety Score: {score}/100\n\
         - Notes: {notes}\n",
        location = snapshot.location.name,
        temp = reading(current.temp_c),
        felt = reading(current.feelslike_c),
        wind = reading(current.wind_mph),
        precip = reading(current.precip_mm),
        uv = reading(current.uv),
        chance = reading(snapshot.forecast_day.day.daily_chance_of_rain),
        decision = assessment.decision,
        score = score,
        notes = assessment.notes,
    );

    if !assessment.hard_stop_reasons.is_empty() {
        let _ = writeln!(prompt, "- Hard-Stop Warnings:");
        for warning in &assessment.hard_stop_reasons {
            let _ = writeln!(prompt, "  - {warning}");
        }
    }

    prompt.push_str(
        "\nProvide your response in this EXACT format:\n\
         \n\
         **Weather Summary:** [1-2 sentences explaining the decision based on key weather factors]\n\
         \n\
         **Practical Recommendations:**\n\
         1. **Clothing:** [Specific clothing advice for these conditions]\n\
         2. **Safety Tip:** [One practical non-clothing safety tip]\n\
         3. **Activity Tip:** [One practical non-clothing activity planning tip]\n\
         \n\
         Keep the total response under 200 words. Be specific and actionable.\n",
    );

    prompt
}

/// Canned explanation used when no model reply is available
///
/// Keyed off the decision label so the report always carries an explanation
/// consistent with the verdict.
#[must_use]
pub const fn fallback_explanation(decision: Decision) -> &'static str {
    match decision {
        Decision::Go => {
            "**Weather Summary:** Conditions look favorable for your activity. \
             No significant weather hazards were detected in the forecast.\n\n\
             **Practical Recommendations:**\n\
             1. **Clothing:** Dress in layers appropriate for the forecast temperature.\n\
             2. **Safety Tip:** Tell someone your route and expected return time.\n\
             3. **Activity Tip:** Recheck the forecast shortly before you head out."
        }
        Decision::Maybe => {
            "**Weather Summary:** Conditions are marginal. At least one weather metric \
             shows elevated risk, so plan conservatively.\n\n\
             **Practical Recommendations:**\n\
             1. **Clothing:** Pack for worse weather than forecast, including rain protection.\n\
             2. **Safety Tip:** Pick a route with bail-out points in case conditions worsen.\n\
             3. **Activity Tip:** Shorten the outing or keep a flexible turnaround time."
        }
        Decision::NoGo => {
            "**Weather Summary:** Conditions are not safe for your activity. One or more \
             weather readings are at unfavorable or dangerous levels.\n\n\
             **Practical Recommendations:**\n\
             1. **Clothing:** Not applicable; postponing is the safe choice today.\n\
             2. **Safety Tip:** Wait for conditions to improve before rescheduling.\n\
             3. **Activity Tip:** Consider an indoor alternative or pick a later date."
        }
        Decision::InsufficientData => {
            "**Weather Summary:** Only one weather metric was available, so the assessment \
             is not reliable enough to act on.\n\n\
             **Practical Recommendations:**\n\
             1. **Clothing:** Prepare for a wide range of conditions.\n\
             2. **Safety Tip:** Check an additional weather source before deciding.\n\
             3. **Activity Tip:** Retry the assessment later when more data is available."
        }
        Decision::NoData => {
            "**Weather Summary:** No weather data was available for this location and date, \
             so no safety assessment could be made.\n\n\
             **Practical Recommendations:**\n\
             1. **Clothing:** Unknown; no forecast data to base advice on.\n\
             2. **Safety Tip:** Do not head out without checking conditions another way.\n\
             3. **Activity Tip:** Verify the location spelling and try again."
        }
    }
}
