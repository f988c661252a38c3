//! Mood classification and the generators built on the language model.
//!
//! The model replies in free text. Fields are located by a line starting
//! with a case-insensitive `label:` prefix; the rest of the line is the
//! value. Missing fields fall back to fixed defaults instead of failing.

use std::sync::Arc;
use std::time::Duration;

use crate::error::LlmError;
use crate::models::mood::UNKNOWN_MOOD;
use crate::services::llm::{generate_bounded, LanguageModel};

/// Entries shorter than this are not worth a model call.
pub const MIN_ENTRY_CHARS: usize = 10;

pub const UNCLEAR_MOOD: &str = "unclear";
pub const WRITE_MORE_FEEDBACK: &str =
    "Please write a bit more so I can understand your mood better.";
pub const NO_FEEDBACK: &str = "no feedback provided.";

pub const DEFAULT_AFFIRMATION: &str = "You're doing your best. Keep going.";
pub const DEFAULT_GOAL_AFFIRMATION: &str = "You're doing great.";
pub const DEFAULT_WEEKLY_GOAL: &str = "Stay consistent and reflect daily.";

const ENUMERATION_MARKERS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', ':', '-', ' ',
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodReading {
    pub mood: String,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AffirmationGoal {
    pub affirmation: String,
    pub weekly_goal: String,
}

/// Value of the first line starting with `prefix` (case-insensitive),
/// trimmed. Blank values count as missing.
pub fn extract_field(output: &str, prefix: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let line = line.trim_start();
        let head = line.get(..prefix.len())?;
        if !head.eq_ignore_ascii_case(prefix) {
            return None;
        }
        let value = line[prefix.len()..].trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Drop leading list markers such as `1.`, `-` or `:`.
pub fn strip_enumeration(value: &str) -> String {
    value.trim_start_matches(ENUMERATION_MARKERS).trim().to_string()
}

pub fn parse_reading(output: &str) -> MoodReading {
    let mood = extract_field(output, "mood:")
        .map(|m| m.to_lowercase())
        .unwrap_or_else(|| UNKNOWN_MOOD.to_string());

    let feedback = extract_field(output, "feedback:")
        .map(|f| strip_enumeration(&f))
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| NO_FEEDBACK.to_string());

    MoodReading { mood, feedback }
}

pub fn is_too_short(text: &str) -> bool {
    text.trim().chars().count() < MIN_ENTRY_CHARS
}

fn mood_prompt(text: &str) -> String {
    format!(
        r#"Analyze this journal entry and respond with:
Mood: <label only, no numbering>
Feedback: <one helpful sentence only, no numbering or prefix>

Entry:
{text}
"#
    )
}

/// Classify an entry. Short entries never reach the model. Model failures
/// are returned so the caller can pick its own fallback.
pub async fn classify(
    model: Arc<dyn LanguageModel>,
    text: &str,
    timeout: Duration,
) -> Result<MoodReading, LlmError> {
    if is_too_short(text) {
        return Ok(MoodReading {
            mood: UNCLEAR_MOOD.to_string(),
            feedback: WRITE_MORE_FEEDBACK.to_string(),
        });
    }

    let output = generate_bounded(model, mood_prompt(text), timeout).await?;
    Ok(parse_reading(&output))
}

/// One sentence of encouragement for `mood`.
pub async fn affirmation(model: Arc<dyn LanguageModel>, mood: &str, timeout: Duration) -> String {
    let prompt = format!("Give a one-sentence affirmation for someone feeling {mood}.");
    match generate_bounded(model, prompt, timeout).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => DEFAULT_AFFIRMATION.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Affirmation unavailable, using default");
            DEFAULT_AFFIRMATION.to_string()
        }
    }
}

/// Personalized affirmation plus one weekly goal derived from an entry.
pub async fn affirmation_and_goal(
    model: Arc<dyn LanguageModel>,
    entry: &str,
    persona_name: &str,
    timeout: Duration,
) -> AffirmationGoal {
    let prompt = format!(
        "Based on this journal entry: '{entry}', generate a personalized affirmation \
         and one weekly goal for the user named {persona_name}. Format the response as:\n\
         'Affirmation: ...'\n'Weekly Goal: ...'"
    );

    let output = match generate_bounded(model, prompt, timeout).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "Affirmation and goal unavailable, using defaults");
            String::new()
        }
    };

    AffirmationGoal {
        affirmation: extract_field(&output, "affirmation:")
            .unwrap_or_else(|| DEFAULT_GOAL_AFFIRMATION.to_string()),
        weekly_goal: extract_field(&output, "weekly goal:")
            .unwrap_or_else(|| DEFAULT_WEEKLY_GOAL.to_string()),
    }
}

pub fn default_story(topic: &str, mood: &str) -> String {
    format!(
        "Someone feeling {mood} found comfort in {topic}, a simple joy that lifted their spirits."
    )
}

/// Where the text of a story came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorySource {
    Llm,
    Template,
    Local,
}

/// A short comforting narrative about `topic` for someone feeling `mood`.
pub async fn story(
    model: Arc<dyn LanguageModel>,
    topic: &str,
    mood: &str,
    timeout: Duration,
) -> (String, StorySource) {
    let prompt = format!(
        "Write a short, cozy story about someone feeling {mood} and turning to {topic} to feel better. \
         Make it warm, personal, and emotionally uplifting."
    );
    match generate_bounded(model, prompt, timeout).await {
        Ok(text) if !text.trim().is_empty() => (text.trim().to_string(), StorySource::Llm),
        Ok(_) => (default_story(topic, mood), StorySource::Template),
        Err(e) => {
            tracing::warn!(error = %e, topic = %topic, "Story unavailable, using template");
            (default_story(topic, mood), StorySource::Template)
        }
    }
}

/// Five-line story capturing a mood. Failures are returned so the caller
/// can fall back to a built-in story.
pub async fn emotion_story(
    model: Arc<dyn LanguageModel>,
    mood: &str,
    timeout: Duration,
) -> Result<String, LlmError> {
    let prompt = format!("Write a 5-line emotional story that captures the feeling of being {mood}.");
    generate_bounded(model, prompt, timeout).await
}
