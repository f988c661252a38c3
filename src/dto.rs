//! # EchoSoul — Request/Response DTOs
//!
//! Conventions:
//! - `*Request` / `*Query` → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Length and range checks are expressed via `validator` derive macros;
//!   blank-text checks live in the handlers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

use crate::models::journal::{JournalEntry, MoodEngine};
use crate::models::streak::StreakState;
pub use crate::services::mood_analysis::StorySource;
use crate::services::streak::Reconciliation;
use crate::services::timeline::{MoodTimeline, ScorePoint};
use crate::services::weekly::WeeklySummary;

// ============================================================================
// Common
// ============================================================================

/// Idempotent delete confirmation. `existed` is false when the id was
/// already gone.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub existed: bool,
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

// ============================================================================
// Journals
// ============================================================================

/// POST /api/journals
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJournalRequest {
    #[validate(length(min = 1, max = 20000, message = "Entry must be 1-20000 characters"))]
    pub entry_text: String,

    /// Mood detector to use. Default: "llm"
    pub engine: Option<MoodEngine>,
}

#[derive(Debug, Serialize)]
pub struct JournalSubmitResponse {
    pub entry: JournalEntry,
    pub streak_count: u32,
}

/// GET /api/journals
#[derive(Debug, Deserialize)]
pub struct JournalHistoryQuery {
    /// Exact mood label, case-insensitive
    pub mood: Option<String>,
    /// Keyword contained in the entry text, case-insensitive
    pub q: Option<String>,
    pub limit: Option<i64>,
}

/// POST /api/journals/stories
#[derive(Debug, Deserialize, Validate)]
pub struct SaveStoryRequest {
    #[validate(length(min = 1, max = 50))]
    pub mood: String,

    #[validate(length(min = 1, max = 5000))]
    pub story: String,
}

// ============================================================================
// Reflections
// ============================================================================

/// POST /api/reflections
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReflectionRequest {
    #[validate(length(min = 1, max = 5000, message = "Text must be 1-5000 characters"))]
    pub text: String,

    #[validate(length(min = 1, max = 50))]
    pub mood: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

#[derive(Debug, Serialize)]
pub struct ReflectionStreakResponse {
    pub streak: u32,
}

// ============================================================================
// Streak
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub streak_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_entry_date: Option<NaiveDate>,
}

impl From<Option<StreakState>> for StreakResponse {
    fn from(state: Option<StreakState>) -> Self {
        Self {
            streak_count: state.map_or(0, |s| s.streak_count),
            last_entry_date: state.map(|s| s.last_entry_date),
        }
    }
}

pub type ReconcileResponse = Reconciliation;

// ============================================================================
// Insights
// ============================================================================

#[derive(Debug, Serialize)]
pub struct WeeklyResponse {
    pub has_entries: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub summary: Option<WeeklySummary>,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub has_entries: bool,
    #[serde(flatten)]
    pub timeline: MoodTimeline,
    pub colors: BTreeMap<String, &'static str>,
    pub emojis: BTreeMap<String, &'static str>,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub points: Vec<ScorePoint>,
}

// ============================================================================
// Booster
// ============================================================================

/// POST /api/booster/affirmation
#[derive(Debug, Deserialize, Validate)]
pub struct AffirmationRequest {
    #[validate(length(min = 1, max = 50))]
    pub mood: String,
}

#[derive(Debug, Serialize)]
pub struct AffirmationResponse {
    pub mood: String,
    pub affirmation: String,
}

/// POST /api/booster/affirmation-goal
#[derive(Debug, Deserialize, Validate)]
pub struct AffirmationGoalRequest {
    #[validate(length(min = 1, max = 20000))]
    pub entry: String,

    /// Name the journal persona speaks as. Default: "EchoSoul"
    #[validate(length(min = 1, max = 100))]
    pub persona_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoryEngine {
    #[default]
    Llm,
    Local,
}

/// POST /api/booster/story
#[derive(Debug, Deserialize, Validate)]
pub struct StoryRequest {
    #[validate(length(min = 1, max = 50))]
    pub mood: String,

    /// What the story is about, e.g. a comfort food. Omit for a pure mood story.
    #[validate(length(min = 1, max = 200))]
    pub topic: Option<String>,

    pub engine: Option<StoryEngine>,
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub mood: String,
    pub story: String,
    pub source: StorySource,
}
