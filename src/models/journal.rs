use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: String,
    #[sqlx(rename = "entry")]
    pub entry_text: String,
    pub mood: String,
    pub feedback: String,
    /// Absent for entries whose mood was picked by the user.
    pub engine: Option<MoodEngine>,
    pub source: EntrySource,
    pub created_at: DateTime<Utc>,
}

/// Which detector produced the mood label of an entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "mood_engine", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MoodEngine {
    Llm,
    Fallback,
}

impl Default for MoodEngine {
    fn default() -> Self {
        Self::Llm
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "entry_source", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    Journal,
    Story,
}

impl Default for EntrySource {
    fn default() -> Self {
        Self::Journal
    }
}

/// A journal entry on its way into the store. `id` and `created_at` are
/// assigned by the store when absent.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub id: Option<Uuid>,
    pub user_id: String,
    pub entry_text: String,
    pub mood: String,
    pub feedback: String,
    pub engine: Option<MoodEngine>,
    pub source: EntrySource,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewJournalEntry {
    pub fn new(user_id: impl Into<String>, entry_text: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            entry_text: entry_text.into(),
            mood: crate::models::mood::UNKNOWN_MOOD.to_string(),
            feedback: String::new(),
            engine: None,
            source: EntrySource::default(),
            created_at: None,
        }
    }

    pub fn with_reading(mut self, mood: &str, feedback: impl Into<String>) -> Self {
        self.mood = crate::models::mood::normalize_label(mood);
        self.feedback = feedback.into();
        self
    }

    pub fn engine(mut self, engine: MoodEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn source(mut self, source: EntrySource) -> Self {
        self.source = source;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Materialize the entry, filling in server-assigned fields.
    pub fn into_entry(self, now: DateTime<Utc>) -> JournalEntry {
        JournalEntry {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            user_id: self.user_id,
            entry_text: self.entry_text,
            mood: self.mood,
            feedback: self.feedback,
            engine: self.engine,
            source: self.source,
            created_at: self.created_at.unwrap_or(now),
        }
    }
}
