use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReflectionEntry {
    pub id: Uuid,
    pub user_id: String,
    pub text: String,
    pub mood: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReflectionEntry {
    pub id: Option<Uuid>,
    pub user_id: String,
    pub text: String,
    pub mood: String,
    pub rating: i32,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewReflectionEntry {
    pub fn new(user_id: impl Into<String>, text: impl Into<String>, mood: &str, rating: i32) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            text: text.into(),
            mood: crate::models::mood::normalize_label(mood),
            rating,
            created_at: None,
        }
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn into_entry(self, now: DateTime<Utc>) -> ReflectionEntry {
        ReflectionEntry {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            user_id: self.user_id,
            text: self.text,
            mood: self.mood,
            rating: self.rating,
            created_at: self.created_at.unwrap_or(now),
        }
    }
}
