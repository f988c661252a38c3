use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::journal::{JournalEntry, NewJournalEntry};
use super::reflection::{NewReflectionEntry, ReflectionEntry};

/// The persisted collections of user activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Journals,
    Reflections,
}

/// A persisted unit of user activity.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Journal(JournalEntry),
    Reflection(ReflectionEntry),
}

impl Record {
    pub fn id(&self) -> Uuid {
        match self {
            Record::Journal(j) => j.id,
            Record::Reflection(r) => r.id,
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Record::Journal(j) => &j.user_id,
            Record::Reflection(r) => &r.user_id,
        }
    }

    pub fn mood(&self) -> &str {
        match self {
            Record::Journal(j) => &j.mood,
            Record::Reflection(r) => &r.mood,
        }
    }

    pub fn rating(&self) -> Option<i32> {
        match self {
            Record::Journal(_) => None,
            Record::Reflection(r) => Some(r.rating),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Record::Journal(j) => j.created_at,
            Record::Reflection(r) => r.created_at,
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            Record::Journal(_) => Collection::Journals,
            Record::Reflection(_) => Collection::Reflections,
        }
    }

    pub fn into_journal(self) -> Option<JournalEntry> {
        match self {
            Record::Journal(j) => Some(j),
            Record::Reflection(_) => None,
        }
    }

    pub fn into_reflection(self) -> Option<ReflectionEntry> {
        match self {
            Record::Reflection(r) => Some(r),
            Record::Journal(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum NewRecord {
    Journal(NewJournalEntry),
    Reflection(NewReflectionEntry),
}

impl NewRecord {
    pub fn into_record(self, now: DateTime<Utc>) -> Record {
        match self {
            NewRecord::Journal(j) => Record::Journal(j.into_entry(now)),
            NewRecord::Reflection(r) => Record::Reflection(r.into_entry(now)),
        }
    }
}

impl From<NewJournalEntry> for NewRecord {
    fn from(entry: NewJournalEntry) -> Self {
        NewRecord::Journal(entry)
    }
}

impl From<NewReflectionEntry> for NewRecord {
    fn from(entry: NewReflectionEntry) -> Self {
        NewRecord::Reflection(entry)
    }
}
