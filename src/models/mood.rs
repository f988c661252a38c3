//! Mood labels and the closed reference vocabulary.
//!
//! Labels are stored as open, lower-cased strings: whatever the classifier
//! or the user picked is accepted. Scoring, colouring and emoji lookup go
//! through [`MoodKind`], which resolves anything it does not recognise to
//! [`MoodKind::Unclear`].

use serde::{Deserialize, Serialize};

/// Label used when a record carries no mood at all.
pub const UNKNOWN_MOOD: &str = "unknown";

/// Normalize a raw label for storage and counting: trimmed, lower-cased,
/// and `"unknown"` when blank.
pub fn normalize_label(raw: &str) -> String {
    let label = raw.trim().to_lowercase();
    if label.is_empty() {
        UNKNOWN_MOOD.to_string()
    } else {
        label
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodKind {
    Happy,
    Excited,
    Grateful,
    Hopeful,
    Calm,
    Reflective,
    Unclear,
    Anxious,
    Sad,
    Lonely,
    Angry,
    Error,
}

impl MoodKind {
    pub const ALL: [MoodKind; 12] = [
        MoodKind::Happy,
        MoodKind::Excited,
        MoodKind::Grateful,
        MoodKind::Hopeful,
        MoodKind::Calm,
        MoodKind::Reflective,
        MoodKind::Unclear,
        MoodKind::Anxious,
        MoodKind::Sad,
        MoodKind::Lonely,
        MoodKind::Angry,
        MoodKind::Error,
    ];

    /// Resolve a stored label against the reference vocabulary.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == label)
            .unwrap_or(MoodKind::Unclear)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoodKind::Happy => "happy",
            MoodKind::Excited => "excited",
            MoodKind::Grateful => "grateful",
            MoodKind::Hopeful => "hopeful",
            MoodKind::Calm => "calm",
            MoodKind::Reflective => "reflective",
            MoodKind::Unclear => "unclear",
            MoodKind::Anxious => "anxious",
            MoodKind::Sad => "sad",
            MoodKind::Lonely => "lonely",
            MoodKind::Angry => "angry",
            MoodKind::Error => "error",
        }
    }

    /// Valence score used by the trend chart. Neutral labels score 0.
    pub fn score(self) -> i32 {
        match self {
            MoodKind::Happy => 5,
            MoodKind::Excited => 4,
            MoodKind::Grateful => 3,
            MoodKind::Hopeful => 2,
            MoodKind::Calm => 1,
            MoodKind::Reflective | MoodKind::Unclear | MoodKind::Error => 0,
            MoodKind::Anxious => -1,
            MoodKind::Sad => -2,
            MoodKind::Lonely => -3,
            MoodKind::Angry => -4,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MoodKind::Happy => "#FFD700",
            MoodKind::Excited => "#FF8C00",
            MoodKind::Grateful => "#32CD32",
            MoodKind::Hopeful => "#00CED1",
            MoodKind::Calm => "#87CEFA",
            MoodKind::Reflective => "#A9A9A9",
            MoodKind::Unclear => "#D3D3D3",
            MoodKind::Anxious => "#FF6347",
            MoodKind::Sad => "#4682B4",
            MoodKind::Lonely => "#6A5ACD",
            MoodKind::Angry => "#DC143C",
            MoodKind::Error => "#808080",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodKind::Happy => "😊",
            MoodKind::Excited => "🤩",
            MoodKind::Grateful => "🙏",
            MoodKind::Hopeful => "🌈",
            MoodKind::Calm => "😌",
            MoodKind::Reflective => "🧠",
            MoodKind::Unclear => "📝",
            MoodKind::Anxious => "😟",
            MoodKind::Sad => "😢",
            MoodKind::Lonely => "😔",
            MoodKind::Angry => "😠",
            MoodKind::Error => "⚠️",
        }
    }
}
