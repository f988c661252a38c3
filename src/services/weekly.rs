//! Trailing seven-day mood summary.

use chrono::{DateTime, Duration, Utc};
use futures_util::TryStreamExt;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::db::{RecordQuery, RecordStore};
use crate::error::StoreResult;
use crate::models::mood::normalize_label;
use crate::models::record::Collection;

pub const WINDOW_DAYS: i64 = 7;

/// Mean reflection rating, or `"N/A"` when there were no ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageRating {
    Value(f64),
    NotAvailable,
}

impl Serialize for AverageRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AverageRating::Value(v) => serializer.serialize_f64(*v),
            AverageRating::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub dominant_mood: String,
    pub mood_distribution: BTreeMap<String, u32>,
    pub average_rating: AverageRating,
}

pub fn mood_distribution(
    journal_moods: &[String],
    reflection_moods: &[String],
) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for mood in journal_moods.iter().chain(reflection_moods) {
        *counts.entry(normalize_label(mood)).or_insert(0) += 1;
    }
    counts
}

/// Most frequent label. Ties go to the lexicographically smallest label.
pub fn dominant_mood(distribution: &BTreeMap<String, u32>) -> Option<String> {
    let mut best: Option<(&String, u32)> = None;
    for (mood, &count) in distribution {
        // BTreeMap iterates in label order, so strict `>` keeps the smallest.
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((mood, count));
        }
    }
    best.map(|(mood, _)| mood.clone())
}

pub fn average_rating(ratings: &[i32]) -> AverageRating {
    if ratings.is_empty() {
        return AverageRating::NotAvailable;
    }
    let sum: f64 = ratings.iter().map(|&r| f64::from(r)).sum();
    let mean = sum / ratings.len() as f64;
    AverageRating::Value((mean * 100.0).round() / 100.0)
}

/// Summarize one window. Callers skip this when both mood lists are empty.
pub fn summarize(
    journal_moods: &[String],
    reflection_moods: &[String],
    reflection_ratings: &[i32],
) -> WeeklySummary {
    let mood_distribution = mood_distribution(journal_moods, reflection_moods);
    let dominant_mood = dominant_mood(&mood_distribution)
        .unwrap_or_else(|| crate::models::mood::UNKNOWN_MOOD.to_string());

    WeeklySummary {
        dominant_mood,
        mood_distribution,
        average_rating: average_rating(reflection_ratings),
    }
}

/// Fetch the bounded seven-day window for `user_id` and summarize it.
/// `None` when the window holds no records.
pub async fn weekly_summary<S: RecordStore + ?Sized>(
    store: &S,
    user_id: &str,
    now: DateTime<Utc>,
    fetch_limit: i64,
) -> StoreResult<Option<WeeklySummary>> {
    let since = now - Duration::days(WINDOW_DAYS);

    let journal_moods: Vec<String> = store
        .query(
            Collection::Journals,
            RecordQuery::window(user_id, since, fetch_limit),
        )
        .map_ok(|record| record.mood().to_string())
        .try_collect()
        .await?;

    let reflections: Vec<(String, Option<i32>)> = store
        .query(
            Collection::Reflections,
            RecordQuery::window(user_id, since, fetch_limit),
        )
        .map_ok(|record| (record.mood().to_string(), record.rating()))
        .try_collect()
        .await?;

    if journal_moods.is_empty() && reflections.is_empty() {
        return Ok(None);
    }

    let reflection_moods: Vec<String> = reflections.iter().map(|(m, _)| m.clone()).collect();
    let ratings: Vec<i32> = reflections.iter().filter_map(|(_, r)| *r).collect();

    Ok(Some(summarize(&journal_moods, &reflection_moods, &ratings)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::journal::NewJournalEntry;
    use crate::models::reflection::NewReflectionEntry;

    fn moods(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_summarize_counts_both_streams() {
        let summary = summarize(
            &moods(&["happy", "sad", "happy"]),
            &moods(&["happy"]),
            &[4, 5],
        );
        assert_eq!(summary.mood_distribution.get("happy"), Some(&3));
        assert_eq!(summary.mood_distribution.get("sad"), Some(&1));
        assert_eq!(summary.mood_distribution.len(), 2);
        assert_eq!(summary.dominant_mood, "happy");
        assert_eq!(summary.average_rating, AverageRating::Value(4.5));
    }

    #[test]
    fn test_tie_breaks_lexicographically() {
        let summary = summarize(&moods(&["sad", "calm", "sad", "calm"]), &[], &[]);
        assert_eq!(summary.dominant_mood, "calm");
    }

    #[test]
    fn test_missing_label_counts_as_unknown() {
        let dist = mood_distribution(&moods(&["", "  "]), &moods(&["Happy"]));
        assert_eq!(dist.get("unknown"), Some(&2));
        assert_eq!(dist.get("happy"), Some(&1));
    }

    #[test]
    fn test_average_rating_rounds_to_two_places() {
        assert_eq!(average_rating(&[1, 2, 2]), AverageRating::Value(1.67));
    }

    #[test]
    fn test_average_rating_without_ratings_is_na() {
        let summary = summarize(&moods(&["calm"]), &[], &[]);
        assert_eq!(summary.average_rating, AverageRating::NotAvailable);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["average_rating"], "N/A");
    }

    #[tokio::test]
    async fn test_weekly_summary_ignores_records_outside_window() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store
            .append(
                NewJournalEntry::new("u1", "old")
                    .with_reading("angry", "")
                    .created_at(now - Duration::days(8))
                    .into(),
            )
            .await
            .unwrap();
        store
            .append(
                NewJournalEntry::new("u1", "recent")
                    .with_reading("calm", "")
                    .created_at(now - Duration::days(1))
                    .into(),
            )
            .await
            .unwrap();
        store
            .append(
                NewReflectionEntry::new("u1", "ok", "calm", 3)
                    .created_at(now - Duration::hours(2))
                    .into(),
            )
            .await
            .unwrap();

        let summary = weekly_summary(&store, "u1", now, 20).await.unwrap().unwrap();
        assert_eq!(summary.dominant_mood, "calm");
        assert_eq!(summary.mood_distribution.get("angry"), None);
        assert_eq!(summary.average_rating, AverageRating::Value(3.0));
    }

    #[tokio::test]
    async fn test_weekly_summary_empty_window_is_none() {
        let store = MemoryStore::new();
        assert!(weekly_summary(&store, "u1", Utc::now(), 20)
            .await
            .unwrap()
            .is_none());
    }
}
