//! Per-day mood matrix and score trend for charting.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use futures_util::TryStreamExt;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::db::{RecordQuery, RecordStore};
use crate::error::StoreResult;
use crate::models::mood::{normalize_label, MoodKind};
use crate::models::record::Collection;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoodTimeline {
    pub frequency_by_mood: BTreeMap<String, u32>,
    /// Rows ascending by date; every row carries every mood in the window.
    pub matrix: BTreeMap<NaiveDate, BTreeMap<String, u32>>,
}

impl MoodTimeline {
    pub fn is_empty(&self) -> bool {
        self.frequency_by_mood.is_empty()
    }

    pub fn colors(&self) -> BTreeMap<String, &'static str> {
        self.frequency_by_mood
            .keys()
            .map(|mood| (mood.clone(), MoodKind::from_label(mood).color()))
            .collect()
    }

    pub fn emojis(&self) -> BTreeMap<String, &'static str> {
        self.frequency_by_mood
            .keys()
            .map(|mood| (mood.clone(), MoodKind::from_label(mood).emoji()))
            .collect()
    }
}

/// Build the timeline from `(created_at, mood)` pairs.
pub fn build<I, M>(records: I) -> MoodTimeline
where
    I: IntoIterator<Item = (DateTime<Utc>, M)>,
    M: AsRef<str>,
{
    let mut timeline = MoodTimeline::default();

    for (created_at, mood) in records {
        let mood = normalize_label(mood.as_ref());
        *timeline.frequency_by_mood.entry(mood.clone()).or_insert(0) += 1;
        *timeline
            .matrix
            .entry(created_at.date_naive())
            .or_default()
            .entry(mood)
            .or_insert(0) += 1;
    }

    for row in timeline.matrix.values_mut() {
        for mood in timeline.frequency_by_mood.keys() {
            row.entry(mood.clone()).or_insert(0);
        }
    }

    timeline
}

/// Timeline over the trailing seven days of journals and reflections.
pub async fn weekly_timeline<S: RecordStore + ?Sized>(
    store: &S,
    user_id: &str,
    now: DateTime<Utc>,
    fetch_limit: i64,
) -> StoreResult<MoodTimeline> {
    let since = now - Duration::days(super::weekly::WINDOW_DAYS);
    let mut pairs: Vec<(DateTime<Utc>, String)> = Vec::new();

    for collection in [Collection::Journals, Collection::Reflections] {
        let mut rows: Vec<(DateTime<Utc>, String)> = store
            .query(collection, RecordQuery::window(user_id, since, fetch_limit))
            .map_ok(|record| (record.created_at(), record.mood().to_string()))
            .try_collect()
            .await?;
        pairs.append(&mut rows);
    }

    Ok(build(pairs))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub average_score: f64,
    pub entries: u32,
}

/// Average reference score per day, ascending by date. Labels outside the
/// reference vocabulary score as neutral.
pub fn score_trend<I, M>(records: I) -> Vec<ScorePoint>
where
    I: IntoIterator<Item = (DateTime<Utc>, M)>,
    M: AsRef<str>,
{
    let mut by_day: BTreeMap<NaiveDate, (i64, u32)> = BTreeMap::new();
    for (created_at, mood) in records {
        let slot = by_day.entry(created_at.date_naive()).or_insert((0, 0));
        slot.0 += i64::from(MoodKind::from_label(mood.as_ref()).score());
        slot.1 += 1;
    }

    by_day
        .into_iter()
        .map(|(date, (total, entries))| ScorePoint {
            date,
            average_score: ((total as f64 / f64::from(entries)) * 100.0).round() / 100.0,
            entries,
        })
        .collect()
}

/// Score trend over the most recent `fetch_limit` journal entries.
pub async fn recent_score_trend<S: RecordStore + ?Sized>(
    store: &S,
    user_id: &str,
    fetch_limit: i64,
) -> StoreResult<Vec<ScorePoint>> {
    let pairs: Vec<(DateTime<Utc>, String)> = store
        .query(Collection::Journals, RecordQuery::recent(user_id, fetch_limit))
        .map_ok(|record| (record.created_at(), record.mood().to_string()))
        .try_collect()
        .await?;

    Ok(score_trend(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_matrix_counts_per_day() {
        let timeline = build([(at(2, 9), "sad"), (at(1, 8), "sad"), (at(2, 20), "sad")]);

        assert_eq!(timeline.matrix[&date(2)]["sad"], 2);
        assert_eq!(timeline.matrix[&date(1)]["sad"], 1);
        let dates: Vec<_> = timeline.matrix.keys().copied().collect();
        assert_eq!(dates, vec![date(1), date(2)]);
        assert_eq!(timeline.frequency_by_mood["sad"], 3);
    }

    #[test]
    fn test_missing_cells_are_zero() {
        let timeline = build([(at(1, 8), "happy"), (at(2, 8), "calm")]);
        assert_eq!(timeline.matrix[&date(1)]["calm"], 0);
        assert_eq!(timeline.matrix[&date(2)]["happy"], 0);
    }

    #[test]
    fn test_matrix_serializes_dates_ascending() {
        let timeline = build([(at(3, 8), "happy"), (at(1, 8), "happy")]);
        let json = serde_json::to_string(&timeline.matrix).unwrap();
        assert!(json.find("2024-01-01").unwrap() < json.find("2024-01-03").unwrap());
    }

    #[test]
    fn test_colors_fall_back_for_unknown_moods() {
        let timeline = build([(at(1, 8), "happy"), (at(1, 9), "wistful")]);
        let colors = timeline.colors();
        assert_eq!(colors["happy"], MoodKind::Happy.color());
        assert_eq!(colors["wistful"], MoodKind::Unclear.color());
    }

    #[test]
    fn test_score_trend_averages_per_day() {
        let trend = score_trend([(at(1, 8), "happy"), (at(1, 9), "sad"), (at(2, 9), "mystery")]);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, date(1));
        assert_eq!(trend[0].average_score, 1.5);
        assert_eq!(trend[0].entries, 2);
        assert_eq!(trend[1].average_score, 0.0);
    }
}
