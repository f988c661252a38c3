//! Consecutive-day activity streaks.
//!
//! The journal streak is an incremental cache in the `users` collection,
//! advanced once per journal submission. Because cache writes are allowed
//! to fail silently, [`reconcile`] can rebuild it from journal history.

use chrono::{Duration, NaiveDate};
use futures_util::{future, TryStreamExt};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::db::{RecordQuery, Store, StreakStore};
use crate::error::StoreResult;
use crate::models::journal::EntrySource;
use crate::models::record::Collection;
use crate::models::streak::StreakState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakStep {
    /// No usable prior state.
    Started,
    /// Activity on the day after the last one.
    Extended,
    /// Another submission on the same day.
    Held,
    /// A gap of two or more days, or a date before the last one.
    Reset,
}

pub fn advance(previous: Option<StreakState>, today: NaiveDate) -> (StreakState, StreakStep) {
    let Some(previous) = previous else {
        return (StreakState::new(today, 1), StreakStep::Started);
    };

    let last = previous.last_entry_date;
    if today == last + Duration::days(1) {
        (
            StreakState::new(today, previous.streak_count.saturating_add(1)),
            StreakStep::Extended,
        )
    } else if today == last {
        (StreakState::new(today, previous.streak_count), StreakStep::Held)
    } else {
        (StreakState::new(today, 1), StreakStep::Reset)
    }
}

/// Advance the cached streak for `user_id` and return the new count.
///
/// A failed read is treated as no prior state. A failed write is logged
/// and swallowed; the computed count is still returned for display, so
/// the cache may lag behind history until [`reconcile`] runs.
pub async fn update<S: StreakStore + ?Sized>(store: &S, user_id: &str, today: NaiveDate) -> u32 {
    let previous = match store.load_streak(user_id).await {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Streak read failed, starting fresh");
            None
        }
    };

    let (next, step) = advance(previous, today);

    if let Err(e) = store.save_streak(user_id, &next).await {
        tracing::error!(user_id = %user_id, error = %e, "Streak write failed");
    } else {
        tracing::debug!(user_id = %user_id, streak = next.streak_count, ?step, "Streak updated");
    }

    next.streak_count
}

/// The run of consecutive days ending at the most recent date.
pub fn run_ending_at_latest(dates: impl IntoIterator<Item = NaiveDate>) -> Option<StreakState> {
    let days: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let latest = *days.iter().next_back()?;

    let mut count = 1u32;
    let mut expected = latest - Duration::days(1);
    for day in days.iter().rev().skip(1) {
        if *day != expected {
            break;
        }
        count += 1;
        expected -= Duration::days(1);
    }

    Some(StreakState::new(latest, count))
}

/// Consecutive days ending today with at least one activity; 0 when there
/// was no activity today.
pub fn run_ending_today(dates: impl IntoIterator<Item = NaiveDate>, today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut count = 0u32;
    let mut day = today;
    while days.contains(&day) {
        count += 1;
        day -= Duration::days(1);
    }
    count
}

#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    pub previous: Option<StreakState>,
    pub reconciled: Option<StreakState>,
    pub diverged: bool,
}

/// Rebuild the cached streak from the full journal history and persist it.
/// Saved stories are not submissions and are skipped. With no submissions
/// left the cache row is dropped. Unlike [`update`], store failures are
/// returned to the caller.
pub async fn reconcile<S: Store + ?Sized>(store: &S, user_id: &str) -> StoreResult<Reconciliation> {
    let previous = store.load_streak(user_id).await.unwrap_or_else(|e| {
        tracing::warn!(user_id = %user_id, error = %e, "Streak read failed during reconcile");
        None
    });

    let dates: Vec<NaiveDate> = store
        .query(Collection::Journals, RecordQuery::for_user(user_id))
        .try_filter_map(|record| {
            let day = record
                .into_journal()
                .filter(|entry| entry.source == EntrySource::Journal)
                .map(|entry| entry.created_at.date_naive());
            future::ready(Ok(day))
        })
        .try_collect()
        .await?;

    let reconciled = run_ending_at_latest(dates);
    match &reconciled {
        Some(state) => store.save_streak(user_id, state).await?,
        None => store.clear_streak(user_id).await?,
    }

    let diverged = previous != reconciled;
    if diverged {
        tracing::info!(user_id = %user_id, ?previous, ?reconciled, "Streak cache reconciled");
    }

    Ok(Reconciliation {
        previous,
        reconciled,
        diverged,
    })
}
