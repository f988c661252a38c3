//! Storage seams.
//!
//! [`RecordStore`] holds the append-only journal and reflection
//! collections; [`StreakStore`] holds the per-user streak cache. Both are
//! implemented by every backend and reached through one `Arc<dyn Store>`
//! constructed in `main`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::stream::BoxStream;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::record::{Collection, NewRecord, Record};
use crate::models::streak::StreakState;

/// A re-runnable description of a record scan, newest first. Executing it
/// twice yields two independent sequences that each reflect the store at
/// poll time.
#[derive(Debug, Clone)]
pub struct RecordQuery {
    pub user_id: String,
    /// Exclusive lower bound on `created_at`.
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl RecordQuery {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            since: None,
            limit: None,
        }
    }

    /// Newest `limit` records.
    pub fn recent(user_id: impl Into<String>, limit: i64) -> Self {
        Self::for_user(user_id).limit(limit)
    }

    /// Records strictly after `since`, newest first, capped at `limit`.
    pub fn window(user_id: impl Into<String>, since: DateTime<Utc>, limit: i64) -> Self {
        Self::for_user(user_id).since(since).limit(limit)
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit.max(0));
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.user_id() == self.user_id
            && self.since.map_or(true, |since| record.created_at() > since)
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a record, assigning `id` and `created_at` when absent.
    async fn append(&self, record: NewRecord) -> StoreResult<Record>;

    /// Lazily scan one collection. Nothing is read until the stream is polled.
    fn query(&self, collection: Collection, query: RecordQuery) -> BoxStream<'_, StoreResult<Record>>;

    /// Remove a record owned by `user_id`. Returns whether anything was
    /// removed; a missing id is not an error.
    async fn delete(&self, collection: Collection, user_id: &str, id: Uuid) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;

    async fn close(&self);
}

#[async_trait]
pub trait StreakStore: Send + Sync {
    async fn load_streak(&self, user_id: &str) -> StoreResult<Option<StreakState>>;

    /// Upsert the streak row for `user_id`.
    async fn save_streak(&self, user_id: &str, state: &StreakState) -> StoreResult<()>;

    /// Drop the streak row for `user_id`, if any.
    async fn clear_streak(&self, user_id: &str) -> StoreResult<()>;
}

pub trait Store: RecordStore + StreakStore {}

impl<T: RecordStore + StreakStore + ?Sized> Store for T {}

/// Run a query to completion.
#[cfg(test)]
pub async fn collect<S: RecordStore + ?Sized>(
    store: &S,
    collection: Collection,
    query: RecordQuery,
) -> StoreResult<Vec<Record>> {
    use futures_util::TryStreamExt;

    store.query(collection, query).try_collect().await
}
