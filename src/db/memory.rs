use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::store::{RecordQuery, RecordStore, StreakStore};
use crate::error::{StoreError, StoreResult};
use crate::models::record::{Collection, NewRecord, Record};
use crate::models::streak::StreakState;

/// Process-local store (single-instance deployments and tests).
/// Writes are visible to the next query immediately.
#[derive(Default)]
pub struct MemoryStore {
    journals: Mutex<Vec<Record>>,
    reflections: Mutex<Vec<Record>>,
    streaks: Mutex<HashMap<String, StreakState>>,
    fail_streak_reads: AtomicBool,
    fail_streak_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent streak reads fail, as an unreachable backend would.
    pub fn set_fail_streak_reads(&self, fail: bool) {
        self.fail_streak_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent streak writes fail.
    pub fn set_fail_streak_writes(&self, fail: bool) {
        self.fail_streak_writes.store(fail, Ordering::SeqCst);
    }

    fn collection(&self, collection: Collection) -> &Mutex<Vec<Record>> {
        match collection {
            Collection::Journals => &self.journals,
            Collection::Reflections => &self.reflections,
        }
    }

    async fn snapshot(&self, collection: Collection, query: &RecordQuery) -> Vec<Record> {
        let records = self.collection(collection).lock().await;

        // Newest insertion first so equal timestamps keep append order.
        let mut matching: Vec<Record> = records
            .iter()
            .rev()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        drop(records);

        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        if let Some(limit) = query.limit {
            matching.truncate(usize::try_from(limit).unwrap_or(0));
        }
        matching
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append(&self, record: NewRecord) -> StoreResult<Record> {
        let record = record.into_record(chrono::Utc::now());
        self.collection(record.collection())
            .lock()
            .await
            .push(record.clone());
        Ok(record)
    }

    fn query(&self, collection: Collection, query: RecordQuery) -> BoxStream<'_, StoreResult<Record>> {
        stream::once(async move { self.snapshot(collection, &query).await })
            .flat_map(|records| stream::iter(records.into_iter().map(Ok)))
            .boxed()
    }

    async fn delete(&self, collection: Collection, user_id: &str, id: Uuid) -> StoreResult<bool> {
        let mut records = self.collection(collection).lock().await;
        let before = records.len();
        records.retain(|r| !(r.id() == id && r.user_id() == user_id));
        Ok(records.len() < before)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn close(&self) {}
}

#[async_trait]
impl StreakStore for MemoryStore {
    async fn load_streak(&self, user_id: &str) -> StoreResult<Option<StreakState>> {
        if self.fail_streak_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("streak read failed".into()));
        }
        Ok(self.streaks.lock().await.get(user_id).copied())
    }

    async fn save_streak(&self, user_id: &str, state: &StreakState) -> StoreResult<()> {
        if self.fail_streak_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("streak write failed".into()));
        }
        self.streaks
            .lock()
            .await
            .insert(user_id.to_string(), *state);
        Ok(())
    }

    async fn clear_streak(&self, user_id: &str) -> StoreResult<()> {
        if self.fail_streak_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("streak write failed".into()));
        }
        self.streaks.lock().await.remove(user_id);
        Ok(())
    }
}
