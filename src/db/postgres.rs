use async_trait::async_trait;
use futures_util::stream::{BoxStream, StreamExt};
use sqlx::PgPool;
use uuid::Uuid;

use super::store::{RecordQuery, RecordStore, StreakStore};
use crate::error::{StoreError, StoreResult};
use crate::models::journal::JournalEntry;
use crate::models::record::{Collection, NewRecord, Record};
use crate::models::reflection::ReflectionEntry;
use crate::models::streak::StreakState;

// `LIMIT NULL` means no limit in Postgres, so one statement covers both
// bounded and unbounded scans.
const JOURNALS_QUERY: &str = r#"
    SELECT * FROM journals
    WHERE user_id = $1 AND ($2::timestamptz IS NULL OR created_at > $2)
    ORDER BY created_at DESC
    LIMIT $3
"#;

const REFLECTIONS_QUERY: &str = r#"
    SELECT * FROM reflections
    WHERE user_id = $1 AND ($2::timestamptz IS NULL OR created_at > $2)
    ORDER BY created_at DESC
    LIMIT $3
"#;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn append(&self, record: NewRecord) -> StoreResult<Record> {
        let now = chrono::Utc::now();
        let record = match record.into_record(now) {
            Record::Journal(entry) => {
                let saved = sqlx::query_as::<_, JournalEntry>(
                    r#"
                    INSERT INTO journals (id, user_id, entry, mood, feedback, engine, source, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    RETURNING *
                    "#,
                )
                .bind(entry.id)
                .bind(&entry.user_id)
                .bind(&entry.entry_text)
                .bind(&entry.mood)
                .bind(&entry.feedback)
                .bind(entry.engine)
                .bind(entry.source)
                .bind(entry.created_at)
                .fetch_one(&self.pool)
                .await?;
                Record::Journal(saved)
            }
            Record::Reflection(entry) => {
                let saved = sqlx::query_as::<_, ReflectionEntry>(
                    r#"
                    INSERT INTO reflections (id, user_id, text, mood, rating, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING *
                    "#,
                )
                .bind(entry.id)
                .bind(&entry.user_id)
                .bind(&entry.text)
                .bind(&entry.mood)
                .bind(entry.rating)
                .bind(entry.created_at)
                .fetch_one(&self.pool)
                .await?;
                Record::Reflection(saved)
            }
        };

        Ok(record)
    }

    fn query(&self, collection: Collection, query: RecordQuery) -> BoxStream<'_, StoreResult<Record>> {
        let RecordQuery {
            user_id,
            since,
            limit,
        } = query;

        match collection {
            Collection::Journals => {
                sqlx::query_as::<_, JournalEntry>(JOURNALS_QUERY)
                    .bind(user_id)
                    .bind(since)
                    .bind(limit)
                    .fetch(&self.pool)
                    .map(|row| row.map(Record::Journal).map_err(StoreError::from))
                    .boxed()
            }
            Collection::Reflections => {
                sqlx::query_as::<_, ReflectionEntry>(REFLECTIONS_QUERY)
                    .bind(user_id)
                    .bind(since)
                    .bind(limit)
                    .fetch(&self.pool)
                    .map(|row| row.map(Record::Reflection).map_err(StoreError::from))
                    .boxed()
            }
        }
    }

    async fn delete(&self, collection: Collection, user_id: &str, id: Uuid) -> StoreResult<bool> {
        let sql = match collection {
            Collection::Journals => "DELETE FROM journals WHERE id = $1 AND user_id = $2",
            Collection::Reflections => "DELETE FROM reflections WHERE id = $1 AND user_id = $2",
        };

        let result = sqlx::query(sql)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl StreakStore for PgStore {
    async fn load_streak(&self, user_id: &str) -> StoreResult<Option<StreakState>> {
        let row = sqlx::query_as::<_, (String, i32)>(
            "SELECT last_entry_date, streak_count FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((raw_date, count)) = row else {
            return Ok(None);
        };

        let last_entry_date = StreakState::parse_date(&raw_date)
            .ok_or_else(|| StoreError::Corrupt(format!("last_entry_date {raw_date:?}")))?;

        Ok(Some(StreakState::new(
            last_entry_date,
            u32::try_from(count).unwrap_or(1),
        )))
    }

    async fn save_streak(&self, user_id: &str, state: &StreakState) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, last_entry_date, streak_count)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET
                last_entry_date = EXCLUDED.last_entry_date,
                streak_count = EXCLUDED.streak_count,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(state.date_string())
        .bind(i32::try_from(state.streak_count).unwrap_or(i32::MAX))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_streak(&self, user_id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
