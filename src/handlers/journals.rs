use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use futures_util::{future, StreamExt, TryStreamExt};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::db::RecordQuery;
use crate::dto::{
    CreateJournalRequest, DeleteResponse, JournalHistoryQuery, JournalSubmitResponse,
    SaveStoryRequest,
};
use crate::error::{AppError, AppResult};
use crate::models::journal::{EntrySource, JournalEntry, MoodEngine, NewJournalEntry};
use crate::models::record::Collection;
use crate::services::{keyword, mood_analysis, streak};
use crate::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 100;
const MAX_HISTORY_LIMIT: i64 = 500;

/// Classify, store, then advance the streak.
pub async fn create_journal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateJournalRequest>,
) -> AppResult<Json<JournalSubmitResponse>> {
    body.validate()?;
    if body.entry_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Please write something before analyzing.".into(),
        ));
    }

    let (reading, engine) = match body.engine.unwrap_or_default() {
        MoodEngine::Llm => {
            match mood_analysis::classify(
                state.model.clone(),
                &body.entry_text,
                state.config.llm_timeout(),
            )
            .await
            {
                Ok(reading) => (reading, MoodEngine::Llm),
                Err(e) => {
                    tracing::warn!(
                        user_id = %auth_user.id,
                        error = %e,
                        "Mood classifier unavailable, using keyword fallback"
                    );
                    (keyword::detect(&body.entry_text), MoodEngine::Fallback)
                }
            }
        }
        MoodEngine::Fallback => (keyword::detect(&body.entry_text), MoodEngine::Fallback),
    };

    let new_entry = NewJournalEntry::new(&auth_user.id, body.entry_text)
        .with_reading(&reading.mood, reading.feedback)
        .engine(engine);

    // Losing the entry is user-visible, so store errors propagate.
    let entry = state
        .store
        .append(new_entry.into())
        .await?
        .into_journal()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("store returned a non-journal record")))?;

    let streak_count = streak::update(&*state.store, &auth_user.id, Utc::now().date_naive()).await;

    tracing::info!(
        user_id = %auth_user.id,
        entry_id = %entry.id,
        mood = %entry.mood,
        ?engine,
        streak_count,
        "Journal entry saved"
    );

    Ok(Json(JournalSubmitResponse {
        entry,
        streak_count,
    }))
}

/// History, newest first, with optional mood filter and keyword search.
pub async fn list_journals(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<JournalHistoryQuery>,
) -> AppResult<Json<Vec<JournalEntry>>> {
    let mood = query
        .mood
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty() && m != "all");
    let needle = query
        .q
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    let entries: Vec<JournalEntry> = state
        .store
        .query(Collection::Journals, RecordQuery::for_user(&auth_user.id))
        .try_filter_map(|record| {
            let entry = record.into_journal().filter(|entry| {
                mood.as_ref().map_or(true, |m| entry.mood.eq_ignore_ascii_case(m))
                    && needle
                        .as_ref()
                        .map_or(true, |n| entry.entry_text.to_lowercase().contains(n.as_str()))
            });
            future::ready(Ok(entry))
        })
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .try_collect()
        .await?;

    Ok(Json(entries))
}

pub async fn delete_journal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    let existed = state
        .store
        .delete(Collection::Journals, &auth_user.id, entry_id)
        .await?;

    Ok(Json(DeleteResponse {
        deleted: true,
        existed,
        id: entry_id,
    }))
}

/// Keep a generated or built-in story as a journal entry. Stories do not
/// count towards the streak.
pub async fn save_story(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<SaveStoryRequest>,
) -> AppResult<Json<JournalEntry>> {
    body.validate()?;
    if body.story.trim().is_empty() {
        return Err(AppError::Validation("Story must not be blank".into()));
    }

    let new_entry = NewJournalEntry::new(&auth_user.id, body.story)
        .with_reading(&body.mood, "")
        .source(EntrySource::Story);

    let entry = state
        .store
        .append(new_entry.into())
        .await?
        .into_journal()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("store returned a non-journal record")))?;

    tracing::info!(user_id = %auth_user.id, entry_id = %entry.id, "Story saved to journal");
    Ok(Json(entry))
}
