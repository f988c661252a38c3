use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use futures_util::TryStreamExt;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::db::RecordQuery;
use crate::dto::{CreateReflectionRequest, DeleteResponse, ListQuery, ReflectionStreakResponse};
use crate::error::{AppError, AppResult};
use crate::models::record::Collection;
use crate::models::reflection::{NewReflectionEntry, ReflectionEntry};
use crate::services::streak;
use crate::AppState;

pub async fn create_reflection(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateReflectionRequest>,
) -> AppResult<Json<ReflectionEntry>> {
    body.validate()?;
    if body.text.trim().is_empty() {
        return Err(AppError::Validation(
            "Please write something before saving.".into(),
        ));
    }

    let new_entry = NewReflectionEntry::new(&auth_user.id, body.text, &body.mood, body.rating);
    let entry = state
        .store
        .append(new_entry.into())
        .await?
        .into_reflection()
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("store returned a non-reflection record"))
        })?;

    tracing::info!(user_id = %auth_user.id, entry_id = %entry.id, rating = entry.rating, "Reflection saved");
    Ok(Json(entry))
}

pub async fn list_reflections(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ReflectionEntry>>> {
    let limit = query.limit.unwrap_or(100).clamp(1, 500);

    let entries: Vec<ReflectionEntry> = state
        .store
        .query(
            Collection::Reflections,
            RecordQuery::recent(&auth_user.id, limit),
        )
        .try_filter_map(|record| futures_util::future::ready(Ok(record.into_reflection())))
        .try_collect()
        .await?;

    Ok(Json(entries))
}

pub async fn delete_reflection(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    let existed = state
        .store
        .delete(Collection::Reflections, &auth_user.id, entry_id)
        .await?;

    Ok(Json(DeleteResponse {
        deleted: true,
        existed,
        id: entry_id,
    }))
}

/// Consecutive days up to today with at least one reflection. Derived on
/// every read; a failed read shows as no streak.
pub async fn reflection_streak(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Json<ReflectionStreakResponse> {
    let dates: Result<Vec<NaiveDate>, _> = state
        .store
        .query(Collection::Reflections, RecordQuery::for_user(&auth_user.id))
        .map_ok(|record| record.created_at().date_naive())
        .try_collect()
        .await;

    let streak = match dates {
        Ok(dates) => streak::run_ending_today(dates, Utc::now().date_naive()),
        Err(e) => {
            tracing::warn!(user_id = %auth_user.id, error = %e, "Reflection history unavailable");
            0
        }
    };

    Json(ReflectionStreakResponse { streak })
}
