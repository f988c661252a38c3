use axum::{extract::State, Extension, Json};
use chrono::Utc;

use crate::auth::middleware::AuthUser;
use crate::dto::{TimelineResponse, TrendResponse, WeeklyResponse};
use crate::error::AppResult;
use crate::services::{timeline, weekly};
use crate::AppState;

pub async fn get_weekly(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<WeeklyResponse>> {
    let summary = weekly::weekly_summary(
        &*state.store,
        &auth_user.id,
        Utc::now(),
        state.config.weekly_fetch_limit,
    )
    .await?;

    let response = match summary {
        Some(summary) => WeeklyResponse {
            has_entries: true,
            message: None,
            summary: Some(summary),
        },
        None => WeeklyResponse {
            has_entries: false,
            message: Some("No entries found for this week.".into()),
            summary: None,
        },
    };

    Ok(Json(response))
}

pub async fn get_timeline(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<TimelineResponse>> {
    let timeline = timeline::weekly_timeline(
        &*state.store,
        &auth_user.id,
        Utc::now(),
        state.config.timeline_fetch_limit,
    )
    .await?;

    Ok(Json(TimelineResponse {
        has_entries: !timeline.is_empty(),
        colors: timeline.colors(),
        emojis: timeline.emojis(),
        timeline,
    }))
}

pub async fn get_trend(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<TrendResponse>> {
    let points = timeline::recent_score_trend(
        &*state.store,
        &auth_user.id,
        state.config.trend_fetch_limit,
    )
    .await?;

    Ok(Json(TrendResponse { points }))
}
