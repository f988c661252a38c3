use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::dto::{ReconcileResponse, StreakResponse};
use crate::error::AppResult;
use crate::services::streak;
use crate::AppState;

/// Cached journal streak. A failed read shows as no streak.
pub async fn get_streak(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Json<StreakResponse> {
    let cached = state.store.load_streak(&auth_user.id).await.unwrap_or_else(|e| {
        tracing::warn!(user_id = %auth_user.id, error = %e, "Streak read failed");
        None
    });

    Json(cached.into())
}

/// Rebuild the cached streak from journal history.
pub async fn reconcile_streak(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ReconcileResponse>> {
    let result = streak::reconcile(&*state.store, &auth_user.id).await?;
    Ok(Json(result))
}
