use axum::{extract::State, Json};
use uuid::Uuid;

use crate::auth::jwt::{create_session_token, SessionToken};
use crate::error::AppResult;
use crate::AppState;

/// Start an anonymous session. Every session gets a fresh user id, so
/// records written with it are private to the token holder.
pub async fn create_session(State(state): State<AppState>) -> AppResult<Json<SessionToken>> {
    let user_id = Uuid::new_v4().to_string();
    let token = create_session_token(&user_id, &state.config)?;

    tracing::info!(user_id = %user_id, "Session created");
    Ok(Json(token))
}
