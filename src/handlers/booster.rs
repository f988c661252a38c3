use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{
    AffirmationGoalRequest, AffirmationRequest, AffirmationResponse, StoryEngine, StoryRequest,
    StoryResponse, StorySource,
};
use crate::error::AppResult;
use crate::models::mood::normalize_label;
use crate::services::mood_analysis::{self, AffirmationGoal};
use crate::services::stories;
use crate::AppState;

const DEFAULT_PERSONA: &str = "EchoSoul";
const GENERIC_STORY: &str =
    "Every feeling passes like weather. Take a slow breath and let this one move through you.";

pub async fn affirmation(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<AffirmationRequest>,
) -> AppResult<Json<AffirmationResponse>> {
    body.validate()?;
    let mood = normalize_label(&body.mood);

    let affirmation =
        mood_analysis::affirmation(state.model.clone(), &mood, state.config.llm_timeout()).await;

    tracing::debug!(user_id = %auth_user.id, mood = %mood, "Affirmation served");
    Ok(Json(AffirmationResponse { mood, affirmation }))
}

pub async fn affirmation_goal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<AffirmationGoalRequest>,
) -> AppResult<Json<AffirmationGoal>> {
    body.validate()?;
    let persona = body
        .persona_name
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PERSONA);

    let result = mood_analysis::affirmation_and_goal(
        state.model.clone(),
        &body.entry,
        persona,
        state.config.llm_timeout(),
    )
    .await;

    tracing::debug!(user_id = %auth_user.id, "Affirmation and goal served");
    Ok(Json(result))
}

/// With a topic the story is generated around it, falling back to a
/// template. Without one it is a mood story, generated or picked from the
/// built-in collection.
pub async fn story(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<StoryRequest>,
) -> AppResult<Json<StoryResponse>> {
    body.validate()?;
    let mood = normalize_label(&body.mood);
    let timeout = state.config.llm_timeout();

    let topic = body
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let (story, source) = match (topic, body.engine.unwrap_or_default()) {
        (Some(topic), _) => mood_analysis::story(state.model.clone(), topic, &mood, timeout).await,
        (None, StoryEngine::Llm) => {
            match mood_analysis::emotion_story(state.model.clone(), &mood, timeout).await {
                Ok(text) if !text.trim().is_empty() => (text.trim().to_string(), StorySource::Llm),
                Ok(_) => local_story(&mood),
                Err(e) => {
                    tracing::warn!(error = %e, mood = %mood, "Story generator unavailable, using built-in story");
                    local_story(&mood)
                }
            }
        }
        (None, StoryEngine::Local) => local_story(&mood),
    };

    tracing::debug!(user_id = %auth_user.id, mood = %mood, ?source, "Story served");
    Ok(Json(StoryResponse {
        mood,
        story,
        source,
    }))
}

fn local_story(mood: &str) -> (String, StorySource) {
    let text = stories::random_story(mood).unwrap_or(GENERIC_STORY);
    (text.to_string(), StorySource::Local)
}
