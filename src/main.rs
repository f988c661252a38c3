use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod services;

use auth::rate_limit::RateLimitState;
use config::{Config, StoreBackend};
use db::Store;
use services::llm::{ClaudeClient, LanguageModel};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub model: Arc<dyn LanguageModel>,
    pub config: Arc<Config>,
    pub rate_limiter: RateLimitState,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "echosoul_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres store"))?;
            let pool = db::create_pool(url).await?;
            Arc::new(db::PgStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records are lost on restart");
            Arc::new(db::MemoryStore::new())
        }
    };

    if config.claude_api_key.is_empty() {
        tracing::warn!("CLAUDE_API_KEY is not set; mood analysis will use keyword fallback");
    }
    let model: Arc<dyn LanguageModel> = Arc::new(ClaudeClient::new(
        config.claude_api_key.clone(),
        config.claude_model.clone(),
    )?);

    let rate_limiter = RateLimitState::new();
    auth::rate_limit::spawn_cleanup_worker(rate_limiter.clone());

    let state = AppState {
        store: store.clone(),
        model,
        config: config.clone(),
        rate_limiter,
    };

    let app = build_router(state).layer(build_cors(&config)?);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    // Use into_make_service_with_connect_info to provide client IP for rate limiting
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    store.close().await;
    tracing::info!("Store closed, shutting down");
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/api/session", post(handlers::session::create_session))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_session,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .merge(session_routes);

    // Routes that call the language model carry a per-user quota
    let llm_routes = Router::new()
        .route("/api/journals", post(handlers::journals::create_journal))
        .route(
            "/api/booster/affirmation",
            post(handlers::booster::affirmation),
        )
        .route(
            "/api/booster/affirmation-goal",
            post(handlers::booster::affirmation_goal),
        )
        .route("/api/booster/story", post(handlers::booster::story))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_llm,
        ));

    let protected_routes = Router::new()
        // Journals
        .route("/api/journals", get(handlers::journals::list_journals))
        .route(
            "/api/journals/:id",
            delete(handlers::journals::delete_journal),
        )
        .route(
            "/api/journals/stories",
            post(handlers::journals::save_story),
        )
        // Reflections
        .route(
            "/api/reflections",
            get(handlers::reflections::list_reflections)
                .post(handlers::reflections::create_reflection),
        )
        .route(
            "/api/reflections/:id",
            delete(handlers::reflections::delete_reflection),
        )
        .route(
            "/api/reflections/streak",
            get(handlers::reflections::reflection_streak),
        )
        // Streak
        .route("/api/streak", get(handlers::streak::get_streak))
        .route(
            "/api/streak/reconcile",
            post(handlers::streak::reconcile_streak),
        )
        // Insights
        .route("/api/insights/weekly", get(handlers::insights::get_weekly))
        .route(
            "/api/insights/timeline",
            get(handlers::insights::get_timeline),
        )
        .route("/api/insights/trend", get(handlers::insights::get_trend))
        .merge(llm_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = vec![config
        .frontend_url
        .parse::<axum::http::HeaderValue>()
        .map_err(|e| anyhow::anyhow!("FRONTEND_URL is not a valid origin: {}", e))?];
    // In dev, also allow LAN access (e.g. testing from another device)
    if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
        for o in extra.split(',') {
            if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                origins.push(hv);
            }
        }
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::connect_info::MockConnectInfo,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use tower::ServiceExt;

    use crate::auth::jwt::create_session_token;
    use crate::db::MemoryStore;
    use crate::services::llm::stub::StubModel;

    struct TestApp {
        router: Router,
        store: Arc<MemoryStore>,
        config: Arc<Config>,
    }

    impl TestApp {
        fn new(model: Arc<dyn LanguageModel>) -> Self {
            let store = Arc::new(MemoryStore::new());
            let config = Arc::new(Config::for_tests());
            let state = AppState {
                store: store.clone(),
                model,
                config: config.clone(),
                rate_limiter: RateLimitState::new(),
            };
            let router = build_router(state)
                .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
            Self {
                router,
                store,
                config,
            }
        }

        fn token(&self, user_id: &str) -> String {
            create_session_token(user_id, &self.config)
                .unwrap()
                .access_token
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }
    }

    const HAPPY_READING: &str = "Mood: Happy\nFeedback: Keep doing what lifts you.";

    #[tokio::test]
    async fn test_health_is_public() {
        let app = TestApp::new(StubModel::failing());
        let (status, body) = app.send(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "echosoul-api");

        let (status, body) = app.send(Method::GET, "/readyz", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["store"], "ok");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = TestApp::new(StubModel::failing());
        let (status, body) = app.send(Method::GET, "/api/journals", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], 401);

        let (status, _) = app
            .send(Method::GET, "/api/streak", Some("not-a-token"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_session_issues_usable_token() {
        let app = TestApp::new(StubModel::failing());
        let (status, body) = app.send(Method::POST, "/api/session", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let token = body["access_token"].as_str().unwrap().to_string();
        let (status, body) = app
            .send(Method::GET, "/api/streak", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["streak_count"], 0);
    }

    #[tokio::test]
    async fn test_session_creation_is_rate_limited() {
        let app = TestApp::new(StubModel::failing());
        for _ in 0..5 {
            let (status, _) = app.send(Method::POST, "/api/session", None, None).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, body) = app.send(Method::POST, "/api/session", None, None).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"]["code"], 429);
    }

    #[tokio::test]
    async fn test_submit_journal_classifies_and_starts_streak() {
        let model = StubModel::canned(HAPPY_READING);
        let app = TestApp::new(model.clone());
        let token = app.token("user-a");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/journals",
                Some(&token),
                Some(json!({ "entry_text": "Spent the afternoon in the park with friends." })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entry"]["mood"], "happy");
        assert_eq!(body["entry"]["feedback"], "Keep doing what lifts you.");
        assert_eq!(body["entry"]["engine"], "llm");
        assert_eq!(body["streak_count"], 1);
        assert_eq!(model.calls(), 1);

        let (_, body) = app
            .send(Method::GET, "/api/streak", Some(&token), None)
            .await;
        assert_eq!(body["streak_count"], 1);
    }

    #[tokio::test]
    async fn test_submit_journal_falls_back_to_keywords() {
        let app = TestApp::new(StubModel::failing());
        let token = app.token("user-a");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/journals",
                Some(&token),
                Some(json!({ "entry_text": "I feel worried about tomorrow's exam." })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entry"]["mood"], "anxious");
        assert_eq!(body["entry"]["engine"], "fallback");
    }

    #[tokio::test]
    async fn test_submit_journal_times_out_to_fallback() {
        let app = TestApp::new(StubModel::hanging());
        let token = app.token("user-a");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/journals",
                Some(&token),
                Some(json!({ "entry_text": "Quiet evening, feeling calm and rested." })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entry"]["mood"], "calm");
        assert_eq!(body["entry"]["engine"], "fallback");
    }

    #[tokio::test]
    async fn test_short_entry_skips_model() {
        let model = StubModel::canned(HAPPY_READING);
        let app = TestApp::new(model.clone());
        let token = app.token("user-a");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/journals",
                Some(&token),
                Some(json!({ "entry_text": "ok" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entry"]["mood"], "unclear");
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_journal_is_rejected() {
        let app = TestApp::new(StubModel::canned(HAPPY_READING));
        let token = app.token("user-a");

        let (status, _) = app
            .send(
                Method::POST,
                "/api/journals",
                Some(&token),
                Some(json!({ "entry_text": "   " })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, body) = app
            .send(Method::GET, "/api/journals", Some(&token), None)
            .await;
        assert_eq!(body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_streak_write_failure_does_not_fail_submission() {
        let app = TestApp::new(StubModel::canned(HAPPY_READING));
        app.store.set_fail_streak_writes(true);
        let token = app.token("user-a");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/journals",
                Some(&token),
                Some(json!({ "entry_text": "A good day at work, finished the project." })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["streak_count"], 1);

        let (_, body) = app
            .send(Method::GET, "/api/journals", Some(&token), None)
            .await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        app.store.set_fail_streak_writes(false);
        let (status, body) = app
            .send(Method::POST, "/api/streak/reconcile", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["diverged"], true);
    }

    #[tokio::test]
    async fn test_history_is_scoped_and_filterable() {
        let app = TestApp::new(StubModel::failing());
        let alice = app.token("alice");
        let bob = app.token("bob");

        for text in ["I was so happy at lunch", "Feeling lonely tonight"] {
            app.send(
                Method::POST,
                "/api/journals",
                Some(&alice),
                Some(json!({ "entry_text": text, "engine": "fallback" })),
            )
            .await;
        }

        let (_, body) = app
            .send(Method::GET, "/api/journals", Some(&bob), None)
            .await;
        assert!(body.as_array().unwrap().is_empty());

        let (_, body) = app
            .send(Method::GET, "/api/journals?mood=sad", Some(&alice), None)
            .await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["entry_text"], "Feeling lonely tonight");

        let (_, body) = app
            .send(Method::GET, "/api/journals?q=LUNCH", Some(&alice), None)
            .await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) = app
            .send(Method::GET, "/api/journals", Some(&alice), None)
            .await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["entry_text"], "Feeling lonely tonight");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let app = TestApp::new(StubModel::failing());
        let token = app.token("user-a");

        let (_, body) = app
            .send(
                Method::POST,
                "/api/reflections",
                Some(&token),
                Some(json!({ "text": "Long walk", "mood": "Calm", "rating": 4 })),
            )
            .await;
        assert_eq!(body["mood"], "calm");
        let id = body["id"].as_str().unwrap().to_string();
        let uri = format!("/api/reflections/{}", id);

        let (status, body) = app.send(Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["existed"], true);

        let (status, body) = app.send(Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["existed"], false);
    }

    #[tokio::test]
    async fn test_reflection_rating_out_of_range_is_rejected() {
        let app = TestApp::new(StubModel::failing());
        let token = app.token("user-a");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/reflections",
                Some(&token),
                Some(json!({ "text": "Long walk", "mood": "calm", "rating": 6 })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);
    }

    #[tokio::test]
    async fn test_reflection_streak_counts_today() {
        let app = TestApp::new(StubModel::failing());
        let token = app.token("user-a");

        let (_, body) = app
            .send(Method::GET, "/api/reflections/streak", Some(&token), None)
            .await;
        assert_eq!(body["streak"], 0);

        app.send(
            Method::POST,
            "/api/reflections",
            Some(&token),
            Some(json!({ "text": "Read a book", "mood": "calm", "rating": 5 })),
        )
        .await;

        let (_, body) = app
            .send(Method::GET, "/api/reflections/streak", Some(&token), None)
            .await;
        assert_eq!(body["streak"], 1);
    }

    #[tokio::test]
    async fn test_weekly_insights() {
        let app = TestApp::new(StubModel::canned(HAPPY_READING));
        let token = app.token("user-a");

        let (status, body) = app
            .send(Method::GET, "/api/insights/weekly", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["has_entries"], false);
        assert_eq!(body["message"], "No entries found for this week.");

        app.send(
            Method::POST,
            "/api/journals",
            Some(&token),
            Some(json!({ "entry_text": "Dinner with my family tonight." })),
        )
        .await;
        app.send(
            Method::POST,
            "/api/reflections",
            Some(&token),
            Some(json!({ "text": "Good talk", "mood": "happy", "rating": 4 })),
        )
        .await;
        app.send(
            Method::POST,
            "/api/reflections",
            Some(&token),
            Some(json!({ "text": "Rough meeting", "mood": "sad", "rating": 5 })),
        )
        .await;

        let (_, body) = app
            .send(Method::GET, "/api/insights/weekly", Some(&token), None)
            .await;
        assert_eq!(body["has_entries"], true);
        assert_eq!(body["dominant_mood"], "happy");
        assert_eq!(body["mood_distribution"]["happy"], 2);
        assert_eq!(body["mood_distribution"]["sad"], 1);
        assert_eq!(body["average_rating"], 4.5);
    }

    #[tokio::test]
    async fn test_weekly_average_is_na_without_reflections() {
        let app = TestApp::new(StubModel::canned(HAPPY_READING));
        let token = app.token("user-a");

        app.send(
            Method::POST,
            "/api/journals",
            Some(&token),
            Some(json!({ "entry_text": "Dinner with my family tonight." })),
        )
        .await;

        let (_, body) = app
            .send(Method::GET, "/api/insights/weekly", Some(&token), None)
            .await;
        assert_eq!(body["average_rating"], "N/A");
    }

    #[tokio::test]
    async fn test_timeline_and_trend() {
        let app = TestApp::new(StubModel::canned(HAPPY_READING));
        let token = app.token("user-a");

        let (_, body) = app
            .send(Method::GET, "/api/insights/timeline", Some(&token), None)
            .await;
        assert_eq!(body["has_entries"], false);

        app.send(
            Method::POST,
            "/api/journals",
            Some(&token),
            Some(json!({ "entry_text": "Dinner with my family tonight." })),
        )
        .await;

        let (_, body) = app
            .send(Method::GET, "/api/insights/timeline", Some(&token), None)
            .await;
        assert_eq!(body["has_entries"], true);
        assert_eq!(body["frequency_by_mood"]["happy"], 1);

        let (status, body) = app
            .send(Method::GET, "/api/insights/trend", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_affirmation_defaults_when_model_fails() {
        let app = TestApp::new(StubModel::failing());
        let token = app.token("user-a");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/booster/affirmation",
                Some(&token),
                Some(json!({ "mood": "Sad" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mood"], "sad");
        assert_eq!(body["affirmation"], "You're doing your best. Keep going.");
    }

    #[tokio::test]
    async fn test_affirmation_goal_parses_model_output() {
        let app = TestApp::new(StubModel::canned(
            "Affirmation: You handle hard days well.\nWeekly Goal: Walk three times.",
        ));
        let token = app.token("user-a");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/booster/affirmation-goal",
                Some(&token),
                Some(json!({ "entry": "Work was a lot this week." })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["affirmation"], "You handle hard days well.");
        assert_eq!(body["weekly_goal"], "Walk three times.");
    }

    #[tokio::test]
    async fn test_story_sources() {
        let app = TestApp::new(StubModel::failing());
        let token = app.token("user-a");

        let (_, body) = app
            .send(
                Method::POST,
                "/api/booster/story",
                Some(&token),
                Some(json!({ "mood": "happy", "topic": "pancakes" })),
            )
            .await;
        assert_eq!(body["source"], "template");

        let (_, body) = app
            .send(
                Method::POST,
                "/api/booster/story",
                Some(&token),
                Some(json!({ "mood": "calm" })),
            )
            .await;
        assert_eq!(body["source"], "local");
        assert!(!body["story"].as_str().unwrap().is_empty());

        let (_, body) = app
            .send(
                Method::POST,
                "/api/booster/story",
                Some(&token),
                Some(json!({ "mood": "bewildered", "engine": "local" })),
            )
            .await;
        assert_eq!(body["source"], "local");
    }

    #[tokio::test]
    async fn test_saved_story_is_kept_without_streak() {
        let app = TestApp::new(StubModel::failing());
        let token = app.token("user-a");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/journals/stories",
                Some(&token),
                Some(json!({ "mood": "calm", "story": "The lake was still." })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "story");
        assert!(body["engine"].is_null());

        let (_, body) = app
            .send(Method::GET, "/api/streak", Some(&token), None)
            .await;
        assert_eq!(body["streak_count"], 0);
    }

    #[tokio::test]
    async fn test_reconcile_ignores_stories_and_clears_stale_streak() {
        let app = TestApp::new(StubModel::canned(HAPPY_READING));
        let token = app.token("user-a");

        let (_, body) = app
            .send(
                Method::POST,
                "/api/journals",
                Some(&token),
                Some(json!({ "entry_text": "Dinner with my family tonight." })),
            )
            .await;
        let id = body["entry"]["id"].as_str().unwrap().to_string();
        app.send(
            Method::POST,
            "/api/journals/stories",
            Some(&token),
            Some(json!({ "mood": "calm", "story": "The lake was still." })),
        )
        .await;
        app.send(
            Method::DELETE,
            &format!("/api/journals/{}", id),
            Some(&token),
            None,
        )
        .await;

        let (status, body) = app
            .send(Method::POST, "/api/streak/reconcile", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["reconciled"].is_null());
        assert_eq!(body["diverged"], true);

        let (_, body) = app
            .send(Method::GET, "/api/streak", Some(&token), None)
            .await;
        assert_eq!(body["streak_count"], 0);
    }

    #[tokio::test]
    async fn test_topic_story_from_model_is_reported_as_llm() {
        let app = TestApp::new(StubModel::canned("Warm pancakes on a slow morning."));
        let token = app.token("user-a");

        let (status, body) = app
            .send(
                Method::POST,
                "/api/booster/story",
                Some(&token),
                Some(json!({ "mood": "happy", "topic": "pancakes" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "llm");
        assert_eq!(body["story"], "Warm pancakes on a slow morning.");
    }
}
