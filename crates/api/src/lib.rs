use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Json, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use touchline_core::{EngineError, KnowledgeBase};
use touchline_engine::QueryEngine;
use touchline_observability::AppMetrics;
use touchline_providers::{ApiFootballClient, NewsApiClient, ProviderConfig};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

const DIGEST_LIMIT: usize = 3;

pub type Engine = QueryEngine<NewsApiClient, ApiFootballClient>;

#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<Engine>,
    pub metrics: Arc<AppMetrics>,
    pub allowed_origins: Arc<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: touchline_observability::MetricsSnapshot,
}

pub fn build_app() -> Result<Router> {
    let metrics = AppMetrics::shared();
    let config = ProviderConfig::from_env();
    let http_client = config.build_http_client()?;

    let engine = Arc::new(QueryEngine::new(
        KnowledgeBase::with_default_facts(),
        NewsApiClient::new(http_client.clone(), config.clone()),
        ApiFootballClient::new(http_client, config),
        metrics.clone(),
    ));

    let state = ApiState {
        engine,
        metrics,
        allowed_origins: Arc::new(parse_allowed_origins()),
    };

    Ok(build_router(state))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/chat", post(chat))
        .route("/v1/test/transfers", get(test_transfers))
        .route("/v1/test/fixtures", get(test_fixtures))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(16 * 1024))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    })
}

/// The engine never errors for a non-empty message; blank input is the only
/// client error the transport surfaces.
async fn chat(State(state): State<ApiState>, Json(request): Json<ChatRequest>) -> Response {
    match state.engine.respond(&request.message).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { response: reply })).into_response(),
        Err(EngineError::InvalidInput) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message must not be empty",
            }),
        )
            .into_response(),
    }
}

async fn test_transfers(State(state): State<ApiState>) -> impl IntoResponse {
    Json(ChatResponse {
        response: state.engine.news_digest(DIGEST_LIMIT).await,
    })
}

async fn test_fixtures(State(state): State<ApiState>) -> impl IntoResponse {
    Json(ChatResponse {
        response: state.engine.fixtures_digest(DIGEST_LIMIT).await,
    })
}

fn parse_allowed_origins() -> Vec<String> {
    env::var("TOUCHLINE_ALLOWED_ORIGINS")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Permissive when no origin list is configured, exact-match otherwise.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);
    }

    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

pub fn bind_address() -> String {
    env::var("TOUCHLINE_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string())
}

pub async fn serve() -> Result<()> {
    let bind = bind_address();
    let app = build_app()?;

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(bind = %bind, "touchline concierge api started");

    axum::serve(listener, app).await?;
    Ok(())
}
