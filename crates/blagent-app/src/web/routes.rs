use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use blagent_models::{ChatReply, ChatRequest, ErrorBody};
use blagent_relay::{RelayClient, RelayError};

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    /// None when the upstream credentials are missing; the chat route then
    /// answers with a configuration error instead of refusing to boot.
    pub relay: Option<Arc<RelayClient>>,
}

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat).fallback(method_not_allowed))
        .route("/health", get(health))
        .route("/", get(serve_index))
        // SPA fallback: anything that is not an API route gets the chat page
        .fallback(serve_index)
        .with_state(state)
}

/// POST /api/chat - relay one message to the completion API
async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let relay = state.relay.as_ref().ok_or(AppError::NotConfigured)?;
    let message = payload.message.unwrap_or_default();
    let response = relay.complete(&message).await?;
    Ok(Json(ChatReply { response }))
}

/// GET /health - health check
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "API server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET / - serve the embedded chat page
async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../../web/index.html"))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    NotConfigured,
    MethodNotAllowed,
    Relay(RelayError),
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        AppError::Relay(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "server is missing the API key or app id".to_string(),
                    message: None,
                    kind: Some("ConfigurationError".to_string()),
                },
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorBody {
                    error: "only POST requests are supported".to_string(),
                    message: None,
                    kind: None,
                },
            ),
            AppError::Relay(RelayError::EmptyMessage) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "message is required".to_string(),
                    message: None,
                    kind: Some(RelayError::EmptyMessage.kind().to_string()),
                },
            ),
            AppError::Relay(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "server error".to_string(),
                    message: Some(err.to_string()),
                    kind: Some(err.kind().to_string()),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
