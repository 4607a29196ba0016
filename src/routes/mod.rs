//! API routes

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::conversation::Message;
use crate::providers::ProviderError;
use crate::relay::{RelayError, DEFAULT_SESSION};
use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// History key. Requests without one share the default session.
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub messages: Vec<Message>,
}

/// Handler failures mapped onto the HTTP surface.
enum ApiError {
    BadRequest(String),
    Relay(RelayError),
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        ApiError::Relay(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", detail),
            )
                .into_response(),
            ApiError::Relay(RelayError::Provider(err)) => match err {
                ProviderError::RequestFailed(e) => (
                    StatusCode::BAD_GATEWAY,
                    format!("upstream request failed: {}", e),
                )
                    .into_response(),
                // Provider errors pass through with their original status
                // and body, unreinterpreted.
                ProviderError::Upstream { status, body } => (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    body,
                )
                    .into_response(),
                ProviderError::InvalidResponse(detail) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, detail).into_response()
                }
                ProviderError::NoCompletion(detail) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, detail).into_response()
                }
            },
        }
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let session = request.session.as_deref().unwrap_or(DEFAULT_SESSION);
    let reply = state
        .relay
        .relay(session, request.model.as_deref(), request.messages)
        .await?;

    Ok(Json(reply))
}

/// Non-preflight `OPTIONS` requests skip the CORS layer's short-circuit and
/// land here; they get the same 200 with an empty body.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat).options(preflight))
}
