use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::openai::UpstreamError;
use crate::AppState;

use super::models::{ChatReply, ChatRequest, ErrorResponse};

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, Json<ErrorResponse>)> {
    if !payload.messages.is_array() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message(
                "'messages' field is required and must be an array.",
            )),
        ));
    }

    match state.openai.complete(&payload.messages).await {
        Ok(reply) => Ok(Json(ChatReply { reply })),
        Err(err) => {
            error!("error in /api/chat: {err}");
            Err(relay_error(err))
        }
    }
}

/// Translates an upstream failure into the response the caller sees. Upstream
/// API errors keep their status and payload; everything else is a 500.
fn relay_error(err: UpstreamError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        UpstreamError::Api { status, error } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(ErrorResponse { error }),
        ),
        UpstreamError::InvalidResponse => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::message("Invalid response from OpenAI API")),
        ),
        UpstreamError::Transport(err) => {
            let message = err.to_string();
            let message = if message.is_empty() {
                "Internal server error".to_string()
            } else {
                message
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::message(message)),
            )
        }
    }
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::message("Not found")),
    )
        .into_response()
}
