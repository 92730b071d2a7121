mod handlers;
mod models;

use std::sync::Arc;

use axum::{routing::post, Router};

use crate::AppState;

pub use handlers::{chat, not_found};
pub use models::{ChatReply, ChatRequest, ErrorResponse};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .fallback(not_found)
        .with_state(state)
}
