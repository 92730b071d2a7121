pub mod api;
pub mod config;
pub mod openai;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use config::AppConfig;
use openai::OpenAiClient;

pub struct AppState {
    pub openai: OpenAiClient,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            openai: OpenAiClient::new(&config.openai_api_url, &config.openai_api_key),
        }
    }
}

/// Assembles the router with permissive CORS so a browser frontend on any
/// origin can call the relay.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(app: Router, port: u16) {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("bind failed");

    info!("Server listening on port {port}");

    axum::serve(listener, app).await.expect("server failed");
}
