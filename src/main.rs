use std::process::ExitCode;
use std::sync::Arc;

use tracing::error;
use tracing_subscriber::EnvFilter;

use chat_relay::config::AppConfig;
use chat_relay::{build_app, run_server, AppState};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let state = Arc::new(AppState::new(&config));
    let app = build_app(state);

    run_server(app, config.port).await;

    ExitCode::SUCCESS
}
