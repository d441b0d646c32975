// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use nihongo_practice::config::Config;
use nihongo_practice::gateway::gemini::GeminiClient;
use nihongo_practice::routes;
use nihongo_practice::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // The proxy holds no credential of its own; every request carries
    // the caller's key through to the model.
    let generator = Arc::new(GeminiClient::new(
        config.gemini_api_base.clone(),
        config.gemini_model.clone(),
    ));

    // Create AppState
    let state = AppState {
        config: config.clone(),
        generator,
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}
