// src/routes.rs

use axum::{Router, http::Method, routing::post};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers::generate, state::AppState};

/// Assembles the application router.
///
/// * Mounts the question-generation proxy under /api.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (config + generator).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let generate_routes = Router::new().route(
        "/generate",
        post(generate::generate_questions).fallback(generate::method_not_allowed),
    );

    Router::new()
        .nest("/api", generate_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
