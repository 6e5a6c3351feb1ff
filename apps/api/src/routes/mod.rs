pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::disputes::handlers as disputes;
use crate::extraction::handlers as reports;
use crate::letters::handlers as letters;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Report analysis
        .route("/api/v1/reports/parse", post(reports::handle_parse))
        .route("/api/v1/reports/normalize", post(reports::handle_normalize))
        .route(
            "/api/v1/reports/segmented",
            post(reports::handle_parse_segmented),
        )
        // Letters
        .route("/api/v1/letters", post(letters::handle_render_letters))
        // Dispute packages (multipart upload)
        .route(
            "/api/v1/disputes",
            post(disputes::handle_create_dispute).layer(upload_limit.clone()),
        )
        .route(
            "/api/v1/disputes/sample",
            post(disputes::handle_create_sample_dispute).layer(upload_limit),
        )
        .with_state(state)
}
