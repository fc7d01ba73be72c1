pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::sheet::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Character sheet API
        .route("/api/v1/sheets/parse", post(handlers::handle_parse))
        .route("/api/v1/sheets/render", post(handlers::handle_render))
        .route(
            "/api/v1/template/slots",
            get(handlers::handle_template_slots),
        )
        .with_state(state)
}
