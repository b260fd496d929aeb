pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::funnel::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Funnel API
        .route("/api/v1/funnel/catalog", get(handlers::handle_catalog))
        .route(
            "/api/v1/leads",
            post(handlers::handle_create_lead).get(handlers::handle_list_leads),
        )
        .route("/api/v1/leads/:id", get(handlers::handle_get_lead))
        .route("/api/v1/leads/:id/confirm", post(handlers::handle_confirm))
        .route(
            "/api/v1/leads/:id/retention",
            post(handlers::handle_retention),
        )
        .with_state(state)
}
