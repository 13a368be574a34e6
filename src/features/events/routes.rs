use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::events::handlers;
use crate::features::events::services::EventService;

/// Create routes for the events feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<EventService>) -> Router {
    Router::new()
        .route("/api/events", get(handlers::list_events))
        .route("/api/events/{event_id}", get(handlers::get_event))
        .with_state(service)
}
