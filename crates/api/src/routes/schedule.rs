use axum::{
    routing::{post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/providers/:provider_id/schedule",
            put(handlers::schedule::replace_schedule),
        )
        .route(
            "/api/schedule/validate",
            post(handlers::schedule::validate_schedule),
        )
}
