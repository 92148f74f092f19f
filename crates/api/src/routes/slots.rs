use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/providers/:provider_id/slots",
        get(handlers::slots::get_slots),
    )
}
