use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/availabilities",
            post(handlers::availability::create_availability),
        )
        .route(
            "/availabilities/:id",
            get(handlers::availability::get_availability)
                .delete(handlers::availability::delete_availability),
        )
}
