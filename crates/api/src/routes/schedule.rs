use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/schedules", post(handlers::schedule::create_schedule))
        .route("/schedules/:uuid", get(handlers::schedule::get_schedule))
        .route(
            "/schedules/:uuid/with-availabilities",
            get(handlers::schedule::get_schedule_with_availabilities),
        )
}
