use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware as mw, Router};

use crate::server::endpoints::{meetings, periods, statistics, status, students};
use crate::server::middleware::user_validator;
use crate::types::AppState;

mod endpoints;
mod middleware;
mod types;

/// Creates a router that can be used by `axum`.
///
/// Every route except the health probe runs behind the user-resolver
/// middleware and acts on behalf of the resolved user.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let user_router = Router::new()
        .route(
            "/students",
            post(students::post_create_student).get(students::get_students),
        )
        .route(
            "/students/:student_id/meetings",
            post(meetings::post_create_meetings).get(meetings::get_student_meetings),
        )
        .route(
            "/students/:student_id/statistics",
            get(statistics::get_student_statistics),
        )
        .route(
            "/meetings/:meeting_id/complete",
            post(meetings::post_complete_meeting),
        )
        .route(
            "/periods",
            post(periods::post_create_period).get(periods::get_periods),
        )
        .layer(mw::from_fn(user_validator::resolve_user));

    Router::new()
        .route("/health", get(status::get_health))
        .merge(user_router)
        .with_state(app_state)
}
