//! Endpoints for the teaching-period catalog (terms and holidays).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::lessons::{LessonError, PeriodKind};
use crate::server::middleware::user_validator::RequestUser;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePeriodBody {
    pub name: String,
    pub kind: PeriodKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub year: i32,
}

/// POST /periods
/// Adds a term or holiday to the user's teaching-period catalog.
pub async fn post_create_period(
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<RequestUser>,
    Json(body): Json<CreatePeriodBody>,
) -> Response {
    info!("POST /periods");

    if body.name.trim().is_empty() {
        return ApiErrorType::from(LessonError::MissingField { field: "name" }).into_response();
    }
    if body.start_date >= body.end_date {
        warn!("Rejected period with inverted date range");
        return ApiErrorType::from(LessonError::InvalidPeriodRange).into_response();
    }

    match s.lesson_db.insert_teaching_period(
        user.0,
        body.name.trim(),
        body.kind,
        body.start_date,
        body.end_date,
        body.year,
    ) {
        Ok(period_id) => (
            StatusCode::CREATED,
            Json(json!({ "period_id": period_id })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create teaching period: {}", e);
            ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create teaching period",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

/// GET /periods
/// Returns the user's teaching-period catalog, ordered by start date.
pub async fn get_periods(
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<RequestUser>,
) -> Response {
    info!("GET /periods");

    match s.lesson_db.get_teaching_periods(user.0) {
        Ok(periods) => (StatusCode::OK, Json(periods)).into_response(),
        Err(e) => {
            error!("Failed to fetch teaching periods: {}", e);
            ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch teaching periods",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}
