//! Endpoint for the filtered lesson statistics report.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::lessons::{self, LessonError, LessonFilter};
use crate::server::middleware::user_validator::RequestUser;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// Query parameters selecting the active filters.
///
/// Omitted parameters mean no filter of that kind; both present means
/// both must hold.
#[derive(Debug, Deserialize)]
pub struct StatisticsQueryParams {
    #[serde(default)]
    pub period_id: Option<i64>,
    #[serde(default)]
    pub subject: Option<String>,
}

/// GET /students/:student_id/statistics
///
/// Reduces the student's meeting history to the filtered subset, the
/// statistics summary, and the chart distribution.
pub async fn get_student_statistics(
    Path(student_id): Path<i64>,
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<RequestUser>,
    Query(params): Query<StatisticsQueryParams>,
) -> Response {
    info!(
        "GET /students/{}/statistics (period_id={:?}, subject={:?})",
        student_id, params.period_id, params.subject
    );

    match s.lesson_db.get_owned_student(user.0, student_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return ApiErrorType::from(LessonError::StudentNotFound { student_id }).into_response();
        }
        Err(e) => {
            error!("Failed to resolve student: {}", e);
            return ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to resolve student",
                Some(e.to_string()),
            ))
            .into_response();
        }
    }

    let meetings = match s.lesson_db.get_meetings_for_student(user.0, student_id) {
        Ok(meetings) => meetings,
        Err(e) => {
            error!("Failed to fetch meetings: {}", e);
            return ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch meetings",
                Some(e.to_string()),
            ))
            .into_response();
        }
    };

    let periods = match s.lesson_db.get_teaching_periods(user.0) {
        Ok(periods) => periods,
        Err(e) => {
            error!("Failed to fetch teaching periods: {}", e);
            return ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch teaching periods",
                Some(e.to_string()),
            ))
            .into_response();
        }
    };

    let mut filters = Vec::new();
    if let Some(period_id) = params.period_id {
        filters.push(LessonFilter::Period {
            teaching_period_id: period_id,
        });
    }
    if let Some(subject) = params.subject.filter(|q| !q.trim().is_empty()) {
        filters.push(LessonFilter::Subject { query: subject });
    }

    let report = lessons::filter_and_summarize(
        &meetings,
        &periods,
        &filters,
        Local::now().naive_local(),
    );

    (StatusCode::OK, Json(report)).into_response()
}
