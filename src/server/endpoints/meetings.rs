//! Endpoints for creating and listing scheduled lessons.
//!
//! Creation runs the template through the recurrence expander and bulk
//! inserts the resulting series in one transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::lessons::{self, LessonError, MeetingTemplate, RepeatRule};
use crate::server::middleware::user_validator::RequestUser;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// Request body for meeting creation; the student comes from the path.
#[derive(Debug, Deserialize)]
pub struct CreateMeetingBody {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub repeat: RepeatRule,
}

/// POST /students/:student_id/meetings
///
/// Expands the submitted template and inserts the series all-or-nothing.
pub async fn post_create_meetings(
    Path(student_id): Path<i64>,
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<RequestUser>,
    Json(body): Json<CreateMeetingBody>,
) -> Response {
    info!("POST /students/{}/meetings", student_id);

    match s.lesson_db.get_owned_student(user.0, student_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Student not found: {}", student_id);
            return ApiErrorType::from(LessonError::StudentNotFound { student_id }).into_response();
        }
        Err(e) => return db_failure("Failed to resolve student", e),
    }

    let template = MeetingTemplate {
        title: body.title,
        student_id,
        date: body.date,
        start_time: body.start_time,
        end_time: body.end_time,
        description: body.description,
        is_completed: body.is_completed,
        repeat: body.repeat,
    };

    let drafts = match lessons::expand(&template) {
        Ok(drafts) => drafts,
        Err(e) => {
            warn!("Rejected meeting template: {}", e);
            return ApiErrorType::from(e).into_response();
        }
    };

    match s.lesson_db.insert_meetings(user.0, &drafts) {
        Ok(created) => {
            info!("Created {} meeting(s) for student {}", created.len(), student_id);
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => db_failure("Failed to insert meetings", e),
    }
}

/// GET /students/:student_id/meetings
/// Returns the student's full meeting history, ordered by start time.
pub async fn get_student_meetings(
    Path(student_id): Path<i64>,
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<RequestUser>,
) -> Response {
    info!("GET /students/{}/meetings", student_id);

    match s.lesson_db.get_owned_student(user.0, student_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return ApiErrorType::from(LessonError::StudentNotFound { student_id }).into_response()
        }
        Err(e) => return db_failure("Failed to resolve student", e),
    }

    match s.lesson_db.get_meetings_for_student(user.0, student_id) {
        Ok(meetings) => (StatusCode::OK, Json(meetings)).into_response(),
        Err(e) => db_failure("Failed to fetch meetings", e),
    }
}

/// POST /meetings/:meeting_id/complete
/// Marks a single meeting as completed.
pub async fn post_complete_meeting(
    Path(meeting_id): Path<i64>,
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<RequestUser>,
) -> Response {
    info!("POST /meetings/{}/complete", meeting_id);

    match s.lesson_db.mark_meeting_completed(user.0, meeting_id) {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({ "meeting_id": meeting_id, "is_completed": true })),
        )
            .into_response(),
        Ok(false) => {
            ApiErrorType::from(LessonError::MeetingNotFound { meeting_id }).into_response()
        }
        Err(e) => db_failure("Failed to update meeting", e),
    }
}

fn db_failure(message: &str, e: rusqlite::Error) -> Response {
    error!("{}: {}", message, e);
    ApiErrorType::from((
        StatusCode::INTERNAL_SERVER_ERROR,
        message,
        Some(e.to_string()),
    ))
    .into_response()
}
