use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::lessons::LessonError;
use crate::server::middleware::user_validator::RequestUser;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateStudentBody {
    pub name: String,
    #[serde(default)]
    pub subject: Option<String>,
}

/// POST /students
/// Adds a student to the requesting user's roster.
pub async fn post_create_student(
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<RequestUser>,
    Json(body): Json<CreateStudentBody>,
) -> Response {
    info!("POST /students");

    if body.name.trim().is_empty() {
        return ApiErrorType::from(LessonError::MissingField { field: "name" }).into_response();
    }

    match s
        .lesson_db
        .insert_student(user.0, body.name.trim(), body.subject.as_deref())
    {
        Ok(student_id) => (
            StatusCode::CREATED,
            Json(json!({ "student_id": student_id })),
        )
            .into_response(),
        Err(e) => ApiErrorType::from((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to create student",
            Some(e.to_string()),
        ))
        .into_response(),
    }
}

/// GET /students
/// Returns the requesting user's roster.
pub async fn get_students(
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<RequestUser>,
) -> Response {
    info!("GET /students");

    match s.lesson_db.get_students(user.0) {
        Ok(students) => {
            let response: Vec<_> = students
                .into_iter()
                .map(|st| {
                    json!({
                        "student_id": st.student_id,
                        "name": st.name,
                        "subject": st.subject,
                    })
                })
                .collect();

            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiErrorType::from((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch students",
            Some(e.to_string()),
        ))
        .into_response(),
    }
}
