//! Shared application state.

use crate::db::LessonDbManager;

/// State shared across all request handlers.
pub struct AppState {
    pub lesson_db: LessonDbManager,
}
