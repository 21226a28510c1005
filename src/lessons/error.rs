//! Error types for the lesson scheduling core.

use thiserror::Error;

/// Errors produced by lesson scheduling operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LessonError {
    /// A required template field is missing or empty
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// End time does not fall after start time
    #[error("End time must be after start time")]
    InvalidTimeRange,

    /// Repeat count exceeds the maximum series length
    #[error("Repeat count {count} exceeds the series limit of {limit}")]
    RepeatCountTooLarge { count: u32, limit: u32 },

    /// The referenced student does not exist or belongs to another user
    #[error("Student not found: {student_id}")]
    StudentNotFound { student_id: i64 },

    /// The referenced meeting does not exist or belongs to another user
    #[error("Meeting not found: {meeting_id}")]
    MeetingNotFound { meeting_id: i64 },

    /// A teaching period's start date does not precede its end date
    #[error("Period start date must precede its end date")]
    InvalidPeriodRange,
}

impl LessonError {
    /// Returns true if this error stems from malformed user input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LessonError::MissingField { .. }
                | LessonError::InvalidTimeRange
                | LessonError::RepeatCountTooLarge { .. }
                | LessonError::InvalidPeriodRange
        )
    }

    /// Returns true if this error refers to a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LessonError::StudentNotFound { .. } | LessonError::MeetingNotFound { .. }
        )
    }
}
