/// Types for lesson scheduling and reporting
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// How often a repeating meeting recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatKind {
    Weekly,
    Biweekly,
    Monthly,
}

/// Repeat rule attached to a meeting template.
///
/// When `enabled` is false the rest of the rule is ignored and the
/// template expands to a single occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatRule {
    pub enabled: bool,
    #[serde(default = "RepeatRule::default_kind")]
    pub kind: RepeatKind,
    #[serde(default = "RepeatRule::default_count")]
    pub count: u32,
}

impl RepeatRule {
    fn default_kind() -> RepeatKind {
        RepeatKind::Weekly
    }

    fn default_count() -> u32 {
        1
    }
}

impl Default for RepeatRule {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: Self::default_kind(),
            count: Self::default_count(),
        }
    }
}

/// A user-submitted meeting template, the input to recurrence expansion.
///
/// Date and times are naive local values; composing them never applies a
/// timezone conversion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeetingTemplate {
    pub title: String,
    pub student_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: Option<String>,
    /// Only honored for a single, non-repeating meeting (see expansion rules).
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub repeat: RepeatRule,
}

/// A meeting-creation record produced by expansion; no id assigned yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_completed: bool,
    pub student_id: i64,
}

/// A stored, scheduled lesson.
///
/// Created in bulk by the expander; read-only for analytics. The core
/// never mutates meetings after generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meeting {
    pub id: i64,
    pub user_id: i64,
    pub student_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_completed: bool,
}

/// Whether a teaching period is a term or a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Term,
    Holiday,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Term => "term",
            PeriodKind::Holiday => "holiday",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "term" => Some(PeriodKind::Term),
            "holiday" => Some(PeriodKind::Holiday),
            _ => None,
        }
    }
}

/// A bounded date range (term or holiday) used to bucket lessons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeachingPeriod {
    pub id: i64,
    pub name: String,
    pub kind: PeriodKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub year: i32,
}

/// An active filter over a meeting collection.
///
/// A set of filters is unordered and combines with AND semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LessonFilter {
    Period { teaching_period_id: i64 },
    Subject { query: String },
}

/// Statistics derived from a filtered meeting subset.
///
/// Never cached; recomputed on every filter change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonStatistics {
    pub total_lessons: usize,
    pub completed_lessons: usize,
    pub cancelled_lessons: usize,
    pub upcoming_lessons: usize,
    pub past_lessons: usize,
    pub total_hours: f64,
    pub average_duration_hours: f64,
}

/// Completed / cancelled / upcoming shares of the filtered subset,
/// normalized against the total, for a pie or bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonDistribution {
    pub completed: f64,
    pub cancelled: f64,
    pub upcoming: f64,
}

/// The full output of filtering and summarizing a meeting history.
#[derive(Debug, Clone, Serialize)]
pub struct LessonReport {
    pub meetings: Vec<Meeting>,
    pub statistics: LessonStatistics,
    /// Absent when the filtered subset is empty: no meetings, no chart.
    pub distribution: Option<LessonDistribution>,
}
