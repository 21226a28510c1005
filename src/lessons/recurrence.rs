//! Expansion of a meeting template into a series of concrete occurrences.
//!
//! Pure with respect to its inputs: validation happens up front, and the
//! caller is responsible for the all-or-nothing bulk insert of the result.

use chrono::{Datelike, Days, NaiveDate};

use super::error::LessonError;
use super::types::{MeetingDraft, MeetingTemplate, RepeatKind};

/// Longest series a single template may expand to.
pub const MAX_SERIES_LENGTH: u32 = 52;

/// Expands a meeting template into an ordered list of occurrence drafts.
///
/// A template with repeat disabled (or a degenerate count of at most one)
/// yields exactly one occurrence with the title and completion flag taken
/// verbatim. A repeating template with count N yields N occurrences:
/// occurrence 0 keeps the title, later ones are suffixed `" (i+1/N)"`,
/// and only occurrence 0 may carry the template's completion flag — a
/// freshly scheduled series cannot be pre-marked done.
pub fn expand(template: &MeetingTemplate) -> Result<Vec<MeetingDraft>, LessonError> {
    if template.title.trim().is_empty() {
        return Err(LessonError::MissingField { field: "title" });
    }
    if template.start_time >= template.end_time {
        return Err(LessonError::InvalidTimeRange);
    }
    if template.repeat.enabled && template.repeat.count > MAX_SERIES_LENGTH {
        return Err(LessonError::RepeatCountTooLarge {
            count: template.repeat.count,
            limit: MAX_SERIES_LENGTH,
        });
    }

    let count = if template.repeat.enabled {
        template.repeat.count.max(1)
    } else {
        1
    };

    let mut drafts = Vec::with_capacity(count as usize);
    for index in 0..count {
        let date = occurrence_date(template.date, template.repeat.kind, index);
        let title = if index == 0 {
            template.title.clone()
        } else {
            format!("{} ({}/{})", template.title, index + 1, count)
        };

        drafts.push(MeetingDraft {
            title,
            description: template.description.clone(),
            start_time: date.and_time(template.start_time),
            end_time: date.and_time(template.end_time),
            is_completed: index == 0 && template.is_completed,
            student_id: template.student_id,
        });
    }

    Ok(drafts)
}

/// Computes the date of occurrence `index` relative to the base date.
///
/// Weekly and biweekly steps are fixed day offsets; monthly steps are raw
/// calendar-month increments with rollover (see `add_months_rolling`).
fn occurrence_date(base: NaiveDate, kind: RepeatKind, index: u32) -> NaiveDate {
    match kind {
        RepeatKind::Weekly => base + Days::new(u64::from(7 * index)),
        RepeatKind::Biweekly => base + Days::new(u64::from(14 * index)),
        RepeatKind::Monthly => add_months_rolling(base, index),
    }
}

/// Advances a date by whole calendar months without clamping.
///
/// When the day-of-month does not exist in the target month, the excess
/// days roll into the following month: Jan 31 + 1 month lands on Mar 3
/// (or Mar 2 in a leap year), never on the last day of February.
fn add_months_rolling(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.month0() + months;
    let year = date.year() + (total / 12) as i32;
    let month = total % 12 + 1;

    if let Some(shifted) = NaiveDate::from_ymd_opt(year, month, date.day()) {
        return shifted;
    }

    let last = last_day_of_month(year, month);
    let overflow = u64::from(date.day() - last.day());
    last + Days::new(overflow)
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    // The first of a valid month always exists and has a predecessor.
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap()
}
