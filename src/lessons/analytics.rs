//! Filtering and statistical aggregation over a student's meeting history.
//!
//! A pure reduction: the current instant is an explicit parameter so the
//! same inputs always produce the same report.

use chrono::NaiveDateTime;

use super::synonyms::matches_subject;
use super::types::{
    LessonDistribution, LessonFilter, LessonReport, LessonStatistics, Meeting, TeachingPeriod,
};

/// Reduces a meeting collection to a filtered subset, a statistics
/// summary, and a chartable distribution.
///
/// Filters combine with AND semantics; an empty filter set passes every
/// meeting. The distribution is absent when the filtered subset is empty.
pub fn filter_and_summarize(
    meetings: &[Meeting],
    periods: &[TeachingPeriod],
    filters: &[LessonFilter],
    now: NaiveDateTime,
) -> LessonReport {
    let filtered: Vec<Meeting> = meetings
        .iter()
        .filter(|meeting| filters.iter().all(|f| filter_passes(f, meeting, periods)))
        .cloned()
        .collect();

    let statistics = summarize(&filtered, now);
    let distribution = distribution_of(&statistics);

    LessonReport {
        meetings: filtered,
        statistics,
        distribution,
    }
}

/// Evaluates a single filter against a meeting.
fn filter_passes(filter: &LessonFilter, meeting: &Meeting, periods: &[TeachingPeriod]) -> bool {
    match filter {
        LessonFilter::Period { teaching_period_id } => {
            // Fail-open on a stale period reference: passing everything
            // beats hiding all data behind a filter that resolves nothing.
            match periods.iter().find(|p| p.id == *teaching_period_id) {
                Some(period) => {
                    let date = meeting.start_time.date();
                    period.start_date <= date && date <= period.end_date
                }
                None => true,
            }
        }
        LessonFilter::Subject { query } => {
            matches_subject(query, &meeting.title, meeting.description.as_deref())
        }
    }
}

/// Derives the statistics summary for a (typically pre-filtered) subset.
///
/// `past_lessons` and `upcoming_lessons` are not complements: a completed
/// meeting with a future start counts as past and not upcoming. That
/// asymmetry is part of the reporting contract.
pub fn summarize(meetings: &[Meeting], now: NaiveDateTime) -> LessonStatistics {
    let total_lessons = meetings.len();
    let completed_lessons = meetings.iter().filter(|m| m.is_completed).count();
    let cancelled_lessons = meetings.iter().filter(|m| is_cancelled(m)).count();
    let upcoming_lessons = meetings
        .iter()
        .filter(|m| !m.is_completed && m.start_time > now)
        .count();
    let past_lessons = meetings
        .iter()
        .filter(|m| m.is_completed || m.start_time < now)
        .count();

    let total_hours: f64 = meetings.iter().map(duration_hours).sum();
    let average_duration_hours = if total_lessons == 0 {
        0.0
    } else {
        total_hours / total_lessons as f64
    };

    LessonStatistics {
        total_lessons,
        completed_lessons,
        cancelled_lessons,
        upcoming_lessons,
        past_lessons,
        total_hours,
        average_duration_hours,
    }
}

/// A meeting counts as cancelled when its title or description carries a
/// cancellation marker, independent of the completion flag.
fn is_cancelled(meeting: &Meeting) -> bool {
    let marked = |text: &str| {
        let text = text.to_lowercase();
        text.contains("cancelled") || text.contains("canceled")
    };
    marked(&meeting.title) || meeting.description.as_deref().map_or(false, marked)
}

fn duration_hours(meeting: &Meeting) -> f64 {
    (meeting.end_time - meeting.start_time).num_seconds() as f64 / 3600.0
}

fn distribution_of(statistics: &LessonStatistics) -> Option<LessonDistribution> {
    if statistics.total_lessons == 0 {
        return None;
    }

    let total = statistics.total_lessons as f64;
    Some(LessonDistribution {
        completed: statistics.completed_lessons as f64 / total,
        cancelled: statistics.cancelled_lessons as f64 / total,
        upcoming: statistics.upcoming_lessons as f64 / total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessons::types::PeriodKind;
    use chrono::{Datelike, NaiveDate, NaiveDateTime};

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn meeting(id: i64, title: &str, start: NaiveDateTime, hours: u32, completed: bool) -> Meeting {
        Meeting {
            id,
            user_id: 1,
            student_id: 1,
            title: title.to_string(),
            description: None,
            start_time: start,
            end_time: start + chrono::Duration::hours(i64::from(hours)),
            is_completed: completed,
        }
    }

    fn period(id: i64, start: NaiveDate, end: NaiveDate) -> TeachingPeriod {
        TeachingPeriod {
            id,
            name: "Spring Term".to_string(),
            kind: PeriodKind::Term,
            start_date: start,
            end_date: end,
            year: start.year(),
        }
    }

    fn now() -> NaiveDateTime {
        at(2024, 6, 1, 12)
    }

    #[test]
    fn test_empty_filter_set_passes_all_meetings() {
        let meetings = vec![
            meeting(1, "Piano", at(2024, 5, 1, 9), 1, true),
            meeting(2, "Maths", at(2024, 7, 1, 9), 1, false),
        ];

        let report = filter_and_summarize(&meetings, &[], &[], now());
        assert_eq!(report.meetings.len(), 2);
    }

    #[test]
    fn test_statistics_scenario_two_completed_one_upcoming() {
        let meetings = vec![
            meeting(1, "Piano", at(2024, 5, 1, 9), 1, true),
            meeting(2, "Piano", at(2024, 5, 8, 9), 1, true),
            meeting(3, "Piano", at(2024, 7, 1, 9), 1, false),
        ];

        let report = filter_and_summarize(&meetings, &[], &[], now());
        let stats = &report.statistics;
        assert_eq!(stats.total_lessons, 3);
        assert_eq!(stats.completed_lessons, 2);
        assert_eq!(stats.upcoming_lessons, 1);
        assert_eq!(stats.past_lessons, 2);
        assert_eq!(stats.total_hours, 3.0);
        assert_eq!(stats.average_duration_hours, 1.0);
    }

    #[test]
    fn test_subject_filter_with_synonyms() {
        let meetings = vec![
            meeting(1, "Mathematics tutoring", at(2024, 5, 1, 9), 1, true),
            meeting(2, "Maths revision", at(2024, 5, 8, 9), 1, true),
            meeting(3, "English essay", at(2024, 5, 15, 9), 1, true),
        ];
        let filters = vec![LessonFilter::Subject {
            query: "math".to_string(),
        }];

        let report = filter_and_summarize(&meetings, &[], &filters, now());
        let ids: Vec<i64> = report.meetings.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_period_filter_bounds_are_inclusive() {
        let meetings = vec![
            meeting(1, "Piano", at(2024, 4, 1, 9), 1, true),
            meeting(2, "Piano", at(2024, 5, 15, 9), 1, true),
            meeting(3, "Piano", at(2024, 6, 30, 9), 1, false),
            meeting(4, "Piano", at(2024, 7, 1, 9), 1, false),
        ];
        let periods = vec![period(
            10,
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        )];
        let filters = vec![LessonFilter::Period {
            teaching_period_id: 10,
        }];

        let report = filter_and_summarize(&meetings, &periods, &filters, now());
        let ids: Vec<i64> = report.meetings.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_unresolved_period_filter_fails_open() {
        let meetings = vec![
            meeting(1, "Piano", at(2024, 5, 1, 9), 1, true),
            meeting(2, "Piano", at(2024, 7, 1, 9), 1, false),
        ];
        let filters = vec![LessonFilter::Period {
            teaching_period_id: 999,
        }];

        let report = filter_and_summarize(&meetings, &[], &filters, now());
        assert_eq!(report.meetings.len(), 2);
    }

    #[test]
    fn test_filters_combine_with_and_semantics() {
        let meetings = vec![
            meeting(1, "Maths revision", at(2024, 5, 1, 9), 1, true),
            meeting(2, "Maths revision", at(2024, 8, 1, 9), 1, false),
            meeting(3, "English essay", at(2024, 5, 1, 9), 1, true),
        ];
        let periods = vec![period(
            10,
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        )];
        let both = vec![
            LessonFilter::Period {
                teaching_period_id: 10,
            },
            LessonFilter::Subject {
                query: "math".to_string(),
            },
        ];

        let combined = filter_and_summarize(&meetings, &periods, &both, now());
        let ids: Vec<i64> = combined.meetings.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1]);

        // The conjunction is a subset of each filter applied on its own.
        for filter in &both {
            let single =
                filter_and_summarize(&meetings, &periods, std::slice::from_ref(filter), now());
            for m in &combined.meetings {
                assert!(single.meetings.contains(m));
            }
        }
    }

    #[test]
    fn test_cancelled_marker_in_title_or_description() {
        let mut with_description = meeting(2, "Piano", at(2024, 5, 8, 9), 1, false);
        with_description.description = Some("Canceled by parent".to_string());
        let meetings = vec![
            meeting(1, "Piano (cancelled)", at(2024, 5, 1, 9), 1, true),
            with_description,
            meeting(3, "Piano", at(2024, 5, 15, 9), 1, true),
        ];

        let report = filter_and_summarize(&meetings, &[], &[], now());
        assert_eq!(report.statistics.cancelled_lessons, 2);
    }

    #[test]
    fn test_completed_future_meeting_counts_as_past_not_upcoming() {
        let meetings = vec![meeting(1, "Piano", at(2024, 7, 1, 9), 1, true)];

        let stats = summarize(&meetings, now());
        assert_eq!(stats.past_lessons, 1);
        assert_eq!(stats.upcoming_lessons, 0);
    }

    #[test]
    fn test_total_hours_includes_upcoming_meetings() {
        let meetings = vec![
            meeting(1, "Piano", at(2024, 5, 1, 9), 2, true),
            meeting(2, "Piano", at(2024, 7, 1, 9), 1, false),
        ];

        let stats = summarize(&meetings, now());
        assert_eq!(stats.total_hours, 3.0);
        assert_eq!(stats.average_duration_hours, 1.5);
    }

    #[test]
    fn test_empty_subset_degrades_to_zero_average_and_no_distribution() {
        let report = filter_and_summarize(&[], &[], &[], now());
        assert_eq!(report.statistics.total_lessons, 0);
        assert_eq!(report.statistics.average_duration_hours, 0.0);
        assert!(report.distribution.is_none());
    }

    #[test]
    fn test_distribution_normalized_against_total() {
        let meetings = vec![
            meeting(1, "Piano", at(2024, 5, 1, 9), 1, true),
            meeting(2, "Piano (cancelled)", at(2024, 5, 8, 9), 1, false),
            meeting(3, "Piano", at(2024, 7, 1, 9), 1, false),
            meeting(4, "Piano", at(2024, 5, 15, 9), 1, false),
        ];

        let report = filter_and_summarize(&meetings, &[], &[], now());
        let distribution = report.distribution.unwrap();
        assert_eq!(distribution.completed, 0.25);
        assert_eq!(distribution.cancelled, 0.25);
        assert_eq!(distribution.upcoming, 0.25);
    }
}
