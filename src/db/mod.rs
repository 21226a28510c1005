/// Database module for students, meetings, and teaching periods

mod types;

pub use types::DbStudent;

use rusqlite::{params, Connection, OptionalExtension, Result};
use std::sync::Mutex;

use crate::lessons::{Meeting, MeetingDraft, PeriodKind, TeachingPeriod};

const SCHEMA_SQL: &str = include_str!("../../sql/init_tutorbase.sql");

pub struct LessonDbManager {
    db: Mutex<Connection>,
}

impl LessonDbManager {
    /// Creates a new LessonDbManager and initializes the database schema
    pub fn new(db_path: &str) -> Self {
        let conn = Connection::open(db_path).expect("Failed to open database");

        conn.execute_batch(SCHEMA_SQL)
            .expect("Failed to initialize database schema");

        Self {
            db: Mutex::new(conn),
        }
    }

    /// Creates a manager backed by an in-memory database (used by tests)
    #[cfg(test)]
    pub fn new_in_memory() -> Self {
        let conn = Connection::open_in_memory().expect("Failed to open in-memory database");

        conn.execute_batch(SCHEMA_SQL)
            .expect("Failed to initialize database schema");

        Self {
            db: Mutex::new(conn),
        }
    }

    /// Inserts a student owned by the given user, returning the new id
    pub fn insert_student(
        &self,
        user_id: i64,
        name: &str,
        subject: Option<&str>,
    ) -> Result<i64> {
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO students (user_id, name, subject, created_at)
             VALUES (?1, ?2, ?3, datetime('now'))",
            params![user_id, name, subject],
        )?;
        Ok(db.last_insert_rowid())
    }

    /// Gets all students owned by the given user
    pub fn get_students(&self, user_id: i64) -> Result<Vec<DbStudent>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT student_id, user_id, name, subject
             FROM students
             WHERE user_id = ?
             ORDER BY name",
        )?;

        let students = stmt.query_map([user_id], |row| {
            Ok(DbStudent {
                student_id: row.get(0)?,
                user_id: row.get(1)?,
                name: row.get(2)?,
                subject: row.get(3)?,
            })
        })?;

        students.collect()
    }

    /// Gets a student only if it belongs to the given user
    pub fn get_owned_student(&self, user_id: i64, student_id: i64) -> Result<Option<DbStudent>> {
        let db = self.db.lock().unwrap();
        db.query_row(
            "SELECT student_id, user_id, name, subject
             FROM students
             WHERE student_id = ?1 AND user_id = ?2",
            params![student_id, user_id],
            |row| {
                Ok(DbStudent {
                    student_id: row.get(0)?,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    subject: row.get(3)?,
                })
            },
        )
        .optional()
    }

    /// Inserts an expanded meeting series in a single transaction.
    ///
    /// All-or-nothing: if any insert fails the whole series is rolled back.
    pub fn insert_meetings(&self, user_id: i64, drafts: &[MeetingDraft]) -> Result<Vec<Meeting>> {
        let mut db = self.db.lock().unwrap();
        let tx = db.transaction()?;

        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            tx.execute(
                "INSERT INTO meetings (
                    user_id, student_id, title, description,
                    start_time, end_time, is_completed, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, datetime('now'))",
                params![
                    user_id,
                    draft.student_id,
                    &draft.title,
                    &draft.description,
                    draft.start_time,
                    draft.end_time,
                    draft.is_completed,
                ],
            )?;

            created.push(Meeting {
                id: tx.last_insert_rowid(),
                user_id,
                student_id: draft.student_id,
                title: draft.title.clone(),
                description: draft.description.clone(),
                start_time: draft.start_time,
                end_time: draft.end_time,
                is_completed: draft.is_completed,
            });
        }

        tx.commit()?;
        Ok(created)
    }

    /// Gets all meetings for a student owned by the given user, ordered by start time
    pub fn get_meetings_for_student(&self, user_id: i64, student_id: i64) -> Result<Vec<Meeting>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT meeting_id, user_id, student_id, title, description,
                    start_time, end_time, is_completed
             FROM meetings
             WHERE user_id = ?1 AND student_id = ?2
             ORDER BY start_time",
        )?;

        let meetings = stmt.query_map(params![user_id, student_id], |row| {
            Ok(Meeting {
                id: row.get(0)?,
                user_id: row.get(1)?,
                student_id: row.get(2)?,
                title: row.get(3)?,
                description: row.get(4)?,
                start_time: row.get(5)?,
                end_time: row.get(6)?,
                is_completed: row.get(7)?,
            })
        })?;

        meetings.collect()
    }

    /// Marks a meeting as completed, scoped to the owning user.
    ///
    /// Returns false when no owned meeting matched.
    pub fn mark_meeting_completed(&self, user_id: i64, meeting_id: i64) -> Result<bool> {
        let db = self.db.lock().unwrap();
        let updated = db.execute(
            "UPDATE meetings SET is_completed = 1
             WHERE meeting_id = ?1 AND user_id = ?2",
            params![meeting_id, user_id],
        )?;
        Ok(updated > 0)
    }

    /// Inserts a teaching period (term or holiday), returning the new id
    pub fn insert_teaching_period(
        &self,
        user_id: i64,
        name: &str,
        kind: PeriodKind,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
        year: i32,
    ) -> Result<i64> {
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO teaching_periods (
                user_id, name, kind, start_date, end_date, year, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))",
            params![user_id, name, kind.as_str(), start_date, end_date, year],
        )?;
        Ok(db.last_insert_rowid())
    }

    /// Gets the teaching-period catalog for the given user
    pub fn get_teaching_periods(&self, user_id: i64) -> Result<Vec<TeachingPeriod>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT period_id, name, kind, start_date, end_date, year
             FROM teaching_periods
             WHERE user_id = ?
             ORDER BY start_date",
        )?;

        let periods = stmt.query_map([user_id], |row| {
            let kind: String = row.get(2)?;
            let kind = PeriodKind::parse(&kind).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    format!("unknown period kind: {kind}").into(),
                )
            })?;
            Ok(TeachingPeriod {
                id: row.get(0)?,
                name: row.get(1)?,
                kind,
                start_date: row.get(3)?,
                end_date: row.get(4)?,
                year: row.get(5)?,
            })
        })?;

        periods.collect()
    }
}
