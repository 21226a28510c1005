//! The scheduling core: recurring meeting expansion and lesson analytics.
//!
//! Both halves are pure functions over their inputs. The database layer
//! brackets them with reads and writes; nothing here performs I/O.

mod analytics;
mod error;
mod recurrence;
mod synonyms;
mod types;

pub use analytics::{filter_and_summarize, summarize};
pub use error::LessonError;
pub use recurrence::{expand, MAX_SERIES_LENGTH};
pub use synonyms::{matches_subject, synonyms_for};
pub use types::*;
