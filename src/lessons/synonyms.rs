//! Fixed subject-synonym table for fuzzy subject filtering.
//!
//! Buckets are keyed by a lowercase canonical subject name and include
//! alternate spellings plus closely related terms. The table is immutable;
//! a query with no bucket falls back to direct substring matching only.

/// Returns the synonym bucket for a canonical subject name, if one exists.
pub fn synonyms_for(subject: &str) -> Option<&'static [&'static str]> {
    let bucket: &'static [&'static str] = match subject {
        "math" => &["math", "maths", "mathematics", "algebra", "geometry", "calculus"],
        "science" => &["science", "physics", "chemistry", "biology"],
        "history" => &["history", "ancient history", "modern history"],
        "geography" => &["geography", "geo"],
        "art" => &["art", "drawing", "painting"],
        "music" => &["music", "piano", "guitar", "violin", "singing"],
        "pe" => &["pe", "physical education", "sport", "sports"],
        "drama" => &["drama", "theatre", "theater", "acting"],
        "computing" => &["computing", "computer science", "programming", "ict"],
        _ => return None,
    };
    Some(bucket)
}

/// Checks whether a subject query matches a meeting's title or description.
///
/// The query matches directly as a case-insensitive substring of either
/// field, or indirectly through any synonym in its bucket.
pub fn matches_subject(query: &str, title: &str, description: Option<&str>) -> bool {
    let query = query.trim().to_lowercase();
    let title = title.to_lowercase();
    let description = description.map(str::to_lowercase);

    let contains = |needle: &str| {
        title.contains(needle)
            || description
                .as_deref()
                .map_or(false, |text| text.contains(needle))
    };

    if contains(&query) {
        return true;
    }

    synonyms_for(&query)
        .map_or(false, |bucket| bucket.iter().any(|synonym| contains(synonym)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_bucket_matches_spellings() {
        assert!(matches_subject("math", "Mathematics tutoring", None));
        assert!(matches_subject("math", "Maths revision", None));
        assert!(!matches_subject("math", "English essay", None));
    }

    #[test]
    fn test_science_bucket_matches_related_terms() {
        assert!(matches_subject("science", "Physics practice", None));
        assert!(matches_subject("science", "Lesson", Some("Chemistry lab prep")));
        assert!(!matches_subject("science", "History exam prep", None));
    }

    #[test]
    fn test_direct_substring_is_case_insensitive() {
        assert!(matches_subject("PIANO", "Piano lesson", None));
        assert!(matches_subject("essay", "English", Some("Final ESSAY review")));
    }

    #[test]
    fn test_unknown_subject_uses_direct_match_only() {
        assert!(matches_subject("latin", "Latin grammar", None));
        assert!(!matches_subject("latin", "Roman history", None));
    }

    #[test]
    fn test_description_participates_in_synonym_match() {
        assert!(matches_subject("math", "Tuesday session", Some("algebra homework")));
    }
}
