//! The analysis record produced by one extraction run.
//!
//! [`RosterAnalysis`] is immutable once produced: it is built exactly once
//! per extraction, serialized as-is across the cache and output
//! boundaries, and callers needing a variant (e.g. report date overrides)
//! take a structural copy instead of mutating in place.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analyzers::columns::ColumnStats;
use crate::stats::{FinalScoreStats, ScoreBreakdown};

/// Sentinel used for metadata fields whose cell is absent and whose
/// default is not the empty string.
pub const NOT_AVAILABLE: &str = "غير متوفر";

/// Logical identity of the source file, used to derive the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileIdentity {
    pub name: String,
    /// Modification timestamp in milliseconds since the epoch.
    pub last_modified: i64,
}

impl FileIdentity {
    pub fn new(name: impl Into<String>, last_modified: i64) -> Self {
        FileIdentity {
            name: name.into(),
            last_modified,
        }
    }
}

/// One scanned student row.
///
/// `first_exam_score` keeps the raw cell text; rows whose score does not
/// parse as a number stay here verbatim but are excluded from every
/// aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_number: String,
    pub student_name: String,
    pub birth_date: String,
    pub first_exam_score: String,
}

/// The completed analysis for one roster spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterAnalysis {
    pub file_identity: FileIdentity,
    pub sheet_names: Vec<String>,

    // Fixed-cell metadata. Empty string when the cell is absent for the
    // first five, the not-available sentinel for the last four.
    pub region: String,
    pub level: String,
    pub school_name: String,
    pub class_name: String,
    pub subject_name: String,
    pub exam_date: String,
    pub correction_date: String,
    pub directorate: String,
    pub semester: String,

    pub student_count: usize,
    pub students: Vec<StudentRecord>,

    // Header-offset tabular reinterpretation of the same sheet. Row
    // alignment differs from the student scan on purpose; the two views
    // are not reconciled.
    pub column_names: Vec<String>,
    pub sample_data: Vec<HashMap<String, String>>,

    pub stats: ColumnStats,
    pub final_score_stats: FinalScoreStats,
    pub score_breakdown: ScoreBreakdown,
}

impl RosterAnalysis {
    /// Structural copy with the exam/correction dates replaced where a
    /// caller supplied one. Used by the document export; the source
    /// record is left untouched.
    pub fn with_report_dates(
        &self,
        exam_date: Option<&str>,
        correction_date: Option<&str>,
    ) -> RosterAnalysis {
        let mut copy = self.clone();
        if let Some(date) = exam_date {
            copy.exam_date = date.to_string();
        }
        if let Some(date) = correction_date {
            copy.correction_date = date.to_string();
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_analysis() -> RosterAnalysis {
        RosterAnalysis {
            file_identity: FileIdentity::new("roster.xlsx", 1_700_000_000_000),
            sheet_names: vec!["ورقة1".to_string()],
            region: String::new(),
            level: String::new(),
            school_name: String::new(),
            class_name: String::new(),
            subject_name: String::new(),
            exam_date: "2025-01-10".to_string(),
            correction_date: NOT_AVAILABLE.to_string(),
            directorate: NOT_AVAILABLE.to_string(),
            semester: NOT_AVAILABLE.to_string(),
            student_count: 0,
            students: vec![],
            column_names: vec![],
            sample_data: vec![],
            stats: ColumnStats::default(),
            final_score_stats: FinalScoreStats::default(),
            score_breakdown: ScoreBreakdown::default(),
        }
    }

    #[test]
    fn test_with_report_dates_overrides_without_mutation() {
        let original = minimal_analysis();
        let copy = original.with_report_dates(Some("2025-02-01"), None);

        assert_eq!(copy.exam_date, "2025-02-01");
        assert_eq!(copy.correction_date, NOT_AVAILABLE);
        // source record untouched
        assert_eq!(original.exam_date, "2025-01-10");
    }

    #[test]
    fn test_serde_round_trip() {
        let analysis = minimal_analysis();
        let bytes = serde_json::to_vec(&analysis).unwrap();
        let back: RosterAnalysis = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, analysis);
    }
}
