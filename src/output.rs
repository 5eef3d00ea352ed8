//! Output formatting and persistence for completed analyses.
//!
//! Supports pretty-printing, a full JSON dump of the record, and a
//! one-row-per-analysis CSV summary append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::RosterAnalysis;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs an analysis using Rust's debug pretty-print format.
pub fn print_pretty(analysis: &RosterAnalysis) {
    debug!("{:#?}", analysis);
}

/// Logs an analysis as pretty-printed JSON.
pub fn print_json(analysis: &RosterAnalysis) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(analysis)?);
    Ok(())
}

/// Writes the full record as pretty JSON to `path`.
pub fn write_json(path: &str, analysis: &RosterAnalysis) -> Result<()> {
    std::fs::write(path, serde_json::to_vec_pretty(analysis)?)?;
    Ok(())
}

/// The flattened per-analysis row appended to the summary CSV.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    file_name: &'a str,
    school_name: &'a str,
    class_name: &'a str,
    subject_name: &'a str,
    student_count: usize,
    pass_count: usize,
    fail_count: usize,
    average_score: f64,
    max_score: f64,
    min_score: f64,
    pass_percentage: f64,
    fail_percentage: f64,
}

impl<'a> SummaryRow<'a> {
    fn from_analysis(analysis: &'a RosterAnalysis) -> Self {
        let stats = &analysis.final_score_stats;
        SummaryRow {
            file_name: &analysis.file_identity.name,
            school_name: &analysis.school_name,
            class_name: &analysis.class_name,
            subject_name: &analysis.subject_name,
            student_count: stats.student_count,
            pass_count: stats.pass_count,
            fail_count: stats.fail_count,
            average_score: stats.average_score,
            max_score: stats.max_score,
            min_score: stats.min_score,
            pass_percentage: stats.pass_percentage,
            fail_percentage: stats.fail_percentage,
        }
    }
}

/// Appends one summary row for `analysis` to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, analysis: &RosterAnalysis) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(SummaryRow::from_analysis(analysis))?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    use crate::analysis::{FileIdentity, NOT_AVAILABLE};
    use crate::analyzers::columns::ColumnStats;
    use crate::stats::{FinalScoreStats, ScoreBreakdown};

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_analysis() -> RosterAnalysis {
        RosterAnalysis {
            file_identity: FileIdentity::new("roster.xlsx", 1),
            sheet_names: vec![],
            region: String::new(),
            level: String::new(),
            school_name: String::new(),
            class_name: String::new(),
            subject_name: String::new(),
            exam_date: NOT_AVAILABLE.to_string(),
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
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_analysis());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_analysis()).unwrap();
    }

    #[test]
    fn test_write_json_round_trips() {
        let path = temp_path("exam_roster_analyzer_test_json.json");
        let _ = fs::remove_file(&path);

        let analysis = sample_analysis();
        write_json(&path, &analysis).unwrap();

        let back: RosterAnalysis =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(back, analysis);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_creates_file() {
        let path = temp_path("exam_roster_analyzer_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        append_record(&path, &sample_analysis()).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let path = temp_path("exam_roster_analyzer_test_header.csv");
        let _ = fs::remove_file(&path);

        let analysis = sample_analysis();
        append_record(&path, &analysis).unwrap();
        append_record(&path, &analysis).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content
            .lines()
            .filter(|l| l.contains("student_count"))
            .count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_two_rows() {
        let path = temp_path("exam_roster_analyzer_test_rows.csv");
        let _ = fs::remove_file(&path);

        let analysis = sample_analysis();
        append_record(&path, &analysis).unwrap();
        append_record(&path, &analysis).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // 1 header + 2 data rows = 3 lines (last may be empty due to trailing newline)
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);

        fs::remove_file(&path).unwrap();
    }
}
