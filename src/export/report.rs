//! The exam report document.
//!
//! Builds the formatted report from a completed analysis: header
//! metadata, a title band, the exam metadata table, the summary
//! statistics table, the top-3 students, the score breakdown and the
//! pass/fail percentages, with an academic-season footer. Written under
//! a generated file name derived from the roster metadata and the
//! current date.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::analysis::{NOT_AVAILABLE, RosterAnalysis, StudentRecord};

/// How many students the ranking table shows.
const TOP_STUDENTS: usize = 3;

/// Writes the report for `analysis` into `output_dir`, applying the
/// caller-supplied date overrides to a copy of the record. Returns the
/// written path.
pub fn write_report(
    analysis: &RosterAnalysis,
    exam_date: Option<&str>,
    correction_date: Option<&str>,
    output_dir: &Path,
) -> Result<PathBuf> {
    let report = analysis.with_report_dates(exam_date, correction_date);
    let today = chrono::Local::now().date_naive();

    let document = build_document(&report, today);
    let path = output_dir.join(report_file_name(&report, today));

    std::fs::create_dir_all(output_dir)?;
    std::fs::write(&path, document)?;
    info!(path = %path.display(), "report written");

    Ok(path)
}

/// Renders the full document as Markdown.
pub fn build_document(analysis: &RosterAnalysis, today: NaiveDate) -> String {
    let mut doc = String::new();
    let na = |value: &str| {
        if value.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            value.to_string()
        }
    };

    let _ = writeln!(doc, "الأكاديمية: {}", na(&analysis.region));
    let _ = writeln!(doc, "المديرية الإقليمية: {}", na(&analysis.directorate));
    let _ = writeln!(doc);
    let _ = writeln!(doc, "المؤسسة: {}", na(&analysis.school_name));
    let _ = writeln!(doc, "المستوى: {}", na(&analysis.level));
    let _ = writeln!(doc, "الدورة: {}", na(&analysis.semester));
    let _ = writeln!(doc, "المادة: {}", na(&analysis.subject_name));
    let _ = writeln!(doc);

    let _ = writeln!(doc, "# تقرير حول الفرض المحروس");
    let _ = writeln!(doc);

    let _ = writeln!(doc, "| تاريخ إنجاز الفرض | تاريخ تصحيح الفرض | محتوى الفرض |");
    let _ = writeln!(doc, "|---|---|---|");
    let _ = writeln!(
        doc,
        "| {} | {} | {} |",
        na(&analysis.exam_date),
        na(&analysis.correction_date),
        na(&analysis.subject_name)
    );
    let _ = writeln!(doc);

    let stats = &analysis.final_score_stats;
    let _ = writeln!(
        doc,
        "| عدد تلاميذ القسم | عدد التلاميذ الحاصلين على المعدل | عدد التلاميذ غير الحاصلين على المعدل | أعلى نقطة | أدنى نقطة | معدل القسم |"
    );
    let _ = writeln!(doc, "|---|---|---|---|---|---|");
    let _ = writeln!(
        doc,
        "| {} | {} | {} | {} | {} | {:.2} |",
        stats.student_count,
        stats.pass_count,
        stats.fail_count,
        stats.max_score,
        stats.min_score,
        stats.average_score
    );
    let _ = writeln!(doc);

    let top = top_students(analysis);
    if !top.is_empty() {
        let _ = writeln!(doc, "| الترتيب | إسم التلميذ | النقطة |");
        let _ = writeln!(doc, "|---|---|---|");
        for (rank, student) in top.iter().enumerate() {
            let _ = writeln!(
                doc,
                "| {} | {} | {} |",
                rank + 1,
                student.student_name,
                student.first_exam_score
            );
        }
        let _ = writeln!(doc);
    }

    let breakdown = &analysis.score_breakdown;
    let _ = writeln!(doc, "| 0<ن<5 | 5<=ن<10 | 10<=ن<15 | 15<=ن<=20 |");
    let _ = writeln!(doc, "|---|---|---|---|");
    let _ = writeln!(
        doc,
        "| {} | {} | {} | {} |",
        breakdown.range_0_to_5,
        breakdown.range_5_to_10,
        breakdown.range_10_to_15,
        breakdown.range_15_to_20
    );
    let _ = writeln!(doc);

    let _ = writeln!(
        doc,
        "| النسبة المئوية غير الحاصلين على المعدل | النسبة المئوية للحاصلين على المعدل |"
    );
    let _ = writeln!(doc, "|---|---|");
    let _ = writeln!(
        doc,
        "| {:.2}% | {:.2}% |",
        stats.fail_percentage, stats.pass_percentage
    );
    let _ = writeln!(doc);

    let _ = writeln!(doc, "الموسم الدراسي: {}", academic_season(today));
    let _ = writeln!(doc, "{}", today.format("%Y-%m-%d"));

    doc
}

/// Top students by first-exam score, descending. The sort is stable over
/// a copy of the row order, so ties keep their original order; records
/// whose score does not parse rank as 0.
pub fn top_students(analysis: &RosterAnalysis) -> Vec<&StudentRecord> {
    let score = |student: &StudentRecord| {
        student
            .first_exam_score
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|s| !s.is_nan())
            .unwrap_or(0.0)
    };

    let mut ranked: Vec<&StudentRecord> = analysis.students.iter().collect();
    ranked.sort_by(|a, b| score(b).total_cmp(&score(a)));
    ranked.truncate(TOP_STUDENTS);
    ranked
}

/// September starts the new season: `2025/2026` from September through
/// August of the following year.
fn academic_season(today: NaiveDate) -> String {
    let year = today.year();
    if today.month() >= 9 {
        format!("{}/{}", year, year + 1)
    } else {
        format!("{}/{}", year - 1, year)
    }
}

/// Generated report file name: subject, level, semester and school name,
/// each sanitized, plus the current date.
pub fn report_file_name(analysis: &RosterAnalysis, today: NaiveDate) -> String {
    format!(
        "تقرير_فرض_{}_{}_{}_{}_{}.md",
        sanitize_component(&analysis.subject_name, "subject"),
        sanitize_component(&analysis.level, "level"),
        sanitize_component(&analysis.semester, "semester"),
        sanitize_component(&analysis.school_name, "school"),
        today.format("%Y-%m-%d")
    )
}

/// Keeps ASCII alphanumerics and Arabic-script characters, replaces
/// everything else with `_`; an empty component falls back to a fixed
/// placeholder.
fn sanitize_component(raw: &str, fallback: &str) -> String {
    if raw.is_empty() {
        return fallback.to_string();
    }

    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || ('\u{0600}'..='\u{06FF}').contains(&c) {
                c
            } else {
                '_'
            }
        })
        .collect()
}
