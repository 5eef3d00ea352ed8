//! Extraction pipeline: workbook bytes in, [`RosterAnalysis`] out.
//!
//! Two entry points: [`analyze_bytes`] always parses fresh;
//! [`analyze_with_cache`] consults the cache collaborator first and
//! treats a hit as a full substitute for parsing. All computation after
//! the payload is in memory is synchronous; the only awaits are the
//! cache port calls.

pub mod layout;
pub mod scan;
pub mod table;

use anyhow::Result;
use tracing::debug;

use crate::analysis::{FileIdentity, RosterAnalysis};
use crate::analyzers::columns::column_stats;
use crate::cache::{self, AnalysisCache};
use crate::notify::AnalysisNotifier;
use crate::parser::{ParsedWorkbook, parse_workbook};
use crate::stats::{FinalScoreStats, ScoreBreakdown};

use layout::SAMPLE_ROWS;
use scan::StudentScan;

/// Builds the complete analysis record from an already-parsed workbook.
///
/// Runs the two independent read passes over the first sheet — the
/// fixed-cell metadata/student scan and the header-offset tabular
/// reinterpretation — then fills in every aggregate. Total: no input
/// reachable from a parsed workbook makes it fail.
pub fn extract_analysis(workbook: &ParsedWorkbook, identity: FileIdentity) -> RosterAnalysis {
    let sheet = &workbook.sheet;

    let metadata = layout::read_metadata(sheet);
    let StudentScan { students, scores } = scan::scan_students(sheet);
    let table = table::reinterpret_table(sheet);

    let stats = column_stats(&table);
    let final_score_stats = FinalScoreStats::from_scores(&scores, students.len());
    let score_breakdown = ScoreBreakdown::from_scores(&scores);

    let sample_data = table.rows.iter().take(SAMPLE_ROWS).cloned().collect();

    RosterAnalysis {
        file_identity: identity,
        sheet_names: workbook.sheet_names.clone(),
        region: metadata.region,
        level: metadata.level,
        school_name: metadata.school_name,
        class_name: metadata.class_name,
        subject_name: metadata.subject_name,
        exam_date: metadata.exam_date,
        correction_date: metadata.correction_date,
        directorate: metadata.directorate,
        semester: metadata.semester,
        student_count: students.len(),
        students,
        column_names: table.column_names,
        sample_data,
        stats,
        final_score_stats,
        score_breakdown,
    }
}

/// Parses the payload and extracts a fresh analysis.
///
/// # Errors
///
/// Only a malformed payload fails, as [`crate::parser::MalformedWorkbook`].
#[tracing::instrument(skip(bytes, identity), fields(file = %identity.name, bytes = bytes.len()))]
pub fn analyze_bytes(bytes: &[u8], identity: FileIdentity) -> Result<RosterAnalysis> {
    let workbook = parse_workbook(bytes)?;
    debug!(sheets = workbook.sheet_names.len(), "workbook parsed");
    Ok(extract_analysis(&workbook, identity))
}

/// Cache-aware extraction: a cached analysis for this file identity is
/// returned without touching the payload; otherwise the payload is
/// parsed fresh, the result stored (fire-and-forget) and the notifier
/// told once.
pub async fn analyze_with_cache<C, N>(
    cache: &C,
    notifier: &N,
    bytes: &[u8],
    identity: FileIdentity,
) -> Result<RosterAnalysis>
where
    C: AnalysisCache,
    N: AnalysisNotifier,
{
    if let Some(cached) = cache::lookup(cache, &identity).await {
        return Ok(cached);
    }

    let analysis = analyze_bytes(bytes, identity)?;

    cache::store(cache, &analysis).await;
    notifier.analysis_ready(&analysis);

    Ok(analysis)
}
