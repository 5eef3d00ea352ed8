//! Data series for the charting collaborator.
//!
//! Pure transforms over a completed analysis: a frequency series for one
//! column of the preview sample, and the score breakdown as a labeled
//! bar series. Rendering stays with the host.

use serde::Serialize;

use crate::analysis::RosterAnalysis;
use crate::stats::ScoreBreakdown;

/// Fixed localized labels for the four breakdown bands.
pub const BREAKDOWN_LABELS: [&str; 4] = [
    "من 0 إلى أقل من 5",
    "من 5 إلى أقل من 10",
    "من 10 إلى أقل من 15",
    "من 15 إلى 20",
];

/// One bar of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: usize,
}

/// Buckets one column's values in the preview sample by frequency, in
/// first-seen order. Rows where the column is empty contribute nothing.
pub fn column_frequency(analysis: &RosterAnalysis, column: &str) -> Vec<ChartSlice> {
    let mut slices: Vec<ChartSlice> = Vec::new();

    for row in &analysis.sample_data {
        let Some(value) = row.get(column) else {
            continue;
        };
        match slices.iter_mut().find(|s| s.name == *value) {
            Some(slice) => slice.value += 1,
            None => slices.push(ChartSlice {
                name: value.clone(),
                value: 1,
            }),
        }
    }

    slices
}

/// The four breakdown bands as a bar series, labels fixed.
pub fn breakdown_series(breakdown: &ScoreBreakdown) -> Vec<ChartSlice> {
    let counts = [
        breakdown.range_0_to_5,
        breakdown.range_5_to_10,
        breakdown.range_10_to_15,
        breakdown.range_15_to_20,
    ];

    BREAKDOWN_LABELS
        .iter()
        .zip(counts)
        .map(|(label, value)| ChartSlice {
            name: label.to_string(),
            value,
        })
        .collect()
}
