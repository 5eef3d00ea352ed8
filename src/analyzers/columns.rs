//! Per-column statistics over the tabular reinterpretation of the sheet.
//!
//! Only columns whose header looks score-bearing are aggregated; the
//! selection is a substring match against the roster's header keywords.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analyzers::utility::{max_of, mean, min_of};
use crate::extract::table::TableView;

/// Header substrings that mark a column as score-bearing: the mark
/// column ("النقطة") and the assignment column ("الفرض").
pub const SCORE_KEYWORDS: [&str; 2] = ["النقطة", "الفرض"];

/// Average/max/min per score-bearing column. Columns with no parseable
/// values carry explicit zeros rather than omitted keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub average_scores: HashMap<String, f64>,
    pub max_scores: HashMap<String, f64>,
    pub min_scores: HashMap<String, f64>,
}

/// Columns from `column_names` whose header contains a score keyword.
pub fn score_columns(column_names: &[String]) -> Vec<String> {
    column_names
        .iter()
        .filter(|name| SCORE_KEYWORDS.iter().any(|kw| name.contains(kw)))
        .cloned()
        .collect()
}

/// Aggregates every score-bearing column of the table.
///
/// Cell values that are missing or fail to parse as a float are dropped
/// from that column's sample; an empty sample yields zeros.
pub fn column_stats(table: &TableView) -> ColumnStats {
    let mut stats = ColumnStats::default();

    for column in score_columns(&table.column_names) {
        let values: Vec<f64> = table
            .rows
            .iter()
            .filter_map(|row| row.get(&column))
            .filter_map(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| !value.is_nan())
            .collect();

        stats.average_scores.insert(column.clone(), mean(&values));
        stats.max_scores.insert(column.clone(), max_of(&values));
        stats.min_scores.insert(column, min_of(&values));
    }

    stats
}
