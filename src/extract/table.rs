//! Header-offset tabular reinterpretation of the working sheet.
//!
//! Structurally independent of the fixed-cell student scan: the header
//! sits at a different row than the student block, so the two views
//! routinely disagree on row count and column set. Both are kept.

use std::collections::HashMap;

use calamine::{Data, Range};

use crate::extract::layout::{TABLE_HEADER_ROW, render_cell};

/// The sheet reread as header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    /// Non-empty header cells, in column order as encountered. Duplicate
    /// headers get a `_{n}` suffix so each column keeps a distinct key.
    pub column_names: Vec<String>,
    /// One map per data row, column name → cell text. Cells that are
    /// empty in a row are absent from its map; fully blank rows are
    /// dropped.
    pub rows: Vec<HashMap<String, String>>,
}

/// Rereads `sheet` as a table whose header is [`TABLE_HEADER_ROW`].
pub fn reinterpret_table(sheet: &Range<Data>) -> TableView {
    let Some((end_row, end_col)) = sheet.end() else {
        return TableView::default();
    };

    let mut columns: Vec<(u32, String)> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for col in 0..=end_col {
        let Some(name) = sheet.get_value((TABLE_HEADER_ROW, col)).and_then(render_cell) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let occurrences = seen.entry(name.clone()).or_insert(0);
        let key = if *occurrences == 0 {
            name.clone()
        } else {
            format!("{name}_{occurrences}")
        };
        *occurrences += 1;
        columns.push((col, key));
    }

    let mut rows = Vec::new();
    if end_row > TABLE_HEADER_ROW {
        for row in (TABLE_HEADER_ROW + 1)..=end_row {
            let mut values = HashMap::new();
            for (col, name) in &columns {
                if let Some(text) = sheet.get_value((row, *col)).and_then(render_cell) {
                    values.insert(name.clone(), text);
                }
            }
            if !values.is_empty() {
                rows.push(values);
            }
        }
    }

    TableView {
        column_names: columns.into_iter().map(|(_, name)| name).collect(),
        rows,
    }
}
