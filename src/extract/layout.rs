//! The fixed-position layout convention of the roster sheet.
//!
//! Metadata lives at predetermined coordinates and the student block at a
//! fixed first row; this module is the single place that encodes those
//! positions. Coordinates are 0-based `(row, column)` pairs into the
//! first sheet's cell grid.

use calamine::{Data, Range};

use crate::analysis::NOT_AVAILABLE;

/// The nine fixed metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Region,
    Level,
    SchoolName,
    ClassName,
    SubjectName,
    ExamDate,
    CorrectionDate,
    Directorate,
    Semester,
}

/// One entry of the metadata layout table.
pub struct MetadataCell {
    pub field: MetaField,
    pub coord: (u32, u32),
    pub default: &'static str,
}

/// Field-to-coordinate map for the roster convention. The first five
/// fields default to the empty string, the last four to the localized
/// not-available sentinel; the asymmetry is part of the convention.
pub static METADATA_CELLS: &[MetadataCell] = &[
    MetadataCell { field: MetaField::Region, coord: (6, 3), default: "" }, // D7
    MetadataCell { field: MetaField::Level, coord: (8, 3), default: "" }, // D9
    MetadataCell { field: MetaField::SchoolName, coord: (6, 14), default: "" }, // O7
    MetadataCell { field: MetaField::SubjectName, coord: (10, 14), default: "" }, // O11
    MetadataCell { field: MetaField::ClassName, coord: (8, 8), default: "" }, // I9
    MetadataCell { field: MetaField::ExamDate, coord: (12, 14), default: NOT_AVAILABLE }, // O13
    MetadataCell { field: MetaField::CorrectionDate, coord: (13, 14), default: NOT_AVAILABLE }, // O14
    MetadataCell { field: MetaField::Directorate, coord: (6, 8), default: NOT_AVAILABLE }, // I7
    MetadataCell { field: MetaField::Semester, coord: (10, 3), default: NOT_AVAILABLE }, // D11
];

/// First row of the student block (row 18 in sheet terms).
pub const STUDENT_FIRST_ROW: u32 = 17;
/// Student number column (C). An empty cell here terminates the scan.
pub const COL_STUDENT_NUMBER: u32 = 2;
/// Student name column (D).
pub const COL_STUDENT_NAME: u32 = 3;
/// Birth date column (F).
pub const COL_BIRTH_DATE: u32 = 5;
/// First-exam score column (G).
pub const COL_FIRST_EXAM_SCORE: u32 = 6;

/// Header row of the tabular reinterpretation (row 5 in sheet terms;
/// the first 4 rows are banner content and are skipped).
pub const TABLE_HEADER_ROW: u32 = 4;
/// Number of data rows kept as the preview sample.
pub const SAMPLE_ROWS: usize = 5;

/// Metadata values resolved through [`METADATA_CELLS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetMetadata {
    pub region: String,
    pub level: String,
    pub school_name: String,
    pub class_name: String,
    pub subject_name: String,
    pub exam_date: String,
    pub correction_date: String,
    pub directorate: String,
    pub semester: String,
}

impl SheetMetadata {
    fn slot_mut(&mut self, field: MetaField) -> &mut String {
        match field {
            MetaField::Region => &mut self.region,
            MetaField::Level => &mut self.level,
            MetaField::SchoolName => &mut self.school_name,
            MetaField::ClassName => &mut self.class_name,
            MetaField::SubjectName => &mut self.subject_name,
            MetaField::ExamDate => &mut self.exam_date,
            MetaField::CorrectionDate => &mut self.correction_date,
            MetaField::Directorate => &mut self.directorate,
            MetaField::Semester => &mut self.semester,
        }
    }
}

/// Reads all nine metadata cells. Each read is independently optional;
/// an absent cell resolves to that entry's default.
pub fn read_metadata(sheet: &Range<Data>) -> SheetMetadata {
    let mut metadata = SheetMetadata::default();

    for cell in METADATA_CELLS {
        *metadata.slot_mut(cell.field) =
            cell_text(sheet, cell.coord).unwrap_or_else(|| cell.default.to_string());
    }

    metadata
}

/// Text content of the cell at `coord`, or `None` when the cell is
/// absent or empty.
pub fn cell_text(sheet: &Range<Data>, coord: (u32, u32)) -> Option<String> {
    sheet.get_value(coord).and_then(render_cell)
}

/// Renders one cell value to text. `None` for empty and error cells;
/// numbers use their shortest display form; datetimes render through
/// chrono, date-only when the time component is midnight.
pub fn render_cell(value: &Data) -> Option<String> {
    match value {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(match dt.as_datetime() {
            Some(naive) if naive.time() == chrono::NaiveTime::MIN => {
                naive.date().format("%Y-%m-%d").to_string()
            }
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        }),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}
