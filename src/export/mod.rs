//! Document export collaborator: the formatted exam report.

pub mod report;

pub use report::{build_document, report_file_name, top_students, write_report};
