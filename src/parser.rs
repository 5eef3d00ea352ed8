//! Workbook parser for exam roster spreadsheets.

use std::fmt;
use std::io::Cursor;

use anyhow::Result;
use calamine::{Data, Range, Reader, Xlsx};

/// Raised when the payload cannot be decoded as a workbook at all.
///
/// This is the only fatal error in the pipeline; every other absence
/// (missing cells, unparsable scores) resolves to a documented default
/// further down the line.
#[derive(Debug)]
pub struct MalformedWorkbook(pub String);

impl fmt::Display for MalformedWorkbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed workbook: {}", self.0)
    }
}

impl std::error::Error for MalformedWorkbook {}

/// A decoded workbook: the declared sheet names and the cell grid of the
/// first sheet, which is the working sheet for everything downstream.
#[derive(Debug, Clone)]
pub struct ParsedWorkbook {
    pub sheet_names: Vec<String>,
    pub sheet: Range<Data>,
}

/// Decodes an xlsx payload into a [`ParsedWorkbook`].
///
/// # Errors
///
/// Returns [`MalformedWorkbook`] (wrapped in `anyhow::Error`) if the bytes
/// are not a readable workbook or the workbook declares no sheets.
pub fn parse_workbook(bytes: &[u8]) -> Result<ParsedWorkbook> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| MalformedWorkbook(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let first = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| MalformedWorkbook("workbook has no sheets".to_string()))?;

    let sheet = workbook
        .worksheet_range(&first)
        .map_err(|e| MalformedWorkbook(e.to_string()))?;

    Ok(ParsedWorkbook { sheet_names, sheet })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_parse_empty_bytes_is_malformed() {
        let err = parse_workbook(&[]).unwrap_err();
        assert!(err.downcast_ref::<MalformedWorkbook>().is_some());
    }

    #[test]
    fn test_parse_invalid_bytes_is_malformed() {
        // A zip signature followed by garbage is still not a workbook
        let invalid_bytes = vec![0x50, 0x4B, 0x03, 0x04, 0xFF, 0xFE, 0x00, 0x01];
        let result = parse_workbook(&invalid_bytes);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_valid_minimal_workbook() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Sheet1").unwrap();
        sheet.write_string(0, 0, "hello").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let parsed = parse_workbook(&bytes).unwrap();
        assert_eq!(parsed.sheet_names, vec!["Sheet1".to_string()]);
        assert_eq!(
            parsed.sheet.get_value((0, 0)),
            Some(&Data::String("hello".to_string()))
        );
    }

    #[test]
    fn test_first_sheet_in_declaration_order_wins() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name("Roster").unwrap();
        workbook.add_worksheet().set_name("Extra").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let parsed = parse_workbook(&bytes).unwrap();
        assert_eq!(parsed.sheet_names[0], "Roster");
        assert_eq!(parsed.sheet_names.len(), 2);
    }
}
