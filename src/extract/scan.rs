//! Sentinel-terminated scan of the student block.

use calamine::{Data, Range};

use crate::analysis::StudentRecord;
use crate::extract::layout::{
    COL_BIRTH_DATE, COL_FIRST_EXAM_SCORE, COL_STUDENT_NAME, COL_STUDENT_NUMBER, STUDENT_FIRST_ROW,
    cell_text,
};

/// Result of one scan pass: the student records in row order plus the
/// scores that parsed as numbers.
#[derive(Debug, Default, PartialEq)]
pub struct StudentScan {
    pub students: Vec<StudentRecord>,
    pub scores: Vec<f64>,
}

/// Walks rows from the fixed first student row until the first row whose
/// student-number cell is empty or absent. The scan is sentinel-driven,
/// not count-driven: data past the terminating row is never read.
///
/// A missing score cell reads as the string `"0"`. Score strings that do
/// not parse as a float stay on the record verbatim but contribute
/// nothing to `scores`.
pub fn scan_students(sheet: &Range<Data>) -> StudentScan {
    let mut scan = StudentScan::default();
    let mut row = STUDENT_FIRST_ROW;

    loop {
        let Some(student_number) =
            cell_text(sheet, (row, COL_STUDENT_NUMBER)).filter(|s| !s.is_empty())
        else {
            break;
        };

        let score_text =
            cell_text(sheet, (row, COL_FIRST_EXAM_SCORE)).unwrap_or_else(|| "0".to_string());

        if let Some(score) = score_text.trim().parse::<f64>().ok().filter(|s| !s.is_nan()) {
            scan.scores.push(score);
        }

        scan.students.push(StudentRecord {
            student_number,
            student_name: cell_text(sheet, (row, COL_STUDENT_NAME)).unwrap_or_default(),
            birth_date: cell_text(sheet, (row, COL_BIRTH_DATE)).unwrap_or_default(),
            first_exam_score: score_text,
        });

        row += 1;
    }

    scan
}
