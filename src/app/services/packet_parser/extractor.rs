//! Institution and student extraction
//!
//! Runs after template validation has passed. The extractor lifts the four
//! labelled institution lines into an `Institution` and every student row
//! into raw `StudentRecord`s, in document order. Grades leave here as raw
//! labels; normalization owns turning them canonical.

use super::{PacketDocument, validation};
use crate::app::models::{Batch, GradeValue, Institution, StudentRecord};
use crate::constants::template;
use crate::{Error, Result};
use tracing::debug;

/// Extract the institution block from a validated document
///
/// Unrecognized labels are ignored and missing lines leave their field
/// empty. Validation already vouched for the block, so extraction does
/// not re-check it.
pub fn extract_institution(document: &PacketDocument) -> Institution {
    let mut name = None;
    let mut place = None;
    let mut phone = None;
    let mut email = None;

    for line in validation::institution_block(document) {
        let Some(label) = validation::line_label(line) else {
            continue;
        };
        let value = line
            .split_once(':')
            .map(|(_, rest)| rest.trim().to_string())
            .unwrap_or_default();

        match label {
            template::NAME_LABEL => name = Some(value),
            template::PLACE_LABEL => place = Some(value),
            template::PHONE_LABEL => phone = Some(value),
            template::EMAIL_LABEL => email = Some(value),
            _ => {}
        }
    }

    Institution::new(
        name.unwrap_or_default(),
        place.unwrap_or_default(),
        phone.unwrap_or_default(),
        email.unwrap_or_default(),
    )
}

/// Extract student rows from a validated document, in document order
///
/// Header rows are dropped by content: a row whose first cell is empty or
/// carries the template's header label is not a student. The letter format
/// needs this; the grid format already lost its header positionally in the
/// adapter, and the same skip is harmless there.
///
/// # Errors
/// Returns `Error::Extraction` for a data row with the wrong column count.
pub fn extract_students(document: &PacketDocument, file: &str) -> Result<Vec<StudentRecord>> {
    let mut students = Vec::new();

    for table in &document.tables {
        for row in &table.rows {
            let first = row.first().map(|cell| cell.trim()).unwrap_or("");
            if first.is_empty() || first.eq_ignore_ascii_case(template::STUDENT_TABLE_HEADER_CELL) {
                continue;
            }

            if row.len() != template::STUDENT_FIELD_COUNT {
                return Err(Error::extraction(
                    file,
                    format!(
                        "student row for '{}' has {} cells, expected {}",
                        first,
                        row.len(),
                        template::STUDENT_FIELD_COUNT
                    ),
                ));
            }

            students.push(StudentRecord::new(
                row[0].clone(),
                GradeValue::raw(row[1].clone()),
                row[2].clone(),
                row[3].clone(),
                row[4].clone(),
                row[5].clone(),
            ));
        }
    }

    debug!("Extracted {} student rows from {}", students.len(), file);
    Ok(students)
}

/// Extract a complete batch: institution plus ordered student records
pub fn extract_batch(document: &PacketDocument, file: &str) -> Result<Batch> {
    let institution = extract_institution(document);
    let students = extract_students(document, file)?;
    Ok(Batch::new(institution, students))
}
