//! Template conformance validation
//!
//! Packets must match the fixed submission template before extraction is
//! attempted. Validation inspects the whole document, reports one boolean
//! per template check, and never raises; the caller files failing packets
//! for correction with the full flag picture attached.

use super::PacketDocument;
use crate::constants::{flags, template};
use tracing::debug;

/// Outcome of validating one packet against the submission template
///
/// One flag per template check. The packet is accepted only when every
/// flag is true; each false flag contributes one diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// The institution heading was found
    pub institution_heading: bool,

    /// The institution block holds exactly the labelled lines
    pub institution_lines: bool,

    /// The student heading was found
    pub student_heading: bool,

    /// A student table with the template's column count was found
    pub student_table: bool,
}

impl ValidationReport {
    /// True when every template check passed
    pub fn is_ok(&self) -> bool {
        self.institution_heading
            && self.institution_lines
            && self.student_heading
            && self.student_table
    }

    /// Flag names with their outcomes, in report order
    pub fn flag_map(&self) -> Vec<(&'static str, bool)> {
        vec![
            (flags::INSTITUTION_HEADING, self.institution_heading),
            (flags::INSTITUTION_LINES, self.institution_lines),
            (flags::STUDENT_HEADING, self.student_heading),
            (flags::STUDENT_TABLE, self.student_table),
        ]
    }

    /// One diagnostic line per failed check, in report order
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.institution_heading {
            lines.push(format!(
                "heading '{}' not found",
                template::INSTITUTION_HEADING
            ));
        }
        if !self.institution_lines {
            lines.push(format!(
                "institution block must hold exactly {} labelled lines",
                template::INSTITUTION_LINE_COUNT
            ));
        }
        if !self.student_heading {
            lines.push(format!("heading '{}' not found", template::STUDENT_HEADING));
        }
        if !self.student_table {
            lines.push(format!(
                "student table missing or rows do not hold {} columns",
                template::STUDENT_FIELD_COUNT
            ));
        }
        lines
    }
}

/// Validate a document against the submission template.
///
/// Inspects every check even after one fails, so the report shows the
/// complete picture of what is wrong with the packet.
pub fn validate(document: &PacketDocument) -> ValidationReport {
    let report = ValidationReport {
        institution_heading: document.has_line(template::INSTITUTION_HEADING),
        institution_lines: check_institution_block(document),
        student_heading: document.has_line(template::STUDENT_HEADING),
        student_table: check_student_table(document),
    };

    debug!(
        "Template validation: heading={} lines={} student_heading={} table={}",
        report.institution_heading,
        report.institution_lines,
        report.student_heading,
        report.student_table
    );

    report
}

/// The institution block is the run of non-empty lines between the two
/// headings. It must hold exactly the template's labelled lines, each
/// one `Label : value`.
fn check_institution_block(document: &PacketDocument) -> bool {
    let block = institution_block(document);
    if block.len() != template::INSTITUTION_LINE_COUNT {
        return false;
    }
    block.iter().all(|line| line_label(line).is_some())
}

/// A table qualifies when it has at least one row and every row carries
/// the template's column count
fn check_student_table(document: &PacketDocument) -> bool {
    document.tables.iter().any(|table| {
        !table.rows.is_empty()
            && table
                .rows
                .iter()
                .all(|row| row.len() == template::STUDENT_FIELD_COUNT)
    })
}

/// Non-empty lines between the institution heading and the student
/// heading (or the document end), trimmed
pub(super) fn institution_block(document: &PacketDocument) -> Vec<&str> {
    let Some(start) = document.find_line(template::INSTITUTION_HEADING) else {
        return Vec::new();
    };
    let end = document
        .find_line(template::STUDENT_HEADING)
        .unwrap_or(document.lines.len());
    if end <= start {
        return Vec::new();
    }

    document.lines[start + 1..end]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Split a labelled line into its template label, if the prefix before
/// the first colon is one the template knows
pub(super) fn line_label(line: &str) -> Option<&'static str> {
    let (label, _) = line.split_once(':')?;
    let label = label.trim();
    template::INSTITUTION_LABELS
        .iter()
        .find(|known| **known == label)
        .copied()
}
