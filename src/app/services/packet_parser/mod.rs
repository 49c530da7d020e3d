//! Packet parsing service for extracted application documents
//!
//! This module turns extracted packet files into validated batches. Packets
//! arrive in one of two document formats; format adapters fold both into a
//! single document shape, template validation flags structural problems
//! without raising, and the extractor lifts the institution block and the
//! student table out of conforming documents.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub mod adapters;
pub mod extractor;
pub mod validation;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use extractor::{extract_batch, extract_institution, extract_students};
pub use validation::{ValidationReport, validate};

/// Source document format of an extracted packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketFormat {
    /// Letter-style document: labelled paragraphs plus a headed table
    Letter,

    /// Grid-style document: cell matrix with a positional header row
    Grid,
}

impl FromStr for PacketFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "letter" => Ok(PacketFormat::Letter),
            "grid" => Ok(PacketFormat::Grid),
            other => Err(Error::packet_format(
                "unknown",
                format!("unknown packet format '{}'", other),
            )),
        }
    }
}

impl std::fmt::Display for PacketFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PacketFormat::Letter => write!(f, "letter"),
            PacketFormat::Grid => write!(f, "grid"),
        }
    }
}

/// On-disk shape of an extracted packet file
///
/// Extraction tooling writes one JSON file per submitted document:
/// the source format tag, the paragraph run, and the cell matrix of
/// every table found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketFile {
    /// Source document format
    pub format: PacketFormat,

    /// Paragraph texts in document order
    #[serde(default)]
    pub paragraphs: Vec<String>,

    /// Tables as rows of cell texts, in document order
    #[serde(default)]
    pub tables: Vec<Vec<Vec<String>>>,
}

impl PacketFile {
    /// Load a packet file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let file_label = path.display().to_string();
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read packet {}", file_label), e))?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::json_parsing(file_label, "packet file is not valid JSON", Some(e)))
    }

    /// Fold the format-specific shape into the common document form
    pub fn into_document(self) -> PacketDocument {
        adapters::adapt(self)
    }
}

/// A table lifted out of a packet, reduced to data rows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PacketTable {
    /// Rows of cell texts
    pub rows: Vec<Vec<String>>,
}

impl PacketTable {
    /// Create a table from rows
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of rows in the table
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Format-agnostic view of a packet
///
/// Everything downstream of the adapters (validation, extraction) reads
/// this shape and never learns which document format produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketDocument {
    /// Text lines in document order
    pub lines: Vec<String>,

    /// Tables in document order
    pub tables: Vec<PacketTable>,
}

impl PacketDocument {
    /// Index of the first line whose trimmed text equals `text`
    pub fn find_line(&self, text: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.trim() == text)
    }

    /// True when some line matches `text` exactly after trimming
    pub fn has_line(&self, text: &str) -> bool {
        self.find_line(text).is_some()
    }
}
