//! Format adapters folding the two document shapes into one
//!
//! Letter-format packets carry their table header as a labelled first row,
//! which the extractor recognizes by content and skips. Grid-format packets
//! carry a positional header row instead, and their cells keep internal
//! line breaks, so the grid adapter drops the first row of every table and
//! flattens cell text here. Downstream code never branches on format again.

use super::{PacketDocument, PacketFile, PacketFormat, PacketTable};

/// Fold a packet file into the common document shape
pub fn adapt(file: PacketFile) -> PacketDocument {
    match file.format {
        PacketFormat::Letter => adapt_letter(file.paragraphs, file.tables),
        PacketFormat::Grid => adapt_grid(file.paragraphs, file.tables),
    }
}

/// Letter documents pass through unchanged
fn adapt_letter(paragraphs: Vec<String>, tables: Vec<Vec<Vec<String>>>) -> PacketDocument {
    PacketDocument {
        lines: paragraphs,
        tables: tables.into_iter().map(PacketTable::new).collect(),
    }
}

/// Grid documents lose their positional header row and in-cell breaks
fn adapt_grid(paragraphs: Vec<String>, tables: Vec<Vec<Vec<String>>>) -> PacketDocument {
    let tables = tables
        .into_iter()
        .map(|rows| {
            let rows = rows
                .into_iter()
                .skip(1)
                .map(|row| row.into_iter().map(|cell| flatten_cell(&cell)).collect())
                .collect();
            PacketTable::new(rows)
        })
        .collect();

    PacketDocument {
        lines: paragraphs,
        tables,
    }
}

/// Join the lines of a grid cell with single spaces
fn flatten_cell(cell: &str) -> String {
    cell.split('\n')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
