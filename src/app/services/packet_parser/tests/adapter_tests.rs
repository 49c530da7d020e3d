//! Tests for the two format adapters

use super::{document, grid_packet, letter_packet};
use crate::app::services::packet_parser::{PacketFile, PacketFormat};

#[test]
fn test_letter_tables_pass_through_unchanged() {
    let doc = document(letter_packet());

    assert_eq!(doc.tables.len(), 1);
    // Header row survives; the extractor drops it by content later
    assert_eq!(doc.tables[0].row_count(), 3);
    assert_eq!(doc.tables[0].rows[0][0], "STUDENT NAME");
}

#[test]
fn test_grid_drops_positional_header_row() {
    let doc = document(grid_packet());

    assert_eq!(doc.tables.len(), 1);
    assert_eq!(doc.tables[0].row_count(), 2);
    assert_eq!(doc.tables[0].rows[0][1], "5");
}

#[test]
fn test_grid_flattens_in_cell_breaks() {
    let doc = document(grid_packet());

    assert_eq!(doc.tables[0].rows[0][0], "Anju Thomas");
}

#[test]
fn test_both_formats_share_the_paragraph_run() {
    let letter = document(letter_packet());
    let grid = document(grid_packet());

    assert_eq!(letter.lines, grid.lines);
    assert!(letter.has_line("Institution Details"));
    assert!(grid.has_line("Student Details"));
}

#[test]
fn test_grid_empty_table_stays_empty() {
    let file = PacketFile {
        format: PacketFormat::Grid,
        paragraphs: Vec::new(),
        tables: vec![Vec::new()],
    };

    let doc = document(file);
    assert_eq!(doc.tables.len(), 1);
    assert_eq!(doc.tables[0].row_count(), 0);
}

#[test]
fn test_format_round_trips_through_serde() {
    let json = serde_json::to_string(&letter_packet()).unwrap();
    assert!(json.contains("\"format\":\"letter\""));

    let back: PacketFile = serde_json::from_str(&json).unwrap();
    assert_eq!(back.format, PacketFormat::Letter);
}
