//! Shared test utilities and fixtures for packet parser tests

use crate::app::services::packet_parser::{PacketDocument, PacketFile, PacketFormat};

pub mod adapter_tests;

/// Paragraph run of a conforming packet
pub fn conforming_paragraphs() -> Vec<String> {
    vec![
        "Institution Details".to_string(),
        "Name of the Institution : St. Marys H.S.S".to_string(),
        "Place : Chavara".to_string(),
        "Phone number : 0476 2680 321".to_string(),
        "Email Id : office@stmarys.example".to_string(),
        "Student Details".to_string(),
    ]
}

/// One student row in template column order
pub fn student_row(name: &str, grade: &str, account: &str) -> Vec<String> {
    vec![
        name.to_string(),
        grade.to_string(),
        account.to_string(),
        "SBIN0070025".to_string(),
        String::new(),
        "Chavara".to_string(),
    ]
}

/// Header row as the letter format prints it
pub fn letter_header_row() -> Vec<String> {
    vec![
        "STUDENT NAME".to_string(),
        "CLASS".to_string(),
        "ACCOUNT NUMBER".to_string(),
        "IFSC".to_string(),
        "ACCOUNT HOLDER".to_string(),
        "BRANCH".to_string(),
    ]
}

/// A conforming letter-format packet with two students
pub fn letter_packet() -> PacketFile {
    PacketFile {
        format: PacketFormat::Letter,
        paragraphs: conforming_paragraphs(),
        tables: vec![vec![
            letter_header_row(),
            student_row("Anju Thomas", "5", "1001"),
            student_row("Rahul K", "+1", "1002"),
        ]],
    }
}

/// A conforming grid-format packet with two students.
///
/// The first table row is positional header noise and the cells carry
/// internal line breaks, both of which the adapter must remove.
pub fn grid_packet() -> PacketFile {
    PacketFile {
        format: PacketFormat::Grid,
        paragraphs: conforming_paragraphs(),
        tables: vec![vec![
            vec![
                "name".to_string(),
                "class".to_string(),
                "acc no".to_string(),
                "ifsc".to_string(),
                "holder".to_string(),
                "branch".to_string(),
            ],
            vec![
                "Anju\nThomas".to_string(),
                "5".to_string(),
                "1001".to_string(),
                "SBIN0070025".to_string(),
                String::new(),
                "Chavara".to_string(),
            ],
            student_row("Rahul K", "+1", "1002"),
        ]],
    }
}

/// Adapt a packet into the common document shape
pub fn document(file: PacketFile) -> PacketDocument {
    file.into_document()
}
