//! User input utilities for interactive CLI prompts
//!
//! This module provides functions for interactive user input: the
//! operator district menu and confirmation prompts used during intake.

use crate::app::models::District;
use crate::{Error, Result};
use std::io::{self, Write};

/// Display the district menu and read the operator's choice
///
/// The chosen district is applied to every batch in the run. Choice 0,
/// an empty answer, or anything off the menu means no fixed district;
/// each batch is then resolved from its own routing codes.
pub fn prompt_district() -> Result<District> {
    println!("\nAdministrative districts:");
    for (i, district) in District::all_canonical().iter().enumerate() {
        match district.short_code() {
            Some(code) => println!("  {:2}. {} ({})", i + 1, district.name(), code),
            None => println!("  {:2}. {}", i + 1, district.name()),
        }
    }
    println!("   0. resolve per batch from routing codes (default)");
    println!();

    print!("District for this intake [0]: ");
    io::stdout()
        .flush()
        .map_err(|e| Error::io("Failed to flush stdout".to_string(), e))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| Error::io("Failed to read user input".to_string(), e))?;

    Ok(parse_district_choice(&input))
}

/// Map a menu answer onto a district; anything unparseable counts as 0
pub fn parse_district_choice(input: &str) -> District {
    match input.trim().parse::<usize>() {
        Ok(index) => District::from_menu_index(index),
        Err(_) => District::Unknown,
    }
}

/// Get user confirmation for an action
pub fn prompt_confirmation(message: &str, default_yes: bool) -> Result<bool> {
    let default_text = if default_yes { "Y/n" } else { "y/N" };
    print!("{} [{}]: ", message, default_text);

    io::stdout()
        .flush()
        .map_err(|e| Error::io("Failed to flush stdout".to_string(), e))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| Error::io("Failed to read user input".to_string(), e))?;

    match parse_confirmation(&input, default_yes) {
        Some(answer) => Ok(answer),
        None => {
            println!("Please enter 'y' for yes or 'n' for no.");
            prompt_confirmation(message, default_yes)
        }
    }
}

/// Interpret a yes/no answer; `None` means the answer was neither
pub fn parse_confirmation(input: &str, default_yes: bool) -> Option<bool> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Some(default_yes);
    }
    match input.as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
