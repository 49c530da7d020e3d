//! Routing-code registry service for O(1) branch metadata lookups
//!
//! This module loads the bank routing-code reference dataset from CSV and
//! indexes it by code, so district resolution and branch normalization can
//! look rows up without touching the file again.

use crate::app::models::RoutingCodeInfo;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

pub mod loader;
pub mod metadata;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use metadata::{LoadStats, RegistryMetadata};

/// Normalize a routing code into its index form.
///
/// Documents carry stray whitespace and mixed case; the registry keys on
/// the trimmed uppercase form.
pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Routing-code registry providing O(1) branch metadata lookups
///
/// The registry loads the reference dataset once per run and indexes rows
/// by normalized code. Lookups never fail hard; a missing code simply
/// returns `None` and the caller falls back to document values.
#[derive(Debug, Clone)]
pub struct RoutingRegistry {
    /// Reference rows indexed by normalized code
    pub(crate) codes: HashMap<String, RoutingCodeInfo>,

    /// Path of the CSV the registry was loaded from
    pub(crate) source_path: PathBuf,

    /// Timestamp when the registry was loaded
    pub(crate) load_time: Instant,

    /// Number of CSV rows scanned, including skipped ones
    pub(crate) rows_scanned: usize,
}

impl RoutingRegistry {
    /// Create a new empty routing registry
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            codes: HashMap::new(),
            source_path,
            load_time: Instant::now(),
            rows_scanned: 0,
        }
    }

    /// Get reference data for a routing code (O(1) lookup)
    pub fn get(&self, code: &str) -> Option<&RoutingCodeInfo> {
        self.codes.get(&normalize_code(code))
    }

    /// Check if a routing code exists in the registry
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(&normalize_code(code))
    }

    /// Total number of codes in the registry
    pub fn code_count(&self) -> usize {
        self.codes.len()
    }

    /// Get registry metadata
    pub fn metadata(&self) -> RegistryMetadata {
        RegistryMetadata {
            source_path: self.source_path.clone(),
            code_count: self.codes.len(),
            load_time: self.load_time,
            rows_scanned: self.rows_scanned,
        }
    }
}
