//! Routing registry loading
//!
//! This module reads the routing-code reference dataset from CSV, resolves
//! the header layout, and fills the registry index. Loading runs on a
//! blocking thread while the CLI may be waiting on operator input, so the
//! whole path is synchronous.

use super::RoutingRegistry;
use super::metadata::LoadStats;
use crate::app::models::RoutingCodeInfo;
use crate::constants::registry_columns;
use crate::{Error, Result};
use csv::StringRecord;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Column positions resolved from the CSV header row
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    code: usize,
    bank: Option<usize>,
    branch: usize,
    centre: Option<usize>,
    district: usize,
    state: Option<usize>,
    address: usize,
    city: Option<usize>,
}

impl ColumnLayout {
    /// Resolve the layout from a header record.
    ///
    /// The four columns district resolution and branch normalization read
    /// are required; the rest degrade to empty strings when absent.
    fn from_headers(headers: &StringRecord, file: &str) -> Result<Self> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (index, name) in headers.iter().enumerate() {
            positions.insert(name.trim().to_uppercase(), index);
        }

        let require = |name: &str| -> Result<usize> {
            positions.get(name).copied().ok_or_else(|| {
                Error::csv_parsing(
                    file,
                    format!("reference dataset is missing required column '{}'", name),
                    None,
                )
            })
        };

        Ok(Self {
            code: require(registry_columns::CODE)?,
            bank: positions.get(registry_columns::BANK).copied(),
            branch: require(registry_columns::BRANCH)?,
            centre: positions.get(registry_columns::CENTRE).copied(),
            district: require(registry_columns::DISTRICT)?,
            state: positions.get(registry_columns::STATE).copied(),
            address: require(registry_columns::ADDRESS)?,
            city: positions.get(registry_columns::CITY).copied(),
        })
    }

    /// Build a reference row from a CSV record
    fn parse_row(&self, record: &StringRecord) -> Option<RoutingCodeInfo> {
        let field = |index: usize| record.get(index).unwrap_or("").trim().to_string();
        let optional = |index: Option<usize>| index.map(field).unwrap_or_default();

        let code = field(self.code);
        if code.is_empty() {
            return None;
        }

        Some(RoutingCodeInfo {
            code,
            bank: optional(self.bank),
            branch: field(self.branch),
            centre: optional(self.centre),
            district: field(self.district),
            state: optional(self.state),
            address: field(self.address),
            city: optional(self.city),
        })
    }
}

impl RoutingRegistry {
    /// Load the routing registry from a reference CSV
    ///
    /// Scans every row, indexes rows by normalized code, and keeps the
    /// first row when a code repeats. Rows without a code are counted and
    /// skipped rather than failing the load.
    ///
    /// # Arguments
    /// * `csv_path` - Path of the reference dataset
    /// * `show_progress` - Whether to display a progress spinner
    ///
    /// # Errors
    /// * Returns `Error::Registry` if the file does not exist
    /// * Returns `Error::CsvParsing` for an unreadable file or missing
    ///   required columns
    pub fn load_from_csv(csv_path: &Path, show_progress: bool) -> Result<(Self, LoadStats)> {
        info!("Loading routing registry from {}", csv_path.display());

        let start_time = Instant::now();
        let mut registry = Self::new(csv_path.to_path_buf());
        let mut stats = LoadStats::new();

        if !csv_path.exists() {
            return Err(Error::registry(format!(
                "reference dataset does not exist: {}",
                csv_path.display()
            )));
        }

        let file_label = csv_path.to_string_lossy().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(csv_path)
            .map_err(|e| {
                Error::csv_parsing(file_label.clone(), "failed to open reference CSV", Some(e))
            })?;

        let headers = reader
            .headers()
            .map_err(|e| {
                Error::csv_parsing(file_label.clone(), "failed to read CSV header", Some(e))
            })?
            .clone();
        let layout = ColumnLayout::from_headers(&headers, &file_label)?;

        let progress_bar = if show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {pos} rows {msg}")
                    .unwrap(),
            );
            pb.set_message("Loading routing codes...");
            Some(pb)
        } else {
            None
        };

        let mut record = StringRecord::new();
        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    // One mangled row should not sink hundreds of thousands
                    // of good ones
                    warn!("Skipping unreadable row in {}: {}", file_label, e);
                    stats.rows_skipped += 1;
                    stats.errors.push(e.to_string());
                    continue;
                }
            }

            stats.rows_scanned += 1;
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }

            let Some(info) = layout.parse_row(&record) else {
                stats.rows_skipped += 1;
                continue;
            };

            let key = super::normalize_code(&info.code);
            if let std::collections::hash_map::Entry::Vacant(e) = registry.codes.entry(key) {
                e.insert(info);
                stats.codes_loaded += 1;
            } else {
                debug!("Duplicate routing code '{}', keeping first row", info.code);
                stats.duplicate_codes += 1;
            }
        }

        if let Some(pb) = &progress_bar {
            pb.finish_with_message("Routing registry loading complete");
        }

        if registry.codes.is_empty() {
            return Err(Error::registry(format!(
                "reference dataset {} holds no usable rows",
                csv_path.display()
            )));
        }

        registry.load_time = start_time;
        registry.rows_scanned = stats.rows_scanned;
        stats.load_duration = start_time.elapsed();

        info!(
            "Routing registry loaded: {} codes from {} rows in {:.2}s",
            stats.codes_loaded,
            stats.rows_scanned,
            stats.load_duration.as_secs_f64()
        );

        Ok((registry, stats))
    }
}
