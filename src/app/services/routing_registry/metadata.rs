//! Routing registry metadata and statistics tracking

use std::path::PathBuf;
use std::time::Instant;

/// Statistics about the routing registry loading process
#[derive(Debug, Clone)]
pub struct LoadStats {
    /// Number of CSV rows scanned
    pub rows_scanned: usize,

    /// Number of codes loaded into the index
    pub codes_loaded: usize,

    /// Rows skipped for a missing code or unreadable content
    pub rows_skipped: usize,

    /// Rows dropped because their code was already indexed
    pub duplicate_codes: usize,

    /// Time taken to load the registry
    pub load_duration: std::time::Duration,

    /// Any errors encountered during loading
    pub errors: Vec<String>,
}

impl LoadStats {
    /// Create new empty load statistics
    pub fn new() -> Self {
        Self {
            rows_scanned: 0,
            codes_loaded: 0,
            rows_skipped: 0,
            duplicate_codes: 0,
            load_duration: std::time::Duration::ZERO,
            errors: Vec::new(),
        }
    }

    /// Loading rate in codes per second
    pub fn loading_rate(&self) -> f64 {
        if self.load_duration.is_zero() {
            0.0
        } else {
            self.codes_loaded as f64 / self.load_duration.as_secs_f64()
        }
    }

    /// Check if any errors occurred during loading
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Loaded {} codes from {} rows ({} skipped, {} duplicates) in {:.2}s",
            self.codes_loaded,
            self.rows_scanned,
            self.rows_skipped,
            self.duplicate_codes,
            self.load_duration.as_secs_f64()
        )
    }
}

impl Default for LoadStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata about the routing registry
#[derive(Debug, Clone)]
pub struct RegistryMetadata {
    /// Path of the reference dataset
    pub source_path: PathBuf,

    /// Total number of codes in the registry
    pub code_count: usize,

    /// When the registry was loaded
    pub load_time: Instant,

    /// Number of rows scanned during loading
    pub rows_scanned: usize,
}

impl RegistryMetadata {
    /// Get the age of the registry since loading
    pub fn age(&self) -> std::time::Duration {
        self.load_time.elapsed()
    }

    /// Get a summary string of the registry
    pub fn summary(&self) -> String {
        format!(
            "Registry with {} codes from {} (age: {:.1}s)",
            self.code_count,
            self.source_path.display(),
            self.age().as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_load_stats_new() {
        let stats = LoadStats::new();
        assert_eq!(stats.codes_loaded, 0);
        assert!(!stats.has_errors());
        assert_eq!(stats.loading_rate(), 0.0);
    }

    #[test]
    fn test_load_stats_calculations() {
        let mut stats = LoadStats::new();
        stats.rows_scanned = 1000;
        stats.codes_loaded = 800;
        stats.rows_skipped = 150;
        stats.duplicate_codes = 50;
        stats.load_duration = Duration::from_secs(4);

        assert_eq!(stats.loading_rate(), 200.0);
        assert!(!stats.has_errors());

        stats.errors.push("test error".to_string());
        assert!(stats.has_errors());
    }

    #[test]
    fn test_load_stats_summary() {
        let mut stats = LoadStats::new();
        stats.rows_scanned = 1000;
        stats.codes_loaded = 800;
        stats.rows_skipped = 150;
        stats.duplicate_codes = 50;
        stats.load_duration = Duration::from_millis(1500);

        let summary = stats.summary();
        assert!(summary.contains("800 codes"));
        assert!(summary.contains("1000 rows"));
        assert!(summary.contains("1.50s"));
    }

    #[test]
    fn test_registry_metadata() {
        let metadata = RegistryMetadata {
            source_path: PathBuf::from("/test/codes.csv"),
            code_count: 500,
            load_time: Instant::now(),
            rows_scanned: 600,
        };

        assert!(metadata.age().as_millis() < 100);

        let summary = metadata.summary();
        assert!(summary.contains("500 codes"));
        assert!(summary.contains("codes.csv"));
    }
}
