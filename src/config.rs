//! Configuration management and validation.
//!
//! Provides configuration structures for packet intake, the student
//! store, the routing-code reference dataset, and record normalization.
//! Defaults come from `constants`; a JSON file and CLI flags may layer
//! on top.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::{Error, Result};

/// Packet intake and output routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Directory scanned for extracted packet files
    pub input_dir: PathBuf,

    /// Directory under which outcome subdirectories are created
    pub output_root: PathBuf,

    /// Move processed packet files into outcome subdirectories
    pub file_packets: bool,
}

/// Student store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database path
    pub database_path: PathBuf,

    /// How long a writer waits on a locked database before giving up
    pub busy_timeout_ms: u64,
}

/// Routing-code reference dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Path of the routing-code CSV
    pub registry_path: PathBuf,
}

/// Record normalization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Longest registry branch name trusted over the document value
    pub max_branch_len: usize,

    /// Strip the settlement-network suffix from registry branch names
    pub strip_settlement_suffix: bool,
}

/// Global configuration for packet processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub intake: IntakeConfig,
    pub storage: StorageConfig,
    pub reference: ReferenceConfig,
    pub normalization: NormalizationConfig,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("intake"),
            output_root: PathBuf::from("processed"),
            file_packets: true,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(constants::STORE_FILENAME),
            busy_timeout_ms: 5_000,
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from(constants::REGISTRY_FILENAME),
        }
    }
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            max_branch_len: constants::MAX_BRANCH_LEN,
            strip_settlement_suffix: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intake: IntakeConfig::default(),
            storage: StorageConfig::default(),
            reference: ReferenceConfig::default(),
            normalization: NormalizationConfig::default(),
        }
    }
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file, layered over defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read config file {}", path.display()), e))?;
        let config: Config = serde_json::from_str(&contents).map_err(|e| {
            Error::json_parsing(path.display().to_string(), "invalid configuration", Some(e))
        })?;
        Ok(config)
    }

    /// Set the packet input directory
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.intake.input_dir = dir.into();
        self
    }

    /// Set the root for outcome subdirectories
    pub fn with_output_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.intake.output_root = dir.into();
        self
    }

    /// Set the student store path
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage.database_path = path.into();
        self
    }

    /// Set the routing-code reference dataset path
    pub fn with_registry_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference.registry_path = path.into();
        self
    }

    /// Leave processed packet files where they are
    pub fn without_packet_filing(mut self) -> Self {
        self.intake.file_packets = false;
        self
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.intake.input_dir.as_os_str().is_empty() {
            return Err(Error::configuration("input directory must not be empty"));
        }
        if self.storage.database_path.as_os_str().is_empty() {
            return Err(Error::configuration("database path must not be empty"));
        }
        if self.reference.registry_path.as_os_str().is_empty() {
            return Err(Error::configuration("registry path must not be empty"));
        }
        if self.normalization.max_branch_len == 0 {
            return Err(Error::configuration(
                "max branch length must be at least 1",
            ));
        }
        Ok(())
    }

    /// Directory for packets escalated to operator review
    pub fn review_dir(&self) -> PathBuf {
        self.intake.output_root.join(constants::REVIEW_DIR_NAME)
    }

    /// Directory for packets that failed template validation
    pub fn format_issues_dir(&self) -> PathBuf {
        self.intake
            .output_root
            .join(constants::FORMAT_ISSUES_DIR_NAME)
    }

    /// Directory for batches the store rejected
    pub fn rejected_dir(&self) -> PathBuf {
        self.intake.output_root.join(constants::REJECTED_DIR_NAME)
    }

    /// Directory for accepted packets, named after the batch district
    /// and stamped with the intake date
    pub fn accepted_dir(&self, label: &str) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y-%m-%d");
        self.intake.output_root.join(format!("{} {}", label, stamp))
    }
}
