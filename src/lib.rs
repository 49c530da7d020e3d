//! Intake Processor Library
//!
//! A Rust library for processing institutional student-aid application
//! packets from extracted document form into a reconciled SQLite store.
//!
//! This library provides tools for:
//! - Validating packets against the fixed submission template
//! - Extracting institution and student records from two document formats
//! - Normalizing free-text grade labels into canonical grade codes
//! - Inferring the administrative district from bank routing codes
//! - Reconciling incoming accounts against previously stored students
//! - Filling freed enrollment slots transactionally, with full rollback

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod district_resolver;
        pub mod normalizer;
        pub mod packet_parser;
        pub mod reconciliation;
        pub mod routing_registry;
        pub mod store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{Batch, District, GradeValue, Institution, StudentRecord};
pub use config::Config;

/// Result type alias for the intake processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for packet processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error (routing-code reference dataset)
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// JSON parsing error (packet or configuration file)
    #[error("JSON parsing error in file '{file}': {message}")]
    JsonParsing {
        file: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Packet does not match the fixed submission template
    #[error("Packet format error in file '{file}': {message}")]
    PacketFormat { file: String, message: String },

    /// A structurally valid packet yielded a malformed record
    #[error("Extraction error in file '{file}': {message}")]
    Extraction { file: String, message: String },

    /// Grade labels still unresolved at a persistence boundary
    #[error("Grade validation error: {message}")]
    GradeValidation { message: String },

    /// The store rejected a write through a schema constraint
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// Storage engine fault
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// Routing-code registry error
    #[error("Routing registry error: {message}")]
    Registry { message: String },

    /// Account not found in the store
    #[error("Account not found: {account}")]
    AccountNotFound { account: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a JSON parsing error with context
    pub fn json_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<serde_json::Error>,
    ) -> Self {
        Self::JsonParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a packet format error
    pub fn packet_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PacketFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error
    pub fn extraction(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a grade validation error
    pub fn grade_validation(message: impl Into<String>) -> Self {
        Self::GradeValidation {
            message: message.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint_violation(message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>, source: Option<rusqlite::Error>) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }

    /// Create a routing registry error
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Create an account not found error
    pub fn account_not_found(account: impl Into<String>) -> Self {
        Self::AccountNotFound {
            account: account.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// True when the error came from a store schema constraint.
    ///
    /// Reconciliation relies on this to tell a rejected batch (duplicate
    /// account number, out-of-range grade) apart from an engine fault.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonParsing {
            file: "unknown".to_string(),
            message: "JSON parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::SqliteFailure(e, ref text)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation {
                    message: text
                        .clone()
                        .unwrap_or_else(|| "schema constraint rejected the write".to_string()),
                }
            }
            other => Self::Storage {
                message: "storage operation failed".to_string(),
                source: Some(other),
            },
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
