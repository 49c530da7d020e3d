//! Command-line argument definitions for the intake processor

use crate::app::models::District;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the student intake processor
///
/// Processes institutional application packets: validates them against the
/// fixed template, extracts and normalizes student records, infers the
/// district from bank routing codes, and reconciles each batch against the
/// student database.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "intake-processor",
    version,
    about = "Process institutional student-aid application packets",
    long_about = "Processes institutional application packets extracted from the two intake \
                  document formats. Each packet is validated against the fixed template, its \
                  student records are cleaned and grade labels canonicalized, the district is \
                  inferred from bank routing codes, and the batch is reconciled against the \
                  student database with duplicate detection and vacancy reuse."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the intake processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process application packets from an intake directory
    Process(ProcessArgs),
    /// Run the end-of-year graduation and promotion rollover
    Promote(PromoteArgs),
    /// Withdraw one student and open a vacancy at their school
    Withdraw(WithdrawArgs),
    /// Show a summary of the student database
    Status(StatusArgs),
}

/// Arguments for the process command (main packet processing)
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input directory holding extracted packet files
    ///
    /// Scanned non-recursively for *.json packets. If not specified,
    /// defaults to ./intake
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Input directory holding packet files"
    )]
    pub input_dir: Option<PathBuf>,

    /// Root directory for filed packets
    ///
    /// Processed packets are moved into subdirectories of this root:
    /// one per accepting district, plus "for checking", "formatting
    /// issues" and "rejected". If not specified, defaults to ./processed
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Root directory for filed packets"
    )]
    pub output_root: Option<PathBuf>,

    /// Path to the student database
    ///
    /// Created on first use. If not specified, defaults to ./students.db
    #[arg(
        long = "database",
        value_name = "FILE",
        help = "Path to the student database"
    )]
    pub database: Option<PathBuf>,

    /// Path to the routing-code reference CSV
    ///
    /// If not specified, defaults to ./routing_codes.csv
    #[arg(
        long = "registry",
        value_name = "FILE",
        help = "Path to the routing-code reference CSV"
    )]
    pub registry: Option<PathBuf>,

    /// Preselect the operator district
    ///
    /// Accepts a district name or short code (e.g. "Kollam" or "KLM").
    /// Skips the interactive district menu. The preselected district wins
    /// over the batch vote unless it is "unknown".
    #[arg(
        short = 'd',
        long = "district",
        value_name = "DISTRICT",
        help = "Preselect the operator district (name or short code)"
    )]
    pub district: Option<District>,

    /// Answer yes to every confirmation prompt
    ///
    /// Batches that would normally wait for operator verification are
    /// accepted automatically. Escalations (ambiguous schools, unresolved
    /// grade labels) still route to "for checking".
    #[arg(
        short = 'y',
        long = "assume-yes",
        help = "Answer yes to every confirmation prompt"
    )]
    pub assume_yes: bool,

    /// Preview processing without writing or moving anything
    ///
    /// Packets are validated, extracted and reconciled, but the database
    /// is not written and no file is moved.
    #[arg(
        long = "dry-run",
        help = "Preview processing without writing to the database or moving files"
    )]
    pub dry_run: bool,

    /// Path to configuration file
    ///
    /// JSON configuration file overriding the built-in defaults; CLI
    /// flags override the file in turn.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the promote command (end-of-year rollover)
#[derive(Debug, Clone, Parser)]
pub struct PromoteArgs {
    /// Path to the student database
    #[arg(
        long = "database",
        value_name = "FILE",
        help = "Path to the student database"
    )]
    pub database: Option<PathBuf>,

    /// Run without a confirmation prompt
    #[arg(
        short = 'y',
        long = "assume-yes",
        help = "Run without a confirmation prompt"
    )]
    pub assume_yes: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the withdraw command (mid-year attrition)
#[derive(Debug, Clone, Parser)]
pub struct WithdrawArgs {
    /// Account number of the student to withdraw
    #[arg(
        short = 'a',
        long = "account",
        value_name = "NUMBER",
        help = "Account number of the student to withdraw"
    )]
    pub account: String,

    /// Path to the student database
    #[arg(
        long = "database",
        value_name = "FILE",
        help = "Path to the student database"
    )]
    pub database: Option<PathBuf>,

    /// Run without a confirmation prompt
    #[arg(
        short = 'y',
        long = "assume-yes",
        help = "Run without a confirmation prompt"
    )]
    pub assume_yes: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the status command (database summary)
#[derive(Debug, Clone, Parser)]
pub struct StatusArgs {
    /// Path to the student database
    #[arg(
        long = "database",
        value_name = "FILE",
        help = "Path to the student database"
    )]
    pub database: Option<PathBuf>,

    /// Output format for the summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the summary"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(input_dir) = &self.input_dir {
            if !input_dir.exists() {
                return Err(Error::configuration(format!(
                    "Input directory does not exist: {}",
                    input_dir.display()
                )));
            }
            if !input_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Input path is not a directory: {}",
                    input_dir.display()
                )));
            }
        }

        if let Some(registry) = &self.registry {
            if !registry.exists() {
                return Err(Error::configuration(format!(
                    "Registry file does not exist: {}",
                    registry.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl PromoteArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }
}

impl WithdrawArgs {
    /// Validate the withdraw command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.account.trim().is_empty() {
            return Err(Error::configuration(
                "Account number cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }
}

impl StatusArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }
}

fn log_level(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_root: None,
            database: None,
            registry: None,
            district: None,
            assume_yes: false,
            dry_run: false,
            config_file: None,
            verbose: 0,
            quiet: false,
        }
    }
}
