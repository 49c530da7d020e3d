//! Shared components for CLI commands
//!
//! Common types and helpers used across the command implementations:
//! logging setup, layered configuration, packet discovery, progress bars,
//! and the final report block.

use crate::cli::args::ProcessArgs;
use crate::config::Config;
use crate::constants;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome counters for one processing run
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Packet files discovered in the input directory
    pub files_found: usize,
    /// Batches written to the store and filed under a district
    pub accepted: usize,
    /// Packets escalated to operator review
    pub for_checking: usize,
    /// Packets that failed template validation
    pub formatting_issues: usize,
    /// Batches the store refused
    pub rejected_by_store: usize,
    /// Students admitted into freed slots
    pub vacancies_filled: usize,
    /// Students turned away for want of a matching slot
    pub students_rejected: usize,
    /// Errors encountered along the way
    pub errors_encountered: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

impl ProcessingStats {
    /// Number of packets that reached a terminal outcome
    pub fn files_processed(&self) -> usize {
        self.accepted + self.for_checking + self.formatting_issues + self.rejected_by_store
    }

    /// Print the rule-delimited summary block.
    pub fn print_final_report(&self) {
        let width = constants::REPORT_WIDTH;
        let rule = "-".repeat(width);

        println!("{rule}");
        println!("{}", center("FINAL REPORT", width).bold());
        println!(
            "{}",
            center(&format!("Files Accepted    : {}", self.accepted), width).green()
        );
        println!(
            "{}",
            center(&format!("For Checking      : {}", self.for_checking), width).yellow()
        );
        println!(
            "{}",
            center(
                &format!("Formatting Issues : {}", self.formatting_issues),
                width
            )
            .yellow()
        );
        println!(
            "{}",
            center(
                &format!("Rejected by DB    : {}", self.rejected_by_store),
                width
            )
            .red()
        );
        println!("{rule}");
    }
}

/// Center a line within the report width.
fn center(text: &str, width: usize) -> String {
    if text.len() >= width {
        return text.to_string();
    }
    let pad = (width - text.len()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Set up structured logging for the process command
pub fn setup_logging(args: &ProcessArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("intake_processor={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Set up structured logging for the maintenance commands
pub fn setup_command_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("intake_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
pub fn load_configuration(args: &ProcessArgs) -> Result<Config> {
    info!("Loading configuration");

    let mut config = match &args.config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config::new(),
    };

    apply_cli_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &ProcessArgs) {
    if let Some(input_dir) = &args.input_dir {
        config.intake.input_dir = input_dir.clone();
    }
    if let Some(output_root) = &args.output_root {
        config.intake.output_root = output_root.clone();
    }
    if let Some(database) = &args.database {
        config.storage.database_path = database.clone();
    }
    if let Some(registry) = &args.registry {
        config.reference.registry_path = registry.clone();
    }
    if args.dry_run {
        config.intake.file_packets = false;
    }
}

/// Create the outcome directories under the output root
pub fn prepare_directories(config: &Config) -> Result<()> {
    for dir in [
        config.intake.output_root.clone(),
        config.review_dir(),
        config.format_issues_dir(),
        config.rejected_dir(),
    ] {
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                Error::configuration(format!(
                    "Failed to create directory '{}': {}",
                    dir.display(),
                    e
                ))
            })?;
        }
    }

    info!(
        "Outcome directories ready under {}",
        config.intake.output_root.display()
    );
    Ok(())
}

/// Database path for the maintenance commands: CLI override or the
/// configured default
pub fn resolve_database_path(cli_path: Option<&PathBuf>, config: &Config) -> PathBuf {
    cli_path
        .cloned()
        .unwrap_or_else(|| config.storage.database_path.clone())
}

/// Discover packet files in the input directory, non-recursively
pub fn discover_packet_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    use walkdir::WalkDir;

    if !input_dir.exists() {
        return Err(Error::configuration(format!(
            "Input directory does not exist: {}",
            input_dir.display()
        )));
    }

    let mut packets = Vec::new();
    for entry in WalkDir::new(input_dir)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file()
            && path.extension().and_then(|s| s.to_str()) == Some(constants::PACKET_EXTENSION)
        {
            packets.push(path.to_path_buf());
        }
    }

    // Sort files for consistent processing order
    packets.sort();

    debug!(
        "Discovered {} packet files in {}",
        packets.len(),
        input_dir.display()
    );
    for file in &packets {
        debug!("  Found: {}", file.display());
    }

    Ok(packets)
}

/// Check if an error is critical enough to stop processing
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. } | Error::Interrupted { .. }
    )
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
