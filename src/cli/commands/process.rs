//! Process command implementation for the intake processor CLI
//!
//! This module contains the complete packet intake workflow: configuration
//! loading, template validation and extraction, normalization, district
//! resolution, reconciliation against the store, and report generation.

use super::shared::{
    ProcessingStats, create_progress_bar, discover_packet_files, is_critical_error,
    load_configuration, prepare_directories, setup_logging,
};
use crate::app::models::{Batch, District, ExistingAccount, Institution};
use crate::app::services::district_resolver;
use crate::app::services::normalizer;
use crate::app::services::packet_parser::{self, PacketFile};
use crate::app::services::reconciliation::{self, Classification, DuplicateMatch, SchoolIdentity};
use crate::app::services::routing_registry::RoutingRegistry;
use crate::app::services::store::StudentStore;
use crate::cli::args::ProcessArgs;
use crate::cli::input;
use crate::config::Config;
use crate::constants;
use crate::{Error, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Terminal filing outcome for one packet
#[derive(Debug, Clone, PartialEq, Eq)]
enum PacketOutcome {
    /// Batch written to the store, packet filed under its district
    Accepted,

    /// Escalated to the review directory for operator follow-up
    ForChecking,

    /// Failed template validation or could not be read
    FormattingIssues,

    /// Duplicate of stored rows, or refused by the store outright
    Rejected { filled: usize, turned_away: usize },
}

/// Process command runner for the intake processor
///
/// This function orchestrates the entire intake workflow:
/// 1. Set up logging and configuration
/// 2. Load the routing registry while the operator picks a district
/// 3. Walk the intake directory packet by packet
/// 4. Print the final report
pub async fn run_process(args: ProcessArgs, token: CancellationToken) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args)?;

    info!("Starting intake processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    if config.intake.file_packets {
        prepare_directories(&config)?;
    }

    // The registry is large; load it in the background while the operator
    // answers the district prompt.
    let registry_path = config.reference.registry_path.clone();
    let show_progress = args.show_progress();
    let registry_task = tokio::task::spawn_blocking(move || {
        RoutingRegistry::load_from_csv(&registry_path, show_progress)
    });

    let operator_district = match args.district {
        Some(district) => district,
        None if args.assume_yes => District::Unknown,
        None => input::prompt_district()?,
    };
    if operator_district.is_known() {
        info!("Operator district: {}", operator_district.name());
    } else {
        info!("No operator district; each batch resolves from its routing codes");
    }

    let (registry, load_stats) = registry_task
        .await
        .map_err(|e| Error::registry(format!("registry loader task failed: {}", e)))??;
    info!("Routing registry ready: {}", load_stats.summary());

    let store = if args.dry_run {
        info!("Dry run: writing to a throwaway in-memory store");
        StudentStore::open_in_memory()?
    } else {
        StudentStore::open(&config.storage.database_path, &config.storage)?
    };

    let packet_files = discover_packet_files(&config.intake.input_dir)?;
    let mut stats = ProcessingStats {
        files_found: packet_files.len(),
        ..Default::default()
    };

    if packet_files.is_empty() {
        warn!(
            "No packet files found in {}",
            config.intake.input_dir.display()
        );
        stats.processing_time = start_time.elapsed();
        stats.print_final_report();
        return Ok(stats);
    }

    info!("Processing {} packet files", packet_files.len());

    let interactive = !args.assume_yes;

    // A progress bar only makes sense when nothing prompts in between
    let progress_bar = if args.show_progress() && !interactive {
        Some(create_progress_bar(
            packet_files.len() as u64,
            "Processing packets...",
        ))
    } else {
        None
    };

    for packet_path in &packet_files {
        if token.is_cancelled() {
            if let Some(pb) = &progress_bar {
                pb.abandon_with_message("interrupted");
            }
            return Err(Error::interrupted("shutdown requested during intake"));
        }

        if let Some(pb) = &progress_bar {
            let file_name = packet_path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("packet");
            pb.set_message(file_name.to_string());
        }

        match process_packet(
            &config,
            &store,
            &registry,
            operator_district,
            packet_path,
            interactive,
        ) {
            Ok(PacketOutcome::Accepted) => stats.accepted += 1,
            Ok(PacketOutcome::ForChecking) => stats.for_checking += 1,
            Ok(PacketOutcome::FormattingIssues) => stats.formatting_issues += 1,
            Ok(PacketOutcome::Rejected {
                filled,
                turned_away,
            }) => {
                stats.rejected_by_store += 1;
                stats.vacancies_filled += filled;
                stats.students_rejected += turned_away;
            }
            Err(e) => {
                error!("Failed to process {}: {}", packet_path.display(), e);
                stats.errors_encountered += 1;

                // Continue with the remaining packets unless it's critical
                if is_critical_error(&e) {
                    return Err(e);
                }
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message(format!("Processed {} packets", packet_files.len()));
    }

    stats.processing_time = start_time.elapsed();
    stats.print_final_report();

    Ok(stats)
}

/// Run one packet through the full intake pipeline.
///
/// Every packet reaches exactly one terminal outcome and is filed into
/// the matching directory. Only store and I/O failures bubble up.
fn process_packet(
    config: &Config,
    store: &StudentStore,
    registry: &RoutingRegistry,
    operator_district: District,
    packet_path: &Path,
    interactive: bool,
) -> Result<PacketOutcome> {
    let file_name = packet_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("packet")
        .to_string();

    println!();
    println!("{}", format!("=== {} ===", file_name).bold());

    // An unreadable packet is filed as a formatting issue like any other
    // malformed submission
    let document = match PacketFile::load(packet_path) {
        Ok(file) => file.into_document(),
        Err(e) => {
            warn!("Unreadable packet {}: {}", file_name, e);
            println!("{} {}", "Unreadable:".red(), e);
            file_packet(config, packet_path, &config.format_issues_dir(), None)?;
            return Ok(PacketOutcome::FormattingIssues);
        }
    };

    let report = packet_parser::validate(&document);
    if !report.is_ok() {
        println!("{}", "Template validation failed:".yellow());
        for (flag, passed) in report.flag_map() {
            let mark = if passed { "ok".green() } else { "FAIL".red() };
            println!("  {:<24} {}", flag, mark);
        }
        for line in report.diagnostics() {
            println!("  - {}", line);
        }
        file_packet(config, packet_path, &config.format_issues_dir(), None)?;
        return Ok(PacketOutcome::FormattingIssues);
    }

    let batch = match packet_parser::extract_batch(&document, &file_name) {
        Ok(batch) => batch,
        Err(e) => {
            warn!("Extraction failed for {}: {}", file_name, e);
            println!("{} {}", "Extraction failed:".red(), e);
            file_packet(config, packet_path, &config.format_issues_dir(), None)?;
            return Ok(PacketOutcome::FormattingIssues);
        }
    };

    let batch = normalizer::normalize_batch(&batch, registry, &config.normalization);

    // The operator's district wins; without one the batch votes with its
    // routing codes
    let district = if operator_district.is_known() {
        operator_district
    } else {
        let codes: Vec<&str> = batch
            .students
            .iter()
            .map(|s| s.routing_code.as_str())
            .collect();
        district_resolver::resolve_batch_district(&codes, registry)
    };

    let batch = batch.with_district(district);
    let label = packet_label(&batch.institution);

    println!(
        "{}: {} students, district {}",
        batch.institution.name.bold(),
        batch.students.len(),
        district.name()
    );

    if !district.is_known() {
        println!(
            "{}",
            "District could not be resolved; filing for checking".yellow()
        );
        file_packet(config, packet_path, &config.review_dir(), Some(&label))?;
        return Ok(PacketOutcome::ForChecking);
    }

    let existing = reconciliation::find_existing(&batch, store)?;
    let classification = reconciliation::classify(&batch, &existing);

    if classification.has_duplicates() {
        return handle_duplicates(
            config,
            store,
            registry,
            &batch,
            &classification,
            &existing,
            packet_path,
            &label,
            interactive,
        );
    }

    // Unresolved grade labels cannot be stored; the packet needs a human
    let unresolved = batch.unresolved_grade_labels();
    if !unresolved.is_empty() {
        println!(
            "{} {}",
            "Unresolved grade labels:".yellow(),
            unresolved.join(", ")
        );
        file_packet(config, packet_path, &config.review_dir(), Some(&label))?;
        return Ok(PacketOutcome::ForChecking);
    }

    if interactive {
        print_batch_summary(&batch);
        if !input::prompt_confirmation("Write this batch to the store?", true)? {
            println!("{}", "Declined; filing for checking".yellow());
            file_packet(config, packet_path, &config.review_dir(), Some(&label))?;
            return Ok(PacketOutcome::ForChecking);
        }
    }

    match store.insert_batch(&batch) {
        Ok(school_id) => {
            println!(
                "{}",
                format!(
                    "Accepted: {} students stored under school #{}",
                    batch.students.len(),
                    school_id
                )
                .green()
            );
            let dest = config.accepted_dir(district.name());
            file_packet(config, packet_path, &dest, Some(&label))?;
            Ok(PacketOutcome::Accepted)
        }
        Err(e) if e.is_constraint_violation() => {
            warn!("Store refused batch from {}: {}", file_name, e);
            println!("{} {}", "Store refused the batch:".red(), e);
            file_packet(config, packet_path, &config.rejected_dir(), Some(&label))?;
            Ok(PacketOutcome::Rejected {
                filled: 0,
                turned_away: 0,
            })
        }
        Err(e) => Err(e),
    }
}

/// Handle a batch holding accounts the store already knows.
///
/// A single matching school gets the diff view and a chance to seat the
/// batch's new students in its open slots. Accounts spread over more than
/// one school are left to a human.
#[allow(clippy::too_many_arguments)]
fn handle_duplicates(
    config: &Config,
    store: &StudentStore,
    registry: &RoutingRegistry,
    batch: &Batch,
    classification: &Classification,
    existing: &[ExistingAccount],
    packet_path: &Path,
    label: &str,
    interactive: bool,
) -> Result<PacketOutcome> {
    println!(
        "{}",
        format!(
            "{} of {} accounts already stored",
            classification.duplicates.len(),
            batch.students.len()
        )
        .yellow()
    );

    let school_id = match reconciliation::identify_school(existing) {
        Some(SchoolIdentity::Single(id)) => id,
        Some(SchoolIdentity::Ambiguous(ids)) => {
            warn!("Duplicate accounts span {} schools", ids.len());
            println!(
                "{}",
                format!(
                    "Accounts match {} different schools; filing for checking",
                    ids.len()
                )
                .red()
            );
            file_packet(config, packet_path, &config.review_dir(), Some(label))?;
            return Ok(PacketOutcome::ForChecking);
        }
        None => {
            file_packet(config, packet_path, &config.review_dir(), Some(label))?;
            return Ok(PacketOutcome::ForChecking);
        }
    };

    print_duplicate_diff(&classification.duplicates, registry);

    let mut filled = 0;
    let mut turned_away = classification.new_records.len();

    if !classification.new_records.is_empty() {
        let vacancies = store.vacancies_for_school(school_id)?;
        let plan = reconciliation::plan_vacancy_fill(&classification.new_records, &vacancies);

        if plan.assignments.is_empty() {
            println!(
                "No open slots match the {} new students",
                classification.new_records.len()
            );
        } else {
            println!(
                "{} of {} new students fit open slots:",
                plan.filled_count(),
                classification.new_records.len()
            );
            for assignment in &plan.assignments {
                println!(
                    "  {} -> slot #{} (grade {})",
                    assignment.record.name,
                    assignment.vacancy_id,
                    assignment.record.grade.display_label()
                );
            }

            let go_ahead = !interactive
                || input::prompt_confirmation("Admit these students into the freed slots?", true)?;

            if go_ahead {
                let admitted = store.apply_vacancy_fill(school_id, &plan.assignments)?;
                filled = admitted;
                turned_away = classification.new_records.len() - admitted;
                for record in &plan.rejected {
                    println!("  {} {}", record.name, "- no matching slot".yellow());
                }
                println!(
                    "{}",
                    format!("{} students admitted into freed slots", admitted).green()
                );
            } else {
                println!("{}", "Fill declined; no students admitted".yellow());
            }
        }
    }

    file_packet(config, packet_path, &config.rejected_dir(), Some(label))?;
    Ok(PacketOutcome::Rejected {
        filled,
        turned_away,
    })
}

/// Show what the packet would change on each already-stored account
fn print_duplicate_diff(duplicates: &[DuplicateMatch], registry: &RoutingRegistry) {
    for duplicate in duplicates {
        let membership = if registry.contains(&duplicate.incoming.routing_code) {
            "routing code in registry".green()
        } else {
            "routing code not in registry".red()
        };
        println!(
            "  {} ({}) [{}]",
            duplicate.incoming.name.bold(),
            duplicate.incoming.account_number,
            membership
        );

        let changes = duplicate.changed_fields();
        if changes.is_empty() {
            println!("    unchanged");
        }
        for change in changes {
            println!("    {}: {} -> {}", change.field, change.stored, change.incoming);
        }
    }
}

/// Batch summary shown before the write confirmation
fn print_batch_summary(batch: &Batch) {
    println!(
        "  Institution  : {}, {}",
        batch.institution.name, batch.institution.place
    );
    println!("  District     : {}", batch.district.name());
    println!("  Students     : {}", batch.students.len());
    println!("  Annual award : {}", batch.total_award_amount());
}

/// Packets are refiled under the institution's cleaned-up name
fn packet_label(institution: &Institution) -> String {
    format!(
        "{}.{}",
        institution.file_label(),
        constants::PACKET_EXTENSION
    )
}

/// Move a packet into an outcome directory, optionally renaming it.
///
/// Filing is skipped entirely on dry runs. The destination directory is
/// created on first use; a cross-device move falls back to copy+remove.
fn file_packet(
    config: &Config,
    source: &Path,
    dest_dir: &Path,
    new_name: Option<&str>,
) -> Result<PathBuf> {
    if !config.intake.file_packets {
        debug!("Packet filing disabled; leaving {} in place", source.display());
        return Ok(source.to_path_buf());
    }

    if !dest_dir.exists() {
        std::fs::create_dir_all(dest_dir).map_err(|e| {
            Error::io(
                format!("Failed to create directory '{}'", dest_dir.display()),
                e,
            )
        })?;
    }

    let file_name = match new_name {
        Some(name) => name.to_string(),
        None => source
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("packet.json")
            .to_string(),
    };
    let dest = dest_dir.join(&file_name);

    if std::fs::rename(source, &dest).is_err() {
        // Rename fails across filesystems; fall back to copy + remove
        std::fs::copy(source, &dest)
            .and_then(|_| std::fs::remove_file(source))
            .map_err(|e| {
                Error::io(
                    format!(
                        "Failed to move '{}' to '{}'",
                        source.display(),
                        dest.display()
                    ),
                    e,
                )
            })?;
    }

    debug!("Filed {} as {}", source.display(), dest.display());
    Ok(dest)
}
