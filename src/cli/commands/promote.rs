//! Promote command implementation
//!
//! Year-end maintenance: graduating students leave the store, everyone
//! else moves up one grade, and freed slots move with their cohort.

use super::shared::{resolve_database_path, setup_command_logging};
use crate::Result;
use crate::app::services::store::StudentStore;
use crate::cli::args::PromoteArgs;
use crate::cli::input;
use crate::config::Config;
use colored::Colorize;
use tracing::info;

/// Promote command runner
pub async fn run_promote(args: PromoteArgs) -> Result<()> {
    setup_command_logging(args.get_log_level())?;

    let config = Config::new();
    let database_path = resolve_database_path(args.database.as_ref(), &config);

    info!("Opening store at {}", database_path.display());
    let store = StudentStore::open(&database_path, &config.storage)?;

    let summary = store.store_summary()?;
    println!(
        "Store holds {} students across {} schools",
        summary.student_count, summary.school_count
    );

    // The whole year moves in one transaction; there is no partial undo
    if !args.assume_yes {
        let confirmed = input::prompt_confirmation(
            "Promote every student and open slot by one grade? Graduating students are removed",
            false,
        )?;
        if !confirmed {
            println!("{}", "Promotion cancelled".yellow());
            return Ok(());
        }
    }

    let stats = store.graduate_and_promote()?;

    println!("{}", "Promotion complete".green().bold());
    println!("  Graduates removed : {}", stats.graduates_removed);
    println!("  Students promoted : {}", stats.students_promoted);
    println!("  Slots freed       : {}", stats.vacancies_created);
    println!("  Slots lapsed      : {}", stats.vacancies_expired);
    println!("  Slots carried up  : {}", stats.vacancies_promoted);

    Ok(())
}
