//! Status command implementation
//!
//! Reports what the store currently holds: school and student counts,
//! district and grade breakdowns, and the annual disbursement total.

use super::shared::{resolve_database_path, setup_command_logging};
use crate::Result;
use crate::app::services::store::{StoreSummary, StudentStore};
use crate::cli::args::{OutputFormat, StatusArgs};
use crate::config::Config;
use colored::Colorize;
use tracing::info;

/// Status command runner
pub async fn run_status(args: StatusArgs) -> Result<()> {
    setup_command_logging(args.get_log_level())?;

    let config = Config::new();
    let database_path = resolve_database_path(args.database.as_ref(), &config);

    info!("Opening store at {}", database_path.display());
    let store = StudentStore::open(&database_path, &config.storage)?;
    let summary = store.store_summary()?;

    match args.output_format {
        OutputFormat::Human => print_human_summary(&summary),
        OutputFormat::Json => print_json_summary(&summary),
    }

    Ok(())
}

/// Human-readable summary report
fn print_human_summary(summary: &StoreSummary) {
    println!("{}", "Store summary".bold());
    println!("  Schools             : {}", summary.school_count);
    println!("  Students            : {}", summary.student_count);
    println!("  Open slots          : {}", summary.vacancy_count);
    println!("  Annual disbursement : {}", summary.annual_disbursement);

    if !summary.schools_per_district.is_empty() {
        println!();
        println!("{}", "Schools per district".bold());
        for row in &summary.schools_per_district {
            println!("  {:<18} {:>6}", row.district, row.schools);
        }
    }

    if !summary.students_per_grade.is_empty() {
        println!();
        println!("{}", "Students per grade".bold());
        for row in &summary.students_per_grade {
            println!("  {:<6} {:>6}", row.label, row.count);
        }
    }
}

/// JSON summary for machine consumption
fn print_json_summary(summary: &StoreSummary) {
    println!("{}", serde_json::to_string_pretty(summary).unwrap());
}
