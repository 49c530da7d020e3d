//! Withdraw command implementation
//!
//! Removes one student by account number and opens a slot for the grade
//! they held, ready for the next intake to fill.

use super::shared::{resolve_database_path, setup_command_logging};
use crate::Result;
use crate::app::services::store::StudentStore;
use crate::cli::args::WithdrawArgs;
use crate::cli::input;
use crate::config::Config;
use crate::constants;
use colored::Colorize;
use tracing::info;

/// Withdraw command runner
pub async fn run_withdraw(args: WithdrawArgs) -> Result<()> {
    setup_command_logging(args.get_log_level())?;

    args.validate()?;

    let config = Config::new();
    let database_path = resolve_database_path(args.database.as_ref(), &config);

    info!("Opening store at {}", database_path.display());
    let store = StudentStore::open(&database_path, &config.storage)?;

    if !args.assume_yes {
        let confirmed = input::prompt_confirmation(
            &format!("Remove the student holding account {}?", args.account),
            false,
        )?;
        if !confirmed {
            println!("{}", "Withdrawal cancelled".yellow());
            return Ok(());
        }
    }

    let receipt = store.remove_student_and_free_slot(&args.account)?;

    println!("{}", "Student withdrawn".green().bold());
    println!("  Student : {}", receipt.student_name);
    println!("  School  : {} (#{})", receipt.school_name, receipt.school_id);
    println!("  Grade   : {}", constants::display_grade(receipt.grade));
    println!(
        "  Slot #{} is now open for a grade {} student",
        receipt.vacancy_id,
        constants::display_grade(receipt.grade)
    );

    Ok(())
}
