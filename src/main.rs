use clap::Parser;
use intake_processor::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Create cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");

            // Cancel all operations when Ctrl+C is received
            cancellation_token.cancel();
        };

        // Run the main command with cancellation support
        tokio::select! {
            result = commands::run(command, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(intake_processor::Error::interrupted(
                    "Processing interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(()) => {
            // Success - outcomes have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Intake Processor - Student Aid Application Pipeline");
    println!("===================================================");
    println!();
    println!("Validate extracted application packets, reconcile them against the");
    println!("student store, and keep the store current across the school year.");
    println!();
    println!("USAGE:");
    println!("    intake-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Process application packets from the intake directory (main command)");
    println!("    promote     Move every student and open slot up one grade at year end");
    println!("    withdraw    Remove one student by account number, freeing their slot");
    println!("    status      Report what the store currently holds");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Process packets interactively from ./intake:");
    println!("    intake-processor process");
    println!();
    println!("    # Unattended intake with a fixed district:");
    println!("    intake-processor process --input /path/to/packets --district Kollam -y");
    println!();
    println!("    # Year-end promotion:");
    println!("    intake-processor promote");
    println!();
    println!("    # Store summary as JSON:");
    println!("    intake-processor status --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    intake-processor <COMMAND> --help");
}
