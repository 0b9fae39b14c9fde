//! Main entry point for the idrange CLI.
//!
//! This is the command-line interface for the idrange fixture planner.
//! It provides commands for working with recorded server responses:
//! - `plan`: Plan new ranges and print their add/modify fixtures
//! - `watermark`: Show the high-water marks of the recorded ranges
//! - `overlap-messages`: Print the messages overlap tests expect

use clap::Parser;
use idrange_cli::cli::{Cli, Command};
use idrange_cli::utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let logger = idrange::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        logger.warn(&format!("could not install logger: {e}"));
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        format: cli.format.map(Into::into),
    };

    // Execute the command
    let result = match cli.command {
        Command::Plan(cmd) => cmd.execute(&global),
        Command::Watermark(cmd) => cmd.execute(&global),
        Command::OverlapMessages(cmd) => cmd.execute(&global),
        Command::Validate(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
