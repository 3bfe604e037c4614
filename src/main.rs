//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use nflproj::{
    cli::{Commands, NflProj},
    commands::{handle_combine, handle_evaluate},
};

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    let app = NflProj::parse();

    match app.command {
        Commands::Combine {
            args,
            json,
            verbose,
        } => handle_combine(&args, json, verbose)?,

        Commands::Evaluate {
            actuals,
            args,
            json,
            verbose,
        } => handle_evaluate(&actuals, &args, json, verbose)?,
    }

    Ok(())
}
