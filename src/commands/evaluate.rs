//! Evaluate command implementation

use super::common::run_combination;
use crate::cli::CombineArgs;
use crate::evaluate::evaluate_combination;
use crate::records::ActualResult;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Handle the evaluate command: run the combine pipeline, then score the
/// consensus against realized outcomes.
pub fn handle_evaluate(
    actuals_path: &Path,
    args: &CombineArgs,
    as_json: bool,
    verbose: bool,
) -> Result<()> {
    let raw = fs::read_to_string(actuals_path)
        .with_context(|| format!("failed to read actuals file {}", actuals_path.display()))?;
    let actuals: Vec<ActualResult> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse actuals from {}", actuals_path.display()))?;

    if verbose && !as_json {
        println!(
            "✓ Loaded {} actual results from {}",
            actuals.len(),
            actuals_path.display()
        );
    }

    let rows = run_combination(args, verbose && !as_json)?;
    let metrics = evaluate_combination(&actuals, &rows);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    println!("Evaluation vs actuals (method: {})", args.method);
    println!();
    if metrics.sample_size == 0 {
        println!("No players joined between actuals and projections.");
        return Ok(());
    }

    println!("{:<32} {:>10}", "Joined players", metrics.sample_size);
    println!(
        "{:<32} {:>10.3}",
        "Mean absolute error", metrics.mean_absolute_error
    );
    println!(
        "{:<32} {:>10.3}",
        "Root mean square error", metrics.root_mean_square_error
    );
    println!(
        "{:<32} {:>9.1}%",
        "Mean absolute percentage error", metrics.mean_absolute_percentage_error
    );
    println!("{:<32} {:>10.3}", "Correlation", metrics.correlation);

    Ok(())
}
