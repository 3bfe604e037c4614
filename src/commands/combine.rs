//! Combine command implementation

use super::common::{fmt_opt, run_combination};
use crate::cli::CombineArgs;
use crate::combine::CombinationMethod;
use anyhow::Result;

/// Handle the combine command: merge the source files, compute the
/// consensus column, and print the wide table.
pub fn handle_combine(args: &CombineArgs, as_json: bool, verbose: bool) -> Result<()> {
    let rows = run_combination(args, verbose && !as_json)?;

    if as_json {
        let values: Vec<serde_json::Value> = rows.iter().map(|r| r.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    let with_bands = args.method == CombinationMethod::ConfidenceBands;

    println!(
        "Consensus projections from {} sources (method: {})",
        args.sources.len(),
        args.method
    );
    println!();

    if with_bands {
        println!(
            "{:<24} {:<6} {:<6} {:>7} {:>9} {:>9} {:>9}",
            "Name", "Pos", "Team", "Sources", "Proj", "Low", "High"
        );
        println!(
            "{:<24} {:<6} {:<6} {:>7} {:>9} {:>9} {:>9}",
            "----", "---", "----", "-------", "----", "---", "----"
        );
    } else {
        println!(
            "{:<24} {:<6} {:<6} {:>7} {:>9}",
            "Name", "Pos", "Team", "Sources", "Proj"
        );
        println!(
            "{:<24} {:<6} {:<6} {:>7} {:>9}",
            "----", "---", "----", "-------", "----"
        );
    }

    for row in &rows {
        let name = row.row.anchor.plyr.as_deref().unwrap_or("(unnamed)");
        let pos = row.row.anchor.pos.as_deref().unwrap_or("-");
        let team = row.row.anchor.team.as_deref().unwrap_or("-");

        if with_bands {
            println!(
                "{:<24} {:<6} {:<6} {:>7} {:>9} {:>9} {:>9}",
                name,
                pos,
                team,
                row.source_count,
                fmt_opt(row.combined_proj),
                fmt_opt(row.proj_lower),
                fmt_opt(row.proj_upper),
            );
        } else {
            println!(
                "{:<24} {:<6} {:<6} {:>7} {:>9}",
                name,
                pos,
                team,
                row.source_count,
                fmt_opt(row.combined_proj),
            );
        }
    }

    Ok(())
}
