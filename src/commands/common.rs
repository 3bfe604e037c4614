//! Shared plumbing for command handlers: source loading and the
//! combine pipeline both commands run.

use crate::cli::CombineArgs;
use crate::combine::{CombineOptions, ProjectionCombiner};
use crate::records::{CombinedRow, ProjectionRecord};
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Read one JSON source file into projection records.
pub fn load_source(path: &Path) -> Result<Vec<ProjectionRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse projection records from {}", path.display()))
}

/// Run the full merge + combine pipeline for a command invocation.
/// Rows come back sorted by combined projection descending, rows without a
/// consensus value last.
pub fn run_combination(args: &CombineArgs, verbose: bool) -> Result<Vec<CombinedRow>> {
    let mut sources = Vec::with_capacity(args.sources.len());
    for path in &args.sources {
        let records = load_source(path)?;
        if verbose {
            println!("✓ Loaded {} records from {}", records.len(), path.display());
        }
        sources.push(records);
    }

    let combiner = if args.fuzzy {
        ProjectionCombiner::with_fuzzy_matching(args.method, args.thresholds.to_config())?
    } else {
        ProjectionCombiner::new(args.method)
    };

    let weights: Option<BTreeMap<String, f64>> = if args.weights.is_empty() {
        None
    } else {
        Some(
            args.weights
                .iter()
                .map(|w| (w.source.clone(), w.weight))
                .collect(),
        )
    };

    let options = CombineOptions {
        method: None,
        weights,
        confidence_level: args.confidence_level,
    };

    let mut rows = combiner.combine_projections(&sources, &options)?;

    if verbose {
        println!(
            "✓ Combined {} sources into {} rows (method: {})",
            args.sources.len(),
            rows.len(),
            args.method
        );
    }

    rows.sort_by(|a, b| match (a.combined_proj, b.combined_proj) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    Ok(rows)
}

/// Format an optional value for text output.
pub fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}
