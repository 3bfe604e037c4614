//! CLI argument definitions and parsing.

pub mod types;

use crate::combine::CombinationMethod;
use crate::matching::MatcherConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::WeightSpec;

/// Matcher threshold overrides shared by fuzzy-matching commands.
///
/// Unset thresholds keep the matcher defaults (name 0.7, position 0.8,
/// team 0.5, overall 0.65).
#[derive(Debug, Args)]
pub struct ThresholdArgs {
    /// Minimum name similarity for a fuzzy match (0.0-1.0).
    #[clap(long)]
    pub name_threshold: Option<f64>,

    /// Minimum position similarity for a fuzzy match (0.0-1.0).
    #[clap(long)]
    pub position_threshold: Option<f64>,

    /// Minimum team similarity for a fuzzy match; capped at 0.4 when applied.
    #[clap(long)]
    pub team_threshold: Option<f64>,

    /// Minimum weighted overall similarity for a fuzzy match (0.0-1.0).
    #[clap(long)]
    pub overall_threshold: Option<f64>,
}

impl ThresholdArgs {
    /// Matcher config with defaults filled in for unset thresholds.
    pub fn to_config(&self) -> MatcherConfig {
        let defaults = MatcherConfig::default();
        MatcherConfig {
            name_threshold: self.name_threshold.unwrap_or(defaults.name_threshold),
            position_threshold: self
                .position_threshold
                .unwrap_or(defaults.position_threshold),
            team_threshold: self.team_threshold.unwrap_or(defaults.team_threshold),
            overall_threshold: self
                .overall_threshold
                .unwrap_or(defaults.overall_threshold),
        }
    }
}

/// Source files and combination settings shared between commands.
#[derive(Debug, Args)]
pub struct CombineArgs {
    /// JSON files, one per source, each holding an array of projection
    /// records. Source order matters: the first file anchors fuzzy merges.
    #[clap(required = true)]
    pub sources: Vec<PathBuf>,

    /// Combination method.
    #[clap(long, short, default_value_t = CombinationMethod::default())]
    pub method: CombinationMethod,

    /// Match players across sources by fuzzy name/position/team similarity
    /// instead of exact name strings.
    #[clap(long)]
    pub fuzzy: bool,

    /// Per-source weight for weighted_average (repeatable): `-w source_0=2.0`.
    #[clap(long = "weight", short = 'w')]
    pub weights: Vec<WeightSpec>,

    /// Confidence level for confidence_bands (default 0.95).
    #[clap(long)]
    pub confidence_level: Option<f64>,

    #[clap(flatten)]
    pub thresholds: ThresholdArgs,
}

#[derive(Debug, Parser)]
#[clap(name = "nflproj", about = "NFL fantasy projection aggregation CLI")]
pub struct NflProj {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge projection sources and compute a consensus value per player.
    Combine {
        #[clap(flatten)]
        args: CombineArgs,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,

        /// Print per-step progress.
        #[clap(long)]
        verbose: bool,
    },

    /// Combine projection sources, then score the consensus against
    /// realized results.
    Evaluate {
        /// JSON file of realized outcomes: `[{"plyr": ..., "actual": ...}]`.
        #[clap(long)]
        actuals: PathBuf,

        #[clap(flatten)]
        args: CombineArgs,

        /// Output metrics as JSON instead of text lines.
        #[clap(long)]
        json: bool,

        /// Print per-step progress.
        #[clap(long)]
        verbose: bool,
    },
}
