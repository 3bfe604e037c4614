//! NFL Projection Aggregation Library
//!
//! A Rust library for aggregating American-football fantasy-point
//! projections from multiple sources, matching players across differently
//! formatted tables, and combining their projections into a single
//! consensus estimate.
//!
//! ## Features
//!
//! - **Fuzzy Player Matching**: Identify the same player across sources
//!   despite name/team spelling differences, with configurable thresholds
//! - **Multi-Source Merging**: Exact or fuzzy full-table merges into one
//!   wide table with a projection column per source
//! - **Combination Methods**: Average, weighted average, median,
//!   drop-high-low, and Student-t confidence bands
//! - **Evaluation**: MAE/RMSE/MAPE/correlation against realized results
//!
//! ## Quick Start
//!
//! ```rust
//! use nflproj::{
//!     combine::{CombinationMethod, CombineOptions, ProjectionCombiner},
//!     matching::MatcherConfig,
//!     ProjectionRecord, Result,
//! };
//!
//! # fn example() -> Result<()> {
//! // Two sources spelling the same player differently
//! let sources = vec![
//!     vec![ProjectionRecord::with_projection("Josh Allen", 20.0)],
//!     vec![ProjectionRecord::with_projection("J. Allen", 30.0)],
//! ];
//!
//! let combiner = ProjectionCombiner::with_fuzzy_matching(
//!     CombinationMethod::Average,
//!     MatcherConfig {
//!         name_threshold: 0.6,
//!         overall_threshold: 0.5,
//!         ..MatcherConfig::default()
//!     },
//! )?;
//!
//! let rows = combiner.combine_projections(&sources, &CombineOptions::default())?;
//! assert_eq!(rows[0].combined_proj, Some(25.0));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! Upstream fetching/scraping of the per-source tables is out of scope:
//! callers hand this crate already-parsed flat records (any JSON object
//! with a `plyr` field qualifies; unknown fields pass through untouched).

pub mod cli;
pub mod combine;
pub mod commands;
pub mod error;
pub mod evaluate;
pub mod matching;
pub mod records;

// Re-export commonly used types
pub use combine::{CombinationMethod, CombineOptions, ProjectionCombiner};
pub use error::{ProjError, Result};
pub use evaluate::{evaluate_combination, EvaluationMetrics};
pub use matching::{MatchResult, MatcherConfig, MergeStrategy, PlayerMatcher};
pub use records::{ActualResult, CombinedRow, MergedRow, ProjectionRecord};
