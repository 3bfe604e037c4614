//! Consensus projection computation over the merged wide table.

use super::{merger, stats};
use crate::error::{ProjError, Result};
use crate::matching::{MatcherConfig, PlayerMatcher};
use crate::records::{CombinedRow, MergedRow, ProjectionRecord};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Available rules for combining per-source projections into one consensus
/// value per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombinationMethod {
    /// Arithmetic mean of present values.
    #[default]
    Average,
    /// Weighted mean using per-source weights (missing weight defaults to 1.0).
    WeightedAverage,
    /// Median of present values.
    Median,
    /// Mean after dropping the single highest and lowest value; falls back to
    /// a plain mean when two or fewer values are present.
    DropHighLow,
    /// Mean plus a two-sided Student-t confidence interval.
    ConfidenceBands,
}

impl fmt::Display for CombinationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombinationMethod::Average => write!(f, "average"),
            CombinationMethod::WeightedAverage => write!(f, "weighted_average"),
            CombinationMethod::Median => write!(f, "median"),
            CombinationMethod::DropHighLow => write!(f, "drop_high_low"),
            CombinationMethod::ConfidenceBands => write!(f, "confidence_bands"),
        }
    }
}

impl FromStr for CombinationMethod {
    type Err = ProjError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "average" => Ok(CombinationMethod::Average),
            "weighted_average" => Ok(CombinationMethod::WeightedAverage),
            "median" => Ok(CombinationMethod::Median),
            "drop_high_low" => Ok(CombinationMethod::DropHighLow),
            "confidence_bands" => Ok(CombinationMethod::ConfidenceBands),
            other => Err(ProjError::InvalidMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// Per-call knobs for [`ProjectionCombiner::combine_projections`].
#[derive(Debug, Clone, Default)]
pub struct CombineOptions {
    /// Override the combiner's default method for this call.
    pub method: Option<CombinationMethod>,
    /// Weights for [`CombinationMethod::WeightedAverage`], keyed `source_0`,
    /// `source_1`, ... A missing key means weight 1.0; no map at all reduces
    /// the weighted average to a plain average.
    pub weights: Option<BTreeMap<String, f64>>,
    /// Confidence level for [`CombinationMethod::ConfidenceBands`].
    pub confidence_level: Option<f64>,
}

/// Default confidence level for the confidence-bands method.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Combines projections from multiple sources into a consensus estimate.
///
/// Sources are merged into a wide table first — exactly on the literal
/// player name, or fuzzily via a [`PlayerMatcher`] when one is configured —
/// then the selected [`CombinationMethod`] runs per row over whichever
/// per-source values are present. Every method is total: rows with no
/// present values yield a missing consensus, never an error.
///
/// # Examples
///
/// ```rust
/// use nflproj::combine::{CombinationMethod, CombineOptions, ProjectionCombiner};
/// use nflproj::ProjectionRecord;
///
/// let combiner = ProjectionCombiner::new(CombinationMethod::Average);
/// let sources = vec![
///     vec![ProjectionRecord::with_projection("Josh Allen", 20.0)],
///     vec![ProjectionRecord::with_projection("Josh Allen", 30.0)],
/// ];
/// let rows = combiner
///     .combine_projections(&sources, &CombineOptions::default())
///     .unwrap();
/// assert_eq!(rows[0].combined_proj, Some(25.0));
/// assert_eq!(rows[0].source_count, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectionCombiner {
    method: CombinationMethod,
    matcher: Option<PlayerMatcher>,
}

impl ProjectionCombiner {
    /// Combiner using exact name merging.
    pub fn new(method: CombinationMethod) -> Self {
        Self {
            method,
            matcher: None,
        }
    }

    /// Combiner that merges sources through fuzzy player matching.
    /// Threshold validation happens here, failing fast on a bad config.
    pub fn with_fuzzy_matching(method: CombinationMethod, config: MatcherConfig) -> Result<Self> {
        Ok(Self {
            method,
            matcher: Some(PlayerMatcher::new(config)?),
        })
    }

    /// Merge all sources and compute the consensus column(s).
    ///
    /// Zero sources produce an empty table. Fuzzy matching engages only when
    /// a matcher is configured and there are at least two sources.
    pub fn combine_projections(
        &self,
        sources: &[Vec<ProjectionRecord>],
        options: &CombineOptions,
    ) -> Result<Vec<CombinedRow>> {
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        let confidence_level = options.confidence_level.unwrap_or(DEFAULT_CONFIDENCE_LEVEL);
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ProjError::InvalidConfidenceLevel {
                value: confidence_level,
            });
        }

        let merged = match &self.matcher {
            Some(matcher) if sources.len() > 1 => merger::merge_fuzzy(sources, matcher),
            _ => merger::merge_exact(sources),
        };

        let method = options.method.unwrap_or(self.method);
        Ok(merged
            .into_iter()
            .map(|row| combine_row(row, method, options, confidence_level))
            .collect())
    }
}

fn combine_row(
    row: MergedRow,
    method: CombinationMethod,
    options: &CombineOptions,
    confidence_level: f64,
) -> CombinedRow {
    let values = row.present_projections();
    let source_count = values.len();

    let mut combined = CombinedRow {
        combined_proj: None,
        source_count,
        proj_std: None,
        proj_lower: None,
        proj_upper: None,
        row,
    };

    match method {
        CombinationMethod::Average => {
            combined.combined_proj = stats::mean(&values);
        }
        CombinationMethod::WeightedAverage => match &options.weights {
            None => {
                // Equal weights if none provided
                combined.combined_proj = stats::mean(&values);
            }
            Some(weights) => {
                let mut weighted_sum = 0.0;
                let mut weight_sum = 0.0;
                for (i, value) in combined.row.projections.iter().enumerate() {
                    if let Some(value) = value {
                        let weight = weights.get(&format!("source_{i}")).copied().unwrap_or(1.0);
                        weighted_sum += value * weight;
                        weight_sum += weight;
                    }
                }
                // All-zero weights leave the consensus undefined, not infinite
                combined.combined_proj = if weight_sum != 0.0 {
                    Some(weighted_sum / weight_sum)
                } else {
                    None
                };
            }
        },
        CombinationMethod::Median => {
            combined.combined_proj = stats::median(&values);
        }
        CombinationMethod::DropHighLow => {
            combined.combined_proj = if source_count <= 2 {
                // Cannot trim with 2 or fewer values
                stats::mean(&values)
            } else {
                let mut sorted = values.clone();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                stats::mean(&sorted[1..sorted.len() - 1])
            };
        }
        CombinationMethod::ConfidenceBands => {
            combined.combined_proj = stats::mean(&values);
            combined.proj_std = stats::sample_std(&values);

            if source_count <= 1 {
                // Zero-width band at the mean
                combined.proj_lower = combined.combined_proj;
                combined.proj_upper = combined.combined_proj;
            } else if let (Some(mean), Some(std)) = (combined.combined_proj, combined.proj_std) {
                let alpha = 1.0 - confidence_level;
                let t_value = stats::t_ppf(1.0 - alpha / 2.0, source_count - 1);
                let margin = t_value * std / (source_count as f64).sqrt();
                combined.proj_lower = Some(mean - margin);
                combined.proj_upper = Some(mean + margin);
            }
        }
    }

    combined
}
