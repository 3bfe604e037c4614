//! Accuracy evaluation: consensus projections vs realized outcomes.

use crate::records::{ActualResult, CombinedRow};
use serde::Serialize;
use std::collections::HashMap;

/// Guard for near-zero denominators in the correlation computation.
const VARIANCE_EPSILON: f64 = 1e-12;

/// Error metrics for a set of combined projections.
///
/// All metrics are 0.0 (with `sample_size == 0`) when nothing joins.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EvaluationMetrics {
    pub mean_absolute_error: f64,
    pub root_mean_square_error: f64,
    /// MAPE in percent. Rows with a zero actual are excluded from this term
    /// (the ratio is undefined there, not infinite).
    pub mean_absolute_percentage_error: f64,
    /// Pearson's r; 0.0 when fewer than 2 joined rows or zero variance.
    pub correlation: f64,
    pub sample_size: usize,
}

/// Compare combined projections against realized outcomes.
///
/// Joins on the exact `plyr` string — no fuzzy matching here, callers are
/// expected to evaluate against actuals keyed the same way as the merge
/// anchor. Combined rows without a consensus value or a name are left out of
/// the join.
pub fn evaluate_combination(
    actual_results: &[ActualResult],
    combined_projections: &[CombinedRow],
) -> EvaluationMetrics {
    let mut projected_by_name: HashMap<&str, f64> = HashMap::new();
    for row in combined_projections {
        if let (Some(name), Some(proj)) = (&row.row.anchor.plyr, row.combined_proj) {
            projected_by_name.entry(name.as_str()).or_insert(proj);
        }
    }

    let joined: Vec<(f64, f64)> = actual_results
        .iter()
        .filter_map(|a| {
            projected_by_name
                .get(a.plyr.as_str())
                .map(|&p| (a.actual, p))
        })
        .collect();

    if joined.is_empty() {
        return EvaluationMetrics::default();
    }

    let n = joined.len() as f64;

    let mae = joined.iter().map(|(a, p)| (a - p).abs()).sum::<f64>() / n;
    let rmse = (joined.iter().map(|(a, p)| (a - p).powi(2)).sum::<f64>() / n).sqrt();

    let mape_terms: Vec<f64> = joined
        .iter()
        .filter(|(a, _)| *a != 0.0)
        .map(|(a, p)| ((a - p) / a).abs())
        .collect();
    let mape = if mape_terms.is_empty() {
        0.0
    } else {
        mape_terms.iter().sum::<f64>() / mape_terms.len() as f64 * 100.0
    };

    EvaluationMetrics {
        mean_absolute_error: mae,
        root_mean_square_error: rmse,
        mean_absolute_percentage_error: mape,
        correlation: pearson(&joined),
        sample_size: joined.len(),
    }
}

fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_p = pairs.iter().map(|(_, p)| p).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_p = 0.0;
    for (a, p) in pairs {
        cov += (a - mean_a) * (p - mean_p);
        var_a += (a - mean_a).powi(2);
        var_p += (p - mean_p).powi(2);
    }

    let denom = (var_a * var_p).sqrt();
    if denom < VARIANCE_EPSILON {
        return 0.0;
    }
    cov / denom
}
