//! Projection combination: merge per-source tables into one wide table and
//! compute a consensus value per player under a selectable statistical rule.

pub mod combiner;
pub mod merger;
pub mod stats;

pub use combiner::{
    CombinationMethod, CombineOptions, ProjectionCombiner, DEFAULT_CONFIDENCE_LEVEL,
};
pub use merger::{merge_exact, merge_fuzzy};
