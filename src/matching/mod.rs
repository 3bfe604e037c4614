//! Player matching: fuzzy identification of the same real-world player
//! across independently-formatted projection sources.

pub mod matcher;
pub mod similarity;

pub use matcher::{MatchResult, MatcherConfig, MergeStrategy, PlayerMatcher};
pub use similarity::similarity;

#[cfg(test)]
mod tests;
