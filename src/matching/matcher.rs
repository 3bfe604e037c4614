//! Fuzzy player matching across projection sources.
//!
//! Sources spell the same player differently ("Josh Allen" vs "J. Allen"),
//! so records are paired by weighted textual similarity over the name,
//! position, and team fields rather than exact string equality.

use super::similarity::similarity;
use crate::error::{ProjError, Result};
use crate::records::ProjectionRecord;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Weight of the name field in the overall score.
const NAME_WEIGHT: f64 = 0.6;
/// Weight of the position field in the overall score.
const POSITION_WEIGHT: f64 = 0.2;
/// Weight of the team field in the overall score.
const TEAM_WEIGHT: f64 = 0.2;

/// Cap applied to the effective team threshold. Team naming conventions vary
/// far more across sources than player names do ("BUF" vs "Buffalo Bills"),
/// so the matcher never requires team similarity above this value even when
/// [`MatcherConfig::team_threshold`] is configured stricter.
const TEAM_LENIENCY_CAP: f64 = 0.4;

/// Similarity thresholds for [`PlayerMatcher`], each in [0, 1].
///
/// Per-field thresholds only constrain a pair when both records carry the
/// field. Note the team leniency: the effective team gate is
/// `min(team_threshold, 0.4)`, so a stricter configured team threshold is
/// deliberately not honored (see [`TEAM_LENIENCY_CAP`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Minimum acceptable name similarity.
    pub name_threshold: f64,
    /// Minimum acceptable position similarity.
    pub position_threshold: f64,
    /// Minimum acceptable team similarity, capped at 0.4 when applied.
    pub team_threshold: f64,
    /// Minimum acceptable weighted overall score.
    pub overall_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            name_threshold: 0.7,
            position_threshold: 0.8,
            team_threshold: 0.5,
            overall_threshold: 0.65,
        }
    }
}

impl MatcherConfig {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("name_threshold", self.name_threshold),
            ("position_threshold", self.position_threshold),
            ("team_threshold", self.team_threshold),
            ("overall_threshold", self.overall_threshold),
        ];
        for (name, value) in fields {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(ProjError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

/// One candidate pairing between a source-1 record and a source-2 record.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub source1_index: usize,
    pub source2_index: usize,
    pub source1_player: ProjectionRecord,
    pub source2_player: ProjectionRecord,
    /// Overall weighted similarity, rounded to 3 decimals.
    pub similarity: f64,
    /// Per-field similarity breakdown, keyed by field name.
    pub match_fields: BTreeMap<String, f64>,
}

/// How [`PlayerMatcher::create_merged_data`] resolves conflicting fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Keep the source-1 record, add source-2's projection as `proj_source2`.
    #[default]
    PreferSource1,
    /// Keep the source-2 record, add source-1's projection as `proj_source1`.
    PreferSource2,
    /// Union all fields, splitting `proj` into `proj_source1`/`proj_source2`.
    Combine,
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStrategy::PreferSource1 => write!(f, "prefer_source1"),
            MergeStrategy::PreferSource2 => write!(f, "prefer_source2"),
            MergeStrategy::Combine => write!(f, "combine"),
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = ProjError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prefer_source1" => Ok(MergeStrategy::PreferSource1),
            "prefer_source2" => Ok(MergeStrategy::PreferSource2),
            "combine" => Ok(MergeStrategy::Combine),
            other => Err(ProjError::InvalidStrategy {
                strategy: other.to_string(),
            }),
        }
    }
}

/// Matches players across two projection sources using fuzzy string matching.
///
/// # Examples
///
/// ```rust
/// use nflproj::matching::{MatcherConfig, PlayerMatcher};
/// use nflproj::ProjectionRecord;
///
/// let matcher = PlayerMatcher::new(MatcherConfig {
///     name_threshold: 0.6,
///     overall_threshold: 0.5,
///     ..MatcherConfig::default()
/// })
/// .unwrap();
///
/// let a = vec![ProjectionRecord::with_projection("Josh Allen", 20.0)];
/// let b = vec![ProjectionRecord::with_projection("J. Allen", 30.0)];
/// let matches = matcher.get_best_matches(&a, &b, false);
/// assert_eq!(matches.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlayerMatcher {
    config: MatcherConfig,
}

impl PlayerMatcher {
    /// Create a matcher, validating every threshold is within [0, 1].
    pub fn new(config: MatcherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Weighted overall similarity between two records plus the per-field
    /// breakdown. Only fields present in BOTH records participate; the
    /// denominator is the sum of participating weights, so missing fields
    /// drop out of the ratio entirely. No comparable fields scores 0.0.
    pub fn calculate_player_similarity(
        &self,
        player1: &ProjectionRecord,
        player2: &ProjectionRecord,
    ) -> (f64, BTreeMap<String, f64>) {
        let mut field_similarities = BTreeMap::new();
        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;

        if let (Some(n1), Some(n2)) = (&player1.plyr, &player2.plyr) {
            let name_sim = similarity(n1, n2);
            field_similarities.insert("plyr".to_string(), name_sim);
            weighted_sum += name_sim * NAME_WEIGHT;
            weight_sum += NAME_WEIGHT;
        }

        if let (Some(p1), Some(p2)) = (&player1.pos, &player2.pos) {
            let pos_sim = similarity(p1, p2);
            field_similarities.insert("pos".to_string(), pos_sim);
            weighted_sum += pos_sim * POSITION_WEIGHT;
            weight_sum += POSITION_WEIGHT;
        }

        if let (Some(t1), Some(t2)) = (&player1.team, &player2.team) {
            let team_sim = similarity(t1, t2);
            field_similarities.insert("team".to_string(), team_sim);
            weighted_sum += team_sim * TEAM_WEIGHT;
            weight_sum += TEAM_WEIGHT;
        }

        let overall = if weight_sum > 0.0 {
            weighted_sum / weight_sum
        } else {
            0.0
        };

        (overall, field_similarities)
    }

    /// Score the full source-1 x source-2 cross product and return every
    /// pair clearing all thresholds, sorted by descending similarity.
    ///
    /// Scoring each pair is pure, so the cross product runs on rayon; the
    /// output order stays deterministic (ties keep ascending index order).
    pub fn match_players(
        &self,
        source1: &[ProjectionRecord],
        source2: &[ProjectionRecord],
    ) -> Vec<MatchResult> {
        let mut matches: Vec<MatchResult> = source1
            .par_iter()
            .enumerate()
            .map(|(i, player1)| {
                let mut row = Vec::new();
                for (j, player2) in source2.iter().enumerate() {
                    let (overall, field_similarities) =
                        self.calculate_player_similarity(player1, player2);

                    if !self.meets_thresholds(overall, &field_similarities) {
                        continue;
                    }

                    row.push(MatchResult {
                        source1_index: i,
                        source2_index: j,
                        source1_player: player1.clone(),
                        source2_player: player2.clone(),
                        similarity: round3(overall),
                        match_fields: field_similarities,
                    });
                }
                row
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        // Stable sort: equal scores keep (source1, source2) index order
        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        matches
    }

    fn meets_thresholds(&self, overall: f64, fields: &BTreeMap<String, f64>) -> bool {
        if let Some(&name_sim) = fields.get("plyr") {
            if name_sim < self.config.name_threshold {
                return false;
            }
        }
        if let Some(&pos_sim) = fields.get("pos") {
            if pos_sim < self.config.position_threshold {
                return false;
            }
        }
        // Lenient team gate: abbreviations vary too widely for the
        // configured threshold to apply at full strength
        if let Some(&team_sim) = fields.get("team") {
            if team_sim < self.config.team_threshold.min(TEAM_LENIENCY_CAP) {
                return false;
            }
        }
        overall >= self.config.overall_threshold
    }

    /// Best match per source-1 record, assigned greedily in ascending
    /// source-1 index order.
    ///
    /// With `allow_duplicates == false`, a source-2 record is consumed by the
    /// first source-1 record that claims it and is unavailable afterwards.
    /// This is first-come assignment, not a globally optimal bipartite
    /// matching; callers depend on the greedy order being reproducible.
    /// A source-1 record with no candidate above threshold simply yields no
    /// entry.
    pub fn get_best_matches(
        &self,
        source1: &[ProjectionRecord],
        source2: &[ProjectionRecord],
        allow_duplicates: bool,
    ) -> Vec<MatchResult> {
        let all_matches = self.match_players(source1, source2);
        if all_matches.is_empty() {
            return Vec::new();
        }

        // Candidates per source-1 index, each list descending by similarity
        let mut by_source1: BTreeMap<usize, Vec<MatchResult>> = BTreeMap::new();
        for m in all_matches {
            by_source1.entry(m.source1_index).or_default().push(m);
        }

        let mut best_matches = Vec::new();
        let mut used_source2: HashSet<usize> = HashSet::new();

        for (_, candidates) in by_source1 {
            let pick = candidates
                .into_iter()
                .find(|m| allow_duplicates || !used_source2.contains(&m.source2_index));
            if let Some(m) = pick {
                if !allow_duplicates {
                    used_source2.insert(m.source2_index);
                }
                best_matches.push(m);
            }
        }

        best_matches
    }

    /// Build merged records from match results under `strategy` (see
    /// [`MergeStrategy`]). Every merged record gains a `match_similarity`
    /// column; projections from the non-preferred source land in
    /// `proj_source1`/`proj_source2`.
    pub fn create_merged_data(
        &self,
        matches: &[MatchResult],
        strategy: MergeStrategy,
    ) -> Vec<ProjectionRecord> {
        matches
            .iter()
            .map(|m| match strategy {
                MergeStrategy::PreferSource1 => {
                    let mut merged = m.source1_player.clone();
                    if let Some(proj2) = m.source2_player.proj {
                        merged
                            .extra
                            .insert("proj_source2".to_string(), proj2.into());
                    }
                    merged
                        .extra
                        .insert("match_similarity".to_string(), m.similarity.into());
                    merged
                }
                MergeStrategy::PreferSource2 => {
                    let mut merged = m.source2_player.clone();
                    if let Some(proj1) = m.source1_player.proj {
                        merged
                            .extra
                            .insert("proj_source1".to_string(), proj1.into());
                    }
                    merged
                        .extra
                        .insert("match_similarity".to_string(), m.similarity.into());
                    merged
                }
                MergeStrategy::Combine => {
                    let mut merged = m.source1_player.clone();
                    if let Some(proj1) = merged.proj.take() {
                        merged
                            .extra
                            .insert("proj_source1".to_string(), proj1.into());
                    }
                    if let Some(proj2) = m.source2_player.proj {
                        merged
                            .extra
                            .insert("proj_source2".to_string(), proj2.into());
                    }
                    // Source-2 fills gaps but never overwrites source-1
                    let s2 = &m.source2_player;
                    if merged.plyr.is_none() {
                        merged.plyr = s2.plyr.clone();
                    }
                    if merged.pos.is_none() {
                        merged.pos = s2.pos.clone();
                    }
                    if merged.team.is_none() {
                        merged.team = s2.team.clone();
                    }
                    if merged.season.is_none() {
                        merged.season = s2.season;
                    }
                    if merged.week.is_none() {
                        merged.week = s2.week;
                    }
                    for (key, value) in &s2.extra {
                        merged
                            .extra
                            .entry(key.clone())
                            .or_insert_with(|| value.clone());
                    }
                    merged
                        .extra
                        .insert("match_similarity".to_string(), m.similarity.into());
                    merged
                }
            })
            .collect()
    }
}

/// Round to 3 decimals, the precision stored on [`MatchResult::similarity`].
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
