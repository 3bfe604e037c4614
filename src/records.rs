//! Record types shared by the matching and combination layers.
//!
//! A [`ProjectionRecord`] is one player's projection from one source. Sources
//! disagree on name spellings, team abbreviations, and column layouts, so all
//! identifying fields are optional and any columns this crate does not
//! understand are carried through untouched in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One player's projection as reported by a single source.
///
/// Only the fields named here are read by the matching and combination
/// engines; everything else a source provides round-trips through `extra`.
///
/// # Examples
///
/// ```rust
/// use nflproj::ProjectionRecord;
///
/// let record: ProjectionRecord =
///     serde_json::from_str(r#"{"plyr": "Josh Allen", "pos": "QB", "proj": 24.5}"#).unwrap();
/// assert_eq!(record.plyr.as_deref(), Some("Josh Allen"));
/// assert_eq!(record.proj, Some(24.5));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectionRecord {
    /// Player display name as given by the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plyr: Option<String>,

    /// Position code (e.g. "QB", "RB").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,

    /// Team name or abbreviation in the source's own format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    /// Projected fantasy points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proj: Option<f64>,

    /// Season year; carried through, never used for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u16>,

    /// Week number; carried through, never used for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<u16>,

    /// Source columns this crate does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProjectionRecord {
    /// Create a record with just a player name.
    pub fn named(plyr: impl Into<String>) -> Self {
        Self {
            plyr: Some(plyr.into()),
            ..Self::default()
        }
    }

    /// Create a record with a player name and a projection value.
    pub fn with_projection(plyr: impl Into<String>, proj: f64) -> Self {
        Self {
            plyr: Some(plyr.into()),
            proj: Some(proj),
            ..Self::default()
        }
    }

    /// Builder-style position setter.
    pub fn position(mut self, pos: impl Into<String>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Builder-style team setter.
    pub fn on_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Builder-style projection setter.
    pub fn projecting(mut self, proj: f64) -> Self {
        self.proj = Some(proj);
        self
    }
}

/// A realized outcome for one player, used by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualResult {
    pub plyr: String,
    pub actual: f64,
}

/// One player's consolidated record across all merged sources.
///
/// `anchor` holds the identifying fields (and any extra columns) contributed
/// by whichever source anchored the row; its `proj` field is always cleared
/// because per-source projections live in `projections`, indexed by source
/// position. A `None` entry means that source had no match for this player.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub anchor: ProjectionRecord,
    pub projections: Vec<Option<f64>>,
    /// Similarity of the most recent fuzzy match that touched this row.
    pub match_similarity: Option<f64>,
}

impl MergedRow {
    /// Build a row anchored on `record`, with `record.proj` moved into the
    /// projection slot for `source_index` out of `source_count` sources.
    pub(crate) fn from_anchor(
        mut record: ProjectionRecord,
        source_index: usize,
        source_count: usize,
    ) -> Self {
        let proj = record.proj.take();
        let mut projections = vec![None; source_count];
        if source_index < source_count {
            projections[source_index] = proj;
        }
        Self {
            anchor: record,
            projections,
            match_similarity: None,
        }
    }

    /// Projection values actually present in this row.
    pub fn present_projections(&self) -> Vec<f64> {
        self.projections.iter().filter_map(|p| *p).collect()
    }

    /// JSON object with the wide-table column naming (`proj_0..proj_{N-1}`).
    /// Missing projections serialize as `null` so every row carries the same
    /// columns.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        if let Some(plyr) = &self.anchor.plyr {
            obj.insert("plyr".into(), Value::from(plyr.clone()));
        }
        if let Some(pos) = &self.anchor.pos {
            obj.insert("pos".into(), Value::from(pos.clone()));
        }
        if let Some(team) = &self.anchor.team {
            obj.insert("team".into(), Value::from(team.clone()));
        }
        if let Some(season) = self.anchor.season {
            obj.insert("season".into(), Value::from(season));
        }
        if let Some(week) = self.anchor.week {
            obj.insert("week".into(), Value::from(week));
        }
        for (key, value) in &self.anchor.extra {
            obj.insert(key.clone(), value.clone());
        }
        for (i, proj) in self.projections.iter().enumerate() {
            obj.insert(format!("proj_{i}"), json_f64(*proj));
        }
        if let Some(sim) = self.match_similarity {
            obj.insert("match_similarity".into(), Value::from(sim));
        }
        Value::Object(obj)
    }
}

/// A merged row plus the consensus columns computed by the combination
/// engine. `proj_std`, `proj_lower` and `proj_upper` are populated only by
/// the confidence-bands method.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRow {
    pub row: MergedRow,
    pub combined_proj: Option<f64>,
    pub source_count: usize,
    pub proj_std: Option<f64>,
    pub proj_lower: Option<f64>,
    pub proj_upper: Option<f64>,
}

impl CombinedRow {
    /// JSON object for output: the merged row's columns plus `combined_proj`
    /// and `source_count`, and the band columns when present.
    pub fn to_json(&self) -> Value {
        let mut value = self.row.to_json();
        let obj = value.as_object_mut().expect("row serializes as an object");
        obj.insert("combined_proj".into(), json_f64(self.combined_proj));
        obj.insert("source_count".into(), Value::from(self.source_count));
        if let Some(std) = self.proj_std {
            obj.insert("proj_std".into(), Value::from(std));
        }
        if let Some(lower) = self.proj_lower {
            obj.insert("proj_lower".into(), Value::from(lower));
        }
        if let Some(upper) = self.proj_upper {
            obj.insert("proj_upper".into(), Value::from(upper));
        }
        value
    }
}

fn json_f64(v: Option<f64>) -> Value {
    match v {
        Some(v) => Value::from(v),
        None => Value::Null,
    }
}
