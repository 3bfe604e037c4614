//! Multi-source merging: one wide row per player, one projection column per
//! source.

use crate::matching::PlayerMatcher;
use crate::records::{MergedRow, ProjectionRecord};
use std::collections::{HashMap, HashSet};

/// Full outer join across all sources keyed on the literal `plyr` string.
///
/// A row exists for every distinct literal name seen in any source; no
/// normalization is applied, so spelling variants land in separate rows.
/// Only the name survives into the anchor (exact mode drops position/team
/// columns). Records without a name never join and each keeps its own row.
pub fn merge_exact(sources: &[Vec<ProjectionRecord>]) -> Vec<MergedRow> {
    let source_count = sources.len();
    let mut rows: Vec<MergedRow> = Vec::new();
    let mut row_by_name: HashMap<String, usize> = HashMap::new();

    for (i, source) in sources.iter().enumerate() {
        for record in source {
            match &record.plyr {
                Some(name) => {
                    if let Some(&idx) = row_by_name.get(name) {
                        rows[idx].projections[i] = record.proj;
                    } else {
                        row_by_name.insert(name.clone(), rows.len());
                        rows.push(MergedRow::from_anchor(
                            ProjectionRecord {
                                plyr: Some(name.clone()),
                                proj: record.proj,
                                ..ProjectionRecord::default()
                            },
                            i,
                            source_count,
                        ));
                    }
                }
                None => {
                    rows.push(MergedRow::from_anchor(
                        ProjectionRecord {
                            proj: record.proj,
                            ..ProjectionRecord::default()
                        },
                        i,
                        source_count,
                    ));
                }
            }
        }
    }

    rows
}

/// Merge sources via fuzzy player matching, anchored on source 0.
///
/// Source 0 seeds the accumulator and keeps all of its fields. Each later
/// source `i` is matched against the accumulator with
/// `get_best_matches(allow_duplicates = false)`; matched rows gain `proj_i`
/// and record the match similarity, unmatched rows get a missing `proj_i`.
/// A player first appearing in source `i >= 1` never gains a row of their
/// own: fuzzy mode only grows columns on the accumulator, unlike exact
/// mode's full outer join. After each step, matched rows move ahead of
/// unmatched ones, mirroring how later merge steps see the table.
pub fn merge_fuzzy(sources: &[Vec<ProjectionRecord>], matcher: &PlayerMatcher) -> Vec<MergedRow> {
    let source_count = sources.len();
    if source_count == 0 {
        return Vec::new();
    }
    if source_count == 1 {
        // Nothing to match against; same trimmed shape as the exact path
        return merge_exact(sources);
    }

    let mut rows: Vec<MergedRow> = sources[0]
        .iter()
        .map(|record| MergedRow::from_anchor(record.clone(), 0, source_count))
        .collect();

    for (i, source) in sources.iter().enumerate().skip(1) {
        let accumulator: Vec<ProjectionRecord> =
            rows.iter().map(|row| row.anchor.clone()).collect();
        let matches = matcher.get_best_matches(&accumulator, source, false);

        let mut next_rows: Vec<MergedRow> = Vec::with_capacity(rows.len());
        let mut matched_rows: HashSet<usize> = HashSet::new();

        for m in &matches {
            let mut row = rows[m.source1_index].clone();
            row.projections[i] = m.source2_player.proj;
            row.match_similarity = Some(m.similarity);
            next_rows.push(row);
            matched_rows.insert(m.source1_index);
        }

        for (idx, row) in rows.iter().enumerate() {
            if !matched_rows.contains(&idx) {
                next_rows.push(row.clone());
            }
        }

        rows = next_rows;
    }

    rows
}
