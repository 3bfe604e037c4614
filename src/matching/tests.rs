//! Unit tests for the player matcher

use super::*;
use crate::records::ProjectionRecord;

fn record(plyr: &str, pos: &str, team: &str) -> ProjectionRecord {
    ProjectionRecord::named(plyr).position(pos).on_team(team)
}

fn lenient_matcher() -> PlayerMatcher {
    PlayerMatcher::new(MatcherConfig {
        name_threshold: 0.6,
        overall_threshold: 0.5,
        ..MatcherConfig::default()
    })
    .unwrap()
}

#[test]
fn test_config_default_thresholds() {
    let config = MatcherConfig::default();
    assert_eq!(config.name_threshold, 0.7);
    assert_eq!(config.position_threshold, 0.8);
    assert_eq!(config.team_threshold, 0.5);
    assert_eq!(config.overall_threshold, 0.65);
}

#[test]
fn test_config_rejects_out_of_range_thresholds() {
    let too_high = MatcherConfig {
        name_threshold: 1.1,
        ..MatcherConfig::default()
    };
    assert!(PlayerMatcher::new(too_high).is_err());

    let negative = MatcherConfig {
        overall_threshold: -0.1,
        ..MatcherConfig::default()
    };
    assert!(PlayerMatcher::new(negative).is_err());
}

#[test]
fn test_config_accepts_boundary_thresholds() {
    let zeros = MatcherConfig {
        name_threshold: 0.0,
        position_threshold: 0.0,
        team_threshold: 0.0,
        overall_threshold: 0.0,
    };
    assert!(PlayerMatcher::new(zeros).is_ok());

    let ones = MatcherConfig {
        name_threshold: 1.0,
        position_threshold: 1.0,
        team_threshold: 1.0,
        overall_threshold: 1.0,
    };
    assert!(PlayerMatcher::new(ones).is_ok());
}

#[test]
fn test_similarity_identical_records_all_fields() {
    let matcher = PlayerMatcher::default();
    let p = record("Josh Allen", "QB", "BUF");
    let (overall, fields) = matcher.calculate_player_similarity(&p, &p);

    assert_eq!(overall, 1.0);
    assert_eq!(fields["plyr"], 1.0);
    assert_eq!(fields["pos"], 1.0);
    assert_eq!(fields["team"], 1.0);
}

#[test]
fn test_similarity_only_shared_fields_compared() {
    let matcher = PlayerMatcher::default();
    let p1 = ProjectionRecord::named("Josh Allen").position("QB");
    let p2 = ProjectionRecord::named("Josh Allen").on_team("BUF");

    let (overall, fields) = matcher.calculate_player_similarity(&p1, &p2);

    // Only the name is present in both; pos/team impose nothing
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["plyr"], 1.0);
    assert_eq!(overall, 1.0);
}

#[test]
fn test_similarity_weighted_average_partial_fields() {
    let matcher = PlayerMatcher::default();
    let p1 = record("Josh Allen", "QB", "BUF");
    let p2 = record("Josh Allen", "RB", "BUF");

    let (overall, fields) = matcher.calculate_player_similarity(&p1, &p2);

    // name 1.0 * 0.6 + pos ("qb" vs "rb" shares "b": 0.5) * 0.2 + team 1.0 * 0.2
    assert_eq!(fields["pos"], 0.5);
    assert!((overall - 0.9).abs() < 1e-12, "got {overall}");
}

#[test]
fn test_similarity_no_comparable_fields() {
    let matcher = PlayerMatcher::default();
    let p1 = ProjectionRecord::named("Josh Allen");
    let p2 = ProjectionRecord::default().position("QB");

    let (overall, fields) = matcher.calculate_player_similarity(&p1, &p2);
    assert_eq!(overall, 0.0);
    assert!(fields.is_empty());
}

#[test]
fn test_match_players_exact_pair() {
    let matcher = PlayerMatcher::default();
    let a = vec![record("Josh Allen", "QB", "BUF")];
    let b = vec![record("Josh Allen", "QB", "BUF")];

    let matches = matcher.match_players(&a, &b);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].source1_index, 0);
    assert_eq!(matches[0].source2_index, 0);
    assert_eq!(matches[0].similarity, 1.0);
}

#[test]
fn test_match_players_below_name_threshold() {
    // Dissimilar names stay well under the 0.7 default name threshold
    let matcher = PlayerMatcher::default();
    let a = vec![ProjectionRecord::named("Josh Allen")];
    let b = vec![ProjectionRecord::named("Patrick Mahomes")];

    assert!(matcher.match_players(&a, &b).is_empty());
}

#[test]
fn test_match_players_sorted_descending() {
    let matcher = lenient_matcher();
    let a = vec![
        ProjectionRecord::named("Josh Allen"),
        ProjectionRecord::named("Keenan Allen"),
    ];
    let b = vec![ProjectionRecord::named("Josh Allen")];

    let matches = matcher.match_players(&a, &b);
    assert!(!matches.is_empty());
    for pair in matches.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
    assert_eq!(matches[0].source1_index, 0);
    assert_eq!(matches[0].similarity, 1.0);
}

#[test]
fn test_team_threshold_leniency_cap() {
    // "BUF" vs "Buffalo Bills" scores under 0.5; a strict team threshold is
    // still capped to 0.4 so the abbreviation mismatch cannot veto the match
    let strict = PlayerMatcher::new(MatcherConfig {
        team_threshold: 0.9,
        ..MatcherConfig::default()
    })
    .unwrap();

    let a = vec![record("Josh Allen", "QB", "BUF")];
    let b = vec![record("Josh Allen", "QB", "Buffalo")];

    let (_, fields) = strict.calculate_player_similarity(&a[0], &b[0]);
    let team_sim = fields["team"];
    assert!(team_sim < 0.9, "test needs a sub-threshold team score");
    assert!(team_sim >= 0.4, "team score {team_sim} under the cap");

    let matches = strict.match_players(&a, &b);
    assert_eq!(matches.len(), 1);
}

#[test]
fn test_team_similarity_below_cap_rejects() {
    let matcher = PlayerMatcher::default();
    let a = vec![record("Josh Allen", "QB", "BUF")];
    let b = vec![record("Josh Allen", "QB", "XYZQW")];

    let (_, fields) = matcher.calculate_player_similarity(&a[0], &b[0]);
    assert!(fields["team"] < 0.4);
    assert!(matcher.match_players(&a, &b).is_empty());
}

#[test]
fn test_threshold_monotonicity() {
    let a = vec![
        record("Josh Allen", "QB", "BUF"),
        record("Stefon Diggs", "WR", "HOU"),
        record("Dalton Kincaid", "TE", "BUF"),
    ];
    let b = vec![
        record("J. Allen", "QB", "BUF"),
        record("S. Diggs", "WR", "HOU"),
        record("D. Kincaid", "TE", "BUF"),
    ];

    let mut previous = usize::MAX;
    for threshold in [0.0, 0.3, 0.5, 0.7, 0.9, 1.0] {
        let matcher = PlayerMatcher::new(MatcherConfig {
            name_threshold: threshold,
            overall_threshold: threshold,
            ..MatcherConfig::default()
        })
        .unwrap();
        let count = matcher.match_players(&a, &b).len();
        assert!(
            count <= previous,
            "raising thresholds to {threshold} increased matches: {count} > {previous}"
        );
        previous = count;
    }
}

#[test]
fn test_best_matches_fuzzy_name() {
    // Exact-string joining would miss this pair entirely
    let matcher = lenient_matcher();
    let a = vec![ProjectionRecord::with_projection("Josh Allen", 20.0)];
    let b = vec![ProjectionRecord::with_projection("J. Allen", 30.0)];

    let matches = matcher.get_best_matches(&a, &b, false);
    assert_eq!(matches.len(), 1);
    assert!(matches[0].similarity > 0.6);

    assert_ne!(
        a[0].plyr, b[0].plyr,
        "exact equality must fail for this pair"
    );
}

#[test]
fn test_best_matches_no_duplicate_indices() {
    let matcher = lenient_matcher();
    let a = vec![
        ProjectionRecord::named("Josh Allen"),
        ProjectionRecord::named("Josh Allen Jr"),
        ProjectionRecord::named("Joshua Allen"),
    ];
    let b = vec![
        ProjectionRecord::named("Josh Allen"),
        ProjectionRecord::named("J. Allen"),
    ];

    let matches = matcher.get_best_matches(&a, &b, false);

    let mut seen1 = std::collections::HashSet::new();
    let mut seen2 = std::collections::HashSet::new();
    for m in &matches {
        assert!(seen1.insert(m.source1_index), "repeated source1 index");
        assert!(seen2.insert(m.source2_index), "repeated source2 index");
    }
    assert!(matches.len() <= b.len());
}

#[test]
fn test_best_matches_allow_duplicates() {
    let matcher = lenient_matcher();
    let a = vec![
        ProjectionRecord::named("Josh Allen"),
        ProjectionRecord::named("Joshua Allen"),
    ];
    let b = vec![ProjectionRecord::named("Josh Allen")];

    let matches = matcher.get_best_matches(&a, &b, true);
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|m| m.source2_index == 0));
}

#[test]
fn test_best_matches_greedy_first_come() {
    // Both source-1 records prefer b[0]; the lower source-1 index claims it
    // and the second record falls back to its next-best candidate
    let matcher = lenient_matcher();
    let a = vec![
        ProjectionRecord::named("Josh Allen"),
        ProjectionRecord::named("Josh Allen"),
    ];
    let b = vec![
        ProjectionRecord::named("Josh Allen"),
        ProjectionRecord::named("Joshua Allen"),
    ];

    let matches = matcher.get_best_matches(&a, &b, false);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].source1_index, 0);
    assert_eq!(matches[0].source2_index, 0);
    assert_eq!(matches[1].source1_index, 1);
    assert_eq!(matches[1].source2_index, 1);
}

#[test]
fn test_best_matches_unmatched_record_absent() {
    let matcher = PlayerMatcher::default();
    let a = vec![
        ProjectionRecord::named("Josh Allen"),
        ProjectionRecord::named("Patrick Mahomes"),
    ];
    let b = vec![ProjectionRecord::named("Josh Allen")];

    let matches = matcher.get_best_matches(&a, &b, false);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].source1_index, 0);
}

#[test]
fn test_empty_sources_produce_no_matches() {
    let matcher = PlayerMatcher::default();
    let records = vec![ProjectionRecord::named("Josh Allen")];

    assert!(matcher.match_players(&[], &records).is_empty());
    assert!(matcher.match_players(&records, &[]).is_empty());
    assert!(matcher.get_best_matches(&[], &[], false).is_empty());
}

#[test]
fn test_missing_name_imposes_no_constraint() {
    // A record without plyr is scored over its remaining shared fields;
    // sparse data is never an error
    let matcher = PlayerMatcher::default();
    let a = vec![ProjectionRecord::default().position("QB").on_team("BUF")];
    let b = vec![record("Josh Allen", "QB", "BUF")];

    let (overall, fields) = matcher.calculate_player_similarity(&a[0], &b[0]);
    assert!(!fields.contains_key("plyr"));
    assert_eq!(overall, 1.0); // pos + team both identical
}

#[test]
fn test_merge_prefer_source1() {
    let matcher = lenient_matcher();
    let a = vec![record("Josh Allen", "QB", "BUF").projecting(20.0)];
    let b = vec![ProjectionRecord::with_projection("J. Allen", 30.0)];

    let matches = matcher.get_best_matches(&a, &b, false);
    let merged = matcher.create_merged_data(&matches, MergeStrategy::PreferSource1);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].plyr.as_deref(), Some("Josh Allen"));
    assert_eq!(merged[0].proj, Some(20.0));
    assert_eq!(merged[0].extra["proj_source2"], 30.0);
    assert!(merged[0].extra.contains_key("match_similarity"));
}

#[test]
fn test_merge_prefer_source2() {
    let matcher = lenient_matcher();
    let a = vec![ProjectionRecord::with_projection("Josh Allen", 20.0)];
    let b = vec![ProjectionRecord::with_projection("J. Allen", 30.0)];

    let matches = matcher.get_best_matches(&a, &b, false);
    let merged = matcher.create_merged_data(&matches, MergeStrategy::PreferSource2);

    assert_eq!(merged[0].plyr.as_deref(), Some("J. Allen"));
    assert_eq!(merged[0].proj, Some(30.0));
    assert_eq!(merged[0].extra["proj_source1"], 20.0);
}

#[test]
fn test_merge_combine_unions_fields() {
    let matcher = lenient_matcher();
    let a = vec![ProjectionRecord::with_projection("Josh Allen", 20.0).position("QB")];
    let b = vec![ProjectionRecord::with_projection("J. Allen", 30.0).on_team("BUF")];

    let matches = matcher.get_best_matches(&a, &b, false);
    let merged = matcher.create_merged_data(&matches, MergeStrategy::Combine);

    assert_eq!(merged.len(), 1);
    let row = &merged[0];
    // Identity from source 1, gaps filled from source 2
    assert_eq!(row.plyr.as_deref(), Some("Josh Allen"));
    assert_eq!(row.pos.as_deref(), Some("QB"));
    assert_eq!(row.team.as_deref(), Some("BUF"));
    // proj split per source, no bare proj retained
    assert_eq!(row.proj, None);
    assert_eq!(row.extra["proj_source1"], 20.0);
    assert_eq!(row.extra["proj_source2"], 30.0);
}

#[test]
fn test_merge_strategy_parse_roundtrip() {
    for strategy in [
        MergeStrategy::PreferSource1,
        MergeStrategy::PreferSource2,
        MergeStrategy::Combine,
    ] {
        let parsed: MergeStrategy = strategy.to_string().parse().unwrap();
        assert_eq!(parsed, strategy);
    }

    assert!("prefer_source3".parse::<MergeStrategy>().is_err());
}

#[test]
fn test_similarity_rounded_three_decimals() {
    let matcher = lenient_matcher();
    let a = vec![ProjectionRecord::named("Josh Allen")];
    let b = vec![ProjectionRecord::named("J. Allen")];

    let matches = matcher.match_players(&a, &b);
    assert_eq!(matches.len(), 1);
    let sim = matches[0].similarity;
    assert_eq!((sim * 1000.0).round() / 1000.0, sim);
}
