//! Textual similarity scoring for player matching.
//!
//! Implements the Ratcliff/Obershelp ratio: recursively find the longest
//! common block of the two character sequences, then score `2 * M / T` where
//! `M` is the total length of all matched blocks and `T` is the combined
//! length of both strings. Identical strings score 1.0, disjoint strings
//! score near 0.0.

use std::collections::HashMap;

/// Calculate a normalized [0, 1] similarity between two strings.
///
/// Comparison is case-insensitive and ignores surrounding whitespace.
/// Returns 0.0 if either input is empty.
///
/// # Examples
///
/// ```rust
/// use nflproj::matching::similarity;
///
/// assert_eq!(similarity("Josh Allen", "josh allen"), 1.0);
/// assert_eq!(similarity("", "Josh Allen"), 0.0);
/// assert!(similarity("Josh Allen", "J. Allen") > 0.6);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a: Vec<char> = a.trim().to_lowercase().chars().collect();
    let b: Vec<char> = b.trim().to_lowercase().chars().collect();

    ratio(&a, &b)
}

/// `2 * M / T` over full character sequences. A zero combined length scores
/// 1.0 (two whitespace-only inputs normalize to equal empty sequences).
fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matched_len(a, b, 0, a.len(), 0, b.len());
    2.0 * matched as f64 / total as f64
}

/// Total length of non-overlapping common blocks within
/// `a[alo..ahi]` / `b[blo..bhi]`, found recursively around the longest one.
fn matched_len(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
    let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
    if k == 0 {
        return 0;
    }
    k + matched_len(a, b, alo, i, blo, j) + matched_len(a, b, i + k, ahi, j + k, bhi)
}

/// Longest matching block in `a[alo..ahi]` x `b[blo..bhi]`, returned as
/// `(start_a, start_b, length)`. Ties resolve to the earliest start in `a`,
/// then the earliest start in `b`, keeping results deterministic.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0usize);
    // j2len[j] = length of the longest run ending at a[i], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();
        for j in blo..bhi {
            if a[i] == b[j] {
                let run = if j > blo {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                new_j2len.insert(j, run);
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        j2len = new_j2len;
    }

    best
}
