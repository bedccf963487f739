// src/group.rs
//! Grouping and deduplication of extracted matches.
//!
//! The same clone family surfaces more than once: once per threshold in a
//! sweep, and once per suffix-tree node that happens to cover it. All of
//! that redundancy collapses here, keyed by the canonical hash.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::extract::{Fragment, Match};

/// A reported clone group: two or more fragments sharing one canonical
/// hash.
#[derive(Debug, Clone, Serialize)]
pub struct CloneGroup {
    pub hash: String,
    pub fragments: Vec<Fragment>,
}

impl CloneGroup {
    /// Total byte size of the duplicated text across all fragments.
    #[must_use]
    pub fn duplicated_bytes(&self) -> usize {
        self.fragments.iter().map(|f| f.end - f.start).sum()
    }
}

/// Accumulates matches and produces the final ordered groups.
#[derive(Debug, Default)]
pub struct Deduper {
    groups: BTreeMap<String, Vec<Fragment>>,
}

impl Deduper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, m: Match) {
        self.groups.entry(m.hash).or_default().extend(m.frags);
    }

    /// Final pass: sort fragments, keep one per `(file, start)`, drop
    /// groups left with fewer than two occurrences. `BTreeMap` iteration
    /// supplies the lexicographic key order, so output is deterministic no
    /// matter which worker delivered which match first.
    #[must_use]
    pub fn finish(self) -> Vec<CloneGroup> {
        let mut out = Vec::new();
        for (hash, mut fragments) in self.groups {
            fragments.sort_by(|a, b| (&a.file, a.start).cmp(&(&b.file, b.start)));
            fragments.dedup_by(|a, b| a.file == b.file && a.start == b.start);
            if fragments.len() >= 2 {
                out.push(CloneGroup { hash, fragments });
            }
        }
        out
    }
}

/// True when every root prefix is covered by at least one fragment, i.e.
/// the clone spans all the paths the caller asked about. An empty root set
/// filters nothing.
#[must_use]
pub fn spans_all_roots(frags: &[Fragment], roots: &[String]) -> bool {
    roots
        .iter()
        .all(|root| frags.iter().any(|f| f.file.starts_with(root.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(file: &str, start: usize) -> Fragment {
        Fragment {
            file: file.to_string(),
            start,
            end: start + 40,
        }
    }

    fn m(hash: &str, frags: Vec<Fragment>) -> Match {
        Match {
            hash: hash.to_string(),
            frags,
        }
    }

    #[test]
    fn test_same_position_reported_once() {
        let mut dedup = Deduper::new();
        // The same pair arrives from two thresholds.
        dedup.add(m("aa", vec![frag("a.rs", 0), frag("b.rs", 0)]));
        dedup.add(m("aa", vec![frag("a.rs", 0), frag("b.rs", 0)]));
        let groups = dedup.finish();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].fragments.len(), 2);
    }

    #[test]
    fn test_groups_below_two_fragments_are_dropped() {
        let mut dedup = Deduper::new();
        dedup.add(m("aa", vec![frag("a.rs", 0), frag("a.rs", 0)]));
        assert!(dedup.finish().is_empty());
    }

    #[test]
    fn test_groups_come_out_in_hash_order() {
        let mut dedup = Deduper::new();
        dedup.add(m("ff", vec![frag("a.rs", 0), frag("b.rs", 0)]));
        dedup.add(m("0a", vec![frag("c.rs", 0), frag("d.rs", 0)]));
        let hashes: Vec<_> = dedup.finish().into_iter().map(|g| g.hash).collect();
        assert_eq!(hashes, vec!["0a".to_string(), "ff".to_string()]);
    }

    #[test]
    fn test_fragments_sorted_within_group() {
        let mut dedup = Deduper::new();
        dedup.add(m("aa", vec![frag("b.rs", 10), frag("a.rs", 50), frag("a.rs", 5)]));
        let groups = dedup.finish();
        let order: Vec<_> = groups[0]
            .fragments
            .iter()
            .map(|f| (f.file.clone(), f.start))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a.rs".to_string(), 5),
                ("a.rs".to_string(), 50),
                ("b.rs".to_string(), 10)
            ]
        );
    }

    #[test]
    fn test_spans_all_roots() {
        let frags = vec![frag("app/a.rs", 0), frag("lib/b.rs", 0)];
        assert!(spans_all_roots(&frags, &[]));
        assert!(spans_all_roots(&frags, &["app".to_string()]));
        assert!(spans_all_roots(
            &frags,
            &["app".to_string(), "lib".to_string()]
        ));
        assert!(!spans_all_roots(
            &frags,
            &["app".to_string(), "vendor".to_string()]
        ));
    }
}
