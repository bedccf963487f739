// src/extract.rs
//! Snapping raw repeats to whole syntactic units.
//!
//! The suffix tree reports repeats of token kinds with no regard for
//! structure, so a repeat may start or stop mid-expression. Using the
//! `owns` spans recorded at tokenization time, the extractor trims each
//! repeat to the longest prefix that is a concatenation of complete
//! subtrees, then keys the result by a hash of the trimmed kind sequence.

use std::fmt::Write as _;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::node::{is_terminator, Node};
use crate::suffix::Repeat;

/// A contiguous occurrence of a clone: a file plus a byte range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub file: String,
    pub start: usize,
    pub end: usize,
}

/// One extracted clone: the canonical hash of its trimmed kind sequence and
/// every place that sequence occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub hash: String,
    pub frags: Vec<Fragment>,
}

/// Trims `repeat` to whole syntactic units and builds the [`Match`], or
/// `None` when fewer than `threshold` tokens of complete units remain.
///
/// The walk is greedy: starting at the first occurrence it consumes whole
/// subtrees for as long as the next one still fits inside the raw repeat
/// length, which always yields the longest unit-aligned prefix. Occurrences
/// are in stream order and all share the trimmed kind sequence, so the
/// trimmed window applies to each of them unchanged.
#[must_use]
pub fn syntax_units(corpus: &[Node], repeat: &Repeat, threshold: usize) -> Option<Match> {
    let first = *repeat.positions.first()?;
    let raw_len = repeat.length;

    let mut i = first;
    while i - first < raw_len && i + corpus[i].owns - first <= raw_len {
        i += corpus[i].owns;
    }
    let trimmed = i - first;
    if trimmed < threshold {
        return None;
    }
    debug_assert!(
        corpus[first..first + trimmed].iter().all(|n| !is_terminator(n.kind)),
        "unit window crossed a file boundary"
    );

    let frags = repeat
        .positions
        .iter()
        .map(|&p| Fragment {
            file: corpus[p].file.to_string(),
            start: corpus[p].pos,
            end: corpus[p + trimmed - 1].end,
        })
        .collect();

    Some(Match {
        hash: kind_hash(&corpus[first..first + trimmed]),
        frags,
    })
}

/// SHA-256 of the kind sequence, hex encoded. The hash is a group key, not
/// a security boundary; hex keys also give group output its stable
/// lexicographic order.
fn kind_hash(window: &[Node]) -> String {
    let mut hasher = Sha256::new();
    for node in window {
        hasher.update(node.kind.to_le_bytes());
    }
    hasher.finalize().iter().fold(
        String::with_capacity(64),
        |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// A corpus of repeated three-node statements: each statement root owns
    /// itself and two children.
    fn statement_corpus(statements: usize) -> Vec<Node> {
        let file: Arc<str> = Arc::from("synthetic.rs");
        let mut corpus = Vec::new();
        for s in 0..statements {
            let base = s * 30;
            for (offset, (kind, owns)) in [(10u32, 3usize), (11, 1), (12, 1)].iter().enumerate() {
                corpus.push(Node {
                    kind: *kind,
                    file: Arc::clone(&file),
                    pos: base + offset * 10,
                    end: base + offset * 10 + 9,
                    owns: *owns,
                });
            }
        }
        corpus
    }

    #[test]
    fn test_trims_to_complete_units() {
        let corpus = statement_corpus(4);
        // Raw repeat of 5 tokens starting at a statement root: one full
        // statement fits, the second does not.
        let repeat = Repeat {
            length: 5,
            positions: vec![0, 6],
        };
        let m = syntax_units(&corpus, &repeat, 3).expect("match");
        assert_eq!(m.frags.len(), 2);
        assert_eq!(m.frags[0].start, corpus[0].pos);
        assert_eq!(m.frags[0].end, corpus[2].end);
        assert_eq!(m.frags[1].start, corpus[6].pos);
    }

    #[test]
    fn test_sub_threshold_after_trimming_is_dropped() {
        let corpus = statement_corpus(4);
        let repeat = Repeat {
            length: 5,
            positions: vec![0, 6],
        };
        // Trimming leaves 3 complete-unit tokens; a threshold of 4 kills it.
        assert!(syntax_units(&corpus, &repeat, 4).is_none());
    }

    #[test]
    fn test_mid_expression_start_consumes_leaves_first() {
        let corpus = statement_corpus(4);
        // Starting on a leaf: two leaves then a whole statement fit in 5.
        let repeat = Repeat {
            length: 5,
            positions: vec![1, 7],
        };
        let m = syntax_units(&corpus, &repeat, 5).expect("match");
        assert_eq!(m.frags[0].start, corpus[1].pos);
        assert_eq!(m.frags[0].end, corpus[5].end);
    }

    #[test]
    fn test_unit_too_big_for_window_is_dropped() {
        let corpus = statement_corpus(2);
        // A 2-token window at a root owning 3 tokens holds no complete unit.
        let repeat = Repeat {
            length: 2,
            positions: vec![0, 3],
        };
        assert!(syntax_units(&corpus, &repeat, 1).is_none());
    }

    #[test]
    fn test_hash_depends_only_on_kinds() {
        let corpus = statement_corpus(4);
        // Two different windows over the same kind sequence hash alike.
        let a = syntax_units(
            &corpus,
            &Repeat {
                length: 3,
                positions: vec![0, 3],
            },
            3,
        )
        .expect("match");
        let b = syntax_units(
            &corpus,
            &Repeat {
                length: 3,
                positions: vec![3, 6],
            },
            3,
        )
        .expect("match");
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.hash.len(), 64);
    }
}
