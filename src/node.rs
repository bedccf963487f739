// src/node.rs
//! Records of the normalized token stream.
//!
//! Every parsed file is linearized into a sequence of [`Node`]s. A `Node`
//! carries the grammatical kind of an AST node, the byte range it came from,
//! and the size of the subtree rooted at it (`owns`). The concatenation of
//! all sequences, with one terminator symbol appended per file, is the
//! corpus the suffix tree is built over.

use std::sync::Arc;

/// A token-kind symbol as fed into the suffix tree.
///
/// Grammar kind ids are `u16` and per-language, so the language index is
/// shifted into the upper half: a Rust node and a Python node with the same
/// grammar id map to different symbols. Terminators live in a reserved
/// high-bit range and can never collide with a grammar symbol.
pub type Symbol = u32;

const TERMINATOR_BIT: Symbol = 1 << 31;

/// Builds the symbol for a grammar node kind of a given language.
#[must_use]
pub fn kind_symbol(lang_index: u16, kind_id: u16) -> Symbol {
    (Symbol::from(lang_index) << 16) | Symbol::from(kind_id)
}

/// Builds the unique stream terminator for the `file_index`-th file.
#[must_use]
pub fn terminator(file_index: u32) -> Symbol {
    debug_assert!(file_index < TERMINATOR_BIT, "file index overflows terminator space");
    TERMINATOR_BIT | file_index
}

/// Returns true if `sym` is a per-file stream terminator.
#[must_use]
pub fn is_terminator(sym: Symbol) -> bool {
    sym & TERMINATOR_BIT != 0
}

/// One element of the linearized, anonymized token stream.
///
/// `owns` is the number of consecutive nodes (this one included) that make
/// up the syntactic unit rooted here; a leaf owns exactly itself. The
/// extractor uses it to snap raw repeats back to whole units without
/// re-parsing anything.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: Symbol,
    pub file: Arc<str>,
    pub pos: usize,
    pub end: usize,
    pub owns: usize,
}

impl Node {
    /// Creates the terminator node appended to the corpus after a file, so
    /// corpus indices stay aligned with suffix-tree stream positions.
    #[must_use]
    pub fn end_marker(file_index: u32, file: Arc<str>, end: usize) -> Self {
        Self {
            kind: terminator(file_index),
            file,
            pos: end,
            end,
            owns: 1,
        }
    }
}
