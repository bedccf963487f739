// src/tokenize.rs
//! Normalizing tokenizer: one parsed file in, a flat [`Node`] stream out.
//!
//! The walk visits named AST nodes in source order and records only their
//! grammatical kind. Identifier and literal text is never looked at, so two
//! fragments that differ only in naming or literal values produce identical
//! streams. Anonymous tokens (punctuation, keywords, operators) are implied
//! by their parent's kind and are not emitted.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tree_sitter::{Node as TsNode, Parser};

use crate::error::SkipReason;
use crate::lang::Lang;
use crate::node::{kind_symbol, Node};

/// Parses files and linearizes their syntax trees.
///
/// Holds one `Parser` per language so a worker thread can reuse them across
/// files instead of re-initializing the grammar every time.
pub struct FileTokenizer {
    parsers: HashMap<Lang, Parser>,
}

impl FileTokenizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Reads and tokenizes one file.
    ///
    /// # Errors
    /// Returns the [`SkipReason`] when the file cannot contribute to the
    /// corpus; the caller records it and moves on.
    pub fn tokenize(&mut self, path: &Path) -> Result<Vec<Node>, SkipReason> {
        let Some(lang) = Lang::from_path(path) else {
            return Err(SkipReason::UnknownLanguage);
        };
        let source = std::fs::read(path).map_err(|e| SkipReason::Io(e.to_string()))?;
        let file: Arc<str> = Arc::from(path.to_string_lossy().as_ref());
        self.tokenize_source(file, lang, &source)
    }

    /// Tokenizes already-read source bytes.
    ///
    /// # Errors
    /// Returns [`SkipReason::Parse`] when the grammar rejects the input.
    pub fn tokenize_source(
        &mut self,
        file: Arc<str>,
        lang: Lang,
        source: &[u8],
    ) -> Result<Vec<Node>, SkipReason> {
        let parser = match self.parsers.entry(lang) {
            std::collections::hash_map::Entry::Occupied(e) => e.into_mut(),
            std::collections::hash_map::Entry::Vacant(e) => {
                let mut parser = Parser::new();
                // A failure here means the grammar crate and the tree-sitter
                // runtime disagree on ABI; nothing file-specific to retry.
                parser
                    .set_language(&lang.grammar())
                    .map_err(|_| SkipReason::UnknownLanguage)?;
                e.insert(parser)
            }
        };

        let Some(tree) = parser.parse(source, None) else {
            return Err(SkipReason::Parse);
        };
        let root = tree.root_node();
        if root.has_error() {
            return Err(SkipReason::Parse);
        }

        let mut nodes = Vec::new();
        linearize(&mut nodes, &file, lang.index(), root);
        Ok(nodes)
    }
}

impl Default for FileTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits `ts` and its named subtree in preorder, returning the number of
/// nodes emitted. That count becomes the parent's `owns` span.
fn linearize(out: &mut Vec<Node>, file: &Arc<str>, lang_index: u16, ts: TsNode) -> usize {
    let slot = out.len();
    out.push(Node {
        kind: kind_symbol(lang_index, ts.kind_id()),
        file: Arc::clone(file),
        pos: ts.start_byte(),
        end: ts.end_byte(),
        owns: 1,
    });

    let mut total = 1;
    let mut cursor = ts.walk();
    for child in ts.named_children(&mut cursor) {
        // Comments are "extra" nodes; they must not perturb the stream.
        if child.is_extra() {
            continue;
        }
        total += linearize(out, file, lang_index, child);
    }
    out[slot].owns = total;
    total
}
