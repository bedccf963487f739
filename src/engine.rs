// src/engine.rs
//! The detection pipeline.
//!
//! Stages are dedicated threads talking over bounded channels:
//!
//! ```text
//! feeder --[paths]--> tokenizer pool --[node streams]--> builder
//!                                                           |
//!            (finalized tree + corpus, shared read-only)    v
//! deduper <--[matches]-- extractors <--[raw repeats]-- query walkers
//! ```
//!
//! The builder is the only writer the suffix tree ever sees; its active
//! point and suffix links are not safe under concurrent mutation. Query
//! walkers start only after the builder has drained and the last file's
//! terminator is in. Closing a channel is the only shutdown signal any
//! stage needs.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use tracing::{debug, info, warn};

use crate::config::Options;
use crate::error::{ConfigError, SkippedFile};
use crate::extract::{syntax_units, Match};
use crate::group::{spans_all_roots, CloneGroup, Deduper};
use crate::node::Node;
use crate::suffix::SuffixTree;
use crate::tokenize::FileTokenizer;

/// Tokenizer threads get deep recursion over real-world ASTs.
const TOKENIZER_STACK: usize = 8 * 1024 * 1024;

/// Everything one detection run produced.
#[derive(Debug)]
pub struct DetectReport {
    pub groups: Vec<CloneGroup>,
    pub skipped: Vec<SkippedFile>,
    pub files_scanned: usize,
    pub tokens: usize,
}

impl DetectReport {
    /// True when no duplication was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.groups.is_empty()
    }
}

enum WorkerOutput {
    Tokens(Vec<Node>),
    Skipped(SkippedFile),
}

/// The engine handle: validate options once, then run the pipeline any
/// number of times. Corpus and tree live inside a run, never across runs.
#[derive(Debug)]
pub struct CloneDetector {
    opts: Options,
}

impl CloneDetector {
    /// # Errors
    /// Rejects invalid [`Options`] before any thread is spawned.
    pub fn new(opts: Options) -> Result<Self, ConfigError> {
        opts.validate()?;
        Ok(Self { opts })
    }

    /// Runs detection over `files`. Per-file failures are collected into
    /// the report; they never abort the run.
    #[must_use]
    pub fn run(&self, files: Vec<PathBuf>) -> DetectReport {
        info!(files = files.len(), "building suffix tree");
        let (tree, corpus, skipped, files_scanned, tokens) = self.build_corpus(files);

        info!(
            tokens,
            nodes = corpus.len(),
            "searching for clones"
        );
        let groups = self.find_groups(&Arc::new(tree), &Arc::from(corpus));

        DetectReport {
            groups,
            skipped,
            files_scanned,
            tokens,
        }
    }

    /// Parse stage plus builder: fan paths out to tokenizer workers, feed
    /// their streams into the tree in arrival order, one terminator per
    /// file.
    fn build_corpus(
        &self,
        files: Vec<PathBuf>,
    ) -> (SuffixTree, Vec<Node>, Vec<SkippedFile>, usize, usize) {
        let workers = self.opts.tokenizer_parallelism;
        let (path_tx, path_rx) = bounded::<PathBuf>((files.len() / 10).clamp(16, 1024));
        let (stream_tx, stream_rx) = bounded::<WorkerOutput>(workers * 4);

        let feeder = thread::Builder::new()
            .name("feeder".to_string())
            .spawn(move || {
                for path in files {
                    if path_tx.send(path).is_err() {
                        break;
                    }
                }
            })
            .expect("spawn feeder thread");

        let pool: Vec<_> = (0..workers)
            .map(|id| {
                let path_rx = path_rx.clone();
                let stream_tx = stream_tx.clone();
                thread::Builder::new()
                    .name(format!("tokenize-{id}"))
                    .stack_size(TOKENIZER_STACK)
                    .spawn(move || {
                        let mut tokenizer = FileTokenizer::new();
                        while let Ok(path) = path_rx.recv() {
                            let out = match tokenizer.tokenize(&path) {
                                Ok(nodes) => WorkerOutput::Tokens(nodes),
                                Err(reason) => WorkerOutput::Skipped(SkippedFile {
                                    file: path.to_string_lossy().into_owned(),
                                    reason,
                                }),
                            };
                            if stream_tx.send(out).is_err() {
                                break;
                            }
                        }
                    })
                    .expect("spawn tokenizer thread")
            })
            .collect();
        drop(path_rx);
        drop(stream_tx);

        let builder = thread::Builder::new()
            .name("tree-builder".to_string())
            .spawn(move || {
                let mut tree = SuffixTree::new();
                let mut corpus: Vec<Node> = Vec::new();
                let mut skipped = Vec::new();
                let mut files_scanned = 0usize;
                let mut file_index = 0u32;

                while let Ok(out) = stream_rx.recv() {
                    match out {
                        WorkerOutput::Tokens(nodes) => {
                            let Some(root) = nodes.first() else { continue };
                            let file = Arc::clone(&root.file);
                            let file_end = root.end;
                            debug!(file = %file, tokens = nodes.len(), "feeding stream");

                            for node in &nodes {
                                tree.update(node.kind);
                            }
                            corpus.extend(nodes);

                            let marker = Node::end_marker(file_index, file, file_end);
                            tree.update(marker.kind);
                            corpus.push(marker);

                            files_scanned += 1;
                            file_index += 1;
                        }
                        WorkerOutput::Skipped(skip) => {
                            warn!(file = %skip.file, reason = %skip.reason, "skipping file");
                            skipped.push(skip);
                        }
                    }
                }
                // One end marker per scanned file rides along in the corpus.
                let tokens = corpus.len() - files_scanned;
                (tree, corpus, skipped, files_scanned, tokens)
            })
            .expect("spawn tree-builder thread");

        feeder.join().expect("feeder thread panicked");
        for worker in pool {
            worker.join().expect("tokenizer thread panicked");
        }
        builder.join().expect("tree-builder thread panicked")
    }

    /// Query and extraction stage: one walker and one extractor per
    /// threshold, all funneling into a single deduper.
    fn find_groups(&self, tree: &Arc<SuffixTree>, corpus: &Arc<[Node]>) -> Vec<CloneGroup> {
        let (match_tx, match_rx) = bounded::<Match>(256);
        let mut stages = Vec::new();

        for threshold in self.opts.thresholds() {
            let (raw_tx, raw_rx) = bounded(64);

            let walker_tree = Arc::clone(tree);
            stages.push(
                thread::Builder::new()
                    .name(format!("query-{threshold}"))
                    .spawn(move || {
                        for repeat in walker_tree.repeats_over(threshold) {
                            if raw_tx.send(repeat).is_err() {
                                break;
                            }
                        }
                    })
                    .expect("spawn query thread"),
            );

            let extract_corpus = Arc::clone(corpus);
            let extract_tx = match_tx.clone();
            let roots = self.opts.path_filter.clone();
            stages.push(
                thread::Builder::new()
                    .name(format!("extract-{threshold}"))
                    .spawn(move || {
                        while let Ok(repeat) = raw_rx.recv() {
                            let Some(found) = syntax_units(&extract_corpus, &repeat, threshold)
                            else {
                                continue;
                            };
                            if !spans_all_roots(&found.frags, &roots) {
                                continue;
                            }
                            if extract_tx.send(found).is_err() {
                                break;
                            }
                        }
                    })
                    .expect("spawn extract thread"),
            );
        }
        drop(match_tx);

        let mut deduper = Deduper::new();
        while let Ok(found) = match_rx.recv() {
            deduper.add(found);
        }
        for stage in stages {
            stage.join().expect("query stage panicked");
        }
        deduper.finish()
    }
}
