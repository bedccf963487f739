// src/lib.rs
//! Syntactic clone detection.
//!
//! The engine tokenizes each file's syntax tree into an anonymized stream,
//! builds one online generalized suffix tree over every stream, then trims
//! repeated substrings back to whole syntactic units and groups them by
//! content hash. Renaming identifiers or changing literal values does not
//! hide a clone; fragments never span file boundaries; every reported
//! group has at least two occurrences.
//!
//! ```no_run
//! use dupscan::{CloneDetector, Options};
//!
//! let detector = CloneDetector::new(Options::default())?;
//! let report = detector.run(vec!["src/a.rs".into(), "src/b.rs".into()]);
//! for group in &report.groups {
//!     println!("{} x{}", group.hash, group.fragments.len());
//! }
//! # Ok::<(), dupscan::ConfigError>(())
//! ```

pub mod config;
pub mod discover;
pub mod engine;
pub mod error;
pub mod extract;
pub mod group;
pub mod lang;
pub mod node;
pub mod report;
pub mod suffix;
pub mod tokenize;

pub use config::Options;
pub use engine::{CloneDetector, DetectReport};
pub use error::{ConfigError, SkipReason, SkippedFile};
pub use extract::Fragment;
pub use group::CloneGroup;
pub use lang::Lang;
