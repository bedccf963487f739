// src/discover.rs
//! File discovery.
//!
//! A path that is a file is taken as-is; a directory is walked recursively
//! for files with a supported extension. Dependency and build directories
//! are pruned so a default run over a project root stays quick.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::lang::Lang;

/// Directories never worth scanning for clones.
const PRUNED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".venv",
    "__pycache__",
    "build",
    "dist",
    "node_modules",
    "target",
    "vendor",
];

fn should_prune(name: &str, include_vendor: bool) -> bool {
    if include_vendor && (name == "vendor" || name == "node_modules") {
        return false;
    }
    PRUNED_DIRS.contains(&name)
}

/// Collects the files to scan from the given roots.
///
/// # Errors
/// Returns an error when a root path does not exist.
pub fn discover(paths: &[PathBuf], include_vendor: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("cannot stat {}", path.display()))?;
        if meta.is_file() {
            // Explicitly-named files are scanned regardless of extension;
            // the tokenizer reports the ones it has no grammar for.
            files.push(path.clone());
        } else {
            walk_directory(path, include_vendor, &mut files);
        }
    }
    Ok(files)
}

fn walk_directory(root: &Path, include_vendor: bool, files: &mut Vec<PathBuf>) {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir()
                && should_prune(&e.file_name().to_string_lossy(), include_vendor))
        });

    let mut errors = 0usize;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && Lang::from_path(entry.path()).is_some() {
                    files.push(entry.into_path());
                }
            }
            Err(_) => errors += 1,
        }
    }
    if errors > 0 {
        tracing::warn!(root = %root.display(), errors, "errors during file walk");
    }
}

/// Reads one filename per line from standard input.
///
/// # Errors
/// Returns an error when stdin cannot be read.
pub fn stdin_feed() -> Result<Vec<PathBuf>> {
    read_feed(std::io::stdin().lock())
}

fn read_feed(reader: impl BufRead) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for line in reader.lines() {
        let line = line.context("reading file list from stdin")?;
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        files.push(PathBuf::from(name.strip_prefix("./").unwrap_or(name)));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_strips_leading_dot_slash() {
        let input = "./src/a.rs\n\nsrc/b.rs\n";
        let files = read_feed(input.as_bytes()).expect("feed");
        assert_eq!(
            files,
            vec![PathBuf::from("src/a.rs"), PathBuf::from("src/b.rs")]
        );
    }

    #[test]
    fn test_prune_set() {
        assert!(should_prune("node_modules", false));
        assert!(should_prune("target", true));
        assert!(!should_prune("vendor", true));
        assert!(!should_prune("src", false));
    }

    #[test]
    fn test_discover_walks_only_supported_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("a.rs"), "fn a() {}\n").expect("write");
        std::fs::write(dir.path().join("notes.txt"), "hello\n").expect("write");
        std::fs::create_dir(dir.path().join("target")).expect("mkdir");
        std::fs::write(dir.path().join("target").join("b.rs"), "fn b() {}\n").expect("write");

        let files = discover(&[dir.path().to_path_buf()], false).expect("discover");
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.rs"));
    }

    #[test]
    fn test_explicit_file_kept_regardless_of_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let odd = dir.path().join("script.weird");
        std::fs::write(&odd, "fn a() {}\n").expect("write");
        let files = discover(&[odd.clone()], false).expect("discover");
        assert_eq!(files, vec![odd]);
    }
}
