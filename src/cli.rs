// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

/// Find duplicated code fragments across a source tree.
#[derive(Debug, Parser)]
#[command(name = "dupscan", version, about)]
pub struct Cli {
    /// Files or directories to scan. Directories are walked recursively.
    /// With more than one path, only clones spanning all of them are shown.
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Minimum clone size in tokens.
    #[arg(short = 't', long, default_value_t = 15)]
    pub threshold: usize,

    /// Largest threshold of a sweep; defaults to --threshold.
    #[arg(long, value_name = "SIZE")]
    pub from_threshold: Option<usize>,

    /// Smallest threshold of a sweep; defaults to --threshold.
    #[arg(long, value_name = "SIZE")]
    pub to_threshold: Option<usize>,

    /// Read file names from stdin, one per line, instead of walking paths.
    #[arg(long)]
    pub files: bool,

    /// Also scan vendored dependency directories.
    #[arg(long)]
    pub vendor: bool,

    /// Machine-readable output, one JSON object per clone group.
    #[arg(long, conflicts_with = "html")]
    pub json: bool,

    /// HTML output including the duplicated fragments.
    #[arg(long)]
    pub html: bool,

    /// Number of parallel tokenizer workers. Defaults to the CPU count.
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Explain what is being done.
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["dupscan"]);
        assert_eq!(cli.paths, vec![PathBuf::from(".")]);
        assert_eq!(cli.threshold, 15);
        assert!(!cli.json && !cli.html && !cli.files);
    }

    #[test]
    fn test_json_and_html_conflict() {
        assert!(Cli::try_parse_from(["dupscan", "--json", "--html"]).is_err());
    }

    #[test]
    fn test_threshold_sweep_flags() {
        let cli = Cli::parse_from(["dupscan", "--from-threshold", "60", "--to-threshold", "40"]);
        assert_eq!(cli.from_threshold, Some(60));
        assert_eq!(cli.to_threshold, Some(40));
    }
}
