// src/main.rs
mod cli;

use std::io::Write;

use anyhow::Result;
use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use dupscan::report::{self, HtmlPrinter, JsonPrinter, Printer, TextPrinter};
use dupscan::{discover, CloneDetector, Options};

fn main() {
    if let Err(err) = run() {
        eprintln!("dupscan: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::Cli::parse();
    init_tracing(args.verbose);

    let files = if args.files {
        discover::stdin_feed()?
    } else {
        discover::discover(&args.paths, args.vendor)?
    };

    // With several roots, only clones touching every root are interesting;
    // a single root is spanned by any clone it contains.
    let path_filter = if args.paths.len() > 1 && !args.files {
        args.paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    } else {
        Vec::new()
    };

    let options = Options {
        from_threshold: args.from_threshold.unwrap_or(args.threshold),
        to_threshold: args.to_threshold.unwrap_or(args.threshold),
        path_filter,
        tokenizer_parallelism: args.jobs.unwrap_or_else(num_cpus::get),
    };

    let detector = CloneDetector::new(options)?;
    let report = detector.run(files);

    let stdout = std::io::stdout().lock();
    let mut printer: Box<dyn Printer> = if args.html {
        Box::new(HtmlPrinter::new(stdout))
    } else if args.json {
        Box::new(JsonPrinter::new(stdout))
    } else {
        Box::new(TextPrinter::new(stdout))
    };
    report::print(&report, printer.as_mut())?;

    if !report.skipped.is_empty() {
        let mut stderr = std::io::stderr().lock();
        for skip in &report.skipped {
            writeln!(stderr, "skipped {}: {}", skip.file, skip.reason)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "dupscan=debug" } else { "dupscan=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
