// src/report/mod.rs
//! Output formatting.
//!
//! A [`Printer`] sees the report as header, one call per clone group, and
//! footer. The engine itself never formats anything; printers read file
//! bytes on their own to turn byte offsets into line numbers and snippets.

mod html;
mod json;
mod text;

pub use html::HtmlPrinter;
pub use json::JsonPrinter;
pub use text::TextPrinter;

use std::collections::HashMap;

use anyhow::Result;

use crate::engine::DetectReport;
use crate::group::CloneGroup;

/// One output format.
pub trait Printer {
    /// Called once before any group.
    ///
    /// # Errors
    /// Returns an error when the underlying writer fails.
    fn header(&mut self) -> Result<()>;

    /// Called once per clone group, in report order.
    ///
    /// # Errors
    /// Returns an error when the underlying writer fails.
    fn clone_group(&mut self, group: &CloneGroup) -> Result<()>;

    /// Called once after the last group.
    ///
    /// # Errors
    /// Returns an error when the underlying writer fails.
    fn footer(&mut self) -> Result<()>;
}

/// Drives a printer over a finished report.
///
/// # Errors
/// Propagates the first printer error.
pub fn print(report: &DetectReport, printer: &mut dyn Printer) -> Result<()> {
    printer.header()?;
    for group in &report.groups {
        printer.clone_group(group)?;
    }
    printer.footer()
}

/// Lazily-read file contents shared by the printers that need line numbers
/// or source snippets. A file that cannot be read stays unreadable for the
/// rest of the run instead of being retried per fragment.
#[derive(Debug, Default)]
pub struct SourceCache {
    files: HashMap<String, Option<Vec<u8>>>,
}

impl SourceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn bytes(&mut self, file: &str) -> Option<&[u8]> {
        self.files
            .entry(file.to_string())
            .or_insert_with(|| std::fs::read(file).ok())
            .as_deref()
    }

    /// 1-based line number of `byte`, or 0 when the file is unreadable.
    #[must_use]
    pub fn line_of(&mut self, file: &str, byte: usize) -> usize {
        let Some(bytes) = self.bytes(file) else { return 0 };
        let upto = byte.min(bytes.len());
        1 + bytes[..upto].iter().filter(|&&b| b == b'\n').count()
    }

    /// The source text of a byte range, lossily decoded.
    #[must_use]
    pub fn snippet(&mut self, file: &str, start: usize, end: usize) -> Option<String> {
        let bytes = self.bytes(file)?;
        let range = bytes.get(start..end.min(bytes.len()))?;
        Some(String::from_utf8_lossy(range).into_owned())
    }
}
