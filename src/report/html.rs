// src/report/html.rs
//! Self-contained HTML report with the duplicated fragments inlined.

use std::io::Write;

use anyhow::Result;

use crate::group::CloneGroup;
use crate::report::{Printer, SourceCache};

pub struct HtmlPrinter<W: Write> {
    out: W,
    cache: SourceCache,
    groups: usize,
}

impl<W: Write> HtmlPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cache: SourceCache::new(),
            groups: 0,
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl<W: Write> Printer for HtmlPrinter<W> {
    fn header(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>duplicate code</title>\n<style>\n\
             body {{ font-family: monospace; margin: 2em; }}\n\
             h2 {{ border-bottom: 1px solid #ccc; }}\n\
             pre {{ background: #f6f6f6; padding: 0.5em; overflow-x: auto; }}\n\
             </style>\n</head>\n<body>"
        )?;
        Ok(())
    }

    fn clone_group(&mut self, group: &CloneGroup) -> Result<()> {
        self.groups += 1;
        writeln!(
            self.out,
            "<h2>#{}: {} clones</h2>",
            self.groups,
            group.fragments.len()
        )?;
        for frag in &group.fragments {
            let from = self.cache.line_of(&frag.file, frag.start);
            let to = self.cache.line_of(&frag.file, frag.end.saturating_sub(1));
            writeln!(
                self.out,
                "<p>{}:{from}-{to}</p>",
                escape(&frag.file)
            )?;
            let body = self
                .cache
                .snippet(&frag.file, frag.start, frag.end)
                .unwrap_or_else(|| "(source unavailable)".to_string());
            writeln!(self.out, "<pre>{}</pre>", escape(&body))?;
        }
        Ok(())
    }

    fn footer(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "<p>{} clone groups total.</p>\n</body>\n</html>",
            self.groups
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup_in_snippets() {
        assert_eq!(escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn test_document_is_well_formed_around_groups() {
        let mut buf = Vec::new();
        let mut printer = HtmlPrinter::new(&mut buf);
        printer.header().expect("header");
        printer.footer().expect("footer");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.trim_end().ends_with("</html>"));
    }
}
