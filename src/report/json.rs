// src/report/json.rs
//! Machine-readable output: one JSON object per clone group, one per line,
//! byte offsets and line numbers both included so downstream tools do not
//! have to reopen the sources.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::group::CloneGroup;
use crate::report::{Printer, SourceCache};

#[derive(Serialize)]
struct JsonFragment<'a> {
    file: &'a str,
    start: usize,
    end: usize,
    start_line: usize,
    end_line: usize,
}

#[derive(Serialize)]
struct JsonGroup<'a> {
    hash: &'a str,
    fragments: Vec<JsonFragment<'a>>,
}

pub struct JsonPrinter<W: Write> {
    out: W,
    cache: SourceCache,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cache: SourceCache::new(),
        }
    }
}

impl<W: Write> Printer for JsonPrinter<W> {
    fn header(&mut self) -> Result<()> {
        Ok(())
    }

    fn clone_group(&mut self, group: &CloneGroup) -> Result<()> {
        let fragments = group
            .fragments
            .iter()
            .map(|frag| JsonFragment {
                file: &frag.file,
                start: frag.start,
                end: frag.end,
                start_line: self.cache.line_of(&frag.file, frag.start),
                end_line: self.cache.line_of(&frag.file, frag.end.saturating_sub(1)),
            })
            .collect();
        serde_json::to_writer(
            &mut self.out,
            &JsonGroup {
                hash: &group.hash,
                fragments,
            },
        )?;
        writeln!(self.out)?;
        Ok(())
    }

    fn footer(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Fragment;

    #[test]
    fn test_one_json_object_per_group() {
        let group = CloneGroup {
            hash: "deadbeef".into(),
            fragments: vec![
                Fragment {
                    file: "a.rs".into(),
                    start: 0,
                    end: 10,
                },
                Fragment {
                    file: "b.rs".into(),
                    start: 5,
                    end: 15,
                },
            ],
        };

        let mut buf = Vec::new();
        let mut printer = JsonPrinter::new(&mut buf);
        printer.header().expect("header");
        printer.clone_group(&group).expect("group");
        printer.footer().expect("footer");

        let out = String::from_utf8(buf).expect("utf8");
        let parsed: serde_json::Value =
            serde_json::from_str(out.lines().next().expect("line")).expect("json");
        assert_eq!(parsed["hash"], "deadbeef");
        assert_eq!(parsed["fragments"][1]["file"], "b.rs");
        assert_eq!(parsed["fragments"][1]["start"], 5);
    }
}
