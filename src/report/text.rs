// src/report/text.rs
//! Human-readable terminal output.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use crate::group::CloneGroup;
use crate::report::{Printer, SourceCache};

pub struct TextPrinter<W: Write> {
    out: W,
    cache: SourceCache,
    groups: usize,
    instances: usize,
}

impl<W: Write> TextPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cache: SourceCache::new(),
            groups: 0,
            instances: 0,
        }
    }
}

impl<W: Write> Printer for TextPrinter<W> {
    fn header(&mut self) -> Result<()> {
        Ok(())
    }

    fn clone_group(&mut self, group: &CloneGroup) -> Result<()> {
        self.groups += 1;
        self.instances += group.fragments.len();

        let count = format!("found {} clones:", group.fragments.len());
        writeln!(self.out, "{}", count.bold())?;
        for frag in &group.fragments {
            let from = self.cache.line_of(&frag.file, frag.start);
            // The end offset is exclusive; report the line it ends on.
            let to = self.cache.line_of(&frag.file, frag.end.saturating_sub(1));
            writeln!(
                self.out,
                "  {}:{}-{}",
                frag.file.cyan(),
                from,
                to
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn footer(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "Found total {} clone groups containing {} clone instances.",
            self.groups, self.instances
        )?;
        Ok(())
    }
}
