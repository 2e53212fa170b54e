//! Digest output: one `<HEX> <path>` line per file

use std::io::{self, Write};
use std::path::Path;
use treesum_core::{write_path, Sha1Hash};

/// Writes digest lines in the order files are handed over
pub struct Emitter<W: Write> {
    out: W,
    lines: usize,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// Write `<40 uppercase hex> <path>\n`
    pub fn emit(&mut self, hash: &Sha1Hash, path: &Path) -> io::Result<()> {
        self.out.write_all(hash.to_hex().as_bytes())?;
        self.out.write_all(b" ")?;
        write_path(&mut self.out, path)?;
        self.out.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Lines written so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
