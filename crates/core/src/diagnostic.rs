//! Diagnostic channel for recoverable per-path failures
//!
//! Failures never abort a run. Each one becomes a [`Diagnostic`] handed to a
//! [`DiagnosticSink`], which keeps them apart from the digest output stream.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// The step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Opening a regular file for reading
    OpenFile,
    /// Mapping a regular file's content into memory
    MapFile,
    /// Listing a directory's entries
    OpenDirectory,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::OpenFile => "opening file",
            Operation::MapFile => "mapping file",
            Operation::OpenDirectory => "opening directory",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured error event: which path, which step, which OS error code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub operation: Operation,
    pub code: Option<i32>,
}

impl Diagnostic {
    pub fn new(path: impl Into<PathBuf>, operation: Operation, code: Option<i32>) -> Self {
        Self {
            path: path.into(),
            operation,
            code,
        }
    }

    /// Build from an I/O error, keeping its raw OS code
    pub fn from_io(path: &Path, operation: Operation, err: &io::Error) -> Self {
        Self::new(path, operation, err.raw_os_error())
    }
}

impl Diagnostic {
    /// Write the line plus `\n`, with the path as raw bytes
    pub fn write_line<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(
            out,
            "* Error ({}) when {}: ",
            self.code.unwrap_or(-1),
            self.operation
        )?;
        write_path(out, &self.path)?;
        out.write_all(b"\n")
    }
}

/// Renders as `* Error (<code>) when <operation>: <path>`
///
/// A failure without an OS code renders its code as `-1`. Non-UTF-8 paths
/// are rendered lossily here; [`Diagnostic::write_line`] keeps them intact.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "* Error ({}) when {}: {}",
            self.code.unwrap_or(-1),
            self.operation,
            self.path.display()
        )
    }
}

/// Write a path byte-for-byte, even when it is not valid UTF-8
#[cfg(unix)]
pub fn write_path<W: Write + ?Sized>(out: &mut W, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
pub fn write_path<W: Write + ?Sized>(out: &mut W, path: &Path) -> io::Result<()> {
    write!(out, "{}", path.display())
}

/// Receiver of diagnostic events
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Writes one line per event to standard error
#[derive(Debug, Default)]
pub struct StderrSink {
    reported: usize,
}

impl StderrSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events written so far
    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl DiagnosticSink for StderrSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        // Nowhere left to report a failing stderr.
        let _ = diagnostic.write_line(&mut io::stderr().lock());
        self.reported += 1;
    }
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
