//! Treesum CLI library
//!
//! Wires the traversal engine to the digest engine and the emitter.
//! `main` is a thin shell around [`run`].

pub mod args;
pub mod config;
pub mod emit;
pub mod logging;

pub use args::Cli;
pub use config::Settings;
pub use emit::Emitter;

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};
use treesum_core::{digest_file, Diagnostic, DiagnosticSink};
use walker::{traverse, WalkStats};

/// Problems with how the tool was invoked
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Path does not exist: {}", .0.display())]
    MissingRoot(PathBuf),
}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub walk: WalkStats,
    /// Digest lines written
    pub lines: usize,
    /// Diagnostics reported, directory and file failures together
    pub diagnostics: usize,
}

impl Summary {
    /// 0 unless `strict` is set and something could not be read
    pub fn exit_status(&self, strict: bool) -> u8 {
        if strict && self.diagnostics > 0 {
            1
        } else {
            0
        }
    }

    pub fn exit_code(&self, strict: bool) -> ExitCode {
        ExitCode::from(self.exit_status(strict))
    }
}

/// Counts what passes through to the wrapped sink
struct Counted<'a, S: ?Sized> {
    inner: &'a mut S,
    count: usize,
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Counted<'_, S> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.count += 1;
        self.inner.report(diagnostic);
    }
}

/// Fingerprint every regular file under `settings.root`
///
/// Each file is hashed and its line written before the walk moves on.
/// Per-file and per-directory failures go to `sink` and never stop the run.
/// A root that does not exist is a [`UsageError`]; a failed write to `out`
/// stops the walk and is returned.
pub fn run<W, S>(settings: &Settings, out: W, sink: &mut S) -> Result<Summary>
where
    W: Write,
    S: DiagnosticSink + ?Sized,
{
    let root = settings.root.as_path();
    if let Err(err) = std::fs::symlink_metadata(root) {
        if err.kind() == io::ErrorKind::NotFound {
            return Err(UsageError::MissingRoot(root.to_path_buf()).into());
        }
        // Anything else falls through and is skipped by the walk
        debug!(root = %root.display(), "cannot stat root: {}", err);
    }

    info!(root = %root.display(), "fingerprinting");

    let mut emitter = Emitter::new(out);
    let mut write_error: Option<io::Error> = None;
    let mut counted = Counted { inner: sink, count: 0 };

    let walk = traverse(root, &mut counted, |path, sink| {
        let hash = digest_file(path, sink);
        match emitter.emit(&hash, path) {
            Ok(()) => ControlFlow::Continue(()),
            Err(err) => {
                write_error = Some(err);
                ControlFlow::Break(())
            }
        }
    });

    if let Some(err) = write_error {
        return Err(err).context("Failed to write digest output");
    }
    emitter.flush().context("Failed to flush digest output")?;

    let summary = Summary {
        walk,
        lines: emitter.lines(),
        diagnostics: counted.count,
    };
    debug!(
        lines = summary.lines,
        diagnostics = summary.diagnostics,
        "run complete"
    );
    Ok(summary)
}
