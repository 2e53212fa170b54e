//! Error types for the digest engine

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::diagnostic::{Diagnostic, Operation};

/// Failure while computing a file digest
#[derive(Debug, Error)]
pub enum DigestError {
    /// The file could not be opened or its length could not be probed
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was opened but its content could not be mapped
    #[error("failed to map {}: {source}", .path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DigestError {
    pub(crate) fn open(path: &Path, source: io::Error) -> Self {
        DigestError::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn map(path: &Path, source: io::Error) -> Self {
        DigestError::Map {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path of the file that failed
    pub fn path(&self) -> &Path {
        match self {
            DigestError::Open { path, .. } | DigestError::Map { path, .. } => path,
        }
    }

    /// The step that failed, in diagnostic terms
    pub fn operation(&self) -> Operation {
        match self {
            DigestError::Open { .. } => Operation::OpenFile,
            DigestError::Map { .. } => Operation::MapFile,
        }
    }

    /// OS error code of the underlying failure, if there is one
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            DigestError::Open { source, .. } | DigestError::Map { source, .. } => {
                source.raw_os_error()
            }
        }
    }

    /// Convert into a diagnostic event for a [`DiagnosticSink`](crate::DiagnosticSink)
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.path(), self.operation(), self.raw_os_error())
    }
}
