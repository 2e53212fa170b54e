//! Depth-first discovery of regular files
//!
//! Built on `walkdir` with link following disabled everywhere, the root
//! included, so a symlink is always seen as the link itself (lstat semantics).

use std::ffi::OsString;
use std::fs::{self, FileType};
use std::io;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use treesum_core::{Diagnostic, DiagnosticSink, Operation};
use walkdir::WalkDir;

/// Classification of a filesystem node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    RegularFile,
    /// Symlinks, devices, sockets, FIFOs, and anything that failed to stat
    Other,
}

impl NodeKind {
    /// Classify a path without following a final symlink
    ///
    /// Not cached: every call queries the filesystem again. A failed query
    /// (including a missing path) classifies as [`NodeKind::Other`].
    pub fn of(path: &Path) -> Self {
        match fs::symlink_metadata(path) {
            Ok(meta) => Self::from_file_type(meta.file_type()),
            Err(_) => NodeKind::Other,
        }
    }

    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            NodeKind::Other
        } else if file_type.is_dir() {
            NodeKind::Directory
        } else if file_type.is_file() {
            NodeKind::RegularFile
        } else {
            NodeKind::Other
        }
    }
}

/// Counters for one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Regular files handed to the callback
    pub files: usize,
    /// Directories visited, including ones that failed to list
    pub directories: usize,
    /// Nodes skipped as [`NodeKind::Other`]
    pub skipped: usize,
    /// Directory listing failures reported to the sink
    pub errors: usize,
    /// The callback asked to stop before the tree was exhausted
    pub stopped: bool,
}

/// Walk `root` and call `on_file` for every regular file found
///
/// Traversal is depth-first in whatever order the OS lists entries. Each
/// file is handed over synchronously, so `on_file` finishes with it before
/// the walk moves on. The sink is lent to `on_file` so per-file failures
/// land on the same channel as directory failures. Returning
/// [`ControlFlow::Break`] from `on_file` ends the walk at once.
///
/// Paths handed out are `root` exactly as given, then `/`, then the path
/// below it: a root of `dir/` yields `dir//f.txt`.
///
/// A directory that cannot be listed produces one
/// [`Operation::OpenDirectory`] diagnostic and its subtree is skipped;
/// siblings are still visited. A root that does not exist is skipped
/// silently, like any other unclassifiable node.
pub fn traverse<S, F>(root: &Path, sink: &mut S, mut on_file: F) -> WalkStats
where
    S: DiagnosticSink + ?Sized,
    F: FnMut(&Path, &mut S) -> ControlFlow<()>,
{
    let mut stats = WalkStats::default();
    // walkdir yields a directory entry and then, on the very next step, the
    // error from listing it. Remembering the last directory tells a listing
    // failure apart from a failed stat of the root.
    let mut last_dir: Option<PathBuf> = None;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .follow_root_links(false);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                route_error(
                    root,
                    err.path(),
                    err.io_error(),
                    last_dir.as_deref(),
                    sink,
                    &mut stats,
                );
                continue;
            }
        };

        match NodeKind::from_file_type(entry.file_type()) {
            NodeKind::Directory => {
                stats.directories += 1;
                last_dir = Some(entry.path().to_path_buf());
            }
            NodeKind::RegularFile => {
                stats.files += 1;
                let path = under_root(root, entry.path());
                if on_file(&path, &mut *sink).is_break() {
                    debug!(path = %path.display(), "stopping traversal early");
                    stats.stopped = true;
                    break;
                }
            }
            NodeKind::Other => {
                trace!(path = %entry.path().display(), "not a regular file, skipping");
                stats.skipped += 1;
            }
        }
    }

    debug!(
        root = %root.display(),
        files = stats.files,
        directories = stats.directories,
        skipped = stats.skipped,
        errors = stats.errors,
        "traversal finished"
    );
    stats
}

/// `root` + `/` + the part of `path` below it, with no normalization
fn under_root(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => {
            let mut joined = OsString::with_capacity(
                root.as_os_str().len() + 1 + rel.as_os_str().len(),
            );
            joined.push(root.as_os_str());
            joined.push("/");
            joined.push(rel.as_os_str());
            PathBuf::from(joined)
        }
        _ => path.to_path_buf(),
    }
}

/// Report a listing failure of the directory just yielded, skip anything else
fn route_error<S: DiagnosticSink + ?Sized>(
    root: &Path,
    path: Option<&Path>,
    io_error: Option<&io::Error>,
    last_dir: Option<&Path>,
    sink: &mut S,
    stats: &mut WalkStats,
) {
    let Some(path) = path else {
        debug!("unreadable directory entry: {:?}", io_error);
        return;
    };

    if last_dir == Some(path) {
        let path = under_root(root, path);
        let diagnostic = match io_error {
            Some(err) => Diagnostic::from_io(&path, Operation::OpenDirectory, err),
            None => Diagnostic::new(path, Operation::OpenDirectory, None),
        };
        sink.report(diagnostic);
        stats.errors += 1;
    } else {
        debug!(path = %path.display(), "cannot classify, skipping: {:?}", io_error);
        stats.skipped += 1;
    }
}
