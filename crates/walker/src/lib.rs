//! Directory traversal for Treesum
//!
//! Finds every regular file under a root path:
//! - Symlinks are classified as `Other` and never followed
//! - Unreadable directories are reported and their subtree skipped
//! - Files are handed to a callback one at a time, in listing order

pub mod walk;

pub use walk::{traverse, NodeKind, WalkStats};
