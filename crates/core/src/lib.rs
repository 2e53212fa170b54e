//! Treesum Core - content digest primitives
//!
//! This crate provides:
//! - SHA-1 hashing of whole files through read-only memory maps
//! - Uppercase hex rendering of digests
//! - The diagnostic channel used to report per-file failures

pub mod diagnostic;
pub mod error;
pub mod hash;

// Re-export main types for convenience
pub use diagnostic::{
    write_path, CollectingSink, Diagnostic, DiagnosticSink, Operation, StderrSink,
};
pub use error::DigestError;
pub use hash::{digest_file, hash_bytes, hash_file_mmap, hash_reader, to_hex, Sha1Hash, DIGEST_LEN};
