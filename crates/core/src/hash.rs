//! SHA-1 hashing primitives for file fingerprinting

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use memmap2::MmapOptions;
use sha1::{Digest, Sha1};
use tracing::{debug, trace};

use crate::diagnostic::DiagnosticSink;
use crate::error::DigestError;

/// Length of a SHA-1 digest in bytes
pub const DIGEST_LEN: usize = 20;

/// A SHA-1 hash (20 bytes)
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Default)]
pub struct Sha1Hash([u8; DIGEST_LEN]);

impl Sha1Hash {
    /// Digest reported for files that could not be read
    pub const ZERO: Sha1Hash = Sha1Hash([0; DIGEST_LEN]);

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Convert to an uppercase hex string (40 characters)
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }

    fn from_hasher(hasher: Sha1) -> Self {
        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }
}

impl std::fmt::Debug for Sha1Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sha1Hash({})", self.to_hex())
    }
}

impl std::fmt::Display for Sha1Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Render bytes as uppercase hex, high nibble first
pub fn to_hex(bytes: &[u8]) -> String {
    const HEX_CHARS: &[u8] = b"0123456789ABCDEF";
    let mut hex = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        hex.push(HEX_CHARS[(byte >> 4) as usize] as char);
        hex.push(HEX_CHARS[(byte & 0xf) as usize] as char);
    }
    hex
}

/// Hash bytes using SHA-1
pub fn hash_bytes(data: &[u8]) -> Sha1Hash {
    let mut hasher = Sha1::new();
    hasher.update(data);
    Sha1Hash::from_hasher(hasher)
}

/// Hash everything a reader yields until end of input
pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<Sha1Hash> {
    let mut hasher = Sha1::new();

    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Sha1Hash::from_hasher(hasher))
}

/// Hash a whole file through a read-only memory map
///
/// The length is probed by seeking to end of file. An empty file is hashed
/// without mapping anything. The map and the descriptor are released before
/// this returns, on success and on every error path.
pub fn hash_file_mmap(path: &Path) -> Result<Sha1Hash, DigestError> {
    let mut file = File::open(path).map_err(|e| DigestError::open(path, e))?;
    let len = file
        .seek(SeekFrom::End(0))
        .map_err(|e| DigestError::open(path, e))?;

    if len == 0 {
        trace!(path = %path.display(), "empty file, skipping map");
        return Ok(hash_bytes(&[]));
    }

    let len = usize::try_from(len).map_err(|_| {
        DigestError::map(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "file too large to map"),
        )
    })?;

    // SAFETY: the map is read-only and never outlives this call. A file
    // truncated underneath us is not guarded against.
    let mmap = unsafe { MmapOptions::new().len(len).map(&file) }
        .map_err(|e| DigestError::map(path, e))?;

    let hash = hash_bytes(&mmap);
    drop(mmap);
    drop(file);
    Ok(hash)
}

/// Digest a file, reporting failures instead of returning them
///
/// Any failure is sent to `sink` as one diagnostic and yields
/// [`Sha1Hash::ZERO`].
pub fn digest_file<S: DiagnosticSink + ?Sized>(path: &Path, sink: &mut S) -> Sha1Hash {
    match hash_file_mmap(path) {
        Ok(hash) => hash,
        Err(err) => {
            debug!(error = %err, "digest failed, reporting zero hash");
            sink.report(err.to_diagnostic());
            Sha1Hash::ZERO
        }
    }
}
