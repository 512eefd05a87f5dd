//! Content hashing for duplicate detection.

use blake3::Hasher as Blake3Hasher;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Chunk size for streaming file contents into the hasher.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Computes content digests of staged disks.
pub struct Hasher;

impl Hasher {
    /// Generate a BLAKE3 hash of file contents.
    ///
    /// Reads strictly sequentially in 64KB chunks, so memory use is bounded
    /// regardless of file size. Errors are returned as-is; the caller decides
    /// whether a missing file is fatal.
    pub fn content_hash(path: &Path) -> std::io::Result<String> {
        let mut file = File::open(path)?;
        let mut hasher = Blake3Hasher::new();

        let mut buffer = vec![0u8; CHUNK_SIZE];
        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize().to_hex().to_string())
    }

    /// Generate a BLAKE3 hash from an in-memory byte buffer.
    pub fn content_hash_from_bytes(data: &[u8]) -> String {
        let mut hasher = Blake3Hasher::new();
        hasher.update(data);
        hasher.finalize().to_hex().to_string()
    }
}
