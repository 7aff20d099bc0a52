//! Digest engine
//!
//! Streams a file through a registry hasher in fixed-size chunks and returns
//! the lowercase hex digest. The chunk size only controls I/O granularity;
//! the digest is identical for every chunk size.

use std::fs::File;
use std::io::{self, Read};
use std::num::NonZeroUsize;
use std::path::Path;

use crate::algorithm::{HashAlgorithm, IntoHashAlgorithm};
use crate::error::{Error, Result};

/// Default streaming buffer size in bytes.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(size) => size,
    None => unreachable!(),
};

/// Compute the hex digest of the file at `path` using 4 KiB chunks.
///
/// # Errors
///
/// [`Error::UnsupportedAlgorithm`] if `algorithm` is unknown (checked before
/// the file is opened), [`Error::FileNotFound`] if the file is missing, is
/// not a regular file, or fails to read.
pub fn compute_digest(path: impl AsRef<Path>, algorithm: impl IntoHashAlgorithm) -> Result<String> {
    compute_digest_with(path, algorithm, DEFAULT_CHUNK_SIZE)
}

/// Compute the hex digest of the file at `path`, reading `chunk_size` bytes
/// at a time.
///
/// # Errors
///
/// Same as [`compute_digest`].
pub fn compute_digest_with(
    path: impl AsRef<Path>,
    algorithm: impl IntoHashAlgorithm,
    chunk_size: NonZeroUsize,
) -> Result<String> {
    let algorithm = algorithm.into_hash_algorithm()?;
    let path = path.as_ref();

    let file = open_regular_file(path).map_err(|e| Error::file_not_found(path, e))?;
    let (digest, bytes) =
        stream_digest(file, algorithm, chunk_size).map_err(|e| Error::file_not_found(path, e))?;

    tracing::trace!("{algorithm} of {} ({bytes} bytes): {digest}", path.display());
    Ok(digest)
}

/// Digest everything `reader` yields until EOF.
///
/// # Errors
///
/// Propagates any read error other than [`io::ErrorKind::Interrupted`].
pub fn digest_reader<R: Read>(
    reader: R,
    algorithm: HashAlgorithm,
    chunk_size: NonZeroUsize,
) -> io::Result<String> {
    stream_digest(reader, algorithm, chunk_size).map(|(digest, _)| digest)
}

fn open_regular_file(path: &Path) -> io::Result<File> {
    let file = File::open(path)?;
    if !file.metadata()?.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    Ok(file)
}

fn stream_digest<R: Read>(
    mut reader: R,
    algorithm: HashAlgorithm,
    chunk_size: NonZeroUsize,
) -> io::Result<(String, u64)> {
    let mut hasher = algorithm.hasher();
    let mut buffer = vec![0u8; chunk_size.get()];
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
        total += bytes_read as u64;
    }

    Ok((hex::encode(hasher.finalize()), total))
}
