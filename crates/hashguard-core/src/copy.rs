//! Verified copy
//!
//! `digest(source) -> copy -> digest(destination) -> compare`. The destination
//! digest is always read back from disk after the copied data has been synced;
//! a mismatch is reported in the result, never as an error.

use std::fs::{self, File, FileTimes, Metadata};
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::algorithm::{HashAlgorithm, IntoHashAlgorithm};
use crate::digest::{DEFAULT_CHUNK_SIZE, compute_digest_with};
use crate::error::{Error, Result};

/// Tuning knobs for [`verified_copy_with`].
#[derive(Debug, Clone, Copy)]
pub struct CopyOptions {
    chunk_size: NonZeroUsize,
    preserve_metadata: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyOptions {
    /// 4 KiB digest chunks, metadata preserved.
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            preserve_metadata: true,
        }
    }

    /// Streaming buffer size used for both digests.
    pub fn chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Copy permission bits and access/modification times to the destination.
    pub fn preserve_metadata(mut self, preserve: bool) -> Self {
        self.preserve_metadata = preserve;
        self
    }

    /// Configured chunk size.
    pub fn get_chunk_size(&self) -> NonZeroUsize {
        self.chunk_size
    }

    /// Whether metadata is preserved.
    pub fn get_preserve_metadata(&self) -> bool {
        self.preserve_metadata
    }
}

/// Outcome of one verified copy.
///
/// Serializes with a `match` key for the comparison outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyResult {
    #[serde(rename = "match")]
    matched: bool,
    source_hash: String,
    dest_hash: String,
    algorithm: HashAlgorithm,
    source: PathBuf,
    destination: PathBuf,
}

impl CopyResult {
    /// `true` iff both digests are equal.
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Hex digest of the source, taken before the copy.
    pub fn source_hash(&self) -> &str {
        &self.source_hash
    }

    /// Hex digest of the destination, read back after the copy.
    pub fn dest_hash(&self) -> &str {
        &self.dest_hash
    }

    /// Algorithm used for both digests.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Source path as given.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// File actually written. Differs from the requested destination when
    /// that was an existing directory.
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// Copy `source` to `dest` and verify the copy with `algorithm`.
///
/// If `dest` is an existing directory the file is written to
/// `dest/<source file name>`. The destination is created or overwritten;
/// the source is never modified.
///
/// # Errors
///
/// - [`Error::UnsupportedAlgorithm`] before anything touches the disk.
/// - [`Error::FileNotFound`] if the source cannot be digested; no
///   destination is created.
/// - [`Error::CopyFailed`] if the bytes could not be written, including when
///   source and destination are the same file.
pub fn verified_copy(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    algorithm: impl IntoHashAlgorithm,
) -> Result<CopyResult> {
    verified_copy_with(source, dest, algorithm, &CopyOptions::new())
}

/// [`verified_copy`] with explicit [`CopyOptions`].
///
/// # Errors
///
/// Same as [`verified_copy`].
pub fn verified_copy_with(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    algorithm: impl IntoHashAlgorithm,
    options: &CopyOptions,
) -> Result<CopyResult> {
    let algorithm = algorithm.into_hash_algorithm()?;
    let source = source.as_ref();
    let dest = dest.as_ref();

    tracing::debug!("Hashing source {} with {algorithm}", source.display());
    let source_hash = compute_digest_with(source, algorithm, options.chunk_size)?;

    let target = resolve_target(source, dest)?;
    tracing::debug!("Copying {} -> {}", source.display(), target.display());
    let written = copy_file(source, &target, options.preserve_metadata)
        .map_err(|e| Error::copy_failed(source, &target, e))?;
    tracing::debug!("Copied {written} bytes");

    tracing::debug!("Hashing destination {}", target.display());
    let dest_hash = compute_digest_with(&target, algorithm, options.chunk_size)?;

    let matched = source_hash == dest_hash;
    if !matched {
        tracing::debug!(
            "Digest mismatch for {}: {source_hash} != {dest_hash}",
            target.display()
        );
    }

    Ok(CopyResult {
        matched,
        source_hash,
        dest_hash,
        algorithm,
        source: source.to_path_buf(),
        destination: target,
    })
}

fn resolve_target(source: &Path, dest: &Path) -> Result<PathBuf> {
    if !dest.is_dir() {
        return Ok(dest.to_path_buf());
    }
    match source.file_name() {
        Some(name) => Ok(dest.join(name)),
        None => Err(Error::copy_failed(
            source,
            dest,
            io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
        )),
    }
}

/// Stream `source` into `target`, sync it, then apply metadata best-effort.
///
/// Both handles are dropped before returning, on every path.
fn copy_file(source: &Path, target: &Path, preserve_metadata: bool) -> io::Result<u64> {
    let mut reader = File::open(source)?;
    let source_meta = reader.metadata()?;

    if is_same_file(source, &source_meta, target) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source and destination are the same file",
        ));
    }

    let mut writer = File::create(target)?;
    let written = io::copy(&mut reader, &mut writer)?;
    writer.sync_all()?;

    if preserve_metadata {
        preserve(&writer, &source_meta, target);
    }

    Ok(written)
}

fn preserve(writer: &File, source_meta: &Metadata, target: &Path) {
    let mut times = FileTimes::new();
    if let Ok(modified) = source_meta.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = source_meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Err(e) = writer.set_times(times) {
        tracing::warn!("Could not preserve timestamps on {}: {e}", target.display());
    }
    if let Err(e) = writer.set_permissions(source_meta.permissions()) {
        tracing::warn!("Could not preserve permissions on {}: {e}", target.display());
    }
}

#[cfg(unix)]
fn is_same_file(_source: &Path, source_meta: &Metadata, target: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    fs::metadata(target)
        .is_ok_and(|m| m.dev() == source_meta.dev() && m.ino() == source_meta.ino())
}

#[cfg(not(unix))]
fn is_same_file(source: &Path, _source_meta: &Metadata, target: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
