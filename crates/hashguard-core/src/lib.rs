//! hashguard-core - hash-verified local file copies
//!
//! Copies a file and proves the copy is intact by digesting the source before
//! the copy and the destination after it.
//!
//! # Overview
//!
//! - [`compute_digest`] streams a file through a named algorithm and returns
//!   its lowercase hex digest.
//! - [`verified_copy`] runs `digest(source) -> copy -> digest(dest)` and
//!   returns a [`CopyResult`]. A mismatch is a normal result
//!   (`matched() == false`), not an error.
//! - [`available_algorithms`] lists every name [`HashAlgorithm`] accepts.
//!
//! Everything is synchronous and single-threaded. Calls on disjoint paths are
//! independent; nothing coordinates access to a shared destination.
//!
//! # Example
//!
//! ```no_run
//! use hashguard_core::verified_copy;
//!
//! let result = verified_copy("report.pdf", "backup/report.pdf", "sha256")?;
//! if !result.matched() {
//!     eprintln!("copy is corrupt: {} != {}", result.source_hash(), result.dest_hash());
//! }
//! # Ok::<(), hashguard_core::Error>(())
//! ```

pub mod algorithm;
pub mod copy;
pub mod digest;
pub mod error;

pub use self::algorithm::{
    HashAlgorithm, Hasher, IntoHashAlgorithm, available_algorithms, is_supported,
};
pub use self::copy::{CopyOptions, CopyResult, verified_copy, verified_copy_with};
pub use self::digest::{DEFAULT_CHUNK_SIZE, compute_digest, compute_digest_with, digest_reader};
pub use self::error::{Error, Result};
