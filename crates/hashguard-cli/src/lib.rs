//! hashguard - secure local file copy
//!
//! Command-line front end over [`hashguard_core`]. Parses arguments,
//! validates the source and algorithm before anything is written, and
//! formats the [`CopyResult`](hashguard_core::CopyResult) for the terminal.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use hashguard_core::DEFAULT_CHUNK_SIZE;

pub mod cmd;

/// Exit status when `--strict` is set and the digests differ.
pub const MISMATCH_EXIT_CODE: u8 = 2;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "hashguard")]
#[command(
    author,
    version = env!("HASHGUARD_VERSION"),
    about = "Secure local file copy with hash verification"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source file path to copy
    #[arg(required_unless_present = "list_algorithms")]
    pub sourcefile: Option<PathBuf>,

    /// Destination file path (an existing directory receives the source file name)
    #[arg(required_unless_present = "list_algorithms")]
    pub destfile: Option<PathBuf>,

    /// Hash algorithm to use (case-insensitive, see --list-algorithms)
    #[arg(required_unless_present = "list_algorithms")]
    pub hashalg: Option<String>,

    /// List available hashing algorithms and exit
    #[arg(short, long)]
    pub list_algorithms: bool,

    /// Show the result of the copy operation
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the result as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Exit with status 2 when the destination digest does not match
    #[arg(long)]
    pub strict: bool,

    /// Read buffer size in bytes used while hashing
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: NonZeroUsize,
}
