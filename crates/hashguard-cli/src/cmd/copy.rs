//! Verified copy command

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use hashguard_core::{CopyOptions, CopyResult, HashAlgorithm, verified_copy_with};

use crate::{Cli, MISMATCH_EXIT_CODE};

/// Validate the arguments, run the verified copy and report the outcome.
///
/// A mismatch is only an error exit when `--strict` is set.
///
/// # Errors
///
/// Fails if the source is missing, the algorithm is unknown, or the copy
/// itself fails.
pub fn copy(cli: &Cli) -> Result<ExitCode> {
    let (Some(source), Some(dest), Some(hashalg)) = (&cli.sourcefile, &cli.destfile, &cli.hashalg)
    else {
        bail!("sourcefile, destfile and hashalg are required unless --list-algorithms is given");
    };

    if !source.exists() {
        bail!("source file not found: {}", source.display());
    }
    let algorithm: HashAlgorithm = hashalg.parse()?;

    let options = CopyOptions::new().chunk_size(cli.chunk_size);
    let result = verified_copy_with(source, dest, algorithm, &options)?;
    tracing::debug!(
        "{} -> {}: {}",
        result.source().display(),
        result.destination().display(),
        if result.matched() { "match" } else { "mismatch" }
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        let json = serde_json::to_string(&result).context("Failed to serialize result")?;
        writeln!(out, "{json}")?;
    } else if cli.verbose {
        write_report(&mut out, &result)?;
    }
    out.flush()?;

    if cli.strict && !result.matched() {
        return Ok(ExitCode::from(MISMATCH_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

/// Write the four-line verbose report.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn write_report(out: &mut impl Write, result: &CopyResult) -> io::Result<()> {
    writeln!(out, "Source Hash: {}", result.source_hash())?;
    writeln!(out, "Dest Hash: {}", result.dest_hash())?;
    writeln!(out, "Algorithm: {}", result.algorithm())?;
    if result.matched() {
        writeln!(out, "✅ Match")
    } else {
        writeln!(out, "❌ Mismatch")
    }
}
