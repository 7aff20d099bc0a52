//! List algorithms command

use std::io::{self, Write};

use hashguard_core::available_algorithms;

/// Print every supported algorithm, one per line.
///
/// # Errors
///
/// Fails if stdout cannot be written.
pub fn list() -> io::Result<()> {
    let stdout = io::stdout();
    write_algorithms(&mut stdout.lock())
}

/// Write the sorted algorithm names to `out`.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn write_algorithms(out: &mut impl Write) -> io::Result<()> {
    for name in available_algorithms() {
        writeln!(out, "{name}")?;
    }
    out.flush()
}
