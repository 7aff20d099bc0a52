//! Exposes `HASHGUARD_VERSION` to the binary.
//!
//! Checkouts with tags get `git describe` output (leading `v` dropped,
//! `-dev` suffix when dirty). Tarball builds fall back to the package version.

use std::process::Command;

fn git_version() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty=-dev"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8(output.stdout).ok()?;
    let version = described.trim().trim_start_matches('v');
    (!version.is_empty()).then(|| version.to_owned())
}

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");

    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_owned());
    println!("cargo:rustc-env=HASHGUARD_VERSION={version}");
}
