//! Runs the built `hashguard` binary against scratch files.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const HELLO_WORLD_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

/// Test context with a scratch directory for source and destination files
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        Self { temp_dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("failed to write test file");
        path
    }

    fn hashguard_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_hashguard");
        let mut cmd = Command::new(bin_path);
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&dyn AsRef<OsStr>]) -> Output {
        self.hashguard_cmd()
            .args(args.iter().map(|a| AsRef::<OsStr>::as_ref(*a)))
            .output()
            .expect("failed to run hashguard")
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.run(&[&"--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--list-algorithms"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx.run(&[&"--version"]);
    assert!(output.status.success());
}

#[test]
fn test_list_algorithms_without_positionals() {
    let ctx = TestContext::new();
    let output = ctx.run(&[&"-l"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout.lines().collect();
    assert!(names.contains(&"sha256"));
    assert!(names.contains(&"md5"));
    assert!(names.iter().all(|n| *n == n.to_lowercase()));
    assert!(
        names
            .windows(2)
            .all(|w| w[0].to_lowercase() <= w[1].to_lowercase()),
        "list should be sorted case-insensitively"
    );
}

#[test]
fn test_list_algorithms_ignores_invalid_paths() {
    let ctx = TestContext::new();
    let output = ctx.run(&[&"--list-algorithms", &"nonexistent.file", &"dest.txt", &"fakealg"]);
    assert!(output.status.success());
    assert!(!ctx.path("dest.txt").exists(), "list should not copy");
}

#[test]
fn test_missing_positionals_is_usage_error() {
    let ctx = TestContext::new();
    let output = ctx.run(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_quiet_copy_succeeds() {
    let ctx = TestContext::new();
    let src = ctx.write("source.txt", b"hello world");
    let dest = ctx.path("dest.txt");

    let output = ctx.run(&[&src, &dest, &"sha256"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "non-verbose copy prints nothing");
    assert_eq!(std::fs::read(&dest).unwrap(), b"hello world");
}

#[test]
fn test_verbose_copy_prints_report() {
    let ctx = TestContext::new();
    let src = ctx.write("source.txt", b"hello world");
    let dest = ctx.path("dest.txt");

    let output = ctx.run(&[&"-v", &src, &dest, &"SHA256"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], format!("Source Hash: {HELLO_WORLD_SHA256}"));
    assert_eq!(lines[1], format!("Dest Hash: {HELLO_WORLD_SHA256}"));
    assert_eq!(lines[2], "Algorithm: sha256");
    assert_eq!(lines[3], "✅ Match");
}

#[test]
fn test_json_output() {
    let ctx = TestContext::new();
    let src = ctx.write("source.txt", b"hello");
    let dest = ctx.path("dest.txt");

    let output = ctx.run(&[&"--json", &src, &dest, &"md5"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"match\":true"));
    assert!(stdout.contains("\"algorithm\":\"md5\""));
    assert!(stdout.contains("5d41402abc4b2a76b9719d911017c592"));
}

#[test]
fn test_missing_source_is_fatal() {
    let ctx = TestContext::new();
    let dest = ctx.path("dest.txt");

    let output = ctx.run(&[&"nonexistent.file", &dest, &"sha256"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("source file not found"));
    assert!(!dest.exists());
}

#[test]
fn test_unsupported_algorithm_is_fatal() {
    let ctx = TestContext::new();
    let src = ctx.write("source.txt", b"test");
    let dest = ctx.path("dest.txt");

    let output = ctx.run(&[&src, &dest, &"fakealgoxyz"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported hashing algorithm"));
    assert!(!dest.exists());
}

#[test]
fn test_copy_into_missing_directory_fails() {
    let ctx = TestContext::new();
    let src = ctx.write("source.txt", b"test");
    let dest = ctx.path("missing").join("dest.txt");

    let output = ctx.run(&[&src, &dest, &"sha256"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed"));
}

#[test]
fn test_strict_with_matching_copy_exits_zero() {
    let ctx = TestContext::new();
    let src = ctx.write("source.txt", b"strict content");
    let dest = ctx.path("dest.txt");

    let output = ctx.run(&[&"--strict", &"--chunk-size", &"7", &src, &dest, &"blake3"]);

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_zero_chunk_size_is_rejected() {
    let ctx = TestContext::new();
    let src = ctx.write("source.txt", b"data");
    let dest = ctx.path("dest.txt");

    let output = ctx.run(&[&"--chunk-size", &"0", &src, &dest, &"sha256"]);

    assert!(!output.status.success());
    assert!(!dest.exists());
}

// Each read yields a fresh UUID, so a copy of it never matches its source digest.
#[cfg(target_os = "linux")]
const UUID_SOURCE: &str = "/proc/sys/kernel/random/uuid";

#[cfg(target_os = "linux")]
#[test]
fn test_quiet_mismatch_prints_nothing() {
    let ctx = TestContext::new();
    let dest = ctx.path("uuid.txt");

    let output = ctx.run(&[&UUID_SOURCE, &dest, &"sha256"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(
        output.stderr.is_empty(),
        "mismatch leaked to stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_verbose_mismatch_report() {
    let ctx = TestContext::new();
    let dest = ctx.path("uuid.txt");

    let output = ctx.run(&[&"-v", &UUID_SOURCE, &dest, &"md5"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_ne!(lines[0]["Source Hash: ".len()..], lines[1]["Dest Hash: ".len()..]);
    assert_eq!(lines[2], "Algorithm: md5");
    assert_eq!(lines[3], "❌ Mismatch");
}

#[cfg(target_os = "linux")]
#[test]
fn test_strict_mismatch_exits_two() {
    let ctx = TestContext::new();
    let dest = ctx.path("uuid.txt");

    let output = ctx.run(&[&"--strict", &"--json", &UUID_SOURCE, &dest, &"sha1"]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"match\":false"));
}
