// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Line terminator the binary writes after each chunk
pub const NL: &str = if cfg!(windows) { "\r\n" } else { "\n" };

pub fn strainer_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_strainer"))
}

/// Build a command isolated from the user's own configuration files
pub fn strainer_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(strainer_binary());
    cmd.current_dir(dir)
        .args(args)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("USERPROFILE", dir)
        .env("APPDATA", dir.join("AppData"))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn collect(output: Output) -> (String, String, i32) {
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Run strainer inside `dir`
pub fn run_strainer_in_dir(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = strainer_command(dir, args)
        .output()
        .expect("Failed to execute strainer");
    collect(output)
}

/// Write `content` to a temporary file and run strainer on it.
/// The file path is appended after `args`.
pub fn run_strainer_with_file(args: &[&str], content: &str) -> (String, String, i32) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_file(dir.path(), "input.txt", content);

    let mut full_args = args.to_vec();
    full_args.push(input.to_str().expect("utf-8 temp path"));
    run_strainer_in_dir(dir.path(), &full_args)
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// `count` numbered lines, each terminated by `\n`
pub fn numbered_lines(count: usize) -> String {
    (1..=count).map(|i| format!("Line {}\n", i)).collect()
}
