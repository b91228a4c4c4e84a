//! End-to-end tests for the stree command line.
//!
//! Each test runs the built binary against fixtures in a temporary
//! directory, with the app data directory redirected there as well so the
//! user's config is never read.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const LONG_TEXT: &str = "Constructing such a tree for the string S takes time and space linear in the length of S.\nOnce constructed, several operations can be performed quickly, for instance locating a substring in S.\nThese speedups come at a cost: storing a string's suffix tree typically requires significantly more space than storing the string itself.\n";

/// Get path to stree binary
fn stree_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stree"))
}

/// Create an isolated fixture directory with a text file
fn setup_fixtures() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create fixture dir");
    fs::write(dir.path().join("long.txt"), LONG_TEXT).unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();
    dir
}

/// Run stree with given args, returning (stdout, stderr, exit code)
fn run_stree(args: &[&str], dir: &Path) -> (String, String, i32) {
    let output = Command::new(stree_binary())
        .args(args)
        .current_dir(dir)
        .env("XDG_DATA_HOME", dir.join("data"))
        .env("HOME", dir)
        .output()
        .expect("Failed to run stree");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

#[test]
fn test_search_text() {
    let dir = setup_fixtures();
    let (stdout, _, code) = run_stree(
        &["search", "--no-color", "--text", "papua", "pua", "xyz"],
        dir.path(),
    );

    assert_eq!(code, 0);
    assert_eq!(stdout, "<text>:1:3:2:papua\n");
}

#[test]
fn test_search_file() {
    let dir = setup_fixtures();
    let (stdout, _, code) = run_stree(
        &["search", "--no-color", "--file", "long.txt", "Constructing", "locating", "itself"],
        dir.path(),
    );

    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("long.txt:1:1:0:Constructing such a tree"));
    assert!(lines[1].starts_with("long.txt:2:"));
    assert!(lines[2].starts_with("long.txt:3:"));

    // Every reported offset must actually spell the pattern
    for (line, pattern) in lines.iter().zip(["Constructing", "locating", "itself"]) {
        let offset: usize = line.split(':').nth(3).unwrap().parse().unwrap();
        assert_eq!(&LONG_TEXT[offset..offset + pattern.len()], pattern);
    }
}

#[test]
fn test_search_no_match_exit_code() {
    let dir = setup_fixtures();
    let (stdout, _, code) = run_stree(
        &["search", "--no-color", "--file", "long.txt", "xyzzy"],
        dir.path(),
    );

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
}

#[test]
fn test_search_empty_file() {
    let dir = setup_fixtures();
    let (stdout, _, code) = run_stree(
        &["search", "--no-color", "--file", "empty.txt", "a"],
        dir.path(),
    );

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
}

#[test]
fn test_search_missing_file() {
    let dir = setup_fixtures();
    let (_, stderr, code) = run_stree(
        &["search", "--file", "missing.txt", "a"],
        dir.path(),
    );

    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to open"), "{}", stderr);
}

#[test]
fn test_input_is_required() {
    let dir = setup_fixtures();
    let (_, _, code) = run_stree(&["search", "pattern"], dir.path());
    assert_ne!(code, 0);
}

#[test]
fn test_verbose_reports_build() {
    let dir = setup_fixtures();
    let (_, stderr, code) = run_stree(
        &["--verbose", "search", "--no-color", "--text", "papua", "pua", "xyz"],
        dir.path(),
    );

    assert_eq!(code, 0);
    assert!(stderr.contains("stree: indexed 5 bytes"), "{}", stderr);
    assert!(stderr.contains("stree: no match for \"xyz\""), "{}", stderr);
}

#[test]
fn test_dump() {
    let dir = setup_fixtures();
    let (stdout, _, code) = run_stree(&["dump", "--text", "papua"], dir.path());

    assert_eq!(code, 0);
    assert_eq!(stdout, "p\n-apua\n-ua\na\n-pua\nua\n*** 6 nodes in tree.\n");
}

#[test]
fn test_stats_json() {
    let dir = setup_fixtures();
    let (stdout, _, code) = run_stree(&["stats", "--json", "--text", "aaaa"], dir.path());

    assert_eq!(code, 0);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["text_len"], 4);
    assert_eq!(stats["node_count"], 4);
    assert_eq!(stats["max_depth"], 4);
}

#[test]
fn test_stats_text() {
    let dir = setup_fixtures();
    let (stdout, _, code) = run_stree(&["stats", "--file", "long.txt"], dir.path());

    assert_eq!(code, 0);
    assert!(stdout.contains("Source:           long.txt"));
    assert!(stdout.contains("Nodes:"));
}

// The config location follows XDG_DATA_HOME only on Linux
#[cfg(target_os = "linux")]
#[test]
fn test_size_limit_and_force() {
    let dir = setup_fixtures();
    let config_dir = dir.path().join("data").join("stree");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.json"), r#"{"max_text_size": 16}"#).unwrap();

    let (_, stderr, code) = run_stree(
        &["search", "--no-color", "--file", "long.txt", "tree"],
        dir.path(),
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("--force"), "{}", stderr);

    let (stdout, _, code) = run_stree(
        &["search", "--force", "--no-color", "--file", "long.txt", "tree"],
        dir.path(),
    );
    assert_eq!(code, 0);
    assert!(stdout.starts_with("long.txt:1:"));
}

#[test]
fn test_config_defaults() {
    let dir = setup_fixtures();
    let (stdout, _, code) = run_stree(&["config"], dir.path());

    assert_eq!(code, 0);
    assert!(stdout.contains("Config file:"));
    assert!(stdout.contains("\"max_text_size\": 4194304"));
}

// The config location follows XDG_DATA_HOME only on Linux
#[cfg(target_os = "linux")]
#[test]
fn test_config_init_writes_file() {
    let dir = setup_fixtures();
    let config_dir = dir.path().join("data").join("stree");

    // Showing the config leaves the data directory alone
    let (_, _, code) = run_stree(&["config"], dir.path());
    assert_eq!(code, 0);
    assert!(!config_dir.exists());

    let (stdout, _, code) = run_stree(&["config", "--init"], dir.path());
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Wrote "), "{}", stdout);

    let written = fs::read_to_string(config_dir.join("config.json")).unwrap();
    let config: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(config["max_text_size"], 4194304);
}
