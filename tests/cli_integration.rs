//! Integration tests for the `greet` CLI.
//!
//! Each test works in a temp directory, runs `greet` as a subprocess,
//! and verifies stdout and/or file contents.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `greet` binary.
fn greet_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("greet");
    path
}

/// A catalog with twelve numbered English greetings and a short Chinese list.
fn write_catalog(dir: &Path) -> PathBuf {
    let mut text = String::from("[en]\nfallback = \"Morning, friend\"\ngreetings = [\n");
    for i in 0..12 {
        text.push_str(&format!("    \"Greeting {}\",\n", i));
    }
    text.push_str("]\n\n[zh-CN]\nfallback = \"早上好\"\ngreetings = [\"{{hoursLeft}} 小时\"]\n\n[de]\nfallback = \"Guten Morgen\"\ngreetings = []\n");
    let path = dir.join("catalog.toml");
    fs::write(&path, text).unwrap();
    path
}

/// Run `greet` with the given args in the given directory, returning (stdout, stderr, success).
fn run_greet(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(greet_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("GREET_LOG")
        .output()
        .expect("failed to run greet");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `greet` expecting success, return stdout.
fn run_greet_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_greet(dir, args);
    if !success {
        panic!(
            "greet {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

// ---------------------------------------------------------------------------
// Greeting commands
// ---------------------------------------------------------------------------

#[test]
fn test_default_prints_one_greeting() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_greet_ok(tmp.path(), &[]);
    assert_eq!(out.lines().count(), 1);
    assert!(!out.trim().is_empty());
}

#[test]
fn test_once_avoids_recent_repeats() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path());

    let out = run_greet_ok(
        tmp.path(),
        &["once", "-n", "8", "--catalog", "catalog.toml", "--seed", "3"],
    );
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines.iter().all(|l| l.starts_with("Greeting ")));
    let distinct: HashSet<&&str> = lines.iter().collect();
    assert_eq!(distinct.len(), 8, "repeat within history window: {:?}", lines);
}

#[test]
fn test_seed_is_reproducible() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path());
    let args = ["once", "-n", "5", "--catalog", "catalog.toml", "--seed", "42"];
    assert_eq!(run_greet_ok(tmp.path(), &args), run_greet_ok(tmp.path(), &args));
}

#[test]
fn test_missing_language_uses_fallback() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path());

    let out = run_greet_ok(tmp.path(), &["--catalog", "catalog.toml", "--lang", "de"]);
    assert_eq!(out.trim(), "Guten Morgen");

    let out = run_greet_ok(tmp.path(), &["--catalog", "catalog.toml", "--lang", "fr"]);
    assert_eq!(out.trim(), "Morning, friend");
}

#[test]
fn test_hours_left_placeholder() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path());

    let out = run_greet_ok(tmp.path(), &["--catalog", "catalog.toml", "-l", "zh-CN"]);
    let hours: u32 = out.trim().trim_end_matches(" 小时").parse().unwrap();
    assert!((1..=24).contains(&hours));
}

#[test]
fn test_once_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path());

    let out = run_greet_ok(
        tmp.path(),
        &["once", "-n", "2", "--catalog", "catalog.toml", "--json"],
    );
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["language"], "en");
    assert!(arr[0]["index"].as_u64().unwrap() < 12);
    assert!(arr[0]["text"].as_str().unwrap().starts_with("Greeting "));
}

#[test]
fn test_fallback_json_has_no_index() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path());

    let out = run_greet_ok(tmp.path(), &["--catalog", "catalog.toml", "-l", "de", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(parsed[0].get("index").is_none());
    assert_eq!(parsed[0]["text"], "Guten Morgen");
}

#[test]
fn test_watch_with_count() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path());

    let out = run_greet_ok(
        tmp.path(),
        &["watch", "--interval", "0.01", "-n", "3", "--catalog", "catalog.toml"],
    );
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn test_watch_json_lines() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path());

    let out = run_greet_ok(
        tmp.path(),
        &["watch", "--interval", "0.01", "-n", "2", "--catalog", "catalog.toml", "--json"],
    );
    for line in out.lines() {
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["language"], "en");
    }
}

#[test]
fn test_watch_rejects_bad_interval() {
    let tmp = tempfile::TempDir::new().unwrap();
    for interval in ["0", "-2", "1e300", "inf"] {
        let (_, stderr, success) =
            run_greet(tmp.path(), &["watch", "--interval", interval, "-n", "1"]);
        assert!(!success, "interval {} was accepted", interval);
        assert!(
            stderr.starts_with("error: interval must be a positive number"),
            "interval {}: {}",
            interval,
            stderr
        );
    }
}

// ---------------------------------------------------------------------------
// Catalog commands
// ---------------------------------------------------------------------------

#[test]
fn test_languages() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path());

    let out = run_greet_ok(tmp.path(), &["languages", "--catalog", "catalog.toml"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("en "));
    assert!(lines[0].contains("12 greetings"));
    assert!(lines[1].contains("1 greeting "));
    assert!(lines[2].contains("(Guten Morgen)"));
}

#[test]
fn test_languages_json_builtin() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_greet_ok(tmp.path(), &["languages", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let langs: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["language"].as_str().unwrap())
        .collect();
    assert_eq!(langs, vec!["en", "zh-CN"]);
}

#[test]
fn test_check_builtin_is_valid() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_greet_ok(tmp.path(), &["check"]);
    assert!(out.contains("✓ catalog is valid"));
}

#[test]
fn test_check_reports_errors() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("bad.toml"),
        "[en]\ngreetings = [\"Year {{year}}\"]\n",
    )
    .unwrap();

    let (stdout, stderr, success) = run_greet(tmp.path(), &["check", "--catalog", "bad.toml"]);
    assert!(!success);
    assert!(stdout.contains("Errors:"));
    assert!(stdout.contains("[en] #0 uses unknown placeholder {{year}}"));
    assert!(stdout.contains("Warnings:"));
    assert!(stdout.contains("✗ catalog has errors"));
    assert!(stderr.contains("catalog check failed"));
}

#[test]
fn test_check_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path());

    let out = run_greet_ok(tmp.path(), &["check", "--catalog", "catalog.toml", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["valid"], true);
    let kinds: Vec<&str> = parsed["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["short_list", "empty_list"]);
}

#[test]
fn test_unreadable_catalog_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_greet(tmp.path(), &["--catalog", "nope.toml"]);
    assert!(!success);
    assert!(stderr.starts_with("error: could not read"));
}

// ---------------------------------------------------------------------------
// Init and config
// ---------------------------------------------------------------------------

#[test]
fn test_init_writes_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_greet_ok(tmp.path(), &["init"]);
    assert!(out.contains("Created greeter.toml"));
    assert!(tmp.path().join("greeter.toml").is_file());
    assert!(!tmp.path().join("catalog.toml").exists());

    let (_, stderr, success) = run_greet(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));

    run_greet_ok(tmp.path(), &["init", "--force"]);
}

#[test]
fn test_init_with_catalog_is_used() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_greet_ok(tmp.path(), &["init", "--with-catalog"]);
    assert!(tmp.path().join("catalog.toml").is_file());

    // Replace the copied catalog; greet should pick the edit up via greeter.toml
    fs::write(
        tmp.path().join("catalog.toml"),
        "[en]\ngreetings = [\"Edited greeting\"]\n",
    )
    .unwrap();
    let out = run_greet_ok(tmp.path(), &[]);
    assert_eq!(out.trim(), "Edited greeting");
}

#[test]
fn test_config_set_and_show() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_greet_ok(tmp.path(), &["init"]);

    let out = run_greet_ok(tmp.path(), &["config", "set", "greeting.language", "zh-CN"]);
    assert_eq!(out.trim(), "greeting.language = zh-CN");
    let text = fs::read_to_string(tmp.path().join("greeter.toml")).unwrap();
    assert!(text.contains("language = \"zh-CN\""));
    assert!(text.contains("# How many recent greetings"));

    let out = run_greet_ok(tmp.path(), &["config", "show"]);
    assert!(out.contains("language: zh-CN"));
    assert!(out.contains("greeting.max_recent = 8"));
    assert!(out.contains("catalog: (built-in)"));

    // --lang still wins over the config
    let out = run_greet_ok(tmp.path(), &["config", "show", "--json", "--lang", "en"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["language"], "en");
    assert_eq!(parsed["greeting"]["language"], "zh-CN");
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_greet_ok(tmp.path(), &["init"]);
    let (_, stderr, success) = run_greet(tmp.path(), &["config", "set", "greeting.colour", "red"]);
    assert!(!success);
    assert!(stderr.contains("unknown config key: greeting.colour"));
}

#[test]
fn test_config_set_without_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_greet(tmp.path(), &["config", "set", "greeting.language", "en"]);
    assert!(!success);
    assert!(stderr.contains("greet init"));
}
