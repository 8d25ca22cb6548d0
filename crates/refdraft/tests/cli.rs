//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const REFERENCE: &str = "Gardens need water every morning during summer. \
Healthy gardens attract bees and butterflies throughout the season. \
Water early so gardens lose less moisture to the afternoon heat. \
Mulch keeps the soil cool and holds water near the roots.";

/// Returns a Command configured to run our binary, with the simulated
/// latency switched off.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("REFDRAFT_GENERATE_DELAY_MS", "0")
        .env("REFDRAFT_DETECT_DELAY_MS", "0")
        .env_remove("RUST_LOG");
    cmd
}

/// Write `contents` to `name` inside `dir` and return the path as a string.
fn write_file(dir: &Path, name: &str, contents: &str) -> String {
    let path: PathBuf = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

fn stdout_json(args: &[&str]) -> Value {
    let output = cmd().args(args).output().expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("humanize"));
}

#[test]
fn long_help_lists_environment_variables() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("REFDRAFT_GENERATE_DELAY_MS"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let json = stdout_json(&["info", "--json"]);

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["config"]["generate_delay_ms"], 0);
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Generate Command
// =============================================================================

#[test]
fn generate_prints_document() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "notes.txt", REFERENCE);

    cmd()
        .args(["--color", "never", "generate", &file])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Analysis of Document"))
        .stdout(predicate::str::contains("## Key Topics Identified\n- Gardens"))
        .stdout(predicate::str::contains("This professional analysis"))
        .stdout(predicate::str::contains("Frequently Asked Questions").not())
        .stderr(predicate::str::contains("Detection score:"));
}

#[test]
fn generate_section_flags() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "notes.txt", REFERENCE);

    cmd()
        .args(["generate", &file, "--faq", "--no-cta", "--tone", "technical"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Frequently Asked Questions"))
        .stdout(predicate::str::contains("## Next Steps").not())
        .stdout(predicate::str::contains("This technical analysis"));
}

#[test]
fn generate_flags_reverse_configured_sections() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "notes.txt", REFERENCE);

    cmd()
        .env("REFDRAFT_GENERATION__INCLUDE_FAQ", "true")
        .env("REFDRAFT_GENERATION__INCLUDE_CTA", "false")
        .args(["generate", &file, "--no-faq", "--cta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frequently Asked Questions").not())
        .stdout(predicate::str::contains("## Next Steps"));
}

#[test]
fn generate_json_reports_score() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "notes.txt", REFERENCE);

    let json = stdout_json(&["generate", &file, "--json"]);
    assert_eq!(json["source"], "notes.txt");
    assert_eq!(json["humanized"], false);
    assert_eq!(json["document"]["topics"][0], "gardens");
    assert_eq!(json["detection"]["model"], "heuristic");
    let score = json["detection"]["score"].as_u64().unwrap();
    assert!((10..=50).contains(&score));
}

#[test]
fn generate_humanize_is_reproducible_with_seed() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "notes.txt", REFERENCE);
    let args = [
        "generate",
        file.as_str(),
        "--humanize",
        "--creativity",
        "1",
        "--seed",
        "17",
        "--json",
    ];

    let first = stdout_json(&args);
    let second = stdout_json(&args);
    assert_eq!(first["content"], second["content"]);
    assert_eq!(first["humanized"], true);
}

#[test]
fn generate_check_adds_simulated_report() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "notes.txt", REFERENCE);

    let json = stdout_json(&["generate", &file, "--check", "--json"]);
    assert_eq!(json["check"]["model"], "simulated");
    let score = json["check"]["score"].as_u64().unwrap();
    assert!((5..=18).contains(&score));
}

#[test]
fn generate_export_writes_named_file() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "garden.notes.txt", REFERENCE);
    let out_dir = tmp.path().join("out");
    fs::create_dir(&out_dir).unwrap();

    let json = stdout_json(&[
        "generate",
        &file,
        "--export",
        out_dir.to_str().unwrap(),
        "--json",
    ]);

    let exported = out_dir.join("garden_content.txt");
    assert_eq!(json["exported"], exported.to_str().unwrap());
    assert_eq!(
        fs::read_to_string(&exported).unwrap(),
        json["content"].as_str().unwrap()
    );
}

#[test]
fn generate_empty_reference_fails() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "empty.txt", "   \n");

    cmd()
        .args(["generate", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no reference text"));
}

#[test]
fn generate_unsupported_type_fails() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "photo.png", REFERENCE);

    cmd()
        .args(["generate", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file type"));
}

#[test]
fn generate_respects_input_limit() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "notes.txt", REFERENCE);

    cmd()
        .env("REFDRAFT_MAX_INPUT_BYTES", "16")
        .args(["generate", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

// =============================================================================
// Humanize Command
// =============================================================================

#[test]
fn humanize_zero_creativity_is_identity() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "draft.txt", REFERENCE);

    cmd()
        .args(["-q", "humanize", &file, "--creativity", "0"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{REFERENCE}\n")));
}

#[test]
fn humanize_reads_stdin() {
    let output = cmd()
        .args(["humanize", "-", "--creativity", "1", "--seed", "3", "--json"])
        .write_stdin(REFERENCE)
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_ne!(json["content"], REFERENCE);
    assert_eq!(json["creativity"], 1.0);
}

// =============================================================================
// Score Command
// =============================================================================

#[test]
fn score_plain_text_is_base_score() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "plain.txt", "zzz qqq");

    cmd()
        .args(["score", &file])
        .assert()
        .success()
        .stdout(predicate::str::diff("50\n"));
}

#[test]
fn score_counts_human_patterns() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "human.txt", "We believe this. However, basically done.");

    let json = stdout_json(&["score", &file, "--json"]);
    assert!(json["score"].as_u64().unwrap() < 50);
    assert_eq!(json["verdict"], "elevated");
}

#[test]
fn score_simulate_returns_low_score() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "long.txt", REFERENCE);

    let json = stdout_json(&["score", &file, "--simulate", "--seed", "4", "--json"]);
    assert_eq!(json["model"], "simulated");
    assert_eq!(json["verdict"], "low");
}

#[test]
fn score_simulate_rejects_short_text() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "short.txt", "Too short to check.");

    cmd()
        .args(["score", &file, "--simulate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient content"));
}

#[test]
fn score_seed_requires_simulate() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "plain.txt", "zzz qqq");

    cmd()
        .args(["score", &file, "--seed", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--simulate"));
}

// =============================================================================
// Topics Command
// =============================================================================

#[test]
fn topics_json_lists_topics_and_keywords() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "notes.txt", REFERENCE);

    let json = stdout_json(&["topics", &file, "--json"]);
    assert_eq!(json["topics"][0], "gardens");
    assert_eq!(json["topics"][1], "water");
    assert_eq!(json["keywords"][0], "Gardens");
    assert!(json["key_sentences"].as_array().unwrap().len() >= 3);
}

#[test]
fn topics_text_output() {
    let tmp = TempDir::new().unwrap();
    let file = write_file(tmp.path(), "notes.txt", REFERENCE);

    cmd()
        .args(["--color", "never", "topics", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. gardens"))
        .stdout(predicate::str::contains("Key sentences"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn missing_input_file_fails() {
    cmd()
        .args(["score", "/nonexistent/input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_flag_changes_directory() {
    cmd().args(["-C", "/tmp", "info"]).assert().success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}
