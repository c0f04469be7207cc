//! Tests for the `repsheet plan` command

use std::path::PathBuf;
use std::process::Command;

fn repsheet_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("target/debug/repsheet")
}

#[test]
fn plan_prints_the_text_table() {
    let result = Command::new(repsheet_binary())
        .args(["plan"])
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("PullUp Progression"), "Should name the sheet");
    assert!(stdout.contains("Week 1 Total Volume"), "Should show weekly totals");
    assert!(stdout.contains("Block 3 Total Volume"), "Should show block totals");
    assert!(stdout.contains("Test Day"), "Should include the final test day");
}

#[test]
fn plan_push_up_uses_its_own_pr() {
    let result = Command::new(repsheet_binary())
        .args(["plan", "--exercise", "push-up"])
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("PushUp Progression"));
    assert!(stdout.contains("Max PR: 25"));
}

#[test]
fn plan_json_is_parseable() {
    let result = Command::new(repsheet_binary())
        .args(["plan", "--format", "json"])
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success(), "Command should succeed");
    let value: serde_json::Value =
        serde_json::from_slice(&result.stdout).expect("stdout should be valid JSON");
    assert_eq!(value["exercise"]["name"], "Pull-Up");
    assert!(
        value["rows"].as_array().map(|r| r.len()) == Some(66),
        "JSON dump should carry the full row layout"
    );
}

#[test]
fn plan_rejects_unknown_format() {
    let result = Command::new(repsheet_binary())
        .args(["plan", "--format", "yaml"])
        .output()
        .expect("Failed to execute command");

    assert!(!result.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("unsupported format"));
}

#[test]
fn plan_rejects_unknown_exercise() {
    let result = Command::new(repsheet_binary())
        .args(["plan", "--exercise", "squat"])
        .output()
        .expect("Failed to execute command");

    assert!(!result.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("unknown exercise"));
}
