//! Tests for the `repsheet generate` command

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn repsheet_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("target/debug/repsheet")
}

#[test]
fn generate_creates_workbook() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("Progression.xlsx");

    let result = Command::new(repsheet_binary())
        .args(["generate", "-o"])
        .arg(&output)
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Created:"), "Should show 'Created:'");
    assert!(
        stdout.contains("Progression.xlsx"),
        "Should show the output filename"
    );
    assert!(output.exists(), "File should be created");

    // Verify content is a ZIP container (XLSX)
    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[0..2], b"PK", "Output should be an XLSX file");
}

#[test]
fn generate_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("Progression.xlsx");

    fs::write(&output, "stale").unwrap();

    let result = Command::new(repsheet_binary())
        .args(["generate", "-o"])
        .arg(&output)
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success(), "Command should succeed");
    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[0..2], b"PK", "Stale file should be replaced");
}

#[test]
fn generate_accepts_pr_overrides() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("custom.xlsx");

    let result = Command::new(repsheet_binary())
        .args(["generate", "--pull-up-pr", "15", "--push-up-pr", "40", "-o"])
        .arg(&output)
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success(), "Command should succeed");
    assert!(output.exists());
}

#[test]
fn generate_static_values_variant() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("static.xlsx");

    let result = Command::new(repsheet_binary())
        .args(["generate", "--static-values", "-o"])
        .arg(&output)
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success(), "Command should succeed");
    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn generate_fails_on_unwritable_path() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing").join("Progression.xlsx");

    let result = Command::new(repsheet_binary())
        .args(["generate", "-o"])
        .arg(&output)
        .output()
        .expect("Failed to execute command");

    assert!(!result.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(
        stderr.contains("failed to write"),
        "Should name the output path failure"
    );
}
