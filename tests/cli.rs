use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get the chat mirror path in the temp dir
fn chat_mirror_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".art").join("chat_messages.json")
}

const BINARY_NAME: &str = "art";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Usage"))
        .stdout(contains("clear-chat"));
}

#[test]
/// Clearing the chat should delete the mirrored conversation.
fn clear_chat_deletes_mirror_file() {
    let tmp = temp_home_dir();
    let mirror_path = chat_mirror_path(&tmp);
    fs::create_dir_all(mirror_path.parent().unwrap()).unwrap();
    fs::write(&mirror_path, "[]").unwrap();

    // Ensure the file exists
    assert!(mirror_path.exists());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("clear-chat")
        .env("HOME", tmp.path())
        .assert()
        .success()
        .stdout(contains("Clearing"));

    // Confirm the file was deleted
    assert!(!mirror_path.exists());
}

#[test]
/// Clearing without a mirror file is not an error.
fn clear_chat_without_mirror_succeeds() {
    let tmp = temp_home_dir();
    let custom = tmp.path().join("elsewhere.json");

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("clear-chat")
        .arg("--chat-mirror")
        .arg(&custom)
        .env("HOME", tmp.path())
        .assert()
        .success();
}

#[test]
/// The modules command lists every type with its title.
fn modules_lists_registry() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("modules")
        .assert()
        .success()
        .stdout(contains("routeplanner"))
        .stdout(contains("Routeplanner"))
        .stdout(contains("coding"));
}

#[test]
/// An unknown layout is rejected before the terminal is touched.
fn start_rejects_unknown_layout() {
    let tmp = temp_home_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("start")
        .arg("--layout")
        .arg("bogus")
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("bogus"));
}
