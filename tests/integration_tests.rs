//! CLI surface tests via the compiled binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn batchcut() -> Command {
    Command::cargo_bin("batchcut").unwrap()
}

#[test]
fn help_lists_subcommands() {
    batchcut()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compress"))
        .stdout(predicate::str::contains("frames"))
        .stdout(predicate::str::contains("thumbnail"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn version_prints() {
    batchcut().arg("--version").assert().success();
}

#[test]
fn compress_requires_inputs() {
    batchcut().arg("compress").assert().failure();
}

#[test]
fn compress_rejects_missing_input() {
    batchcut()
        .args(["compress", "/no/such/file.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No supported media files"));
}

#[test]
fn compress_rejects_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("song.mp3");
    std::fs::write(&file, b"not media").unwrap();

    batchcut()
        .args(["compress", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No supported media files"));
}

#[test]
fn compress_rejects_malformed_crop() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("clip.mp4");
    std::fs::write(&file, b"not media").unwrap();

    batchcut()
        .args(["compress", file.to_str().unwrap(), "--crop", "1,2,3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("crop"));
}

#[test]
fn compress_rejects_bad_rotation() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("clip.mp4");
    std::fs::write(&file, b"not media").unwrap();

    batchcut()
        .args(["compress", file.to_str().unwrap(), "--rotate", "45"])
        .assert()
        .failure();
}

#[test]
fn compress_rejects_inverted_trim_window() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("clip.mp4");
    std::fs::write(&file, b"not media").unwrap();

    batchcut()
        .args([
            "compress",
            file.to_str().unwrap(),
            "--start",
            "00:10:00",
            "--end",
            "00:05:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Trim start"));
}

#[test]
fn thumbnail_at_and_last_conflict() {
    batchcut()
        .args(["thumbnail", "clip.mp4", "--at", "5", "--last"])
        .assert()
        .failure();
}

#[test]
fn inspect_rejects_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, b"text").unwrap();

    batchcut()
        .args(["inspect", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("extension"));
}

#[test]
fn inspect_rejects_missing_file() {
    batchcut()
        .args(["inspect", "/no/such/clip.mp4"])
        .assert()
        .failure();
}

#[test]
fn missing_explicit_config_fails() {
    batchcut()
        .args(["--config", "/no/such/config.toml", "inspect", "clip.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}
