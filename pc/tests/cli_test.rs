//! End-to-end tests for the `pc` binary

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn site_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Temp workspace with a config that keeps state, logs and exports inside it
fn workspace() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = format!(
        "site-dir: {}\ndata-dir: {}\nexport-dir: {}\nclipboard: false\n",
        site_dir().display(),
        temp.path().join("state").display(),
        temp.path().join("exports").display(),
    );
    fs::write(temp.path().join("companion.yml"), config).unwrap();
    temp
}

fn pc(temp: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pc").unwrap();
    cmd.env("XDG_DATA_HOME", temp.join("xdg"))
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(temp.join("companion.yml"));
    cmd
}

fn intake(temp: &Path) {
    pc(temp)
        .args(["intake", "--name", "Ada Lovelace", "--profession", "nurse", "--curiosity", "genomics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Genomics for Everyone"));
}

#[test]
fn test_show_without_intake_fails() {
    let temp = workspace();
    pc(temp.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pc intake"));
}

#[test]
fn test_intake_requires_profession() {
    let temp = workspace();
    pc(temp.path())
        .args(["intake", "--curiosity", "genomics"])
        .assert()
        .failure();
}

#[test]
fn test_navigate_and_show() {
    let temp = workspace();
    intake(temp.path());

    pc(temp.path())
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("What Is DNA?"))
        .stdout(predicate::str::contains("The double helix"));

    pc(temp.path())
        .args(["show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"number\": 2"));

    pc(temp.path())
        .arg("prev")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome"));

    pc(temp.path())
        .arg("prev")
        .assert()
        .success()
        .stdout(predicate::str::contains("intro"));
}

#[test]
fn test_collect_by_marker_and_export() {
    let temp = workspace();
    intake(temp.path());

    pc(temp.path()).args(["goto", "2"]).assert().success();

    pc(temp.path())
        .args(["collect", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("How does base pairing relate to the topics I care about?"))
        .stdout(predicate::str::contains("Copied!"))
        .stdout(predicate::str::contains("Collected prompts: 1"));

    pc(temp.path())
        .args(["collect", "Base pairing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in your collection"));

    pc(temp.path())
        .args(["note", "--slide", "4", "sequencing costs?"])
        .assert()
        .success();

    pc(temp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base pairing"));

    pc(temp.path()).arg("export").assert().success().stdout(predicate::str::contains("Downloaded!"));

    let export = temp.path().join("exports").join("genomics-prompts-ada-lovelace.md");
    let doc = fs::read_to_string(export).expect("export written");
    assert!(doc.contains("### 1. Slide 2: What Is DNA?"));
    assert!(doc.contains("### 2. Slide 4: Reading the Genome"));
    assert!(doc.contains("sequencing costs?"));
}

#[test]
fn test_export_with_nothing_collected() {
    let temp = workspace();
    intake(temp.path());

    pc(temp.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Click some prompts or add notes first"));

    assert!(!temp.path().join("exports").exists());
}

#[test]
fn test_collect_unknown_prompt_fails() {
    let temp = workspace();
    intake(temp.path());

    pc(temp.path())
        .args(["collect", "No such prompt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such prompt"));
}

#[test]
fn test_nav_and_reset() {
    let temp = workspace();
    intake(temp.path());

    pc(temp.path())
        .arg("nav")
        .assert()
        .success()
        .stdout(predicate::str::contains("Foundations"))
        .stdout(predicate::str::contains("5. Editing with CRISPR"));

    pc(temp.path()).args(["collect", "*"]).assert().success();
    pc(temp.path()).arg("reset").assert().success();
    pc(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No prompts collected yet"));
}

#[test]
fn test_bare_note_is_rejected_and_keeps_note() {
    let temp = workspace();
    intake(temp.path());

    pc(temp.path()).args(["note", "keep me"]).assert().success();
    pc(temp.path()).arg("note").assert().failure();

    pc(temp.path())
        .args(["export", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keep me"));

    pc(temp.path())
        .args(["note", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared note for slide 1"));
}
