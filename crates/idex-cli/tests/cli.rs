use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs the binary with an isolated config directory.
fn idex(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("idex").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

fn parse_stdout(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_no_input_prints_error() {
    let home = TempDir::new().unwrap();

    let output = idex(home.path()).assert().failure().get_output().stdout.clone();

    let json = parse_stdout(&output);
    assert_eq!(json["error"], "No PDF path provided");
}

#[test]
fn test_extracts_fields_from_text_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("client.txt");
    fs::write(
        &input,
        "Name: John Smith\nPhone: (555) 123-4567\nAddress: 123 Main Street, Springfield, IL 62701\n",
    )
    .unwrap();

    let output = idex(home.path())
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = parse_stdout(&output);
    assert_eq!(json["name"]["value"], "John Smith");
    assert_eq!(json["name"]["confidence"], 0.95);
    assert_eq!(json["name"]["method"], "labeled");
    assert_eq!(json["phone"]["value"], "(555) 123-4567");
    assert_eq!(json["metadata"]["file_name"], "client.txt");
    assert_eq!(json["metadata"]["extraction_successful"], true);
}

#[test]
fn test_missing_file_reports_failure() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("missing.pdf");

    let output = idex(home.path())
        .arg(&input)
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json = parse_stdout(&output);
    assert!(json["error"].as_str().unwrap().starts_with("file not found"));
}

#[test]
fn test_text_format() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("note.txt");
    fs::write(&input, "Name: Jane Doe\n").unwrap();

    idex(home.path())
        .arg(&input)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe (0.95, labeled)"))
        .stdout(predicate::str::contains("(not found)"));
}

#[test]
fn test_min_confidence_out_of_range() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("note.txt");
    fs::write(&input, "Name: Jane Doe\n").unwrap();

    idex(home.path())
        .arg(&input)
        .args(["--min-confidence", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("min-confidence"));
}

#[test]
fn test_output_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("note.txt");
    let output = home.path().join("out.json");
    fs::write(&input, "Phone: 555-123-4567\n").unwrap();

    idex(home.path())
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["phone"]["value"], "555-123-4567");
}

#[test]
fn test_config_init_and_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("idex.json");

    idex(home.path())
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    idex(home.path())
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    idex(home.path())
        .args(["config", "get", "extraction.min_confidence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.5"));
}

#[test]
fn test_config_file_sets_threshold() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("idex.json");
    let input = home.path().join("note.txt");
    fs::write(&config, r#"{"extraction": {"min_confidence": 0.99}}"#).unwrap();
    fs::write(&input, "Name: Jane Doe\n").unwrap();

    let output = idex(home.path())
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = parse_stdout(&output);
    assert_eq!(json["metadata"]["extraction_successful"], false);
}

#[test]
fn test_help_lists_failure_messages() {
    let home = TempDir::new().unwrap();

    idex(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("file not found: <path>"))
        .stdout(predicate::str::contains("Could not extract text from PDF"));
}

#[test]
fn test_extensionless_pdf_is_processed() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("upload_3f9a1c");
    fs::write(&input, b"%PDF-1.5\nnot really a document\n").unwrap();

    // Sniffed as PDF, so the failure is about text, not the file format
    let output = idex(home.path())
        .arg(&input)
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json = parse_stdout(&output);
    assert_eq!(json["error"], "Could not extract text from PDF");
}
