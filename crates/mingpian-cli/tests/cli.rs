use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TWO_PEOPLE: &str = "名片一：公司名稱：ACME 姓名：王小明/陳大文 手機：0912345678/0922333444";

/// Command isolated from the user's configuration and Airtable credentials.
fn mingpian(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mingpian").unwrap();
    cmd.env("XDG_CONFIG_HOME", home)
        .env("HOME", home)
        .env_remove("AIRTABLE_API_KEY")
        .env_remove("AIRTABLE_BASE_ID");
    cmd
}

#[test]
fn parse_prints_json_records() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cards.txt");
    fs::write(&input, TWO_PEOPLE).unwrap();

    let output = mingpian(dir.path())
        .arg("parse")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["company"], "ACME");
    assert_eq!(records[1]["name"], "陳大文");
    assert_eq!(records[1]["mobile"], "0922333444");
}

#[test]
fn parse_reads_stdin_as_csv() {
    let dir = TempDir::new().unwrap();

    mingpian(dir.path())
        .args(["parse", "-", "--format", "csv"])
        .write_stdin(TWO_PEOPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "公司名稱,地址,統一編號,公司電話,傳真,職稱,姓名,手機,Email",
        ))
        .stdout(predicate::str::contains("ACME,,,,,,王小明,0912345678,"));
}

#[test]
fn parse_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    mingpian(dir.path())
        .args(["parse", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn parse_stats_report_skipped_cards() {
    let dir = TempDir::new().unwrap();

    mingpian(dir.path())
        .args(["parse", "-", "--stats"])
        .write_stdin("名片一：公司名稱：ACME\n名片二：姓名：林美華")
        .assert()
        .success()
        .stdout(predicate::str::contains("林美華"))
        .stderr(predicate::str::contains("2 cards, 1 records, 1 skipped"));
}

#[test]
fn upload_checks_credentials_before_reading_input() {
    let dir = TempDir::new().unwrap();

    mingpian(dir.path())
        .args(["upload", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AIRTABLE_API_KEY"))
        .stderr(predicate::str::contains("Input file not found").not());
}

#[test]
fn upload_dry_run_batches_in_memory() {
    let dir = TempDir::new().unwrap();

    mingpian(dir.path())
        .args(["upload", "-", "--dry-run"])
        .write_stdin(TWO_PEOPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dry run: 2 records in 1 batches would be written to 名片王",
        ));
}

#[test]
fn upload_without_records_fails() {
    let dir = TempDir::new().unwrap();

    mingpian(dir.path())
        .args(["upload", "-", "--dry-run"])
        .write_stdin("no cards here")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No records found"));
}

#[test]
fn config_init_get_and_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("mingpian.json");
    let config_arg = config.to_str().unwrap();

    mingpian(dir.path())
        .args(["--config", config_arg, "config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    mingpian(dir.path())
        .args(["--config", config_arg, "config", "set", "store.batch_size", "5"])
        .assert()
        .success();

    mingpian(dir.path())
        .args(["--config", config_arg, "config", "get", "store.batch_size"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5\n"));

    mingpian(dir.path())
        .args(["--config", config_arg, "config", "set", "store.batch_size", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("batch_size"));

    mingpian(dir.path())
        .args(["--config", config_arg, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_placeholders_reach_the_parser() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("mingpian.json");
    fs::write(&config, r#"{"extraction": {"placeholders": ["無"]}}"#).unwrap();

    mingpian(dir.path())
        .args(["--config", config.to_str().unwrap(), "parse", "-", "-f", "text"])
        .write_stdin("名片一：姓名：王小明 傳真：無 職稱：經理")
        .assert()
        .success()
        .stdout(predicate::str::contains("Record 1: 王小明"))
        .stdout(predicate::str::contains("職稱: 經理"))
        .stdout(predicate::str::contains("傳真").not());
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), TWO_PEOPLE).unwrap();
    fs::write(inputs.join("b.md"), "名片一：公司名稱：Globex").unwrap();
    fs::write(inputs.join("ignored.pdf"), "binary").unwrap();

    let pattern = format!("{}/*", inputs.display());
    mingpian(dir.path())
        .args(["batch", &pattern, "--summary", "-o"])
        .arg(&outputs)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    let a: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(outputs.join("a.json")).unwrap()).unwrap();
    assert_eq!(a.as_array().unwrap().len(), 2);
    assert!(outputs.join("b.json").exists());

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    let mut lines = summary.lines();
    assert_eq!(
        lines.next().unwrap(),
        "filename,status,cards,records,skipped,processing_time_ms,error"
    );
    assert!(lines.next().unwrap().starts_with("a.txt,success,1,2,0,"));
    assert!(lines.next().unwrap().starts_with("b.md,success,1,0,1,"));
}
