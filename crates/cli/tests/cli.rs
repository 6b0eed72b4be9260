//! Black-box tests for the `stockbook` binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// `stockbook` running inside `dir`, isolated from the caller's environment.
fn stockbook(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("stockbook");
    cmd.current_dir(dir.path())
        .env_remove("STOCKBOOK_DATA_FILE")
        .env_remove("STOCKBOOK_LOW_THRESHOLD")
        .env_remove("STOCKBOOK_LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn read_data(dir: &TempDir, name: &str) -> serde_json::Value {
    let text = std::fs::read_to_string(dir.path().join(name)).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    stockbook(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn demo_runs_against_default_data_file() {
    let dir = TempDir::new().unwrap();
    stockbook(&dir)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Item 'orange' not found in inventory."))
        .stdout(predicate::str::contains("Apple stock: 7"))
        .stdout(predicate::str::contains("Low items: banana"))
        .stdout(predicate::str::contains("Items Report\napple -> 7\nbanana -> 2\n"));

    assert_eq!(
        read_data(&dir, "inventory.json"),
        serde_json::json!({ "apple": 7, "banana": 2 })
    );
}

#[test]
fn add_remove_and_query_persist_across_runs() {
    let dir = TempDir::new().unwrap();

    stockbook(&dir)
        .args(["add", "apple", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No inventory data file found. Starting fresh."))
        .stdout(predicate::str::contains("Added 10 of apple"));

    stockbook(&dir).args(["add", "banana", "2"]).assert().success();
    stockbook(&dir)
        .args(["remove", "apple", "3"])
        .assert()
        .success()
        .stdout("apple stock: 7\n");

    stockbook(&dir)
        .args(["qty", "apple"])
        .assert()
        .success()
        .stdout("apple stock: 7\n");

    stockbook(&dir)
        .args(["report"])
        .assert()
        .success()
        .stdout("Items Report\napple -> 7\nbanana -> 2\n");
}

#[test]
fn missing_data_file_is_reported_once_on_stdout() {
    let dir = TempDir::new().unwrap();
    stockbook(&dir)
        .args(["qty", "apple"])
        .assert()
        .success()
        .stdout("No inventory data file found. Starting fresh.\napple stock: 0\n")
        .stderr("");
}

#[test]
fn invalid_quantity_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    stockbook(&dir)
        .args(["add", "x", "notanumber"])
        .assert()
        .success()
        .stdout(predicate::str::contains("must be an integer"));
    assert!(!dir.path().join("inventory.json").exists());

    stockbook(&dir)
        .args(["add", "x", "-4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot be negative"));
}

#[test]
fn removing_unknown_item_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("inventory.json"), r#"{"apple": 7}"#).unwrap();

    stockbook(&dir)
        .args(["remove", "orange", "1"])
        .assert()
        .success()
        .stdout("Item 'orange' not found in inventory.\n");
    assert_eq!(read_data(&dir, "inventory.json"), serde_json::json!({ "apple": 7 }));
}

#[test]
fn depleting_an_item_removes_it_from_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("inventory.json"), r#"{"apple": 7, "pear": 1}"#).unwrap();

    stockbook(&dir).args(["remove", "pear", "5"]).assert().success();
    assert_eq!(read_data(&dir, "inventory.json"), serde_json::json!({ "apple": 7 }));
}

#[test]
fn file_flag_and_env_select_data_file() {
    let dir = TempDir::new().unwrap();

    stockbook(&dir)
        .args(["--file", "flag.json", "add", "kiwi", "3"])
        .assert()
        .success();
    assert_eq!(read_data(&dir, "flag.json"), serde_json::json!({ "kiwi": 3 }));

    stockbook(&dir)
        .env("STOCKBOOK_DATA_FILE", "env.json")
        .args(["add", "plum", "1"])
        .assert()
        .success();
    assert_eq!(read_data(&dir, "env.json"), serde_json::json!({ "plum": 1 }));
}

#[test]
fn low_threshold_from_env_and_flag() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("inventory.json"), r#"{"apple": 7, "banana": 2}"#).unwrap();

    stockbook(&dir)
        .arg("low")
        .assert()
        .success()
        .stdout("Low items: banana\n");

    stockbook(&dir)
        .env("STOCKBOOK_LOW_THRESHOLD", "10")
        .arg("low")
        .assert()
        .success()
        .stdout("Low items: apple, banana\n");

    stockbook(&dir)
        .args(["low", "--threshold", "1"])
        .assert()
        .success()
        .stdout("Low items: (none)\n");
}

#[test]
fn malformed_data_file_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("inventory.json"), "{ broken").unwrap();

    stockbook(&dir)
        .arg("report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load inventory"));
}

#[test]
fn bad_threshold_env_fails() {
    let dir = TempDir::new().unwrap();
    stockbook(&dir)
        .env("STOCKBOOK_LOW_THRESHOLD", "lots")
        .arg("low")
        .assert()
        .failure()
        .stderr(predicate::str::contains("STOCKBOOK_LOW_THRESHOLD"));
}
