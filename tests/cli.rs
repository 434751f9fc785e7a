use assert_cmd::Command;
use predicates::prelude::*;

fn penny(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("penny").unwrap();
    cmd.env("HOME", home);
    cmd
}

#[test]
fn test_categories_lists_full_taxonomy() {
    let home = tempfile::tempdir().unwrap();
    penny(home.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("subscriptions"))
        .stdout(predicate::str::contains("Uncategorized"));
}

#[test]
fn test_help_names_every_command() {
    let home = tempfile::tempdir().unwrap();
    penny(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("patterns"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_import_missing_file_fails() {
    let home = tempfile::tempdir().unwrap();
    penny(home.path())
        .args(["import", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_import_unknown_format_fails() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("statement.docx");
    std::fs::write(&file, "whatever").unwrap();
    penny(home.path())
        .args(["import", file.to_str().unwrap(), "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown"));
}

#[test]
fn test_init_then_import_and_history() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");

    penny(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    let csv = home.path().join("statement.csv");
    std::fs::write(
        &csv,
        "Date,Description,Amount\n2024-01-15,NETTO SUPERMARKED,-342.50\n2024-01-31,SALARY,2500.00\n",
    )
    .unwrap();

    penny(home.path())
        .args(["import", csv.to_str().unwrap(), "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 imported, 0 failed"));

    // Same file again is caught by the checksum guard.
    penny(home.path())
        .args(["import", csv.to_str().unwrap(), "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already been imported"));

    penny(home.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("statement.csv"));

    // The committed rows were learned as patterns.
    penny(home.path())
        .arg("patterns")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("netto supermarked"));
}

#[test]
fn test_patterns_add_rejects_unknown_category() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    penny(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success();

    penny(home.path())
        .args(["patterns", "add", "netto", "--category", "groceries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("groceries"));
}

#[test]
fn test_patterns_add_list_rm() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    penny(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success();

    penny(home.path())
        .args([
            "patterns",
            "add",
            "NETFLIX",
            "--category",
            "subscriptions",
            "--subcategory",
            "Streaming",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("netflix"));

    penny(home.path())
        .args(["patterns", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subscriptions > Streaming"));

    penny(home.path())
        .args(["patterns", "rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted pattern 1"));

    penny(home.path())
        .args(["patterns", "rm", "1"])
        .assert()
        .failure();
}

#[test]
fn test_init_rejects_bogus_date_order() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    penny(home.path())
        .args([
            "init",
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--date-order",
            "ymd",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("date order"));
}
