use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("catalog-search").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Multilingual product search cache"));
}

#[test]
fn test_cli_search_help() {
    let mut cmd = Command::cargo_bin("catalog-search").unwrap();
    cmd.arg("search").arg("--help").assert().success().stdout(predicate::str::contains("limit"));
}

#[test]
fn test_cli_requires_database_url() {
    let mut cmd = Command::cargo_bin("catalog-search").unwrap();
    cmd.env_remove("DATABASE_URL")
        .args(["show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL"));
}

#[test]
fn test_cli_rejects_malformed_name() {
    let mut cmd = Command::cargo_bin("catalog-search").unwrap();
    cmd.args(["create", "--name", "Blue Shirt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LANG=NAME"));
}

#[test]
fn test_cli_rejects_non_positive_id() {
    let mut cmd = Command::cargo_bin("catalog-search").unwrap();
    cmd.args(["show", "0"]).assert().failure();
}

#[test]
fn test_cli_config_reads_environment() {
    let mut cmd = Command::cargo_bin("catalog-search").unwrap();
    cmd.env("CATALOG_SEARCH_LANGUAGES", "en_US,fr_FR")
        .env("CATALOG_SEARCH_RESULT_CAP", "5000")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("fr_FR"))
        .stdout(predicate::str::contains("\"result_cap\": 1000"));
}
