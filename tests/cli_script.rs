mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn script_cmd(base: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("stockbook_cli").unwrap();
    cmd.env("STOCKBOOK_CLI_SCRIPT", "1")
        .env("STOCKBOOK_DATA_DIR", base.join("data"))
        .env("STOCKBOOK_CONFIG_DIR", base.join("settings"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let base = common::temp_base();
    let input = "product add P-1 Tools Hand\nstock in P-1 10 2.50\nstock out P-1 4 5\nstock level P-1\nexit\n";

    script_cmd(&base)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Product added: P-1 (Tools / Hand)"))
        .stdout(contains("Stock In recorded"))
        .stdout(contains("P-1: 6"));

    let ledger = std::fs::read_to_string(base.join("data").join("transactions.json")).unwrap();
    assert!(ledger.contains("\"P-1\""));
}

#[test]
fn data_persists_between_runs() {
    let base = common::temp_base();
    script_cmd(&base)
        .write_stdin("product add P-7 Paint\nstock in P-7 3 1\n")
        .assert()
        .success();

    script_cmd(&base)
        .write_stdin("product list\nreport\n")
        .assert()
        .success()
        .stdout(contains("P-7"))
        .stdout(contains("Purchases: 3.00 USD"));
}

#[test]
fn errors_are_reported_and_the_script_continues() {
    let base = common::temp_base();
    script_cmd(&base)
        .write_stdin("product add P-1 Tools\nstock out P-1 2 1\nstock level P-1\n")
        .assert()
        .success()
        .stderr(contains("Not enough stock available for P-1"))
        .stdout(contains("P-1: 0"));
}

#[test]
fn unknown_command_suggests_closest_match() {
    let base = common::temp_base();
    script_cmd(&base)
        .write_stdin("dashbord\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `dashbord`"))
        .stdout(contains("Suggestion: `dashboard`?"));
}

#[test]
fn config_changes_are_saved() {
    let base = common::temp_base();
    script_cmd(&base)
        .write_stdin("config set currency EUR\nconfig backup before-test\nconfig backups\n")
        .assert()
        .success()
        .stdout(contains("Updated `currency`."))
        .stdout(contains("before-test"));

    let saved =
        std::fs::read_to_string(base.join("settings").join("config").join("stockbook.json"))
            .unwrap();
    assert!(saved.contains("EUR"));
}

#[test]
fn help_lists_commands() {
    let base = common::temp_base();
    script_cmd(&base)
        .write_stdin("help\n")
        .assert()
        .success()
        .stdout(contains("Available commands"))
        .stdout(contains("product").and(contains("report")));
}
