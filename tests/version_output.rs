mod common;

use assert_cmd::Command;
use regex::Regex;

#[test]
fn version_command_prints_build_metadata() {
    let base = common::temp_base();
    let output = Command::cargo_bin("stockbook_cli")
        .unwrap()
        .env("STOCKBOOK_CLI_SCRIPT", "1")
        .env("STOCKBOOK_DATA_DIR", base.join("data"))
        .env("STOCKBOOK_CONFIG_DIR", base.join("settings"))
        .write_stdin("version\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let header = Regex::new(r"=== Stockbook \d+\.\d+\.\d+ ===").unwrap();
    assert!(header.is_match(&stdout), "unexpected output:\n{stdout}");

    let hash = Regex::new(r"Build hash : \S+ \((clean|dirty|unknown)\)").unwrap();
    assert!(hash.is_match(&stdout), "unexpected output:\n{stdout}");
}

#[test]
fn summary_line_names_the_package() {
    let summary = stockbook::utils::build_info::current().summary();
    let pattern = Regex::new(r"^stockbook \d+\.\d+\.\d+ \(\S+, \S+\)$").unwrap();
    assert!(pattern.is_match(&summary), "{summary}");
}
