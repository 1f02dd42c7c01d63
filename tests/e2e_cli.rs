//! CLI end-to-end tests
//!
//! Tests for the scrapeforged command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Get a command for the scrapeforged binary
#[allow(deprecated)]
fn scrapeforged_cmd() -> Command {
    Command::cargo_bin("scrapeforged").unwrap()
}

/// Create a workspace with a config file pointing at a scrapers directory.
fn workspace() -> (TempDir, PathBuf) {
    let temp = tempdir().unwrap();
    let scrapers = temp.path().join("scrapers");
    fs::create_dir(&scrapers).unwrap();

    let config_path = temp.path().join("config.toml");
    fs::write(
        &config_path,
        format!("[scrapers]\npath = '{}'\n", scrapers.display()),
    )
    .unwrap();

    (temp, config_path)
}

fn write_definition(temp: &Path, id: &str, content: &str) {
    fs::write(temp.join("scrapers").join(format!("{id}.toml")), content).unwrap();
}

const SEARCH_DEFINITION: &str = r#"
name = "Search Only"

[performer_by_name]
action = "script"
command = ["sh", "search.sh"]
"#;

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = scrapeforged_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = scrapeforged_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scrapeforged"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = scrapeforged_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "scrapeforged {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_cli_list_includes_builtin_and_definitions() {
    let (temp, config) = workspace();
    write_definition(temp.path(), "search_only", SEARCH_DEFINITION);

    scrapeforged_cmd()
        .current_dir(temp.path())
        .arg("-c")
        .arg(&config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("builtin_filename"))
        .stdout(predicate::str::contains("search_only\tSearch Only\tperformer"));
}

#[test]
fn test_cli_list_filters_by_kind() {
    let (temp, config) = workspace();
    write_definition(temp.path(), "search_only", SEARCH_DEFINITION);

    scrapeforged_cmd()
        .current_dir(temp.path())
        .arg("-c")
        .arg(&config)
        .args(["list", "--kind", "scene"])
        .assert()
        .success()
        .stdout(predicate::str::contains("builtin_filename"))
        .stdout(predicate::str::contains("search_only").not());
}

#[test]
fn test_cli_validate_valid_definitions() {
    let (temp, config) = workspace();
    write_definition(temp.path(), "search_only", SEARCH_DEFINITION);

    scrapeforged_cmd()
        .current_dir(temp.path())
        .arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Scrapers loaded: 2"));
}

#[test]
fn test_cli_validate_reports_bad_definitions() {
    let (temp, config) = workspace();
    write_definition(temp.path(), "empty", "name = \"Empty\"\n");

    scrapeforged_cmd()
        .current_dir(temp.path())
        .arg("validate")
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("empty.toml"))
        .stderr(predicate::str::contains("1 scraper definition(s) are invalid"));
}

#[test]
fn test_cli_validate_rejects_bad_config() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("config.toml");
    fs::write(&config, "[server]\nport = 0\n").unwrap();

    scrapeforged_cmd()
        .current_dir(temp.path())
        .arg("validate")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("port"));
}

#[test]
fn test_cli_scrape_scene_with_builtin() {
    let (temp, config) = workspace();

    scrapeforged_cmd()
        .current_dir(temp.path())
        .arg("-c")
        .arg(&config)
        .args([
            "scrape-scene",
            "builtin_filename",
            "--path",
            "/media/Acme.21.07.04.Beach.Day.1080p.mp4",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Beach Day\""))
        .stdout(predicate::str::contains("\"date\": \"2021-07-04\""));
}

#[test]
fn test_cli_scrape_scene_unknown_scraper() {
    let (temp, config) = workspace();

    scrapeforged_cmd()
        .current_dir(temp.path())
        .arg("-c")
        .arg(&config)
        .args(["scrape-scene", "nonexistent-id", "--title", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Scraper with ID nonexistent-id not found",
        ));
}

#[test]
fn test_cli_scrape_url_without_match_prints_null() {
    let (temp, config) = workspace();

    scrapeforged_cmd()
        .current_dir(temp.path())
        .arg("-c")
        .arg(&config)
        .args(["scrape-url", "https://unknown.invalid/x", "--kind", "performer"])
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}

#[cfg(unix)]
#[test]
fn test_cli_scrape_url_runs_script() {
    let (temp, config) = workspace();
    fs::write(
        temp.path().join("scrapers/performer.sh"),
        "cat > /dev/null\necho '{\"name\": \"Jane Doe\", \"country\": \"NZ\"}'\n",
    )
    .unwrap();
    write_definition(
        temp.path(),
        "people",
        r#"
name = "People"

[[performer_by_url]]
action = "script"
url = ["example.com/people/"]
command = ["sh", "performer.sh"]
"#,
    );

    scrapeforged_cmd()
        .current_dir(temp.path())
        .arg("-c")
        .arg(&config)
        .args([
            "scrape-url",
            "https://example.com/people/jane",
            "--kind",
            "performer",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"performer\""))
        .stdout(predicate::str::contains("\"name\": \"Jane Doe\""));
}
