use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::tempdir;

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

fn fixture() -> String {
    repo_path("test_data/owid-co2-sample.csv")
        .to_string_lossy()
        .into_owned()
}

/// Command with an isolated home directory so no user config is picked up.
fn co2_cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("co2-cli").unwrap();
    cmd.env("HOME", home).env_remove("CO2_DATASET_URL");
    cmd
}

#[test]
fn head_prints_every_column() {
    let home = tempdir().unwrap();
    co2_cli(home.path())
        .args(["--file", fixture().as_str(), "head", "--rows", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cement_co2"))
        .stdout(predicate::str::contains("AFG"))
        .stdout(predicate::str::contains("Canada").not());
}

#[test]
fn countries_lists_aggregates() {
    let home = tempdir().unwrap();
    co2_cli(home.path())
        .args(["--file", fixture().as_str(), "countries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("World\n"))
        .stdout(predicate::str::contains("Africa\n"));
}

#[test]
fn trend_defaults_to_configured_countries() {
    let home = tempdir().unwrap();
    co2_cli(home.path())
        .args(["--file", fixture().as_str(), "trend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("co2_per_capita"))
        .stdout(predicate::str::contains("United Kingdom"))
        .stdout(predicate::str::contains("Afghanistan").not());
}

#[test]
fn trend_json_has_one_series_per_country_and_metric() {
    let home = tempdir().unwrap();
    let output = co2_cli(home.path())
        .args([
            "--file",
            fixture().as_str(),
            "--format",
            "json",
            "trend",
            "-c",
            "China",
            "-c",
            "World",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let series = value.as_array().unwrap();
    assert_eq!(series.len(), 4);
    assert_eq!(series[0]["country"], "China");
    assert_eq!(series[0]["metric"], "co2_per_capita");
    assert_eq!(series[2]["metric"], "co2");
}

#[test]
fn map_for_year_without_data_is_empty_not_error() {
    let home = tempdir().unwrap();
    co2_cli(home.path())
        .args(["--file", fixture().as_str(), "map", "--year", "1899", "--metric", "co2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No rows for 1899."));
}

#[test]
fn map_shows_iso_codes() {
    let home = tempdir().unwrap();
    co2_cli(home.path())
        .args(["--file", fixture().as_str(), "map", "--year", "2020"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# co2 in 2020 (color range 0..300)"))
        .stdout(predicate::str::contains("CHN"));
}

#[test]
fn population_is_case_sensitive() {
    let home = tempdir().unwrap();
    co2_cli(home.path())
        .args(["--file", fixture().as_str(), "population", "--country", "Canada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("38007166"));

    co2_cli(home.path())
        .args(["--file", fixture().as_str(), "population", "--country", "canada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No rows matched"));
}

#[test]
fn missing_file_fails_with_data_unavailable() {
    let home = tempdir().unwrap();
    let missing = home.path().join("absent.csv");
    co2_cli(home.path())
        .args(["--file", missing.to_str().unwrap(), "countries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dataset unavailable"));
}

#[test]
fn unreachable_url_fails_after_retry() {
    let home = tempdir().unwrap();
    let config = home.path().join("co2.toml");
    std::fs::write(
        &config,
        "[source]\nurl = \"http://127.0.0.1:9/co2.csv\"\ntimeout_seconds = 2\nmax_retries = 1\ninitial_backoff_ms = 0\n",
    )
    .unwrap();
    co2_cli(home.path())
        .args(["--config", config.to_str().unwrap(), "countries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 attempt(s)"));
}

#[test]
fn config_init_then_show() {
    let home = tempdir().unwrap();
    let config = home.path().join("conf").join("co2.toml");
    let config_arg = config.to_str().unwrap();

    co2_cli(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config written"));
    assert!(home.path().join(".co2/config/co2.toml").exists());

    std::fs::create_dir_all(config.parent().unwrap()).unwrap();
    std::fs::write(&config, "[display]\nhead_rows = 9\n").unwrap();
    co2_cli(home.path())
        .args(["--config", config_arg, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("head_rows = 9"));
}

#[test]
fn env_url_override_is_used() {
    let home = tempdir().unwrap();
    co2_cli(home.path())
        .env("CO2_DATASET_URL", "http://127.0.0.1:9/override.csv")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("override.csv"));
}

#[test]
fn invalid_config_exits_with_code_two() {
    let home = tempdir().unwrap();
    let config = home.path().join("co2.toml");
    std::fs::write(&config, "[logging]\nlevel = \"loud\"\n").unwrap();
    co2_cli(home.path())
        .args(["--config", config.to_str().unwrap(), "countries"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("logging.level"));
}
