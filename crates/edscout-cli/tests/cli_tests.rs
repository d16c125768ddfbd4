use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

// Every test here fails before any network request: bad arguments, unknown
// materials and missing journals are all rejected first.

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("edscout");
    cmd.env("RUST_LOG", "error");
    cmd
}

#[test]
fn help_lists_both_subcommands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mine"))
        .stdout(predicate::str::contains("sell"));
}

#[test]
fn unknown_material_is_rejected_with_suggestions() {
    cli()
        .args(["mine", "Painte", "--system", "Yoru"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown material: Painte"))
        .stderr(predicate::str::contains("Did you mean 'Painite'?"));
}

#[test]
fn missing_journal_directory_is_reported() {
    cli()
        .args([
            "mine",
            "Void Opal",
            "--journal-path",
            "/definitely/not/a/journal",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("journal directory not found"));
}

#[test]
fn sell_without_cargo_file_is_reported() {
    let dir = tempdir().expect("create temp dir");
    cli()
        .args(["sell", "--system", "Yoru"])
        .arg("--journal-path")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cargo file not found"));
}

#[test]
fn invalid_ring_type_is_rejected_by_parsing() {
    cli()
        .args(["mine", "Platinum", "--ring-type", "gaseous", "--system", "Yoru"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid ring type"));
}

#[test]
fn non_positive_max_distance_is_rejected() {
    cli()
        .args([
            "mine",
            "Platinum",
            "--system",
            "Yoru",
            "--max-distance",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max-distance must be a positive number"));
}

#[test]
fn pad_option_accepts_the_documented_choices() {
    // An invalid pad choice fails at argument parsing, listing the valid
    // ones.
    cli()
        .args(["sell", "--system", "Yoru", "--pad", "xl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
