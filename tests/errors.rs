use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bfm").unwrap();
    cmd.arg("--config")
        .arg("/nonexistent/bfm.toml")
        .env_remove("BFM_TAPE_SIZE")
        .env_remove("BFM_JUMP_TABLE")
        .timeout(Duration::from_secs(5));
    cmd
}

#[test]
fn unmatched_open_bracket_is_reported() {
    cargo_bin()
        .arg("[")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unmatched bracket '['").and(predicate::str::contains("^")));
}

#[test]
fn unmatched_open_bracket_is_reported_with_jump_table() {
    cargo_bin()
        .args(["--jump-table", "["])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unmatched bracket '['"));
}

#[test]
fn pointer_left_of_tape_is_reported() {
    cargo_bin()
        .arg("+.<")
        .assert()
        .code(1)
        .stdout("\u{1}")
        .stderr(predicate::str::contains("pointer out of bounds (ptr=0, op=<)"));
}

#[test]
fn tape_size_flag_bounds_the_pointer() {
    cargo_bin()
        .args(["--tape-size", "2", ">>"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pointer out of bounds (ptr=1, op=>)"));
}

#[test]
fn zero_tape_size_is_a_config_error() {
    cargo_bin()
        .args(["--tape-size", "0", "+"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("tape_size"));
}

#[test]
fn invalid_env_value_is_a_config_error() {
    cargo_bin()
        .env("BFM_TAPE_SIZE", "huge")
        .arg("+")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("BFM_TAPE_SIZE"));
}

#[test]
fn no_arguments_prints_help() {
    Command::cargo_bin("bfm")
        .unwrap()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn open_bracket_on_nonzero_cell_is_never_matched() {
    cargo_bin()
        .arg("+[")
        .assert()
        .success()
        .stdout("\n")
        .stderr(predicate::str::is_empty());
}
