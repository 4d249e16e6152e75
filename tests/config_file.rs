use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bfm").unwrap();
    cmd.env_remove("BFM_TAPE_SIZE")
        .env_remove("BFM_EOF")
        .env_remove("BFM_JUMP_TABLE");
    cmd
}

fn config_tempfile(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::Builder::new().suffix(".toml").tempfile().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn config_file_sets_tape_size() {
    let tf = config_tempfile("[machine]\ntape_size = 1\n");
    cargo_bin()
        .arg("--config")
        .arg(tf.path())
        .arg(">")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pointer out of bounds"));
}

#[test]
fn flags_override_config_file() {
    let tf = config_tempfile("[machine]\ntape_size = 1\neof = \"zero\"\n");
    cargo_bin()
        .arg("--config")
        .arg(tf.path())
        .args(["--tape-size", "4", "--eof", "unchanged", ">+,."])
        .write_stdin("")
        .assert()
        .success()
        .stdout("\u{1}\n");
}

#[test]
fn malformed_config_file_is_reported() {
    let tf = config_tempfile("[machine]\ntape_size = \"big\"\n");
    cargo_bin()
        .arg("--config")
        .arg(tf.path())
        .arg("+")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to parse config file"));
}
