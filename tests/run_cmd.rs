use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bfm").unwrap();
    // Keep a user's bfm.toml or BFM_* variables from leaking into the tests.
    cmd.arg("--config")
        .arg("/nonexistent/bfm.toml")
        .env_remove("BFM_TAPE_SIZE")
        .env_remove("BFM_EOF")
        .env_remove("BFM_JUMP_TABLE")
        .timeout(Duration::from_secs(5));
    cmd
}

fn code_tempfile(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn positional_code_prints_byte_and_newline() {
    cargo_bin()
        .arg("+++.")
        .assert()
        .success()
        .stdout("\u{3}\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn code_parts_are_concatenated() {
    cargo_bin()
        .args(["++[>++", "<-]>."])
        .assert()
        .success()
        .stdout("\u{4}\n");
}

#[test]
fn code_from_file_with_comments() {
    let tf = code_tempfile("print A\n+++++ +++++\n[>+++++ ++<-]>-----.\n");
    cargo_bin()
        .arg("--file")
        .arg(tf.path())
        .assert()
        .success()
        .stdout("A\n");
}

#[test]
fn hello_world_with_jump_table() {
    let code = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
    cargo_bin()
        .arg("--jump-table")
        .arg(code)
        .assert()
        .success()
        .stdout("Hello World!\n\n");
}

#[test]
fn stray_close_bracket_succeeds_quietly() {
    cargo_bin()
        .arg("]")
        .assert()
        .success()
        .stdout("\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn leading_hyphen_code_is_accepted() {
    cargo_bin()
        .arg("-+++.")
        .assert()
        .success()
        .stdout("\u{2}\n");
}

#[test]
fn file_and_code_together_is_usage_error() {
    let tf = code_tempfile("+.");
    cargo_bin()
        .arg("--file")
        .arg(tf.path())
        .arg("+.")
        .assert()
        .code(2);
}

#[test]
fn missing_code_file_fails() {
    cargo_bin()
        .arg("--file")
        .arg("/nonexistent/program.bf")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read code file"));
}
