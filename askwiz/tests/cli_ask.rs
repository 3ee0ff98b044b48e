//! CLI tests for the `askwiz` binary.
//!
//! Spawns the binary with scripted stdin and checks stdout and exit codes.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use askwiz::exit_codes;

fn askwiz(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_askwiz"))
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn askwiz");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("askwiz output")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn ask_prints_the_answer() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = askwiz(temp.path(), &["ask", "Your name?"], "Alice\n");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "Alice\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Your name? "));
}

#[test]
fn confirm_exit_code_follows_the_answer() {
    let temp = tempfile::tempdir().expect("tempdir");
    let yes = askwiz(temp.path(), &["confirm", "Go?"], "y\n");
    assert_eq!(yes.status.code(), Some(exit_codes::OK));
    let no = askwiz(temp.path(), &["confirm", "Go?"], "maybe\nno\n");
    assert_eq!(no.status.code(), Some(exit_codes::DECLINED));
    assert!(String::from_utf8_lossy(&no.stderr).contains("Answer must be yes or no"));
    let default = askwiz(temp.path(), &["confirm", "Go?", "--default", "no"], "\n");
    assert_eq!(default.status.code(), Some(exit_codes::DECLINED));
}

#[test]
fn choose_prints_the_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = askwiz(
        temp.path(),
        &["choose", "Color?", "r=Red", "g=Green", "--keyed"],
        "Purple\n2\n",
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "g\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[2] Green"));
    assert!(stderr.contains("Problem with answer: Not an option"));
}

#[test]
fn closed_input_exits_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = askwiz(temp.path(), &["ask", "Name?"], "");
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("input closed"));
}

#[test]
fn history_answers_become_defaults() {
    let temp = tempfile::tempdir().expect("tempdir");
    let args = [
        "--history",
        "answers.json",
        "--load",
        "--context",
        "alice",
        "ask",
        "Email?",
        "--name",
        "email",
    ];
    let first = askwiz(temp.path(), &args, "alice@example.com\n");
    assert_eq!(first.status.code(), Some(exit_codes::OK));

    let second = askwiz(temp.path(), &args, "\n");
    assert_eq!(second.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&second), "alice@example.com\n");
    assert!(String::from_utf8_lossy(&second.stderr).contains("[alice@example.com]"));

    let show = askwiz(temp.path(), &["show", "answers.json"], "");
    assert_eq!(stdout(&show), "alice/email = alice@example.com\n");

    let validate = askwiz(temp.path(), &["validate", "answers.json"], "");
    assert_eq!(validate.status.code(), Some(exit_codes::OK));
}

#[test]
fn existing_history_is_offered_when_not_loaded() {
    let temp = tempfile::tempdir().expect("tempdir");
    let args = ["--history", "answers.json", "ask", "Name?", "--name", "name"];
    askwiz(temp.path(), &args, "Alice\n");

    let output = askwiz(temp.path(), &args, "yes\n\n");
    assert_eq!(stdout(&output), "Alice\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Load prior answers from"));
}

#[test]
fn config_file_sets_history_path() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        temp.path().join("askwiz.toml"),
        "[history]\npath = \"saved.json\"\nload_if_exists = true\n",
    )
    .expect("write config");
    askwiz(temp.path(), &["ask", "Name?"], "Bob\n");
    assert!(temp.path().join("saved.json").exists());
    let output = askwiz(temp.path(), &["ask", "Name?"], "\n");
    assert_eq!(stdout(&output), "Bob\n");
}

#[test]
fn validate_rejects_unknown_node_type() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        temp.path().join("bad.json"),
        r#"{"questions": {"x": {"type": "mystery"}}}"#,
    )
    .expect("write history");
    let output = askwiz(temp.path(), &["validate", "bad.json"], "");
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
}
