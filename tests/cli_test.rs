//! CLI end-to-end tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn edrex() -> Command {
    Command::new(assert_cmd::cargo_bin!("edrex"))
}

#[test]
fn test_help() {
    edrex().arg("--help").assert().success();
}

#[test]
fn test_version() {
    edrex()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("edrex"));
}

#[test]
fn test_find_forward() {
    edrex()
        .args(["find", "foo", "xx foo foo yy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"matched\": true"))
        .stdout(predicate::str::contains("\"direction\": \"forward\""))
        .stdout(predicate::str::contains("\"start\": 3"));
}

#[test]
fn test_find_backward() {
    edrex()
        .args(["find", "foo", "xx foo foo yy", "--backward"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"direction\": \"backward\""))
        .stdout(predicate::str::contains("\"start\": 7"));
}

#[test]
fn test_find_no_match() {
    edrex()
        .args(["find", r"\d+", "hello world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"matched\": false"))
        .stdout(predicate::str::contains("\"match_count\": 0"));
}

#[test]
fn test_find_empty_pattern() {
    edrex()
        .args(["find", "", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"matched\": false"));
}

#[test]
fn test_find_whole_word() {
    edrex()
        .args(["find", "foo", "foobar foo", "-w"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"start\": 7"));
}

#[test]
fn test_find_word_start_marker() {
    edrex()
        .args(["find", r"\<bar", "foobar barn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"start\": 7"));
}

#[test]
fn test_find_range_start() {
    edrex()
        .args(["find", "o", "foo boo", "--min", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"start\": 5"))
        .stdout(predicate::str::contains("\"range_start\": 3"));
}

#[test]
fn test_find_crlf_line_end() {
    edrex()
        .args(["find", "b$", "a b\r\nc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"eol_mode\": \"crlf\""))
        .stdout(predicate::str::contains("\"start\": 2"));
}

#[test]
fn test_find_all_with_captures() {
    edrex()
        .args(["find", r"(\w)(\d)", "a1 b2 c3", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"match_count\": 3"))
        .stdout(predicate::str::contains("\"group\": 2"));
}

#[test]
fn test_find_stdin() {
    edrex()
        .args(["find", "needle"])
        .write_stdin("hay needle hay")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"start\": 4"));
}

#[test]
fn test_find_invalid_pattern() {
    edrex()
        .args(["find", "(bad", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_PATTERN"));
}

#[test]
fn test_replace_next() {
    edrex()
        .args(["replace", r"\d+", "N", "a1b22c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"result\": \"aNb22c\""))
        .stdout(predicate::str::contains("\"replacements_made\": 1"));
}

#[test]
fn test_replace_all() {
    edrex()
        .args(["replace", r"\d+", "N", "a1b22c", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"result\": \"aNbNc\""))
        .stdout(predicate::str::contains("\"replacements_made\": 2"));
}

#[test]
fn test_replace_legacy_group_refs() {
    edrex()
        .args(["replace", r"(\w+)@(\w+)", r"\2 at \1", "me@home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"result\": \"home at me\""));
}

#[test]
fn test_replace_missing_group_is_empty() {
    edrex()
        .args(["replace", "(a)", "[$1$5]", "cab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"result\": \"c[a]b\""));
}

#[test]
fn test_replace_write_with_backup() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("test.txt");
    fs::write(&file_path, "hello world\nworld peace\n").unwrap();

    edrex()
        .args([
            "replace",
            r"\<world\>",
            "earth",
            "--all",
            "--file",
            file_path.to_str().unwrap(),
            "--write",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"written\": true"))
        .stdout(predicate::str::contains("\"replacements_made\": 2"));

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "hello earth\nearth peace\n");

    let backup = fs::read_to_string(dir.path().join("test.txt.bak")).unwrap();
    assert_eq!(backup, "hello world\nworld peace\n");
}

#[test]
fn test_replace_write_no_backup() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("test.txt");
    fs::write(&file_path, "one two\n").unwrap();

    edrex()
        .args([
            "replace",
            "two",
            "2",
            "--file",
            file_path.to_str().unwrap(),
            "--write",
            "--no-backup",
        ])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "one 2\n");
    assert!(!dir.path().join("test.txt.bak").exists());
}

#[test]
fn test_replace_write_requires_file() {
    edrex()
        .args(["replace", "a", "b", "abc", "--write"])
        .assert()
        .failure();
}

#[test]
fn test_translate_whole_word() {
    edrex()
        .args(["translate", "foo", "-w"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""translated": "\\bfoo\\b""#))
        .stdout(predicate::str::contains("\"valid\": true"));
}

#[test]
fn test_translate_invalid() {
    edrex()
        .args(["translate", "(x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": false"))
        .stdout(predicate::str::contains("\"error\""));
}

#[test]
fn test_expand() {
    edrex()
        .args(["expand", r"\1-\t"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""expanded": "$1-\t""#))
        .stdout(predicate::str::contains("\"group\": 1"));
}

#[test]
fn test_text_format() {
    edrex()
        .args(["find", r"\d+", "hello 123", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pattern:"))
        .stdout(predicate::str::contains("Match 1:"));
}

#[test]
fn test_no_command_shows_help() {
    edrex()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}
