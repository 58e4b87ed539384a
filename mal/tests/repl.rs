//! End-to-end tests driving the real `mal` binary over stdin/stdout,
//! exercising the REPL contract described for the interpreter's external
//! interface.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn prints_prompt_and_arithmetic_result() {
    Command::cargo_bin("mal")
        .unwrap()
        .write_stdin("(+ 1 2)\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("user> 3"));
}

#[test]
fn reports_reader_errors_without_crashing() {
    Command::cargo_bin("mal")
        .unwrap()
        .write_stdin("(1 2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error:"));
}

#[test]
fn bindings_persist_across_repl_lines() {
    Command::cargo_bin("mal")
        .unwrap()
        .write_stdin("(def! a 10)\n(* a 2)\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("20"));
}

#[test]
fn not_bootstrap_is_available_at_startup() {
    Command::cargo_bin("mal")
        .unwrap()
        .write_stdin("(not nil)\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("user> true"));
}
