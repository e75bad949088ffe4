//! Smoke tests for the CLI front-end (Component K), exercised as a subprocess the way
//! `assert_cmd` tests a binary end to end rather than through its internal API.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn sat_subcommand_exits_one_on_unsat() {
    Command::cargo_bin("vericore")
        .unwrap()
        .args(["sat", "((p & ~q) & (p <-> q))"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("UNSAT"));
}

#[test]
fn sat_subcommand_exits_zero_and_prints_a_model_on_sat() {
    Command::cargo_bin("vericore")
        .unwrap()
        .args(["sat", "(~p2 & (p2 | ((p1 <-> p3) -> p2)))"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("SAT"));
}

#[test]
fn smt_subcommand_reports_unsat_for_a_congruence_conflict() {
    Command::cargo_bin("vericore")
        .unwrap()
        .args(["smt", "(g(a)=c & ((~f(g(a))=f(c) | g(a)=d) & ~c=d))"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("UNSAT"));
}

#[test]
fn rejects_passing_both_a_formula_and_a_file() {
    Command::cargo_bin("vericore")
        .unwrap()
        .args(["sat", "p", "--file", "/dev/null"])
        .assert()
        .failure();
}

#[test]
fn rejects_malformed_syntax_with_exit_code_three() {
    Command::cargo_bin("vericore")
        .unwrap()
        .args(["sat", "(p & )"])
        .assert()
        .code(3);
}
