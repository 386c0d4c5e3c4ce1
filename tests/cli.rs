//! CLI surface tests. These exercise argument handling only: the full
//! pipeline needs flatpak and network access, which the test environment
//! does not have.

use assert_cmd::Command;
use predicates::prelude::*;

fn generator() -> Command {
    Command::cargo_bin("flatpak-dotnet-generator").unwrap()
}

#[test]
fn help_lists_the_restore_options() {
    generator()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--runtime"))
        .stdout(predicate::str::contains("--freedesktop"))
        .stdout(predicate::str::contains("--only-arches"))
        .stdout(predicate::str::contains("--dotnet-args"));
}

#[test]
fn requires_an_output_path() {
    generator()
        .assert()
        .failure()
        .stderr(predicate::str::contains("OUTPUT"));
}

#[test]
fn requires_at_least_one_project() {
    generator()
        .arg("sources.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PROJECT"));
}

#[test]
fn reports_version() {
    generator().arg("--version").assert().success();
}
