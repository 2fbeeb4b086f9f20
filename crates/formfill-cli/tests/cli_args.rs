use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("formfill").unwrap()
}

#[test]
fn help_flag_prints_usage_with_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("fields"))
        .stdout(predicate::str::contains("templates"));
}

#[test]
fn render_subcommand_help() {
    cmd()
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DATA"))
        .stdout(predicate::str::contains("--mappings"))
        .stdout(predicate::str::contains("--form"))
        .stdout(predicate::str::contains("--backend-url"));
}

#[test]
fn fields_subcommand_help() {
    cmd()
        .args(["fields", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DATA"))
        .stdout(predicate::str::contains("--mappings"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn templates_subcommand_help() {
    cmd()
        .args(["templates", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--backend-url"));
}

#[test]
fn render_requires_form_argument() {
    cmd()
        .args(["render", "data.json", "--mappings", "m.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--form"));
}

#[test]
fn no_args_shows_usage() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
