//! End-to-end tests for CLI exit codes.
//!
//! These tests verify that the CLI returns the exit codes documented in
//! [`dotlink::exit_codes`]:
//!
//! - Exit code 0: Success
//! - Exit code 1: Invalid command-line usage or a fatal error
//! - Exit code 2: A precondition of the command was not met

#[allow(dead_code)]
mod common;
use common::prelude::*;

/// Exit code 0 is returned for --help.
#[test]
fn test_exit_code_help() {
    let mut cmd = cargo_bin_cmd!("dotlink");

    cmd.arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("status"));
}

/// Exit code 0 is returned for --version.
#[test]
fn test_exit_code_version() {
    let mut cmd = cargo_bin_cmd!("dotlink");

    cmd.arg("--version").assert().code(0);
}

/// Exit code 1 is returned for an unknown flag.
#[test]
fn test_exit_code_unknown_flag() {
    let mut cmd = cargo_bin_cmd!("dotlink");

    cmd.arg("--no-such-flag").assert().code(1);
}

/// Exit code 1 is returned for an unknown subcommand.
#[test]
fn test_exit_code_unknown_subcommand() {
    let mut cmd = cargo_bin_cmd!("dotlink");

    cmd.arg("frobnicate").assert().code(1);
}

/// Exit code 1 is returned for an invalid module name.
#[test]
fn test_exit_code_invalid_module_name() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["remove", "../escape"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error:"));
}

/// Exit code 1 is returned when no modules directory can be found.
#[test]
fn test_exit_code_missing_source_root() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("dotlink");
    cmd.env_remove("DOTLINK_BASE")
        .arg("--target")
        .arg(temp.path())
        .arg("--base")
        .arg(temp.path().join("missing"))
        .arg("status")
        .assert()
        .code(1);
}

/// Exit code 2 is returned when importing a path that is already a link.
#[test]
fn test_exit_code_precondition() {
    let fixture = TestFixture::new().with_module_file("base", ".bashrc", "");
    fixture.command().arg("install").assert().success();

    fixture
        .command()
        .arg("import")
        .arg(fixture.target().join(".bashrc"))
        .arg("base")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already a symlink"));
}
