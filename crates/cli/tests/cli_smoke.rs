//! CLI smoke tests for rig.
//!
//! These tests verify flag handling end to end and run the full build
//! pipeline against a scratch root.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rig_cmd() -> Command {
    cargo_bin_cmd!("rig")
}

/// Create a scratch root with a marker, a build definition, and sources.
fn scratch_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("RigProject.lua"), "").unwrap();
    std::fs::write(
        temp.path().join("RigSolution.lua"),
        r#"
RigSolution = {}
function RigSolution.new(target)
    local sln = rig.solution(target)
    local app = sln:create_project("App")
    app:add_source_files("src/main.lua")
    return sln
end
"#,
    )
    .unwrap();
    std::fs::create_dir_all(temp.path().join("src")).unwrap();
    std::fs::write(temp.path().join("src/main.lua"), "print('hello')\n").unwrap();
    temp
}

#[test]
fn help_flag_works() {
    rig_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: rig [options]"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn version_flag_works() {
    rig_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rig "));
}

#[test]
fn invalid_config_value_fails_with_suggestions() {
    rig_cmd()
        .arg("--config:Bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument: --config:Bogus"))
        .stderr(predicate::str::contains("--config:Debug"))
        .stderr(predicate::str::contains("--config:Production"));
}

#[test]
fn unknown_option_fails() {
    rig_cmd()
        .arg("--no-such-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown option: --no-such-flag"));
}

#[test]
fn build_produces_artifacts() {
    let temp = scratch_root();

    rig_cmd()
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Build complete (1 project(s))"));

    assert!(temp.path().join("Binaries").join("App.exe").is_file());
    assert!(temp.path().join(".rig").join("RigSolution.dll").is_file());
}

#[test]
fn build_from_subdirectory_finds_root() {
    let temp = scratch_root();
    let nested = temp.path().join("src");

    rig_cmd().current_dir(&nested).assert().success();
    assert!(temp.path().join("Binaries").join("App.exe").is_file());
}

#[test]
fn root_option_overrides_working_directory() {
    let temp = scratch_root();

    rig_cmd()
        .arg(format!("--root:{}", temp.path().display()))
        .assert()
        .success();
    assert!(temp.path().join("Binaries").join("App.exe").is_file());
}

#[test]
fn missing_root_marker_fails() {
    let temp = TempDir::new().unwrap();

    rig_cmd().current_dir(temp.path()).assert().failure();
}

#[test]
fn missing_solution_file_fails() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("RigProject.lua"), "").unwrap();

    rig_cmd()
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("RigSolution.lua"));
}

#[test]
fn broken_source_fails_the_build() {
    let temp = scratch_root();
    std::fs::write(temp.path().join("src/main.lua"), "this is not lua {{{\n").unwrap();

    rig_cmd()
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("App"));
}
