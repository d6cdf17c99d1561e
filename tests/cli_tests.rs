//! End-to-end tests for the `study-timer` binary.
//!
//! The binary reads console commands from stdin, so each test pipes a short
//! script and checks the printed output.

use assert_cmd::Command;
use predicates::prelude::*;

use study_timer::sound::SoundSource;

fn study_timer() -> Command {
    let mut cmd = Command::cargo_bin("study-timer").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Argument Tests
// ============================================================================

#[test]
fn test_help() {
    study_timer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--focus"))
        .stdout(predicate::str::contains("--rounds"))
        .stdout(predicate::str::contains("--tick-ms").not());
}

#[test]
fn test_completions_bash() {
    study_timer()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("study-timer"));
}

#[test]
fn test_rejects_zero_focus() {
    study_timer()
        .args(["--focus", "0", "--no-sound"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--focus"));
}

#[test]
fn test_rejects_sound_with_no_sound() {
    study_timer()
        .args(["--no-sound", "--sound", "Glass"])
        .assert()
        .failure();
}

// ============================================================================
// Console Tests
// ============================================================================

#[test]
fn test_status_then_quit() {
    study_timer()
        .arg("--no-sound")
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("25:00"))
        .stdout(predicate::str::contains("ラウンド: 1/4"));
}

#[test]
fn test_custom_settings_and_json() {
    study_timer()
        .args(["--no-sound", "--focus", "40", "--rounds", "3"])
        .write_stdin("json\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("40:00"))
        .stdout(predicate::str::contains("\"rounds_per_cycle\": 3"));
}

#[test]
fn test_mode_and_set_commands() {
    study_timer()
        .arg("--no-sound")
        .write_stdin("set long 20\nmode long\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("モード: 長い休憩"))
        .stdout(predicate::str::contains("20:00"));
}

#[test]
fn test_status_reflects_commands_on_earlier_lines() {
    let script = "set long 20\nmode long\nstatus\nset focus 33\nmode focus\nstatus\nquit\n";
    for _ in 0..20 {
        study_timer()
            .arg("--no-sound")
            .write_stdin(script)
            .assert()
            .success()
            .stdout(predicate::str::contains("残り時間: 20:00"))
            .stdout(predicate::str::contains("残り時間: 33:00"));
    }
}

#[test]
fn test_unknown_command_reports_error() {
    study_timer()
        .arg("--no-sound")
        .write_stdin("dance\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("dance"));
}

// ============================================================================
// Sound Source Tests
// ============================================================================

#[test]
fn test_sound_path_resolves_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bell.wav");
    std::fs::write(&path, b"not really audio").unwrap();

    let source = SoundSource::resolve(path.to_str().unwrap());
    assert_eq!(source, SoundSource::file(path.clone()));
    assert_eq!(source.name(), "bell");
}
