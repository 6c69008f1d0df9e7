use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn weekplan(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("weekplan").unwrap();
    cmd.env("WEEKPLAN_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("WEEKPLAN_LOG");
    cmd
}

#[test]
fn test_show_defaults_on_fresh_home() {
    let temp_dir = tempfile::tempdir().unwrap();

    weekplan(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("week1"))
        .stdout(predicate::str::contains("1. Monday (0/0)"))
        .stdout(predicate::str::contains("2. Tuesday (0/0)"));
}

#[test]
fn test_note_lifecycle_persists_between_runs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    weekplan(home)
        .args(["note", "add", "Monday", "Buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note added to Monday"))
        .stdout(predicate::str::contains("1. [ ] Buy milk"));

    weekplan(home)
        .args(["note", "done", "Monday", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note completed"));

    weekplan(home)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. [x] Buy milk"));

    weekplan(home)
        .args(["note", "rm", "Monday", "1"])
        .assert()
        .success();

    weekplan(home)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk").not());
}

#[test]
fn test_notes_move_across_sections() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    for (section, text) in [("Monday", "X"), ("Monday", "m2"), ("Tuesday", "t1")] {
        weekplan(home)
            .args(["note", "add", section, text])
            .assert()
            .success();
    }

    weekplan(home)
        .args(["note", "mv", "Monday", "1", "Tuesday", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note moved to Tuesday"))
        .stdout(predicate::str::contains("1. Monday (0/1)"))
        .stdout(predicate::str::contains("2. Tuesday (0/2)"));
}

#[test]
fn test_week_add_navigates_and_rename_keeps_notes() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    weekplan(home)
        .args(["week", "add", "Sprint", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week added: Sprint 1"));

    weekplan(home)
        .args(["note", "add", "Tuesday", "Demo"])
        .assert()
        .success();

    weekplan(home)
        .args(["week", "rename", "Sprint 1", "Sprint 2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sprint 2"))
        .stdout(predicate::str::contains("1. [ ] Demo"));

    weekplan(home)
        .args(["week", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("▸ 4. Sprint 2"));
}

#[test]
fn test_rejections_are_reported_not_errors() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    weekplan(home)
        .args(["week", "rename", "week1", "week2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"week2\" already exists"));

    weekplan(home)
        .args(["section", "add", "Monday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Monday\" already exists"));

    weekplan(home)
        .args(["--week", "nope", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"nope\" not found"));
}

#[test]
fn test_global_week_flag_selects_before_command() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    weekplan(home)
        .args(["--week", "week2", "section", "add", "Friday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("week2"))
        .stdout(predicate::str::contains("3. Friday (0/0)"));

    // week1 did not get the section
    weekplan(home)
        .args(["--week", "week1", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Friday").not());
}

#[test]
fn test_corrupt_week_slot_falls_back_to_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    std::fs::write(home.join("notes_week1.json"), "{not json").unwrap();

    weekplan(home)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Monday (0/0)"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    std::fs::write(home.join("config.json"), r#"{"default_sections": [""]}"#).unwrap();

    weekplan(home)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn test_position_zero_is_rejected_by_parser() {
    let temp_dir = tempfile::tempdir().unwrap();

    weekplan(temp_dir.path())
        .args(["section", "mv", "0", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positions start at 1"));
}

#[test]
fn test_week_list_counts_notes_of_unselected_weeks() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    for text in ["Buy milk", "Gym"] {
        weekplan(home)
            .args(["note", "add", "Monday", text])
            .assert()
            .success();
    }
    weekplan(home)
        .args(["week", "select", "week2"])
        .assert()
        .success();

    weekplan(home)
        .args(["week", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. week1  2 notes"))
        .stdout(predicate::str::contains("▸ 2. week2  0 notes"));
}

#[test]
fn test_weeks_differing_by_case_keep_separate_notes() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    weekplan(home)
        .args(["week", "add", "Week1"])
        .assert()
        .success();
    weekplan(home)
        .args(["--week", "Week1", "note", "add", "Monday", "upper"])
        .assert()
        .success();
    weekplan(home)
        .args(["--week", "week1", "note", "add", "Monday", "lower"])
        .assert()
        .success();

    weekplan(home)
        .args(["--week", "Week1", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upper"))
        .stdout(predicate::str::contains("lower").not());
}
