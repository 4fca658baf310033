use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn karton_cmd() -> Command {
    Command::cargo_bin("karton").unwrap()
}

fn scaffold(tmp: &TempDir, name: &str) -> std::path::PathBuf {
    karton_cmd()
        .current_dir(tmp.path())
        .args(["new", name])
        .assert()
        .success();
    tmp.path().join(name)
}

#[test]
fn test_exclude_list_shows_defaults() {
    let tmp = TempDir::new().unwrap();
    let project_dir = scaffold(&tmp, "list-defaults");

    karton_cmd()
        .current_dir(&project_dir)
        .args(["exclude", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("META-INF/LICENSE")
                .and(predicate::str::contains("CertPathReviewerMessages.properties")),
        );
}

#[test]
fn test_exclude_add_and_remove_round_trip() {
    let tmp = TempDir::new().unwrap();
    let project_dir = scaffold(&tmp, "round-trip");

    karton_cmd()
        .current_dir(&project_dir)
        .args(["exclude", "add", "META-INF/*.kotlin_module"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added exclude pattern"));

    karton_cmd()
        .current_dir(&project_dir)
        .args(["exclude", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("META-INF/*.kotlin_module"));

    karton_cmd()
        .current_dir(&project_dir)
        .args(["exclude", "remove", "META-INF/*.kotlin_module"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed exclude pattern"));

    karton_cmd()
        .current_dir(&project_dir)
        .args(["exclude", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("META-INF/*.kotlin_module").not());
}

#[test]
fn test_exclude_add_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let project_dir = scaffold(&tmp, "idempotent-add");

    karton_cmd()
        .current_dir(&project_dir)
        .args(["exclude", "add", "META-INF/LICENSE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already present"));
}

#[test]
fn test_exclude_add_rejects_malformed_pattern() {
    let tmp = TempDir::new().unwrap();
    let project_dir = scaffold(&tmp, "bad-pattern");

    karton_cmd()
        .current_dir(&project_dir)
        .args(["exclude", "add", "META-INF/[unclosed"])
        .assert()
        .failure();

    let manifest = fs::read_to_string(project_dir.join("Karton.toml")).unwrap();
    assert!(!manifest.contains("unclosed"));
}

#[test]
fn test_exclude_remove_missing_pattern_reports_not_found() {
    let tmp = TempDir::new().unwrap();
    let project_dir = scaffold(&tmp, "remove-missing");

    karton_cmd()
        .current_dir(&project_dir)
        .args(["exclude", "remove", "never/added.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}
