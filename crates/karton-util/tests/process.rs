use karton_util::process::{run_hook_line, CommandBuilder};
use tempfile::TempDir;

#[test]
fn test_builder_simple_command() {
    let output = CommandBuilder::new("echo").arg("hello").exec().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "hello");
}

#[test]
fn test_builder_with_env() {
    let output = CommandBuilder::new("sh")
        .arg("-c")
        .arg("echo $MY_TEST_VAR")
        .env("MY_TEST_VAR", "karton_test_value")
        .exec()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "karton_test_value");
}

#[test]
fn test_builder_nonexistent_program() {
    let result = CommandBuilder::new("nonexistent_program_xyz_123").exec();
    assert!(result.is_err());
}

#[test]
fn test_run_hook_line_success() {
    let tmp = TempDir::new().unwrap();
    run_hook_line("touch hook.marker", tmp.path(), "pre-bundle").unwrap();
    assert!(tmp.path().join("hook.marker").is_file());
}

#[test]
fn test_run_hook_line_failure_names_hook() {
    let tmp = TempDir::new().unwrap();
    let err = run_hook_line("exit 3", tmp.path(), "post-bundle").unwrap_err();
    assert!(err.to_string().contains("post-bundle"), "got: {err}");
}
