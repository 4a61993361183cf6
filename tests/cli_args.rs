//! Tests for the codeserver binary's exit status and output.

use std::process::Command;

use tempfile::TempDir;

fn codeserver_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_codeserver"))
}

#[test]
fn test_help_lists_options_and_exits_zero() {
    let output = codeserver_cmd()
        .arg("-help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Usage: codeserver"));
    assert!(stdout.contains("-[no]precompile"));
    assert!(stdout.contains("-bindAddress address"));
    assert!(stdout.contains("The ip address of the code server. Defaults to 127.0.0.1."));
}

#[test]
fn test_valid_arguments_print_configuration() {
    let work = TempDir::new().expect("Failed to create temp dir");
    let output = codeserver_cmd()
        .args(["-bindAddress", "10.0.0.5", "-port", "1234", "-workDir"])
        .arg(work.path())
        .arg("com.example.App")
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("modules: com.example.App"));
    assert!(stdout.contains("bindAddress: 10.0.0.5"));
    assert!(stdout.contains("preferredHost: 10.0.0.5"));
    assert!(stdout.contains("port: 1234"));
    assert!(stdout.contains(&format!("resolvedWorkDir: {}", work.path().display())));
}

#[test]
fn test_unknown_flag_exits_with_error_and_usage() {
    let output = codeserver_cmd()
        .args(["-doesNotExist", "com.example.App"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown argument: -doesNotExist"));
    assert!(stderr.contains("Usage: codeserver"));
}

#[test]
fn test_missing_module_is_a_usage_error() {
    let output = codeserver_cmd()
        .args(["-port", "1234"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage: at least one module must be supplied"));
}

#[test]
fn test_incompatible_flags_are_a_usage_error() {
    let output = codeserver_cmd()
        .args(["-compileTest", "-noprecompile", "com.example.App"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage: -noprecompile and -compileTest are incompatible"));
}

#[test]
fn test_missing_src_dir_fails() {
    let output = codeserver_cmd()
        .args(["-src", "/no/such/dir", "com.example.App"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-src: not a directory: /no/such/dir"));
}

#[test]
fn test_rust_log_records_parser_events() {
    let output = codeserver_cmd()
        .env("RUST_LOG", "debug")
        .args(["-port", "1234", "com.example.App"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dispatching option"), "stderr: {}", stderr);
    assert!(stderr.contains("configuration accepted"), "stderr: {}", stderr);
}

#[test]
fn test_rust_log_records_rejected_argument() {
    let output = codeserver_cmd()
        .env("RUST_LOG", "debug")
        .args(["-port", "x", "com.example.App"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("argument rejected"), "stderr: {}", stderr);
}

#[test]
fn test_log_level_flag_applies_after_parsing() {
    let output = codeserver_cmd()
        .env_remove("RUST_LOG")
        .args(["com.example.App"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("using work directory"));

    let output = codeserver_cmd()
        .env_remove("RUST_LOG")
        .args(["-logLevel", "ERROR", "com.example.App"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("using work directory"));
}
