//! `Logger::fatal` exits the process, so each scenario re-runs this test
//! binary filtered to itself with a marker variable set; the child logs and
//! exits, the parent inspects the exit status and the log file.

use rotalog::{
    Config, Logger, init_default, with_default_format, with_json_format, with_level_off,
    with_output_file,
};
use std::path::Path;
use std::process::{Command, Output};

const CHILD_LOG_PATH: &str = "ROTALOG_FATAL_CHILD_LOG";

fn run_child(test_name: &str, log_path: &Path) -> Output {
    Command::new(std::env::current_exe().expect("test binary path"))
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_LOG_PATH, log_path)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn child test process")
}

#[test]
fn fatal_writes_error_record_and_exits() {
    if let Some(path) = std::env::var_os(CHILD_LOG_PATH) {
        let logger = Logger::new([with_output_file(path), with_json_format()]);
        logger.info("about to fail", &[]);
        logger.fatal("unrecoverable state", &[("code", &7)]);
    }

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("fatal.log");
    let output = run_child("fatal_writes_error_record_and_exits", &log_path);

    assert_eq!(output.status.code(), Some(1));
    let content = std::fs::read_to_string(&log_path).expect("child wrote the log file");
    let records: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["level"], "ERROR");
    assert_eq!(records[1]["message"], "unrecoverable state");
    assert_eq!(records[1]["fields"]["code"], 7);
}

#[test]
fn fatal_on_disabled_logger_still_writes() {
    if let Some(path) = std::env::var_os(CHILD_LOG_PATH) {
        let process = Config {
            output_file: Some(path.into()),
            ..Config::new()
        };
        init_default(&process, None).expect("install process default");

        let logger = Logger::new([with_level_off()]);
        assert!(!logger.is_error_enabled());
        logger.error("suppressed", &[]);
        logger.fatal("shutting down", &[("reason", &"disabled logger")]);
    }

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("fallback.log");
    let output = run_child("fatal_on_disabled_logger_still_writes", &log_path);

    assert_eq!(output.status.code(), Some(1));
    let content = std::fs::read_to_string(&log_path).expect("child wrote the log file");
    assert!(!content.contains("suppressed"));
    let line = content.lines().last().expect("fatal record");
    assert!(line.contains("ERROR"));
    assert!(line.ends_with(r#"shutting down reason="disabled logger""#));
}

#[test]
fn fatal_on_disabled_logger_without_process_default_writes_to_stderr() {
    if let Some(path) = std::env::var_os(CHILD_LOG_PATH) {
        let logger = Logger::new([with_level_off(), with_output_file(path)]);
        logger.fatal("no logger installed", &[("code", &9)]);
    }

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("unused.log");
    let output = run_child(
        "fatal_on_disabled_logger_without_process_default_writes_to_stderr",
        &log_path,
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"), "stderr: {}", stderr);
    assert!(stderr.contains("no logger installed code=9"), "stderr: {}", stderr);
    assert!(!log_path.exists());
}

#[test]
fn fatal_with_default_format_without_process_default_writes_to_stderr() {
    if std::env::var_os(CHILD_LOG_PATH).is_some() {
        let logger = Logger::new([with_default_format()]);
        logger.fatal("forwarded fatal", &[]);
    }

    let dir = tempfile::tempdir().unwrap();
    let output = run_child(
        "fatal_with_default_format_without_process_default_writes_to_stderr",
        &dir.path().join("unused.log"),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("forwarded fatal"), "stderr: {}", stderr);
}
