//! End-to-end runs of the action binary.

use std::time::Duration;

use crate::common::Runner;

fn is_time_string(value: &str) -> bool {
    // HH:MM:SS GMT+hhmm
    let bytes = value.as_bytes();
    value.len() == 17
        && bytes[2] == b':'
        && bytes[5] == b':'
        && &value[8..12] == " GMT"
        && matches!(bytes[12], b'+' | b'-')
}

#[test]
fn zero_delay_succeeds_and_publishes_time() {
    let result = Runner::new().input("milliseconds", "0").run();

    assert_eq!(result.code(), Some(0), "stderr: {}", result.stderr());
    let time = result.output_value("time").expect("time output");
    assert!(is_time_string(&time), "unexpected time format: {time}");

    let stdout = result.stdout();
    let info_lines: Vec<&str> = stdout
        .lines()
        .filter(|line| !line.starts_with("::"))
        .collect();
    assert_eq!(info_lines.len(), 2, "stdout: {stdout}");
    assert!(info_lines.iter().all(|line| is_time_string(line)));
}

#[test]
fn event_payload_is_logged_at_debug() {
    let result = Runner::new().input("milliseconds", "0").run();
    let stdout = result.stdout();
    let debug = stdout
        .lines()
        .find(|line| line.starts_with("::debug::The event payload: "))
        .expect("payload debug line");
    // Pretty-printed JSON is escaped onto a single command line.
    assert!(debug.contains("%0A"));
    assert!(debug.contains("\"action\": \"opened\""));
}

#[test]
fn waits_at_least_the_requested_time() {
    let result = Runner::new().input("milliseconds", "150").run();
    assert_eq!(result.code(), Some(0), "stderr: {}", result.stderr());
    assert!(result.elapsed >= Duration::from_millis(150));
}

#[test]
fn non_numeric_input_fails_the_run() {
    let result = Runner::new().input("milliseconds", "abc").run();

    assert_eq!(result.code(), Some(1));
    assert!(
        result
            .stdout()
            .contains("::error::milliseconds not a number: 'abc'")
    );
    assert_eq!(result.output_value("time"), None);
    assert!(result.elapsed < Duration::from_secs(10));
}

#[test]
fn missing_input_fails_the_run() {
    let result = Runner::new().run();
    assert_eq!(result.code(), Some(1));
    assert!(result.stdout().contains("::error::Input required and not supplied: milliseconds"));
}

#[test]
fn negative_input_fails_the_run() {
    let result = Runner::new().input("milliseconds", "-10").run();
    assert_eq!(result.code(), Some(1));
    assert!(
        result
            .stdout()
            .contains("::error::milliseconds must not be negative (got -10)")
    );
}

#[test]
fn legacy_output_command_without_output_file() {
    let result = Runner::new()
        .input("milliseconds", "0")
        .legacy_output()
        .run();
    assert_eq!(result.code(), Some(0), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("::set-output name=time::"));
}

#[test]
fn missing_output_file_fails_the_run() {
    let runner = Runner::new().input("milliseconds", "0");
    let missing = runner.path("gone");
    let result = runner
        .var("GITHUB_OUTPUT", missing.to_str().unwrap())
        .run();
    assert_eq!(result.code(), Some(1));
    assert!(result.stdout().contains("::error::Missing file at path:"));
}

#[test]
fn runner_debug_adds_run_summary() {
    let result = Runner::new()
        .input("milliseconds", "0")
        .var("RUNNER_DEBUG", "1")
        .run();
    assert!(
        result
            .stdout()
            .contains("::debug::Triggered by 'pull_request' on octo-org/hello")
    );
}
