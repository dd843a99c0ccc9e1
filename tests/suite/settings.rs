//! Settings file handling through the binary.

use crate::common::Runner;

#[test]
fn maximum_from_workspace_settings_is_enforced() {
    let result = Runner::new()
        .settings("[delay]\nmax_milliseconds = 10\n")
        .input("milliseconds", "5000")
        .run();

    assert_eq!(result.code(), Some(1));
    assert!(
        result
            .stdout()
            .contains("::error::milliseconds 5000 exceeds the configured maximum of 10")
    );
    assert!(result.elapsed.as_millis() < 5000);
}

#[test]
fn output_name_from_settings() {
    let result = Runner::new()
        .settings("[output]\nname = \"finished-at\"\n")
        .input("milliseconds", "0")
        .run();

    assert_eq!(result.code(), Some(0), "stderr: {}", result.stderr());
    assert!(result.output_value("finished-at").is_some());
    assert_eq!(result.output_value("time"), None);
}

#[test]
fn explicit_settings_path_must_exist() {
    let runner = Runner::new().input("milliseconds", "0");
    let missing = runner.path("missing.toml");
    let result = runner
        .var("WAIT_ACTION_CONFIG", missing.to_str().unwrap())
        .run();

    assert_eq!(result.code(), Some(1));
    assert!(result.stdout().contains("::error::failed to read settings at"));
}

#[test]
fn malformed_settings_fail_the_run() {
    let result = Runner::new()
        .settings("[delay\n")
        .input("milliseconds", "0")
        .run();

    assert_eq!(result.code(), Some(1));
    assert!(result.stdout().contains("::error::failed to parse settings at"));
}
