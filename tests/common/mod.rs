//! Shared test utilities and fixtures
//!
//! Each test gets a scratch runner environment: a workspace directory, an
//! empty `GITHUB_OUTPUT` file, and an event payload file. The compiled binary
//! is run with a cleared environment so the host machine cannot leak in.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_wait-action");
const RUN_DEADLINE: Duration = Duration::from_secs(20);

pub struct Runner {
    dir: TempDir,
    vars: Vec<(String, String)>,
    legacy_output: bool,
}

pub struct RunResult {
    pub output: Output,
    pub elapsed: Duration,
    pub output_file: String,
}

impl RunResult {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    /// Value of `name` in the `GITHUB_OUTPUT` file, if written.
    pub fn output_value(&self, name: &str) -> Option<String> {
        let mut lines = self.output_file.lines();
        while let Some(line) = lines.next() {
            if let Some(delimiter) = line.strip_prefix(&format!("{name}<<")) {
                let mut value = Vec::new();
                for line in lines.by_ref() {
                    if line == delimiter {
                        return Some(value.join("\n"));
                    }
                    value.push(line);
                }
            }
        }
        None
    }
}

impl Runner {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("output"), "").expect("output file");
        fs::write(
            dir.path().join("event.json"),
            r#"{"action": "opened", "number": 7}"#,
        )
        .expect("event file");
        Self {
            dir,
            vars: Vec::new(),
            legacy_output: false,
        }
    }

    pub fn input(self, name: &str, value: &str) -> Self {
        let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
        self.var(&key, value)
    }

    pub fn var(mut self, key: &str, value: &str) -> Self {
        self.vars.push((key.to_string(), value.to_string()));
        self
    }

    /// Leave `GITHUB_OUTPUT` unset so outputs use the `::set-output` command.
    pub fn legacy_output(mut self) -> Self {
        self.legacy_output = true;
        self
    }

    /// Write `.github/wait-action.toml` into the workspace.
    pub fn settings(self, content: &str) -> Self {
        let github = self.dir.path().join(".github");
        fs::create_dir_all(&github).expect("settings dir");
        fs::write(github.join("wait-action.toml"), content).expect("settings file");
        self
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn run(self) -> RunResult {
        let output_path = self.path("output");
        let mut cmd = Command::new(BIN);
        cmd.env_clear()
            .env("GITHUB_WORKSPACE", self.dir.path())
            .env("GITHUB_EVENT_PATH", self.path("event.json"))
            .env("GITHUB_EVENT_NAME", "pull_request")
            .env("GITHUB_REPOSITORY", "octo-org/hello")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if !self.legacy_output {
            cmd.env("GITHUB_OUTPUT", &output_path);
        }
        for (key, value) in &self.vars {
            cmd.env(key, value);
        }

        let start = Instant::now();
        let mut child = cmd.spawn().expect("spawn wait-action");
        loop {
            if child.try_wait().expect("try_wait").is_some() {
                break;
            }
            if start.elapsed() > RUN_DEADLINE {
                let _ = child.kill();
                panic!("wait-action did not exit within {RUN_DEADLINE:?}");
            }
            thread::sleep(Duration::from_millis(5));
        }
        let elapsed = start.elapsed();
        let output = child.wait_with_output().expect("collect output");
        let output_file = fs::read_to_string(&output_path).unwrap_or_default();

        RunResult {
            output,
            elapsed,
            output_file,
        }
    }
}
