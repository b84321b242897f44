// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fluent helpers for running the `bw` binary

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

pub use similar_asserts::assert_eq;

const SCRUBBED_ENV: [&str; 5] = ["BW_CONFIG", "BW_LOG", "BW_POLL_ACTIVE_MS", "BW_POLL_ENDED_MS", "COLOR"];

/// Start building a `bw` invocation with a clean environment
pub fn cli() -> Cli {
    let mut cmd = assert_cmd::Command::cargo_bin("bw").unwrap();
    for var in SCRUBBED_ENV {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    Cli { cmd }
}

pub struct Cli {
    cmd: assert_cmd::Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit code 0
    pub fn passes(mut self) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run { output };
        assert!(run.output.status.success(), "expected success\n{}", run.describe());
        run
    }

    /// Run and require a non-zero exit code
    pub fn fails(mut self) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run { output };
        assert!(!run.output.status.success(), "expected failure\n{}", run.describe());
        run
    }
}

pub struct Run {
    output: Output,
}

impl Run {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout missing {needle:?}\n{}", self.describe());
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout().contains(needle), "stdout has {needle:?}\n{}", self.describe());
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr().contains(needle), "stderr missing {needle:?}\n{}", self.describe());
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }

    pub fn exit_code(self, code: i32) -> Self {
        assert_eq!(self.code(), Some(code), "{}", self.describe());
        self
    }

    /// Stdout parsed as one JSON document per line
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn describe(&self) -> String {
        format!("status: {}\nstdout:\n{}\nstderr:\n{}", self.output.status, self.stdout(), self.stderr())
    }
}

/// Temporary directory holding config files
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }
}
