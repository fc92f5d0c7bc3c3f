use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness for running CLI commands against a temporary database
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self { temp_dir, db_path }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("tomatillo").expect("Failed to find tomatillo binary");

        // Run inside the temp dir so no stray tomatillo.toml is picked up.
        cmd.current_dir(self.temp_dir.path());
        cmd.env("TOMATILLO_DATABASE_PATH", &self.db_path);
        cmd.env("TOMATILLO_COLOR", "false");
        cmd.env_remove("TOMATILLO_YEAR_LAYOUT");
        cmd.env_remove("TOMATILLO_DEFAULT_LIST_DAYS");

        cmd
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Write a file into the harness directory and return its path
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// Common test fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub fn sample_task_args() -> Vec<&'static str> {
        vec!["add", "Write report", "--estimate", "3"]
    }

    pub fn sample_load_file() -> &'static str {
        "# sprint backlog\nTask1,3\n\nTask2, 2\nTask3 ,1\n"
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("Created task")
    }

    pub fn has_task_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Name"))
            .and(predicate::str::contains("Progress"))
    }

    pub fn empty_result() -> impl Predicate<str> {
        predicate::str::contains("No tasks found")
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
