//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated temporary HOME
//! - Laying out PATH directories, files and symlinks inside it
//! - Saving trace fixtures
//! - Executing the CLI with a controlled environment

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::TraceScript;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use lspath_testing::{TestWorld, TraceScript};
///
/// let world = TestWorld::new().with_dir("bin");
/// let trace = world
///     .write_trace("zsh.trace", &TraceScript::zsh().assign_path("/etc/zprofile", 1, "/usr/bin"))
///     .unwrap();
///
/// let result = world
///     .run(&["analyze", "--mode", "trace", "--replay", trace.to_str().unwrap()])
///     .unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    home: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let home = temp_dir.path().join("home");
        std::fs::create_dir_all(&home).expect("Failed to create home dir");

        Self {
            temp_dir,
            home,
            env_vars: HashMap::new(),
        }
    }

    /// The fake HOME handed to the CLI.
    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` under HOME.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.home.join(rel)
    }

    /// Same as [`Self::path`], as a string for PATH values.
    pub fn path_str(&self, rel: &str) -> String {
        self.path(rel).display().to_string()
    }

    /// Create a directory (and parents) under HOME.
    pub fn with_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.path(rel)).expect("Failed to create dir");
        self
    }

    /// Create a file under HOME. On unix it is marked executable.
    pub fn with_file(self, rel: &str, contents: &str) -> Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, contents).expect("Failed to write file");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to set permissions");
        }
        self
    }

    /// Create a symlink at `link` pointing to `target`, both relative to HOME.
    #[cfg(unix)]
    pub fn with_symlink(self, link: &str, target: &str) -> Self {
        let link_path = self.path(link);
        if let Some(parent) = link_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::os::unix::fs::symlink(self.path(target), &link_path).expect("Failed to create symlink");
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// PATH the CLI process sees as its live session PATH.
    pub fn with_live_path(self, dirs: &[&str]) -> Self {
        self.with_env("PATH", dirs.join(":"))
    }

    /// Save a trace fixture next to HOME and return its path.
    pub fn write_trace(&self, name: &str, script: &TraceScript) -> Result<PathBuf> {
        let path = self.temp_dir.path().join("traces").join(name);
        script.write_to(&path)?;
        Ok(path)
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// HOME points at the fake home, the config file lookup points at a file
    /// that does not exist (so defaults apply), and RUST_LOG is cleared.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.env("HOME", &self.home)
            .env("LSPATH_CONFIG", self.temp_dir.path().join("config.toml"))
            .env_remove("RUST_LOG")
            .current_dir(self.temp_dir.path());

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run the CLI with the given arguments.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built (cargo test does this for the CLI crate's integration tests).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("lspath")
            .map_err(|e| anyhow::anyhow!("Failed to find lspath binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Parse stdout as a serialized analysis result.
    pub fn analysis(&self) -> Result<lspath_types::AnalysisResult> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
