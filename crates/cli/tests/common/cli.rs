//! CLI command execution helpers
//!
//! Wraps the built `trprune` binary with an isolated environment: the
//! config file and kubeconfig point into a temp directory, so no test can
//! reach a real cluster.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// CLI command builder
pub struct PruneCommand {
    binary_path: PathBuf,
    home: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
    stdin_data: Option<String>,
}

impl PruneCommand {
    /// Create a new command isolated under `home`
    pub fn new(home: impl AsRef<Path>) -> Self {
        let home = home.as_ref().to_path_buf();
        let mut env = HashMap::new();
        env.insert(
            "TRPRUNE_CONFIG".to_string(),
            home.join("config.toml").display().to_string(),
        );
        env.insert(
            "KUBECONFIG".to_string(),
            home.join("kubeconfig").display().to_string(),
        );

        Self {
            binary_path: find_trprune_binary(),
            home,
            args: Vec::new(),
            env,
            stdin_data: None,
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Provide stdin data
    pub fn stdin(&mut self, data: &str) -> &mut Self {
        self.stdin_data = Some(data.to_string());
        self
    }

    /// Execute command and capture its output
    pub fn execute(&self) -> Result<CommandResult> {
        let mut command = Command::new(&self.binary_path);
        command
            .args(&self.args)
            .current_dir(&self.home)
            .env_remove("RUST_LOG")
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().context("Failed to spawn command")?;

        // Closing stdin without data makes any prompt see end of input
        if let Some(mut stdin) = child.stdin.take() {
            if let Some(data) = &self.stdin_data {
                use std::io::Write;
                stdin.write_all(data.as_bytes())?;
            }
        }

        let output = child
            .wait_with_output()
            .context("Failed to wait for command")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }
}

/// Temp directory used as an isolated home for one test
pub fn sandbox() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Path of the `trprune` binary built for this test run
fn find_trprune_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_trprune"))
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// prune!(dir, "delete", "--all").stdin("y\n").assert_failure()?;
/// ```
#[macro_export]
macro_rules! prune {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::PruneCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
