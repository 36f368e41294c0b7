//! Uniform external-command execution.
//!
//! Every external tool this crate touches (git, npm, archive backends) goes
//! through one contract: argument vector, working directory, environment
//! overrides, captured or inherited streams, blocking wait, exit status.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[derive(Debug, Clone)]
pub struct ExecSpec {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    envs: Vec<(String, String)>,
    stdin_file: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ExecOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl ExecSpec {
    pub fn new(program: impl Into<String>) -> Self {
        ExecSpec {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
            stdin_file: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Feed the process a file on stdin (used for manifest-on-stdin backends).
    pub fn stdin_file(mut self, path: impl AsRef<Path>) -> Self {
        self.stdin_file = Some(path.as_ref().to_path_buf());
        self
    }

    fn command(&self) -> Result<Command> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        for (key, value) in &self.envs {
            command.env(key, value);
        }
        if let Some(path) = &self.stdin_file {
            let file = File::open(path)
                .with_context(|| format!("Failed to open stdin file {}", path.display()))?;
            command.stdin(Stdio::from(file));
        }
        Ok(command)
    }

    /// Run to completion with captured streams.
    pub fn run_captured(&self) -> Result<ExecOutput> {
        let output = self
            .command()?
            .output()
            .with_context(|| format!("Failed to execute {}", self.program))?;

        Ok(ExecOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run to completion with inherited streams, so the user sees the tool's
    /// own diagnostics live. Returns whether the process exited successfully.
    pub fn run_inherited(&self) -> Result<bool> {
        let status = self
            .command()?
            .status()
            .with_context(|| format!("Failed to execute {}", self.program))?;

        Ok(status.success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_output() {
        // `true`/`false` are not portable to Windows; use the platform shell
        #[cfg(unix)]
        {
            let output = ExecSpec::new("sh")
                .args(["-c", "printf hello"])
                .run_captured()
                .unwrap();
            assert!(output.success);
            assert_eq!(output.stdout, b"hello");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_env_override_applied() {
        let output = ExecSpec::new("sh")
            .args(["-c", "printf \"$GLOSC_TEST_VALUE\""])
            .env("GLOSC_TEST_VALUE", "from-exec")
            .run_captured()
            .unwrap();
        assert!(output.success);
        assert_eq!(output.stdout, b"from-exec");
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let result = ExecSpec::new("definitely-not-a-real-tool-7f3a").run_captured();
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_reported() {
        let output = ExecSpec::new("sh").args(["-c", "exit 3"]).run_captured().unwrap();
        assert!(!output.success);
    }
}
