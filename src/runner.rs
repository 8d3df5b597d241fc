//! Process execution for git commands.
//!
//! Every invocation receives its working directory explicitly, so handles to
//! repositories at different paths never interfere with each other.

use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use semver::Version;
use tracing::debug;

use crate::error::{GitError, Result};
use crate::parse::parse_git_version;

/// Captured result of one git process.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

impl ProcessResult {
    fn from_output(output: Output) -> Self {
        Self {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Whether git exited with status zero.
    pub fn successful(&self) -> bool {
        self.status.success()
    }

    pub fn status_code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn output(&self) -> &str {
        &self.stdout
    }

    pub fn trimmed_output(&self) -> &str {
        self.stdout.trim()
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Turn a non-zero exit into [`GitError::Command`] described by `operation`.
    pub fn check(self, operation: impl FnOnce() -> String) -> Result<Self> {
        if self.successful() {
            return Ok(self);
        }
        Err(GitError::Command {
            operation: operation(),
            status: self.status_code(),
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// Spawns git processes.
///
/// The detected git version is cached per runner after the first successful
/// `git version` call.
#[derive(Debug)]
pub struct Runner {
    binary: String,
    version: OnceLock<Version>,
    invocations: AtomicUsize,
}

impl Runner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            version: OnceLock::new(),
            invocations: AtomicUsize::new(0),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Number of git processes spawned by this runner so far.
    pub fn invocation_count(&self) -> usize {
        self.invocations.load(Ordering::Relaxed)
    }

    fn command(&self, dir: &Path, args: &[&str]) -> Result<Command> {
        if dir.as_os_str().is_empty() {
            return Err(GitError::MissingWorkingDirectory);
        }

        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .current_dir(dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());
        Ok(cmd)
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.binary, args.join(" "))
    }

    /// Run git with `args` inside `dir` and capture its output.
    ///
    /// A non-zero exit status is reported through [`ProcessResult::successful`],
    /// not as an error; only failing to start the process is an error here.
    pub fn run(&self, dir: &Path, args: &[&str]) -> Result<ProcessResult> {
        let mut cmd = self.command(dir, args)?;

        debug!(dir = %dir.display(), args = ?args, "running git");
        self.invocations.fetch_add(1, Ordering::Relaxed);

        let output = cmd.output().map_err(|source| GitError::Spawn {
            command: self.describe(args),
            source,
        })?;

        let result = ProcessResult::from_output(output);
        debug!(status = ?result.status_code(), "git finished");
        Ok(result)
    }

    /// Run `git <first>` and feed its stdout into `git <second>`.
    ///
    /// The result describes the second process. If the first process fails,
    /// its status and stderr are reported instead.
    pub fn pipe(&self, dir: &Path, first: &[&str], second: &[&str]) -> Result<ProcessResult> {
        let mut producer = self.command(dir, first)?;
        producer.stdout(Stdio::piped()).stderr(Stdio::piped());

        debug!(dir = %dir.display(), first = ?first, second = ?second, "running git pipe");
        self.invocations.fetch_add(2, Ordering::Relaxed);

        let mut child = producer.spawn().map_err(|source| GitError::Spawn {
            command: self.describe(first),
            source,
        })?;

        let Some(child_stdout) = child.stdout.take() else {
            return Err(GitError::Spawn {
                command: self.describe(first),
                source: std::io::Error::other("stdout was not captured"),
            });
        };

        let mut consumer = self.command(dir, second)?;
        consumer.stdin(Stdio::from(child_stdout));

        let consumer_output = consumer.output().map_err(|source| GitError::Spawn {
            command: self.describe(second),
            source,
        });

        // Reap the producer even when the consumer failed to start.
        let mut producer_stderr = String::new();
        if let Some(mut stderr) = child.stderr.take() {
            let _ = stderr.read_to_string(&mut producer_stderr);
        }
        let producer_status = child.wait().map_err(|source| GitError::Spawn {
            command: self.describe(first),
            source,
        })?;
        let consumer_output = consumer_output?;

        if !producer_status.success() {
            debug!(status = ?producer_status.code(), "first git process of pipe failed");
            return Ok(ProcessResult {
                status: producer_status,
                stdout: String::new(),
                stderr: producer_stderr,
            });
        }

        let result = ProcessResult::from_output(consumer_output);
        debug!(status = ?result.status_code(), "git pipe finished");
        Ok(result)
    }

    /// Detect the git version, caching the first successful answer.
    ///
    /// `git version` works outside a repository, so `dir` only needs to exist.
    pub fn version(&self, dir: &Path) -> Result<Version> {
        if let Some(version) = self.version.get() {
            return Ok(version.clone());
        }

        let result = self
            .run(dir, &["version"])?
            .check(|| "version command failed".to_string())?;
        let version = parse_git_version(result.output())?;

        debug!(%version, "detected git version");
        Ok(self.version.get_or_init(|| version).clone())
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(crate::config::defaults::default_git_binary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_working_directory_is_rejected() {
        let runner = Runner::default();
        let err = runner.run(Path::new(""), &["status"]).unwrap_err();
        assert!(matches!(err, GitError::MissingWorkingDirectory));
        assert_eq!(runner.invocation_count(), 0);
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let tmp = TempDir::new().unwrap();
        let runner = Runner::new("definitely-not-a-git-binary-4711");
        let err = runner.run(tmp.path(), &["status"]).unwrap_err();
        match err {
            GitError::Spawn { command, .. } => {
                assert_eq!(command, "definitely-not-a-git-binary-4711 status")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_version_is_cached() {
        let tmp = TempDir::new().unwrap();
        let runner = Runner::default();
        let first = runner.version(tmp.path()).unwrap();
        let count = runner.invocation_count();
        let second = runner.version(tmp.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(runner.invocation_count(), count);
        assert!(first.major >= 2);
    }

    #[test]
    fn test_non_zero_exit_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let runner = Runner::default();
        // Not a repository, so rev-parse fails.
        let result = runner.run(tmp.path(), &["rev-parse", "HEAD"]).unwrap();
        assert!(!result.successful());
        let err = result
            .check(|| "could not resolve HEAD".to_string())
            .unwrap_err();
        assert!(err.to_string().starts_with("could not resolve HEAD"));
    }
}
