//! Common test helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Run git in `dir`, panic on failure, return trimmed stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialize a repo on `initial_branch` with one commit.
///
/// `init.defaultBranch` is blanked locally so the machine's global git config
/// cannot influence main-branch resolution.
pub fn init_repo(repo_dir: &Path, initial_branch: &str) {
    fs::create_dir_all(repo_dir).expect("failed to create repo dir");

    git(repo_dir, &["init", "-b", initial_branch]);
    git(repo_dir, &["config", "user.email", "test@example.com"]);
    git(repo_dir, &["config", "user.name", "Test User"]);
    git(repo_dir, &["config", "commit.gpgsign", "false"]);
    git(repo_dir, &["config", "init.defaultBranch", ""]);

    commit_file(repo_dir, "README.md", "# Test Repo", "Initial commit");
}

/// Write a file, commit it, return the full commit hash.
pub fn commit_file(repo_dir: &Path, name: &str, content: &str, message: &str) -> String {
    fs::write(repo_dir.join(name), content).expect("failed to write file");
    git(repo_dir, &["add", name]);
    git(repo_dir, &["commit", "-m", message]);
    git(repo_dir, &["rev-parse", "HEAD"])
}

/// Commit with a fixed author date, return the full commit hash.
pub fn commit_file_dated(
    repo_dir: &Path,
    name: &str,
    content: &str,
    message: &str,
    date: &str,
) -> String {
    fs::write(repo_dir.join(name), content).expect("failed to write file");
    git(repo_dir, &["add", name]);
    let output = Command::new("git")
        .args(["commit", "-m", message])
        .env("GIT_AUTHOR_DATE", date)
        .current_dir(repo_dir)
        .output()
        .expect("failed to spawn git");
    assert!(output.status.success(), "git commit failed");
    git(repo_dir, &["rev-parse", "HEAD"])
}

/// A temporary working copy on `main`.
pub struct TestRepo {
    _tmp: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn new(initial_branch: &str) -> Self {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let path = tmp.path().join("work");
        init_repo(&path, initial_branch);
        Self { _tmp: tmp, path }
    }

    pub fn git(&self, args: &[&str]) -> String {
        git(&self.path, args)
    }

    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> String {
        commit_file(&self.path, name, content, message)
    }
}

/// A working copy on `main` with a bare `origin` it has pushed to.
///
/// Branches `main` and `feature` exist locally and on the remote; `feature`
/// is one commit ahead of `main` and tracks `origin/feature`.
pub struct TestRepoWithRemote {
    tmp: TempDir,
    pub path: PathBuf,
    pub origin: PathBuf,
}

impl TestRepoWithRemote {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let origin = tmp.path().join("origin.git");
        let path = tmp.path().join("work");

        fs::create_dir_all(&origin).expect("failed to create origin dir");
        git(&origin, &["init", "--bare", "-b", "main"]);

        init_repo(&path, "main");
        let origin_url = origin.to_string_lossy().to_string();
        git(&path, &["remote", "add", "origin", &origin_url]);
        git(&path, &["push", "-u", "origin", "main"]);

        git(&path, &["checkout", "-b", "feature"]);
        commit_file(&path, "feature.txt", "feature", "Add feature");
        git(&path, &["push", "-u", "origin", "feature"]);
        git(&path, &["checkout", "main"]);

        Self { tmp, path, origin }
    }

    pub fn git(&self, args: &[&str]) -> String {
        git(&self.path, args)
    }

    pub fn temp_path(&self) -> &Path {
        self.tmp.path()
    }
}

/// Path to the compiled CLI binary.
pub fn gitwrap_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gitwrap"))
}

/// Run the CLI against `repo_dir` without colors.
pub fn run_gitwrap(repo_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(gitwrap_binary())
        .arg("-C")
        .arg(repo_dir)
        .args(args)
        .env("NO_COLOR", "1")
        .env("HOME", repo_dir)
        .output()
        .expect("failed to run gitwrap")
}
