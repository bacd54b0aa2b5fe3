//! Git invocations used by the bundle commands.
//!
//! This uses the system git command, which automatically handles SSH keys,
//! credential helpers and anything else configured in `~/.gitconfig`.
//!
//! The operations are reached through the [`GitOperations`] trait so the
//! bundle logic can be tested with a recording implementation instead of a
//! real repository.

use std::path::Path;
use std::process::Command;

use log::info;

use crate::error::{Error, Result};

/// Git operations needed to vendor and inspect bundles.
pub trait GitOperations {
    /// Vendor `source` at `reference` into `prefix` with `git subtree add`.
    fn subtree_add(&self, repo: &Path, prefix: &str, source: &str, reference: &str) -> Result<()>;

    /// Update the vendored `prefix` with `git subtree pull`.
    fn subtree_pull(&self, repo: &Path, prefix: &str, source: &str, reference: &str)
        -> Result<()>;

    /// Stage `file` and commit it with `message`.
    fn commit_file(&self, repo: &Path, file: &str, message: &str) -> Result<()>;

    /// Current branch of the checkout at `repo`.
    fn current_branch(&self, repo: &Path) -> Result<String>;

    /// Commit id of `HEAD` of the checkout at `repo`.
    fn head_commit(&self, repo: &Path) -> Result<String>;

    /// Configured remote names of the checkout at `repo`.
    fn remotes(&self, repo: &Path) -> Result<Vec<String>>;

    /// URL of `remote` in the checkout at `repo`.
    fn remote_url(&self, repo: &Path, remote: &str) -> Result<String>;
}

/// [`GitOperations`] backed by the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl SystemGit {
    fn run(&self, repo: &Path, args: &[&str]) -> Result<String> {
        info!("run git {:?} in {}", args, repo.display());
        let output = Command::new("git")
            .args(args)
            .current_dir(repo)
            .output()
            .map_err(|e| Error::GitCommand {
                command: format!("git {}", args.join(" ")),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::GitCommand {
                command: format!("git {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitOperations for SystemGit {
    fn subtree_add(&self, repo: &Path, prefix: &str, source: &str, reference: &str) -> Result<()> {
        self.run(
            repo,
            &[
                "-c",
                "fetch.fsckObjects=false",
                "subtree",
                "add",
                "--squash",
                "--prefix",
                prefix,
                source,
                reference,
            ],
        )
        .map(drop)
    }

    fn subtree_pull(
        &self,
        repo: &Path,
        prefix: &str,
        source: &str,
        reference: &str,
    ) -> Result<()> {
        self.run(
            repo,
            &[
                "-c",
                "fetch.fsckObjects=false",
                "subtree",
                "pull",
                "-q",
                "--squash",
                "--prefix",
                prefix,
                source,
                reference,
            ],
        )
        .map(drop)
    }

    fn commit_file(&self, repo: &Path, file: &str, message: &str) -> Result<()> {
        self.run(repo, &["add", file])?;
        self.run(repo, &["commit", "--message", message, file])
            .map(drop)
    }

    fn current_branch(&self, repo: &Path) -> Result<String> {
        self.run(repo, &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn head_commit(&self, repo: &Path) -> Result<String> {
        self.run(repo, &["rev-parse", "HEAD"])
    }

    fn remotes(&self, repo: &Path) -> Result<Vec<String>> {
        Ok(self
            .run(repo, &["remote"])?
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn remote_url(&self, repo: &Path, remote: &str) -> Result<String> {
        self.run(repo, &["remote", "get-url", remote])
    }
}

/// Pick the remote to record for a checkout: `origin` when present,
/// otherwise the first one listed.
pub fn preferred_remote(remotes: &[String]) -> Option<&str> {
    remotes
        .iter()
        .find(|r| r.as_str() == "origin")
        .or_else(|| remotes.first())
        .map(String::as_str)
}
