//! Committing and pushing the site repository.

use std::path::PathBuf;
use std::process::{Command, Output};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("nothing to commit")]
    NothingToCommit,
    #[error("push rejected: {0}")]
    PushRejected(String),
    #[error("git {command} failed: {stderr}")]
    GitFailed { command: String, stderr: String },
    #[error("could not run git: {0}")]
    Io(#[from] std::io::Error),
}

/// Commits all pending site changes and pushes them to the remote.
pub trait Publisher: Send + Sync {
    fn publish(&self, message: &str) -> Result<(), PublishError>;
}

/// Publisher backed by the `git` binary: stage-all, one commit, push to
/// the remote named "origin" on the checked-out branch. No retry and no
/// conflict resolution; every failure is fatal to the run.
pub struct GitCliPublisher {
    repo_root: PathBuf,
}

impl GitCliPublisher {
    pub fn new(repo_root: PathBuf) -> Self {
        Self { repo_root }
    }

    fn run(&self, args: &[&str]) -> Result<Output, PublishError> {
        Ok(Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()?)
    }

    fn run_checked(&self, args: &[&str]) -> Result<(), PublishError> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(PublishError::GitFailed {
                command: args.join(" "),
                stderr: stderr_text(&output),
            });
        }
        Ok(())
    }
}

impl Publisher for GitCliPublisher {
    fn publish(&self, message: &str) -> Result<(), PublishError> {
        self.run_checked(&["add", "-A"])?;

        let commit = self.run(&["commit", "-m", message])?;
        if !commit.status.success() {
            let stdout = String::from_utf8_lossy(&commit.stdout);
            let stderr = stderr_text(&commit);
            if stdout.contains("nothing to commit") || stderr.contains("nothing to commit") {
                return Err(PublishError::NothingToCommit);
            }
            return Err(PublishError::GitFailed {
                command: format!("commit -m {message:?}"),
                stderr,
            });
        }
        log::info!("created commit: {message}");

        let push = self.run(&["push", "origin"])?;
        if !push.status.success() {
            return Err(PublishError::PushRejected(stderr_text(&push)));
        }
        log::info!("pushed to origin");
        Ok(())
    }
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
