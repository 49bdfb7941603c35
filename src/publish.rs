//! Git synchronization for the regenerated gallery.
//!
//! Three sequential shell-outs: stage everything, commit with a fixed
//! message, push to the default remote. Git is a black box judged by exit
//! status — no libgit2, no structured protocol.
//!
//! Failure tolerance is deliberately asymmetric:
//!
//! - **stage** failing is fatal: the working tree must be consistent before
//!   any sync is attempted.
//! - **commit** failing is fatal *except* for the "nothing to commit" case —
//!   regenerating an unchanged gallery is routine, not an error.
//! - **push** failing is always a warning: network and permission hiccups are
//!   expected and recoverable by a later manual push.
//!
//! The command executor sits behind [`Vcs`] so the tolerance logic is
//! testable without a git binary or a repository.

use log::{info, warn};
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),
    #[error("git add failed: {0}")]
    Stage(String),
    #[error("git commit failed: {0}")]
    Commit(String),
}

/// Result of one version-control invocation: exit status plus captured output.
#[derive(Debug, Clone)]
pub struct VcsOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl VcsOutput {
    fn detail(&self) -> String {
        let err = self.stderr.trim();
        if err.is_empty() {
            self.stdout.trim().to_string()
        } else {
            err.to_string()
        }
    }
}

/// The three operations the publisher needs from a version-control tool.
///
/// `Err` means the command could not be run at all; a command that ran and
/// exited non-zero comes back as `Ok` with `success == false`.
pub trait Vcs {
    fn stage(&self) -> std::io::Result<VcsOutput>;
    fn commit(&self, message: &str) -> std::io::Result<VcsOutput>;
    fn push(&self) -> std::io::Result<VcsOutput>;
}

/// Subprocess-backed [`Vcs`] driving the `git` CLI against one repository.
pub struct GitCli {
    repo_dir: PathBuf,
}

impl GitCli {
    pub fn new(repo_dir: PathBuf) -> Self {
        Self { repo_dir }
    }

    fn git(&self, args: &[&str]) -> std::io::Result<VcsOutput> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .args(args)
            .output()?;
        Ok(VcsOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl Vcs for GitCli {
    fn stage(&self) -> std::io::Result<VcsOutput> {
        self.git(&["add", "."])
    }

    fn commit(&self, message: &str) -> std::io::Result<VcsOutput> {
        self.git(&["commit", "-m", message])
    }

    fn push(&self) -> std::io::Result<VcsOutput> {
        self.git(&["push"])
    }
}

/// Whether a failed commit is the benign "no staged changes" case.
///
/// Git prints the condition to stdout ("nothing to commit, working tree
/// clean") or, for partial stages, "no changes added to commit".
fn is_nothing_to_commit(output: &VcsOutput) -> bool {
    let text = format!("{}{}", output.stdout, output.stderr);
    text.contains("nothing to commit") || text.contains("no changes added to commit")
}

/// Stage, commit, and push the current working tree.
///
/// Returns `Ok` for fully successful runs and for the tolerated outcomes
/// (nothing to commit, push rejected). The run only fails if the local state
/// could not be made consistent.
pub fn publish<V: Vcs>(vcs: &V, message: &str) -> Result<(), PublishError> {
    let staged = vcs.stage()?;
    if !staged.success {
        return Err(PublishError::Stage(staged.detail()));
    }

    let committed = vcs.commit(message)?;
    if !committed.success {
        if is_nothing_to_commit(&committed) {
            info!("nothing to commit, gallery unchanged");
        } else {
            return Err(PublishError::Commit(committed.detail()));
        }
    } else {
        info!("committed: {message}");
    }

    match vcs.push() {
        Ok(pushed) if pushed.success => info!("pushed to remote"),
        Ok(pushed) => warn!(
            "push failed, will need a manual retry: {}",
            pushed.detail()
        ),
        Err(e) => warn!("push failed, will need a manual retry: {e}"),
    }

    Ok(())
}
