//! Subprocess invocation of the system `git` binary.
//!
//! `SystemGit` shells out for every uncached lookup:
//! - `git blame -c -L <n>,<n> <file>`: only the leading commit hash is used
//! - `git show <hash> --no-patch --format="%an | %ar | %s"`: the displayed line
//!
//! Only stdout is captured; stderr can never bleed into parsed text. Empty
//! output and non-zero exit both mean "no data" and surface as an empty
//! string, never as an error. There is no timeout unless one was configured,
//! so a hung git process blocks its lookup (and only that lookup).
//!
//! The `GitInvoker` trait is the seam the lookup service is tested through.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;

use crate::error::{AppError, Result};

/// Runs git queries for the lookup service. Implementations return the first
/// stdout line of the command, or an empty string when there is no data.
pub trait GitInvoker: Send + Sync + 'static {
    /// `git blame` a single line of a file.
    fn blame_line(&self, path: &str, line: u32) -> impl Future<Output = String> + Send;

    /// One-line author/date/subject summary of a commit.
    fn show_summary(&self, hash: &str) -> impl Future<Output = String> + Send;
}

/// `GitInvoker` backed by the system `git` binary.
pub struct SystemGit {
    /// Repository working directory, passed to every command via `-C`
    work_tree: PathBuf,
    /// Optional bound on each subprocess call; `None` preserves the
    /// original unbounded blocking behavior
    timeout: Option<Duration>,
}

impl SystemGit {
    /// Open a repository at `path`, validating it with `git rev-parse`.
    pub async fn open<P: AsRef<Path>>(path: P, timeout: Option<Duration>) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let output = Command::new("git")
            .arg("-C")
            .arg(path.as_ref())
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            return Err(AppError::RepoNotFound(path_str));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(Self {
            work_tree: PathBuf::from(stdout.trim()),
            timeout,
        })
    }

    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    /// Run a git command and return the first stdout line.
    ///
    /// All failure modes collapse to an empty string: spawn errors (logged),
    /// non-zero exit, no output, and hitting the configured timeout.
    async fn first_line(&self, args: &[&str]) -> String {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.work_tree).args(args);

        let run = cmd.output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!("git {} timed out after {:?}", args.join(" "), limit);
                    return String::new();
                }
            },
            None => run.await,
        };

        let output = match output {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!("Failed to execute git {}: {}", args.join(" "), e);
                return String::new();
            }
        };

        if !output.status.success() {
            return String::new();
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("")
            .to_string()
    }
}

impl GitInvoker for SystemGit {
    async fn blame_line(&self, path: &str, line: u32) -> String {
        let range = format!("{},{}", line, line);
        self.first_line(&["blame", "-c", "-L", &range, path]).await
    }

    async fn show_summary(&self, hash: &str) -> String {
        self.first_line(&["show", hash, "--no-patch", "--format=%an | %ar | %s"])
            .await
    }
}
