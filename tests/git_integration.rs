//! End-to-end lookups against a real throwaway git repository.
//!
//! These tests drive the actual `git` binary; they return early (skipped)
//! when git is not on PATH. The `--git-timeout` deviation from the default
//! unbounded subprocess call is exercised in `bounded_timeout_still_answers`
//! (bound never fires) and `expired_timeout_is_no_data` (bound always fires).

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use tempfile::TempDir;

use git_lineblame::git::{BlameService, GitInvoker, SystemGit};
use git_lineblame::models::Attribution;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn run_git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// Repo with one committed file (`tracked.txt`, one line) and an identity
/// configured so commits work in a bare CI environment.
fn fixture_repo() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path();

    run_git(path, &["init", "-q"]);
    run_git(path, &["config", "user.name", "Test Author"]);
    run_git(path, &["config", "user.email", "test@example.com"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);

    std::fs::write(path.join("tracked.txt"), "first line\n").unwrap();
    run_git(path, &["add", "tracked.txt"]);
    run_git(path, &["commit", "-q", "-m", "initial commit"]);

    dir
}

#[tokio::test]
async fn committed_line_is_attributed() {
    if !git_available() {
        eprintln!("git not found on PATH, skipping");
        return;
    }

    let repo = fixture_repo();
    let invoker = SystemGit::open(repo.path(), None).await.unwrap();
    let service = BlameService::new(invoker, 64);

    let attr = service
        .lookup("tracked.txt", 1)
        .await
        .expect("committed line should be attributed");

    assert_eq!(attr.author, "Test Author");
    assert_eq!(attr.message, "initial commit");
    assert!(!attr.relative_date.is_empty());
}

#[tokio::test]
async fn commit_subject_keeps_pipes() {
    if !git_available() {
        eprintln!("git not found on PATH, skipping");
        return;
    }

    let repo = fixture_repo();
    let path = repo.path();
    std::fs::write(path.join("piped.txt"), "content\n").unwrap();
    run_git(path, &["add", "piped.txt"]);
    run_git(path, &["commit", "-q", "-m", "add parser | cache | lookup"]);

    let invoker = SystemGit::open(path, None).await.unwrap();
    let service = BlameService::new(invoker, 64);

    let attr = service.lookup("piped.txt", 1).await.unwrap();
    assert_eq!(attr.message, "add parser | cache | lookup");
}

#[tokio::test]
async fn uncommitted_line_yields_sentinel() {
    if !git_available() {
        eprintln!("git not found on PATH, skipping");
        return;
    }

    let repo = fixture_repo();
    // Append a line the repository has never seen
    std::fs::write(repo.path().join("tracked.txt"), "first line\nsecond line\n").unwrap();

    let invoker = SystemGit::open(repo.path(), None).await.unwrap();
    let service = BlameService::new(invoker, 64);

    let attr = service.lookup("tracked.txt", 2).await.unwrap();
    assert_eq!(attr, Attribution::sentinel());
}

#[tokio::test]
async fn untracked_file_is_suppressed_not_sentinel() {
    if !git_available() {
        eprintln!("git not found on PATH, skipping");
        return;
    }

    let repo = fixture_repo();
    std::fs::write(repo.path().join("untracked.txt"), "nobody committed me\n").unwrap();

    let invoker = SystemGit::open(repo.path(), None).await.unwrap();
    let service = BlameService::new(invoker, 64);

    // git blame fails on an untracked path: no data, nothing cached
    assert_eq!(service.lookup("untracked.txt", 1).await, None);
    assert_eq!(service.stats().await.entries, 0);
}

#[tokio::test]
async fn invoker_returns_empty_for_missing_path() {
    if !git_available() {
        eprintln!("git not found on PATH, skipping");
        return;
    }

    let repo = fixture_repo();
    let invoker = SystemGit::open(repo.path(), None).await.unwrap();

    assert_eq!(invoker.blame_line("no/such/file.txt", 1).await, "");
    assert_eq!(invoker.show_summary("ffffffff").await, "");
}

#[tokio::test]
async fn bounded_timeout_still_answers() {
    if !git_available() {
        eprintln!("git not found on PATH, skipping");
        return;
    }

    let repo = fixture_repo();
    // Generous bound: verifies the timeout path wraps calls without breaking them
    let invoker = SystemGit::open(repo.path(), Some(Duration::from_secs(30)))
        .await
        .unwrap();
    let service = BlameService::new(invoker, 64);

    let attr = service.lookup("tracked.txt", 1).await.unwrap();
    assert_eq!(attr.author, "Test Author");
}

#[tokio::test]
async fn expired_timeout_is_no_data() {
    if !git_available() {
        eprintln!("git not found on PATH, skipping");
        return;
    }

    let repo = fixture_repo();
    // A nanosecond bound expires before any subprocess can answer, so every
    // call collapses to "no data": empty invoker output, suppressed lookup,
    // nothing cached. This is the documented deviation from the default
    // unbounded call.
    let invoker = SystemGit::open(repo.path(), Some(Duration::from_nanos(1)))
        .await
        .unwrap();

    assert_eq!(invoker.blame_line("tracked.txt", 1).await, "");

    let service = BlameService::new(invoker, 64);
    assert_eq!(service.lookup("tracked.txt", 1).await, None);
    assert_eq!(service.stats().await.entries, 0);
}

#[tokio::test]
async fn open_rejects_non_repository() {
    if !git_available() {
        eprintln!("git not found on PATH, skipping");
        return;
    }

    let dir = TempDir::new().unwrap();
    assert!(SystemGit::open(dir.path(), None).await.is_err());
}
