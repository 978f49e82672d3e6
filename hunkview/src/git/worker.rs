//! Background thread that owns git2::Repository for its lifetime.
//!
//! git2::Repository is !Send, so it is opened inside the thread rather than passed in.
//! All communication is via channels: StatusRequest in, AppEvent::StatusLoaded out.

use std::cell::RefCell;
use std::path::PathBuf;

use crossbeam_channel::Receiver;
use git2::{Delta, Diff, DiffOptions, ErrorCode, Repository};
use log::{debug, error, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;
use crate::git::types::{
    CommitSummary, FileChange, OwnedDiffHunk, OwnedDiffLine, StatusRequest, StatusSnapshot,
};

/// Entry point for the background thread that owns the git Repository.
///
/// Opens the repository at `path` and answers every incoming request until the
/// channel is closed (sender dropped). A failed status read is logged and answered
/// with an empty snapshot so the UI never waits on a request that will not arrive.
pub fn git_worker_loop(
    path: PathBuf,
    recent_commits: usize,
    rx: Receiver<StatusRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    let repo = match Repository::open(&path) {
        Ok(r) => r,
        Err(e) => {
            error!("git worker: cannot open {}: {e}", path.display());
            return;
        }
    };

    for request in rx {
        debug!("git worker: {request:?}");
        let snapshot = match load_status(&repo, recent_commits) {
            Ok(s) => s,
            Err(e) => {
                warn!("git worker: status failed: {e}");
                StatusSnapshot { head: "(error)".to_owned(), ..StatusSnapshot::default() }
            }
        };
        if event_tx.send(AppEvent::StatusLoaded(Box::new(snapshot))).is_err() {
            break;
        }
    }
}

/// Reads HEAD, the index-vs-HEAD diff, the workdir-vs-index diff (with untracked
/// content) and the last `recent_commits` commits.
///
/// # Errors
///
/// Returns `git2::Error` if any diff or revwalk fails. An unborn HEAD is not an
/// error: staged changes are diffed against the empty tree and history is empty.
pub fn load_status(repo: &Repository, recent_commits: usize) -> Result<StatusSnapshot, git2::Error> {
    let head_tree = match repo.head() {
        Ok(head) => Some(head.peel_to_tree()?),
        Err(e) if e.code() == ErrorCode::UnbornBranch => None,
        Err(e) => return Err(e),
    };

    let staged_diff = repo.diff_tree_to_index(head_tree.as_ref(), None, Some(&mut DiffOptions::new()))?;

    let mut opts = DiffOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .show_untracked_content(true);
    let workdir_diff = repo.diff_index_to_workdir(None, Some(&mut opts))?;

    let (untracked, unstaged): (Vec<_>, Vec<_>) =
        extract_files(&workdir_diff)?.into_iter().partition(|f| f.status == '?');

    Ok(StatusSnapshot {
        head: head_name(repo),
        untracked,
        unstaged,
        staged: extract_files(&staged_diff)?,
        commits: if head_tree.is_some() { recent(repo, recent_commits)? } else { Vec::new() },
    })
}

fn head_name(repo: &Repository) -> String {
    match repo.head() {
        Ok(head) if repo.head_detached().unwrap_or(false) => head
            .target()
            .map(|oid| format!("(detached {:.7})", oid.to_string()))
            .unwrap_or_else(|| "(detached)".to_owned()),
        Ok(head) => head.shorthand().unwrap_or("HEAD").to_owned(),
        Err(_) => "(unborn)".to_owned(),
    }
}

/// Walks diff deltas, hunks and lines into owned `FileChange`s.
///
/// The three callbacks run sequentially on this thread, so `RefCell` lets them
/// share the output vector; `last_mut()` always refers to the current delta.
fn extract_files(diff: &Diff<'_>) -> Result<Vec<FileChange>, git2::Error> {
    let files: RefCell<Vec<FileChange>> = RefCell::new(Vec::new());

    diff.foreach(
        &mut |delta, _progress| {
            let file = if delta.status() == Delta::Deleted { delta.old_file() } else { delta.new_file() };
            let path = file
                .path()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|| "unknown".to_owned());
            let status = match delta.status() {
                Delta::Added => 'A',
                Delta::Deleted => 'D',
                Delta::Renamed => 'R',
                Delta::Untracked => '?',
                _ => 'M',
            };
            files.borrow_mut().push(FileChange { path, status, hunks: Vec::new() });
            true
        },
        None,
        Some(&mut |_delta, hunk| {
            let header = String::from_utf8_lossy(hunk.header()).trim_end().to_owned();
            if let Some(f) = files.borrow_mut().last_mut() {
                f.hunks.push(OwnedDiffHunk { header, lines: Vec::new() });
            }
            true
        }),
        Some(&mut |_delta, _hunk, line| {
            let origin = line.origin();
            if matches!(origin, '+' | '-' | ' ') {
                let content = String::from_utf8_lossy(line.content())
                    .trim_end_matches(['\n', '\r'])
                    .to_owned();
                if let Some(h) = files.borrow_mut().last_mut().and_then(|f| f.hunks.last_mut()) {
                    h.lines.push(OwnedDiffLine { origin, content });
                }
            }
            true
        }),
    )?;

    Ok(files.into_inner())
}

fn recent(repo: &Repository, limit: usize) -> Result<Vec<CommitSummary>, git2::Error> {
    let mut walk = repo.revwalk()?;
    walk.push_head()?;
    walk.take(limit)
        .map(|oid| -> Result<CommitSummary, git2::Error> {
            let commit = repo.find_commit(oid?)?;
            Ok(CommitSummary {
                hash: commit.id().to_string(),
                summary: commit.summary().unwrap_or("").to_owned(),
                body: commit.body().unwrap_or("").trim_end().to_owned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use git2::{IndexAddOption, Signature};

    use super::*;

    fn commit_all(repo: &Repository, message: &str) {
        let mut index = repo.index().unwrap();
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents).unwrap();
    }

    fn stage(repo: &Repository, path: &str) {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(path)).unwrap();
        index.write().unwrap();
    }

    #[test]
    fn status_splits_untracked_unstaged_and_staged() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), "one\ntwo\nthree\n").unwrap();
        commit_all(&repo, "initial\n\nbody text\n");

        fs::write(dir.path().join("a.txt"), "one\n2\nthree\n").unwrap();
        fs::write(dir.path().join("b.txt"), "new\n").unwrap();
        stage(&repo, "b.txt");
        fs::write(dir.path().join("c.txt"), "loose\n").unwrap();

        let status = load_status(&repo, 10).unwrap();
        assert!(!status.head.is_empty());

        assert_eq!(status.untracked.len(), 1);
        assert_eq!(status.untracked[0].path, "c.txt");
        assert_eq!(status.untracked[0].status, '?');
        assert_eq!(status.untracked[0].hunks.len(), 1);

        assert_eq!(status.unstaged.len(), 1);
        let a = &status.unstaged[0];
        assert_eq!((a.path.as_str(), a.status), ("a.txt", 'M'));
        assert_eq!(a.hunks.len(), 1);
        assert!(a.hunks[0].header.starts_with("@@"));
        assert!(a.hunks[0].lines.iter().any(|l| l.origin == '-' && l.content == "two"));
        assert!(a.hunks[0].lines.iter().any(|l| l.origin == '+' && l.content == "2"));

        assert_eq!(status.staged.len(), 1);
        assert_eq!((status.staged[0].path.as_str(), status.staged[0].status), ("b.txt", 'A'));

        assert_eq!(status.commits.len(), 1);
        assert_eq!(status.commits[0].summary, "initial");
        assert_eq!(status.commits[0].body, "body text");
        assert_eq!(status.commits[0].short_hash().len(), 7);
    }

    #[test]
    fn unborn_repository_has_no_history() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("first.txt"), "hello\n").unwrap();
        stage(&repo, "first.txt");

        let status = load_status(&repo, 10).unwrap();
        assert_eq!(status.head, "(unborn)");
        assert!(status.commits.is_empty());
        assert_eq!(status.staged.len(), 1);
        assert_eq!(status.staged[0].status, 'A');
    }

    #[test]
    fn recent_commits_respects_limit() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        for i in 0..3 {
            fs::write(dir.path().join("f.txt"), format!("{i}\n")).unwrap();
            commit_all(&repo, &format!("commit {i}"));
        }
        let status = load_status(&repo, 2).unwrap();
        let summaries: Vec<_> = status.commits.iter().map(|c| c.summary.as_str()).collect();
        assert_eq!(summaries, vec!["commit 2", "commit 1"]);
    }
}
