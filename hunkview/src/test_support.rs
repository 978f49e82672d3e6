//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::git::types::{CommitSummary, FileChange, OwnedDiffHunk, OwnedDiffLine, StatusSnapshot};

fn hunk(header: &str, lines: &[(char, &str)]) -> OwnedDiffHunk {
    OwnedDiffHunk {
        header: header.to_owned(),
        lines: lines
            .iter()
            .map(|(origin, content)| OwnedDiffLine { origin: *origin, content: (*content).to_owned() })
            .collect(),
    }
}

/// A status with one unstaged file (two hunks), one staged file (no hunks) and
/// one commit with a two-line body.
pub fn fixture() -> StatusSnapshot {
    StatusSnapshot {
        head: "main".to_owned(),
        untracked: Vec::new(),
        unstaged: vec![FileChange {
            path: "src/lib.rs".to_owned(),
            status: 'M',
            hunks: vec![
                hunk("@@ -1,2 +1,2 @@", &[('-', "old"), ('+', "new")]),
                hunk("@@ -10 +10 @@", &[(' ', "ctx")]),
            ],
        }],
        staged: vec![FileChange { path: "README.md".to_owned(), status: 'A', hunks: vec![] }],
        commits: vec![CommitSummary {
            hash: "0123456789abcdef".to_owned(),
            summary: "Add tree".to_owned(),
            body: "first\nsecond".to_owned(),
        }],
    }
}
