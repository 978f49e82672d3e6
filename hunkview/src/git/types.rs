//! Owned data types for the git background thread.
//!
//! Everything here is fully owned and `Send` so a `StatusSnapshot` can move from
//! the thread that owns the `git2::Repository` to the UI loop.

/// One line of a hunk body. `origin` follows `git2::DiffLine::origin()`:
/// `'+'` added, `'-'` removed, `' '` context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedDiffLine {
    pub origin: char,
    /// Line content without the trailing newline.
    pub content: String,
}

/// One `@@` hunk of a file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedDiffHunk {
    /// The raw `@@ -a,b +c,d @@` header, trimmed.
    pub header: String,
    pub lines: Vec<OwnedDiffLine>,
}

/// A changed file with its hunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Repository-relative path.
    pub path: String,
    /// `'M'` modified, `'A'` added, `'D'` deleted, `'R'` renamed, `'?'` untracked.
    pub status: char,
    pub hunks: Vec<OwnedDiffHunk>,
}

/// The fixed set of sections the status view shows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Untracked,
    Unstaged,
    Staged,
    Recent,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] =
        [SectionKind::Untracked, SectionKind::Unstaged, SectionKind::Staged, SectionKind::Recent];

    /// Section key used in composite file keys; never contains `':'`.
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::Untracked => "untracked",
            SectionKind::Unstaged => "unstaged",
            SectionKind::Staged => "staged",
            SectionKind::Recent => "recent",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Untracked => "Untracked files",
            SectionKind::Unstaged => "Unstaged changes",
            SectionKind::Staged => "Staged changes",
            SectionKind::Recent => "Recent commits",
        }
    }
}

/// A commit in the recent-commits section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Full hex object id; the commit's key in expansion state.
    pub hash: String,
    pub summary: String,
    /// Message body after the summary line, possibly empty.
    pub body: String,
}

impl CommitSummary {
    pub fn short_hash(&self) -> &str {
        &self.hash[..self.hash.len().min(7)]
    }
}

/// Everything the status view renders, produced by one worker request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Branch shorthand, or `"(detached)"` / `"(unborn)"`.
    pub head: String,
    pub untracked: Vec<FileChange>,
    pub unstaged: Vec<FileChange>,
    pub staged: Vec<FileChange>,
    pub commits: Vec<CommitSummary>,
}

impl StatusSnapshot {
    /// Files of a file-bearing section; `Recent` has none.
    pub fn files(&self, kind: SectionKind) -> &[FileChange] {
        match kind {
            SectionKind::Untracked => &self.untracked,
            SectionKind::Unstaged => &self.unstaged,
            SectionKind::Staged => &self.staged,
            SectionKind::Recent => &[],
        }
    }

    /// Number of items a section lists; sections with none are not rendered.
    pub fn item_count(&self, kind: SectionKind) -> usize {
        match kind {
            SectionKind::Recent => self.commits.len(),
            other => self.files(other).len(),
        }
    }
}

/// Requests sent from the UI loop to the git worker over a
/// `crossbeam_channel::Sender<StatusRequest>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRequest {
    /// Re-read index, working tree and history.
    Refresh,
}
