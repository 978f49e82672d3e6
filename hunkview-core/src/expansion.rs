//! Per-entity expansion records stored in `State`.
//!
//! Both records are sparse-map values: an entity with no record is in its
//! `Default` state, so only exceptions to the default are ever stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-hunk expanded flags keyed by hunk index. Missing indices are collapsed.
pub type HunkFlags = BTreeMap<usize, bool>;

/// Snapshot of file records keyed by composite file key (`"<section>:<path>"`).
pub type FileSnapshot = BTreeMap<String, FileExpansion>;

/// Display mode of a single file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileExpanded {
    /// Only the file line is visible.
    #[default]
    Collapsed,
    /// Hunk headers are visible; each hunk body follows its own flag.
    HeadersOnly,
    /// Every hunk is shown in full.
    Full,
}

impl FileExpanded {
    /// `true` for both `HeadersOnly` and `Full`.
    pub fn is_expanded(self) -> bool {
        !matches!(self, FileExpanded::Collapsed)
    }
}

/// Expansion record for one file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileExpansion {
    pub expanded: FileExpanded,
    /// Per-hunk flags, meaningful only while `expanded == HeadersOnly`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hunks: Option<HunkFlags>,
    /// Hunk flags saved on collapse, restored when the file re-enters `HeadersOnly`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remembered: Option<HunkFlags>,
}

impl FileExpansion {
    /// Whether hunk `index` body is visible under this record.
    ///
    /// `Full` shows every hunk (stored flags are kept but ignored); `HeadersOnly`
    /// shows only hunks flagged `true`.
    pub fn is_hunk_expanded(&self, index: usize) -> bool {
        match self.expanded {
            FileExpanded::Collapsed => false,
            FileExpanded::HeadersOnly => self.hunk_flag(index),
            FileExpanded::Full => true,
        }
    }

    fn hunk_flag(&self, index: usize) -> bool {
        self.hunks
            .as_ref()
            .and_then(|h| h.get(&index).copied())
            .unwrap_or(false)
    }

    /// Moves into `Collapsed`, saving the current hunk flags into `remembered`.
    ///
    /// A headers-only file always records its flags, even an empty set, so that
    /// reopening it returns to headers-only. A `Full` file without hunk flags
    /// keeps whatever it remembered before, so a `HeadersOnly → Full → Collapsed`
    /// sequence does not lose the older snapshot.
    pub(crate) fn collapse(&mut self) {
        match (self.expanded, self.hunks.take()) {
            (FileExpanded::HeadersOnly, hunks) => {
                self.remembered = Some(hunks.unwrap_or_default());
            }
            (_, Some(hunks)) => self.remembered = Some(hunks),
            (_, None) => {}
        }
        self.expanded = FileExpanded::Collapsed;
    }

    /// Moves into `HeadersOnly`, restoring remembered flags when none are current.
    pub(crate) fn show_headers(&mut self) {
        if self.hunks.is_none() {
            self.hunks = self.remembered.take();
        }
        self.expanded = FileExpanded::HeadersOnly;
    }

    /// Moves to `target`, applying the remember/restore rules of each mode.
    pub(crate) fn transition(&mut self, target: FileExpanded) {
        match target {
            FileExpanded::Collapsed => self.collapse(),
            FileExpanded::HeadersOnly => self.show_headers(),
            FileExpanded::Full => self.expanded = FileExpanded::Full,
        }
    }
}

/// Expansion record for one section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionExpansion {
    pub collapsed: bool,
    /// File records captured when the section was collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remembered_files: Option<FileSnapshot>,
}
