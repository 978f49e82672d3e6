//! Expansion state for one viewing session.
//!
//! ```text
//! State
//! ├── visibility_level: VisibilityLevel          // global default depth, 1..=4
//! ├── files:    "<section>:<path>" → FileExpansion
//! ├── sections: section key        → SectionExpansion
//! └── commits:  commit hash        → bool (expanded)
//! ```
//!
//! The maps are sparse. Anything absent is in its default state: files collapsed,
//! sections open, commits folded. `State` only changes through
//! [`apply`](crate::reducer::apply), which returns a new value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::expansion::{FileExpanded, FileExpansion, SectionExpansion};
use crate::level::VisibilityLevel;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub visibility_level: VisibilityLevel,
    #[serde(default)]
    pub files: BTreeMap<String, FileExpansion>,
    #[serde(default)]
    pub sections: BTreeMap<String, SectionExpansion>,
    #[serde(default)]
    pub commits: BTreeMap<String, bool>,
}

impl State {
    /// Creates an empty state, optionally seeded with a visibility level.
    ///
    /// `None` uses the default level (2); any other value is clamped to `[1, 4]`.
    pub fn new(initial_level: Option<i64>) -> Self {
        Self {
            visibility_level: initial_level.map(VisibilityLevel::new).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Method form of [`apply`](crate::reducer::apply).
    pub fn apply(&self, command: &Command) -> State {
        crate::reducer::apply(self, command)
    }

    /// The file's record, or the collapsed default.
    pub fn file_expansion(&self, file_key: &str) -> FileExpansion {
        self.files.get(file_key).cloned().unwrap_or_default()
    }

    /// The section's record, or the open default.
    pub fn section_expansion(&self, section_key: &str) -> SectionExpansion {
        self.sections.get(section_key).cloned().unwrap_or_default()
    }

    /// True for both `HeadersOnly` and `Full`.
    pub fn is_file_expanded(&self, file_key: &str) -> bool {
        self.files
            .get(file_key)
            .map(|f| f.expanded.is_expanded())
            .unwrap_or(false)
    }

    pub fn is_section_collapsed(&self, section_key: &str) -> bool {
        self.sections
            .get(section_key)
            .map(|s| s.collapsed)
            .unwrap_or(false)
    }

    pub fn is_hunk_expanded(&self, file_key: &str, hunk_index: usize) -> bool {
        self.files
            .get(file_key)
            .map(|f| f.is_hunk_expanded(hunk_index))
            .unwrap_or(false)
    }

    pub fn is_commit_expanded(&self, hash: &str) -> bool {
        self.commits.get(hash).copied().unwrap_or(false)
    }

    /// Display mode of a file, without cloning its record.
    pub fn file_mode(&self, file_key: &str) -> FileExpanded {
        self.files
            .get(file_key)
            .map(|f| f.expanded)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_reports_defaults() {
        let state = State::new(None);
        assert_eq!(state.visibility_level.get(), 2);
        assert!(!state.is_file_expanded("staged:src/main.rs"));
        assert!(!state.is_section_collapsed("staged"));
        assert!(!state.is_commit_expanded("abc123"));
        assert!(!state.is_hunk_expanded("staged:src/main.rs", 0));
        assert_eq!(state.file_expansion("unstaged:a"), FileExpansion::default());
        assert_eq!(state.section_expansion("unstaged"), SectionExpansion::default());
        assert!(state.files.is_empty() && state.sections.is_empty() && state.commits.is_empty());
    }

    #[test]
    fn seeded_level_is_clamped() {
        assert_eq!(State::new(Some(3)).visibility_level.get(), 3);
        assert_eq!(State::new(Some(0)).visibility_level.get(), 1);
        assert_eq!(State::new(Some(99)).visibility_level.get(), 4);
    }

    #[test]
    fn headers_only_counts_as_expanded() {
        let mut state = State::new(None);
        state.files.insert(
            "unstaged:a".to_owned(),
            FileExpansion {
                expanded: FileExpanded::HeadersOnly,
                ..Default::default()
            },
        );
        assert!(state.is_file_expanded("unstaged:a"));
        assert_eq!(state.file_mode("unstaged:a"), FileExpanded::HeadersOnly);
    }
}
