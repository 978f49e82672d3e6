//! Commands accepted by the reducer.
//!
//! Every change to expansion state is a `Command`. The host turns a key press
//! plus the resolved [`Scope`] into one of these and hands it to
//! [`apply`](crate::reducer::apply):
//!
//! ```text
//! State + Command  →  apply()  →  New State
//! ```
//!
//! Constructors validate nothing; the reducer tolerates missing optional data.

use serde::{Deserialize, Serialize};

use crate::expansion::{FileExpanded, FileSnapshot};
use crate::scope::Scope;

/// Bulk targets for [`Command::SetVisibilityLevel`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelContext {
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub file_keys: Vec<String>,
    #[serde(default)]
    pub commit_hashes: Vec<String>,
    /// Hunk count of the scoped file, used when a hunk-scoped level has to split
    /// a fully expanded file into per-hunk flags.
    #[serde(default)]
    pub total_hunks: Option<usize>,
}

impl LevelContext {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.file_keys.is_empty() && self.commit_hashes.is_empty()
    }
}

/// A one-shot instruction for the reducer.
///
/// On the wire a command is an object tagged by `"type"`. A `type` this version
/// does not know deserializes to [`Command::Unknown`], which leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Cycle a file between collapsed and expanded.
    ToggleFile { file_key: String },
    /// Collapse or re-open a section.
    ToggleSection { section_key: String },
    /// Flip one hunk body inside a file.
    ToggleHunk {
        file_key: String,
        hunk_index: usize,
        #[serde(default)]
        total_hunks: Option<usize>,
    },
    /// Force a file into a display mode.
    SetFileExpansion { file_key: String, value: FileExpanded },
    /// Apply a visibility level globally or to a scope.
    SetVisibilityLevel {
        level: i64,
        #[serde(default)]
        scope: Scope,
        #[serde(default)]
        context: Option<LevelContext>,
    },
    /// Open every named section if any is collapsed, otherwise collapse them all.
    ToggleAllSections {
        sections: Vec<String>,
        any_collapsed: bool,
        #[serde(default)]
        current_files: Option<FileSnapshot>,
    },
    /// Drop all per-item state, keeping the visibility level.
    Reset,
    /// Placeholder for a command kind this version does not understand.
    #[serde(other)]
    Unknown,
}

impl Command {
    pub fn toggle_file(file_key: impl Into<String>) -> Self {
        Command::ToggleFile { file_key: file_key.into() }
    }

    pub fn toggle_section(section_key: impl Into<String>) -> Self {
        Command::ToggleSection { section_key: section_key.into() }
    }

    /// `total_hunks` is only needed when the file may currently be fully expanded.
    pub fn toggle_hunk(
        file_key: impl Into<String>,
        hunk_index: usize,
        total_hunks: Option<usize>,
    ) -> Self {
        Command::ToggleHunk { file_key: file_key.into(), hunk_index, total_hunks }
    }

    pub fn set_file_expansion(file_key: impl Into<String>, value: FileExpanded) -> Self {
        Command::SetFileExpansion { file_key: file_key.into(), value }
    }

    /// `level` is clamped to `[1, 4]` when applied, not here.
    pub fn set_visibility_level(level: i64, scope: Scope, context: Option<LevelContext>) -> Self {
        Command::SetVisibilityLevel { level, scope, context }
    }

    pub fn toggle_all_sections(
        sections: Vec<String>,
        any_collapsed: bool,
        current_files: Option<FileSnapshot>,
    ) -> Self {
        Command::ToggleAllSections { sections, any_collapsed, current_files }
    }

    pub fn reset() -> Self {
        Command::Reset
    }

    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::ToggleFile { .. } => "toggle_file",
            Command::ToggleSection { .. } => "toggle_section",
            Command::ToggleHunk { .. } => "toggle_hunk",
            Command::SetFileExpansion { .. } => "set_file_expansion",
            Command::SetVisibilityLevel { .. } => "set_visibility_level",
            Command::ToggleAllSections { .. } => "toggle_all_sections",
            Command::Reset => "reset",
            Command::Unknown => "unknown",
        }
    }
}
