//! Cursor-to-scope resolution.
//!
//! The host renders the status tree and records, per display line, what item the
//! line belongs to (`LineMap`) and where section headers sit (`SectionLines`).
//! [`resolve`] turns a cursor position into the [`Scope`] an operation targets.
//! Both tables are plain data; nothing here touches the display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display line → item descriptor.
pub type LineMap = BTreeMap<usize, LineEntry>;

/// Display line → section header descriptor.
pub type SectionLines = BTreeMap<usize, SectionLine>;

/// What a single non-header display line belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineEntry {
    /// A file line, a hunk header, or a line inside a hunk body.
    File {
        section: String,
        path: String,
        /// Index of the hunk the line belongs to, if any.
        #[serde(default)]
        hunk_index: Option<usize>,
        /// Set on the `@@` header line of a hunk.
        #[serde(default)]
        is_hunk_header: bool,
    },
    /// A commit summary line or a line of its expanded message.
    Commit { section: String, hash: String },
}

/// A section header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLine {
    pub key: String,
}

/// Granularity an operation targets. Each finer variant carries all coarser keys.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Global,
    Section {
        section_key: String,
    },
    File {
        section_key: String,
        file_key: String,
    },
    Hunk {
        section_key: String,
        file_key: String,
        hunk_index: usize,
    },
}

impl Scope {
    pub fn section(section_key: impl Into<String>) -> Self {
        Scope::Section { section_key: section_key.into() }
    }

    /// File scope for `path` inside `section_key`; builds the composite key.
    pub fn file(section_key: impl Into<String>, path: &str) -> Self {
        let section_key = section_key.into();
        let file_key = file_key(&section_key, path);
        Scope::File { section_key, file_key }
    }

    pub fn hunk(section_key: impl Into<String>, path: &str, hunk_index: usize) -> Self {
        let section_key = section_key.into();
        let file_key = file_key(&section_key, path);
        Scope::Hunk { section_key, file_key, hunk_index }
    }

    pub fn section_key(&self) -> Option<&str> {
        match self {
            Scope::Global => None,
            Scope::Section { section_key }
            | Scope::File { section_key, .. }
            | Scope::Hunk { section_key, .. } => Some(section_key),
        }
    }

    pub fn file_key(&self) -> Option<&str> {
        match self {
            Scope::File { file_key, .. } | Scope::Hunk { file_key, .. } => Some(file_key),
            _ => None,
        }
    }

    pub fn hunk_index(&self) -> Option<usize> {
        match self {
            Scope::Hunk { hunk_index, .. } => Some(*hunk_index),
            _ => None,
        }
    }
}

/// Builds the composite `"<section>:<path>"` file key.
///
/// The section key must not itself contain `':'`; paths may.
pub fn file_key(section_key: &str, path: &str) -> String {
    format!("{section_key}:{path}")
}

/// Resolves the scope targeted by a cursor at `position`.
///
/// Priority: a section header at exactly `position` wins; then a file line (hunk
/// scope on a hunk header carrying an index, file scope otherwise); everything
/// else, including commit lines and unmapped lines, is global.
pub fn resolve(position: usize, line_map: &LineMap, section_lines: &SectionLines) -> Scope {
    if let Some(header) = section_lines.get(&position) {
        return Scope::section(header.key.clone());
    }

    match line_map.get(&position) {
        Some(LineEntry::File { section, path, hunk_index, is_hunk_header }) => {
            match (is_hunk_header, hunk_index) {
                (true, Some(index)) => Scope::hunk(section.clone(), path, *index),
                _ => Scope::file(section.clone(), path),
            }
        }
        _ => Scope::Global,
    }
}

/// Finds the closest section header at or above `position`.
///
/// Returns the section key and its header line, or `None` when `position` lies
/// above the first header.
pub fn find_parent_section(position: usize, section_lines: &SectionLines) -> Option<(&str, usize)> {
    section_lines
        .range(..=position)
        .next_back()
        .map(|(line, header)| (header.key.as_str(), *line))
}
