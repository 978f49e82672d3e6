//! Status tree layout.
//!
//! Flattens a `StatusSnapshot` into display rows according to the current
//! expansion `State`, and records the line tables the scope resolver reads:
//! which item each row belongs to and where each section header sits. This
//! module decides *what* is on each line; `ui::render` decides how it looks.

use hunkview_core::{
    file_key, resolve, FileExpanded, LineEntry, LineMap, Scope, SectionLine, SectionLines, State,
};

use crate::git::types::{OwnedDiffLine, SectionKind, StatusSnapshot};

/// One display line of the status view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Head(String),
    Blank,
    Section { kind: SectionKind, count: usize, collapsed: bool },
    File { status: char, path: String, hunk_count: usize, mode: FileExpanded },
    HunkHeader { header: String, expanded: bool },
    Diff(OwnedDiffLine),
    Commit { short: String, summary: String, expanded: bool },
    Message(String),
}

/// Rows plus the line tables describing them.
#[derive(Debug, Clone, Default)]
pub struct StatusTree {
    pub rows: Vec<Row>,
    pub line_map: LineMap,
    pub section_lines: SectionLines,
}

impl StatusTree {
    /// Lays out `status` under `view`. Sections with no items are omitted.
    pub fn build(status: &StatusSnapshot, view: &State) -> Self {
        let mut tree = StatusTree::default();
        tree.rows.push(Row::Head(status.head.clone()));
        tree.rows.push(Row::Blank);

        for kind in SectionKind::ALL {
            let count = status.item_count(kind);
            if count == 0 {
                continue;
            }
            let collapsed = view.is_section_collapsed(kind.key());
            tree.section_lines
                .insert(tree.rows.len(), SectionLine { key: kind.key().to_owned() });
            tree.rows.push(Row::Section { kind, count, collapsed });

            if !collapsed {
                match kind {
                    SectionKind::Recent => tree.push_commits(status, view),
                    _ => tree.push_files(kind, status, view),
                }
            }
            tree.rows.push(Row::Blank);
        }
        tree
    }

    fn push_files(&mut self, kind: SectionKind, status: &StatusSnapshot, view: &State) {
        let section = kind.key();
        for file in status.files(kind) {
            let key = file_key(section, &file.path);
            let mode = view.file_mode(&key);
            let entry = |hunk_index, is_hunk_header| LineEntry::File {
                section: section.to_owned(),
                path: file.path.clone(),
                hunk_index,
                is_hunk_header,
            };

            self.line_map.insert(self.rows.len(), entry(None, false));
            self.rows.push(Row::File {
                status: file.status,
                path: file.path.clone(),
                hunk_count: file.hunks.len(),
                mode,
            });
            if !mode.is_expanded() {
                continue;
            }

            for (index, hunk) in file.hunks.iter().enumerate() {
                let expanded = view.is_hunk_expanded(&key, index);
                self.line_map.insert(self.rows.len(), entry(Some(index), true));
                self.rows.push(Row::HunkHeader { header: hunk.header.clone(), expanded });
                if !expanded {
                    continue;
                }
                for line in &hunk.lines {
                    self.line_map.insert(self.rows.len(), entry(Some(index), false));
                    self.rows.push(Row::Diff(line.clone()));
                }
            }
        }
    }

    fn push_commits(&mut self, status: &StatusSnapshot, view: &State) {
        let section = SectionKind::Recent.key();
        for commit in &status.commits {
            let expanded = view.is_commit_expanded(&commit.hash);
            let entry =
                || LineEntry::Commit { section: section.to_owned(), hash: commit.hash.clone() };

            self.line_map.insert(self.rows.len(), entry());
            self.rows.push(Row::Commit {
                short: commit.short_hash().to_owned(),
                summary: commit.summary.clone(),
                expanded,
            });
            if expanded {
                for line in commit.body.lines() {
                    self.line_map.insert(self.rows.len(), entry());
                    self.rows.push(Row::Message(line.to_owned()));
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Scope targeted by a cursor on `line`.
    pub fn scope_at(&self, line: usize) -> Scope {
        resolve(line, &self.line_map, &self.section_lines)
    }
}
