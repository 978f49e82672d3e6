//! Central application state for hunkview.
//!
//! `AppState` owns the expansion [`State`] from `hunkview-core`, the latest git
//! status, and the [`StatusTree`] laid out from both. Key handlers ask the
//! `*_command` builders here to turn the cursor position into a [`Command`] and
//! pass it to [`AppState::dispatch`]; the renderer only reads.
//!
//! The core treats an item with no record as collapsed. Whenever items show up
//! that the view has never seen (first load, refresh, reset), they are seeded with
//! a global `set_visibility_level` carrying exactly those keys, so the configured
//! level decides how new items first appear. Open sections leave no record in
//! the view, so the sections already seeded are tracked here.

use std::collections::BTreeSet;

use crossbeam_channel::Sender;
use hunkview_core::{
    file_key, find_parent_section, Command, FileExpanded, LevelContext, LineEntry, Scope, State,
    VisibilityLevel,
};
use log::{debug, warn};

use crate::git::types::{SectionKind, StatusRequest, StatusSnapshot};
use crate::ui::tree::StatusTree;

/// Level used to open a single commit: the only level that expands commits.
const COMMIT_OPEN_LEVEL: i64 = VisibilityLevel::MAX as i64;
/// Level used to fold a single commit while leaving its section open.
const COMMIT_CLOSED_LEVEL: i64 = 2;

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Full-screen help overlay above the status view.
    HelpOverlay,
}

/// Something the cursor sits on, identified independently of its line number.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Anchor {
    Section(String),
    Line(LineEntry),
}

pub struct AppState {
    pub mode: Mode,
    /// Expansion state; replaced wholesale on every command.
    pub view: State,
    pub status: StatusSnapshot,
    /// Rows and line tables for the current `status` under `view`.
    pub tree: StatusTree,
    /// Section keys already seeded from the level since the last reset.
    seen_sections: BTreeSet<String>,

    /// Display line under the cursor.
    pub cursor: usize,
    /// First display line in the viewport.
    pub scroll: usize,
    /// Inner height of the status view, cached by the renderer for paging.
    pub viewport_height: u16,
    pub help_scroll: u16,

    /// True between a refresh request and the worker's answer.
    pub loading: bool,
    pub git_tx: Option<Sender<StatusRequest>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AppState {
    /// Empty view at `initial_level` (clamped; `None` means level 2), waiting for
    /// the first status.
    pub fn new(initial_level: Option<i64>) -> Self {
        let view = State::new(initial_level);
        let status = StatusSnapshot::default();
        let tree = StatusTree::build(&status, &view);
        Self {
            mode: Mode::default(),
            view,
            status,
            tree,
            seen_sections: BTreeSet::new(),
            cursor: 0,
            scroll: 0,
            viewport_height: 0,
            help_scroll: 0,
            loading: true,
            git_tx: None,
        }
    }

    // -----------------------------------------------------------------------
    // State transitions
    // -----------------------------------------------------------------------

    /// Applies `command` to the view and relays out the tree, keeping the cursor
    /// on the item it was on when that item is still visible.
    pub fn dispatch(&mut self, command: Command) {
        let anchors = self.anchors_at_cursor();
        self.view = self.view.apply(&command);
        self.rebuild(&anchors);
    }

    /// Replaces the status with a fresh read from the git worker.
    pub fn apply_status(&mut self, status: StatusSnapshot) {
        let anchors = self.anchors_at_cursor();
        self.status = status;
        self.loading = false;
        self.seed_new_entries();
        self.rebuild(&anchors);
    }

    /// Drops every per-item choice and re-seeds from the current level.
    pub fn reset_view(&mut self) {
        let anchors = self.anchors_at_cursor();
        self.view = self.view.apply(&Command::reset());
        self.seen_sections.clear();
        self.seed_new_entries();
        self.rebuild(&anchors);
    }

    /// Asks the git worker for a new status. The answer arrives as
    /// `AppEvent::StatusLoaded`.
    pub fn request_refresh(&mut self) {
        let Some(tx) = &self.git_tx else {
            return;
        };
        if tx.send(StatusRequest::Refresh).is_ok() {
            self.loading = true;
        } else {
            warn!("git worker has stopped; refresh dropped");
        }
    }

    fn seed_new_entries(&mut self) {
        let mut context = LevelContext::default();
        let present: Vec<SectionKind> = self.present_sections().collect();
        for kind in present {
            if self.seen_sections.insert(kind.key().to_owned()) {
                context.sections.push(kind.key().to_owned());
            }
        }
        context.file_keys = self
            .all_file_keys()
            .into_iter()
            .filter(|key| !self.view.files.contains_key(key))
            .collect();
        context.commit_hashes = self
            .status
            .commits
            .iter()
            .filter(|c| !self.view.commits.contains_key(&c.hash))
            .map(|c| c.hash.clone())
            .collect();

        if context.is_empty() {
            return;
        }
        debug!(
            "seeding {} sections, {} files, {} commits",
            context.sections.len(),
            context.file_keys.len(),
            context.commit_hashes.len()
        );
        let level = i64::from(self.view.visibility_level.get());
        self.view = self
            .view
            .apply(&Command::set_visibility_level(level, Scope::Global, Some(context)));
    }

    fn rebuild(&mut self, anchors: &[Anchor]) {
        self.tree = StatusTree::build(&self.status, &self.view);
        if let Some(line) = anchors.iter().find_map(|anchor| self.line_of(anchor)) {
            self.cursor = line;
        }
        self.cursor = self.cursor.min(self.last_line());
    }

    // -----------------------------------------------------------------------
    // Command builders
    // -----------------------------------------------------------------------

    /// Scope the cursor line targets.
    pub fn scope_at_cursor(&self) -> Scope {
        self.tree.scope_at(self.cursor)
    }

    /// `Tab`: fold or unfold whatever is under the cursor.
    ///
    /// Commits have no command of their own; they are flipped through a
    /// section-scoped level naming just that commit.
    pub fn toggle_command(&self) -> Option<Command> {
        match self.scope_at_cursor() {
            Scope::Hunk { section_key, file_key, hunk_index } => {
                let total = self.hunk_count(&section_key, &file_key);
                Some(Command::toggle_hunk(file_key, hunk_index, total))
            }
            Scope::File { file_key, .. } => Some(Command::toggle_file(file_key)),
            Scope::Section { section_key } => Some(Command::toggle_section(section_key)),
            Scope::Global => {
                let (section, hash) = self.commit_at_cursor()?;
                let level = if self.view.is_commit_expanded(hash) {
                    COMMIT_CLOSED_LEVEL
                } else {
                    COMMIT_OPEN_LEVEL
                };
                let context = LevelContext {
                    commit_hashes: vec![hash.to_owned()],
                    ..LevelContext::default()
                };
                Some(Command::set_visibility_level(level, Scope::section(section), Some(context)))
            }
        }
    }

    /// `1`–`4`: apply `level` to the item under the cursor.
    ///
    /// Lines that belong to no file (blank lines, commits) apply it to the
    /// enclosing section; above the first section it is global.
    pub fn level_command(&self, level: i64) -> Command {
        match self.scope_at_cursor() {
            Scope::Hunk { section_key, file_key, hunk_index } => {
                let context = LevelContext {
                    total_hunks: self.hunk_count(&section_key, &file_key),
                    ..LevelContext::default()
                };
                let scope = Scope::Hunk { section_key, file_key, hunk_index };
                Command::set_visibility_level(level, scope, Some(context))
            }
            file @ Scope::File { .. } => Command::set_visibility_level(level, file, None),
            Scope::Section { section_key } => {
                let context = self.section_context(&section_key);
                Command::set_visibility_level(level, Scope::Section { section_key }, Some(context))
            }
            Scope::Global => match find_parent_section(self.cursor, &self.tree.section_lines) {
                Some((section_key, _)) => Command::set_visibility_level(
                    level,
                    Scope::section(section_key),
                    Some(self.section_context(section_key)),
                ),
                None => self.global_level_command(level),
            },
        }
    }

    /// `Alt-1`–`Alt-4`: move the session level and rewrite every item on screen.
    pub fn global_level_command(&self, level: i64) -> Command {
        let context = LevelContext {
            sections: self.present_sections().map(|k| k.key().to_owned()).collect(),
            file_keys: self.all_file_keys(),
            commit_hashes: self.status.commits.iter().map(|c| c.hash.clone()).collect(),
            total_hunks: None,
        };
        Command::set_visibility_level(level, Scope::Global, Some(context))
    }

    /// `Shift-Tab`: open all sections if any is folded, otherwise fold them all.
    pub fn toggle_all_command(&self) -> Option<Command> {
        let sections: Vec<String> =
            self.present_sections().map(|k| k.key().to_owned()).collect();
        if sections.is_empty() {
            return None;
        }
        let any_collapsed = sections.iter().any(|key| self.view.is_section_collapsed(key));
        Some(Command::toggle_all_sections(
            sections,
            any_collapsed,
            Some(self.view.files.clone()),
        ))
    }

    /// `h`: show the file under the cursor as hunk headers only.
    pub fn headers_only_command(&self) -> Option<Command> {
        self.scope_at_cursor()
            .file_key()
            .map(|key| Command::set_file_expansion(key, FileExpanded::HeadersOnly))
    }

    // -----------------------------------------------------------------------
    // Cursor
    // -----------------------------------------------------------------------

    pub fn cursor_down(&mut self, lines: usize) {
        self.cursor = self.cursor.saturating_add(lines).min(self.last_line());
    }

    pub fn cursor_up(&mut self, lines: usize) {
        self.cursor = self.cursor.saturating_sub(lines);
    }

    pub fn cursor_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_bottom(&mut self) {
        self.cursor = self.last_line();
    }

    /// Half the cached viewport height, at least one line.
    pub fn half_page(&self) -> usize {
        usize::from(self.viewport_height / 2).max(1)
    }

    /// Scrolls just enough to keep the cursor inside the viewport.
    pub fn follow_cursor(&mut self) {
        let height = usize::from(self.viewport_height).max(1);
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
    }

    fn last_line(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    fn present_sections(&self) -> impl Iterator<Item = SectionKind> + '_ {
        SectionKind::ALL
            .into_iter()
            .filter(|kind| self.status.item_count(*kind) > 0)
    }

    fn all_file_keys(&self) -> Vec<String> {
        SectionKind::ALL
            .into_iter()
            .flat_map(|kind| {
                self.status
                    .files(kind)
                    .iter()
                    .map(move |file| file_key(kind.key(), &file.path))
            })
            .collect()
    }

    /// Items of one section, for a section-scoped level.
    fn section_context(&self, section_key: &str) -> LevelContext {
        let mut context = LevelContext::default();
        match SectionKind::from_key(section_key) {
            Some(SectionKind::Recent) => {
                context.commit_hashes = self.status.commits.iter().map(|c| c.hash.clone()).collect();
            }
            Some(kind) => {
                context.file_keys = self
                    .status
                    .files(kind)
                    .iter()
                    .map(|file| file_key(section_key, &file.path))
                    .collect();
            }
            None => {}
        }
        context
    }

    fn hunk_count(&self, section_key: &str, file_key: &str) -> Option<usize> {
        let path = file_key.strip_prefix(section_key)?.strip_prefix(':')?;
        let kind = SectionKind::from_key(section_key)?;
        self.status
            .files(kind)
            .iter()
            .find(|file| file.path == path)
            .map(|file| file.hunks.len())
    }

    fn commit_at_cursor(&self) -> Option<(&str, &str)> {
        match self.tree.line_map.get(&self.cursor)? {
            LineEntry::Commit { section, hash } => Some((section.as_str(), hash.as_str())),
            LineEntry::File { .. } => None,
        }
    }

    /// Items under the cursor from finest to coarsest: the line's own item, the
    /// file or commit it belongs to, then its section.
    fn anchors_at_cursor(&self) -> Vec<Anchor> {
        let mut anchors = Vec::new();
        match self.tree.line_map.get(&self.cursor) {
            Some(header @ LineEntry::File { is_hunk_header: true, section, path, .. }) => {
                anchors.push(Anchor::Line(header.clone()));
                anchors.push(Anchor::Line(file_line(section, path)));
            }
            Some(LineEntry::File { section, path, .. }) => {
                anchors.push(Anchor::Line(file_line(section, path)));
            }
            Some(commit @ LineEntry::Commit { .. }) => anchors.push(Anchor::Line(commit.clone())),
            None => {}
        }
        if let Some((section, _)) = find_parent_section(self.cursor, &self.tree.section_lines) {
            anchors.push(Anchor::Section(section.to_owned()));
        }
        anchors
    }

    fn line_of(&self, anchor: &Anchor) -> Option<usize> {
        match anchor {
            Anchor::Section(key) => self
                .tree
                .section_lines
                .iter()
                .find(|(_, header)| &header.key == key)
                .map(|(line, _)| *line),
            Anchor::Line(entry) => self
                .tree
                .line_map
                .iter()
                .find(|(_, candidate)| *candidate == entry)
                .map(|(line, _)| *line),
        }
    }
}

/// Line-map entry of a file's own row.
fn file_line(section: &str, path: &str) -> LineEntry {
    LineEntry::File {
        section: section.to_owned(),
        path: path.to_owned(),
        hunk_index: None,
        is_hunk_header: false,
    }
}
