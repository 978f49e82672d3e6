//! The expansion state machine.
//!
//! [`apply`] is the only transition: it reads the current `State` through a shared
//! reference and returns a new one, so the caller's value is never modified. The
//! function is total; commands that name missing entities or lack optional data
//! fall back to documented defaults instead of failing.

use log::debug;

use crate::command::{Command, LevelContext};
use crate::expansion::{FileExpanded, FileExpansion, FileSnapshot, HunkFlags, SectionExpansion};
use crate::level::VisibilityLevel;
use crate::scope::Scope;
use crate::state::State;

/// Applies `command` to `state`, returning the next state.
pub fn apply(state: &State, command: &Command) -> State {
    let mut next = match command {
        Command::Reset => State::new(Some(state.visibility_level.get() as i64)),
        _ => state.clone(),
    };

    match command {
        Command::Reset | Command::Unknown => {}
        Command::ToggleFile { file_key } => toggle_file(&mut next, file_key),
        Command::ToggleSection { section_key } => toggle_section(&mut next, section_key),
        Command::ToggleHunk { file_key, hunk_index, total_hunks } => {
            toggle_hunk(&mut next, file_key, *hunk_index, *total_hunks)
        }
        Command::SetFileExpansion { file_key, value } => {
            next.files.entry(file_key.clone()).or_default().transition(*value);
        }
        Command::SetVisibilityLevel { level, scope, context } => {
            set_visibility_level(&mut next, VisibilityLevel::new(*level), scope, context.as_ref())
        }
        Command::ToggleAllSections { sections, any_collapsed, current_files } => {
            toggle_all_sections(&mut next, sections, *any_collapsed, current_files.as_ref())
        }
    }

    debug!(
        "apply {}: level={} files={} sections={} commits={}",
        command.kind(),
        next.visibility_level,
        next.files.len(),
        next.sections.len(),
        next.commits.len()
    );
    next
}

// ---------------------------------------------------------------------------
// Files and hunks
// ---------------------------------------------------------------------------

/// Collapses an open file; opens a collapsed one, preferring its saved hunk flags.
fn toggle_file(state: &mut State, file_key: &str) {
    let file = state.files.entry(file_key.to_owned()).or_default();
    if file.expanded.is_expanded() {
        file.collapse();
    } else if file.remembered.is_some() || file.hunks.is_some() {
        file.show_headers();
    } else {
        file.expanded = FileExpanded::Full;
    }
}

/// Flips one hunk of a visible file. Hunks of collapsed files are not on screen,
/// so toggling them does nothing.
fn toggle_hunk(state: &mut State, file_key: &str, hunk_index: usize, total_hunks: Option<usize>) {
    let Some(file) = state.files.get_mut(file_key) else {
        return;
    };
    if !file.expanded.is_expanded() {
        return;
    }
    let target = !file.is_hunk_expanded(hunk_index);
    if !set_hunk(file, hunk_index, target, total_hunks) {
        debug!("toggle_hunk on fully expanded {file_key} without total_hunks ignored");
    }
}

/// Sets hunk `index` of `file` to `expanded`, switching the file to headers-only
/// mode when needed.
///
/// Folding one hunk of a `Full` file requires `total_hunks` so every other hunk
/// can be recorded as open; without it nothing changes and `false` is returned.
fn set_hunk(
    file: &mut FileExpansion,
    index: usize,
    expanded: bool,
    total_hunks: Option<usize>,
) -> bool {
    match (file.expanded, expanded) {
        (FileExpanded::Full, true) => true,
        (FileExpanded::Full, false) => match total_hunks {
            Some(total) => {
                let mut hunks: HunkFlags = (0..total).map(|i| (i, true)).collect();
                hunks.insert(index, false);
                file.hunks = Some(hunks);
                file.expanded = FileExpanded::HeadersOnly;
                true
            }
            None => false,
        },
        _ => {
            file.show_headers();
            file.hunks.get_or_insert_with(HunkFlags::new).insert(index, expanded);
            true
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Records of `files` belonging to `section_key`.
fn section_files(files: &FileSnapshot, section_key: &str) -> FileSnapshot {
    let prefix = format!("{section_key}:");
    files
        .iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .map(|(key, file)| (key.clone(), file.clone()))
        .collect()
}

fn collapse_section(state: &mut State, section_key: &str, snapshot: FileSnapshot) {
    let section = state.sections.entry(section_key.to_owned()).or_default();
    section.collapsed = true;
    section.remembered_files = (!snapshot.is_empty()).then_some(snapshot);
}

/// Re-opens a section and writes its remembered file records back. The record
/// itself is dropped, since an open section without a snapshot is the default.
fn expand_section(state: &mut State, section_key: &str) {
    let Some(section) = state.sections.remove(section_key) else {
        return;
    };
    if let Some(files) = section.remembered_files {
        state.files.extend(files);
    }
}

fn toggle_section(state: &mut State, section_key: &str) {
    if state.is_section_collapsed(section_key) {
        expand_section(state, section_key);
    } else {
        let snapshot = section_files(&state.files, section_key);
        collapse_section(state, section_key, snapshot);
    }
}

/// Opens every named section when `any_collapsed`, otherwise collapses them all.
///
/// Snapshots come from `current_files` (the host's view of what is on screen) when
/// supplied, and from the stored file records otherwise.
fn toggle_all_sections(
    state: &mut State,
    sections: &[String],
    any_collapsed: bool,
    current_files: Option<&FileSnapshot>,
) {
    for section_key in sections {
        if any_collapsed {
            expand_section(state, section_key);
        } else {
            let snapshot = section_files(current_files.unwrap_or(&state.files), section_key);
            collapse_section(state, section_key, snapshot);
        }
    }
}

// ---------------------------------------------------------------------------
// Visibility level
// ---------------------------------------------------------------------------

/// Global scope moves the session level; any other scope only rewrites the
/// entities it names. Context lists are applied in both cases.
fn set_visibility_level(
    state: &mut State,
    level: VisibilityLevel,
    scope: &Scope,
    context: Option<&LevelContext>,
) {
    match scope {
        Scope::Global => state.visibility_level = level,
        Scope::Section { section_key } => level_section(state, section_key, level),
        Scope::File { file_key, .. } => level_file(state, file_key, level),
        Scope::Hunk { file_key, hunk_index, .. } => {
            let total_hunks = context.and_then(|c| c.total_hunks);
            let file = state.files.entry(file_key.clone()).or_default();
            if !set_hunk(file, *hunk_index, level.hunk_expanded(), total_hunks) {
                debug!("level {level} on hunk {hunk_index} of {file_key} needs total_hunks");
            }
        }
    }

    let Some(context) = context else {
        return;
    };
    for section_key in &context.sections {
        level_section(state, section_key, level);
    }
    for file_key in &context.file_keys {
        level_file(state, file_key, level);
    }
    for hash in &context.commit_hashes {
        state.commits.insert(hash.clone(), level.commit_expanded());
    }
}

/// Sets the section's collapse flag and every stored file inside it.
///
/// An explicit level supersedes any remembered snapshot.
fn level_section(state: &mut State, section_key: &str, level: VisibilityLevel) {
    if level.section_collapsed() {
        state.sections.insert(
            section_key.to_owned(),
            SectionExpansion { collapsed: true, remembered_files: None },
        );
    } else {
        state.sections.remove(section_key);
    }

    let prefix = format!("{section_key}:");
    for (_, file) in state.files.iter_mut().filter(|(key, _)| key.starts_with(&prefix)) {
        file.transition(level.file_expansion());
    }
}

fn level_file(state: &mut State, file_key: &str, level: VisibilityLevel) {
    state
        .files
        .entry(file_key.to_owned())
        .or_default()
        .transition(level.file_expansion());
}
