//! Behavioural tests for the expansion reducer.
//!
//! Exercises: State::new, apply (all command kinds), the query helpers, resolve,
//! and invariants that must hold for arbitrary command sequences.

use hunkview_core::{
    apply, resolve, Command, FileExpanded, FileExpansion, FileSnapshot, LevelContext, LineEntry,
    LineMap, Scope, SectionLine, SectionLines, State,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn reset_clears_everything_but_the_level() {
    let mut state = State::new(Some(4));
    for cmd in [
        Command::toggle_file("staged:a"),
        Command::toggle_section("unstaged"),
        Command::set_visibility_level(
            1,
            Scope::Global,
            Some(LevelContext { commit_hashes: vec!["abc".to_owned()], ..Default::default() }),
        ),
    ] {
        state = apply(&state, &cmd);
    }

    let reset = apply(&state, &Command::reset());
    assert_eq!(reset.visibility_level, state.visibility_level);
    assert!(reset.files.is_empty(), "files should be cleared");
    assert!(reset.sections.is_empty(), "sections should be cleared");
    assert!(reset.commits.is_empty(), "commits should be cleared");
}

fn toggle_file_twice(state: &State, file_key: &str) -> State {
    let once = apply(state, &Command::toggle_file(file_key));
    apply(&once, &Command::toggle_file(file_key))
}

#[test]
fn toggle_file_twice_restores_expanded_value() {
    let state = State::new(None);
    let before = state.file_mode("unstaged:src/main.rs");
    let twice = toggle_file_twice(&state, "unstaged:src/main.rs");
    assert_eq!(twice.file_mode("unstaged:src/main.rs"), before);
}

#[test]
fn toggle_file_twice_keeps_a_level_two_file_headers_only() {
    let state = State::new(Some(2));
    let state = apply(
        &state,
        &Command::set_visibility_level(2, Scope::file("unstaged", "a"), None),
    );
    assert_eq!(state.file_mode("unstaged:a"), FileExpanded::HeadersOnly);

    let once = apply(&state, &Command::toggle_file("unstaged:a"));
    assert_eq!(once.file_mode("unstaged:a"), FileExpanded::Collapsed);
    let twice = apply(&once, &Command::toggle_file("unstaged:a"));
    assert_eq!(twice.file_mode("unstaged:a"), FileExpanded::HeadersOnly);
    assert!(!twice.is_hunk_expanded("unstaged:a", 0));
}

#[test]
fn toggle_file_twice_keeps_a_full_file_full() {
    let mut state = State::new(None);
    state.files.insert(
        "staged:a".to_owned(),
        FileExpansion { expanded: FileExpanded::Full, ..Default::default() },
    );
    let twice = toggle_file_twice(&state, "staged:a");
    assert_eq!(twice.file_mode("staged:a"), FileExpanded::Full);
}

#[test]
fn collapse_then_reopen_restores_hunk_flags() {
    let mut state = State::new(None);
    let hunks = [(1, true), (2, false)].into_iter().collect();
    state.files.insert(
        "unstaged:a".to_owned(),
        FileExpansion { expanded: FileExpanded::HeadersOnly, hunks: Some(hunks), remembered: None },
    );

    let collapsed = apply(&state, &Command::set_file_expansion("unstaged:a", FileExpanded::Collapsed));
    let reopened = apply(&collapsed, &Command::toggle_file("unstaged:a"));
    let file = reopened.file_expansion("unstaged:a");
    assert_eq!(file.expanded, FileExpanded::HeadersOnly);
    assert_eq!(file.hunks, Some([(1, true), (2, false)].into_iter().collect()));
}

#[test]
fn fresh_state_is_all_defaults() {
    let state = State::new(None);
    for key in ["staged:a", "unstaged:b/c.rs", "untracked:new.txt"] {
        assert!(!state.is_file_expanded(key), "{key} should default to collapsed");
    }
    for section in ["staged", "unstaged", "untracked", "recent"] {
        assert!(!state.is_section_collapsed(section), "{section} should default to open");
    }
}

#[test]
fn section_header_beats_line_map_entry() {
    let mut sections = SectionLines::new();
    sections.insert(4, SectionLine { key: "staged".to_owned() });
    let mut lines = LineMap::new();
    lines.insert(
        4,
        LineEntry::File {
            section: "staged".to_owned(),
            path: "a".to_owned(),
            hunk_index: Some(0),
            is_hunk_header: true,
        },
    );
    assert_eq!(resolve(4, &lines, &sections), Scope::section("staged"));
}

#[test]
fn section_scoped_level_keeps_global_level() {
    let state = State::new(Some(2));
    let next = apply(&state, &Command::set_visibility_level(4, Scope::section("staged"), None));
    assert_eq!(next.visibility_level.get(), 2);
}

#[test]
fn toggling_a_section_twice_restores_the_state() {
    let state = State::new(Some(2));

    let collapsed = apply(&state, &Command::toggle_section("staged"));
    assert!(collapsed.is_section_collapsed("staged"));
    assert_eq!(collapsed.section_expansion("staged").remembered_files, None);

    let reopened = apply(&collapsed, &Command::toggle_section("staged"));
    assert_eq!(reopened, state);
}

#[test]
fn toggling_a_section_twice_keeps_its_file_records() {
    let mut state = State::new(Some(2));
    state = apply(&state, &Command::set_visibility_level(3, Scope::file("staged", "a"), None));

    let collapsed = apply(&state, &Command::toggle_section("staged"));
    let reopened = apply(&collapsed, &Command::toggle_section("staged"));
    assert_eq!(reopened, state);
}

#[test]
fn collapse_all_then_expand_all_round_trips_visible_files() {
    let mut state = State::new(Some(2));
    state = apply(&state, &Command::toggle_file("staged:a"));
    state = apply(&state, &Command::toggle_hunk("staged:a", 1, Some(3)));
    let sections = vec!["staged".to_owned(), "unstaged".to_owned()];
    let visible: FileSnapshot = state.files.clone();

    let closed = apply(&state, &Command::toggle_all_sections(sections.clone(), false, Some(visible)));
    let reopened = apply(&closed, &Command::toggle_all_sections(sections, true, None));
    assert_eq!(reopened.files, state.files);
    assert!(!reopened.is_section_collapsed("staged"));
    assert!(!reopened.is_section_collapsed("unstaged"));
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

fn arb_file_key() -> impl Strategy<Value = String> {
    (prop::sample::select(vec!["staged", "unstaged"]), prop::sample::select(vec!["a", "b/c"]))
        .prop_map(|(section, path)| format!("{section}:{path}"))
}

fn arb_section() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["staged", "unstaged", "recent"]).prop_map(str::to_owned)
}

fn arb_mode() -> impl Strategy<Value = FileExpanded> {
    prop::sample::select(vec![FileExpanded::Collapsed, FileExpanded::HeadersOnly, FileExpanded::Full])
}

fn arb_scope() -> impl Strategy<Value = Scope> {
    prop_oneof![
        Just(Scope::Global),
        arb_section().prop_map(Scope::section),
        (arb_section(), prop::sample::select(vec!["a", "b/c"]))
            .prop_map(|(s, p)| Scope::file(s, p)),
        (arb_section(), prop::sample::select(vec!["a", "b/c"]), 0usize..4)
            .prop_map(|(s, p, i)| Scope::hunk(s, p, i)),
    ]
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        arb_file_key().prop_map(Command::toggle_file),
        arb_section().prop_map(Command::toggle_section),
        (arb_file_key(), 0usize..4, prop::option::of(1usize..5))
            .prop_map(|(k, i, t)| Command::toggle_hunk(k, i, t)),
        (arb_file_key(), arb_mode()).prop_map(|(k, m)| Command::set_file_expansion(k, m)),
        (-3i64..9, arb_scope(), prop::option::of(prop::collection::vec(arb_file_key(), 0..3)))
            .prop_map(|(level, scope, keys)| {
                let context = keys.map(|file_keys| LevelContext { file_keys, ..Default::default() });
                Command::set_visibility_level(level, scope, context)
            }),
        (prop::collection::vec(arb_section(), 0..3), any::<bool>())
            .prop_map(|(sections, any_collapsed)| {
                Command::toggle_all_sections(sections, any_collapsed, None)
            }),
        Just(Command::reset()),
        Just(Command::Unknown),
    ]
}

proptest! {
    #[test]
    fn level_stays_in_range(level in any::<i64>(), cmds in prop::collection::vec(arb_command(), 0..30)) {
        let mut state = State::new(Some(level));
        for cmd in &cmds {
            state = apply(&state, cmd);
            let level = state.visibility_level.get();
            prop_assert!((1..=4).contains(&level));
        }
    }

    #[test]
    fn apply_never_mutates_its_input(cmds in prop::collection::vec(arb_command(), 1..30)) {
        let mut state = State::new(None);
        for cmd in &cmds {
            let before = state.clone();
            let next = apply(&state, cmd);
            prop_assert_eq!(&state, &before);
            state = next;
        }
    }

    #[test]
    fn reset_is_idempotent(cmds in prop::collection::vec(arb_command(), 0..30)) {
        let mut state = State::new(None);
        for cmd in &cmds {
            state = apply(&state, cmd);
        }
        let once = apply(&state, &Command::reset());
        let twice = apply(&once, &Command::reset());
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once, State::new(Some(state.visibility_level.get() as i64)));
    }

    #[test]
    fn toggle_file_twice_keeps_mode_without_hunk_data(mode in arb_mode(), key in arb_file_key()) {
        let mut state = State::new(None);
        state.files.insert(
            key.clone(),
            FileExpansion { expanded: mode, hunks: None, remembered: None },
        );
        let twice = toggle_file_twice(&state, &key);
        prop_assert_eq!(twice.file_mode(&key), mode);
    }

    #[test]
    fn toggle_section_twice_is_identity(cmds in prop::collection::vec(arb_command(), 0..20), section in arb_section()) {
        let mut state = State::new(None);
        for cmd in &cmds {
            state = apply(&state, cmd);
        }
        prop_assume!(!state.sections.contains_key(&section));
        let once = apply(&state, &Command::toggle_section(section.clone()));
        let twice = apply(&once, &Command::toggle_section(section));
        prop_assert_eq!(twice, state);
    }

    #[test]
    fn headers_only_files_only_come_with_consistent_queries(cmds in prop::collection::vec(arb_command(), 0..30)) {
        let mut state = State::new(None);
        for cmd in &cmds {
            state = apply(&state, cmd);
        }
        for (key, file) in &state.files {
            prop_assert_eq!(state.is_file_expanded(key), file.expanded != FileExpanded::Collapsed);
            if file.expanded == FileExpanded::Collapsed {
                prop_assert!(file.hunks.is_none());
            }
        }
    }
}
