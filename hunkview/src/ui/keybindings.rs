//! Keybinding dispatcher.
//!
//! Translates crossterm `KeyEvent`s into cursor moves and expansion commands on
//! `AppState`, branching first on `state.mode`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{AppState, Mode};

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if handle_cursor_key(key, state) {
        return KeyAction::Continue;
    }

    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let command = match key.code {
        KeyCode::Tab => state.toggle_command(),
        KeyCode::BackTab => state.toggle_all_command(),
        KeyCode::Char(c @ '1'..='4') => {
            let level = i64::from(c.to_digit(10).unwrap_or(2));
            Some(if alt {
                state.global_level_command(level)
            } else {
                state.level_command(level)
            })
        }
        KeyCode::Char('h') => state.headers_only_command(),
        KeyCode::Char('R') => {
            state.reset_view();
            None
        }
        KeyCode::Char('r') => {
            state.request_refresh();
            None
        }
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            None
        }
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        _ => None,
    };

    if let Some(command) = command {
        state.dispatch(command);
    }
    KeyAction::Continue
}

/// Moves the cursor for j/k/g/G, arrows and Ctrl-d/u. Returns `true` when the
/// key was one of those.
fn handle_cursor_key(key: KeyEvent, state: &mut AppState) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.cursor_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.cursor_up(1),
        KeyCode::Char('g') | KeyCode::Home => state.cursor_top(),
        KeyCode::Char('G') | KeyCode::End => state.cursor_bottom(),
        KeyCode::Char('d') if ctrl => state.cursor_down(state.half_page()),
        KeyCode::Char('u') if ctrl => state.cursor_up(state.half_page()),
        _ => return false,
    }
    true
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use hunkview_core::FileExpanded;

    use super::*;
    use crate::test_support::fixture;

    fn press(state: &mut AppState, code: KeyCode) -> KeyAction {
        handle_key(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    fn loaded() -> AppState {
        let mut state = AppState::new(None);
        state.apply_status(fixture());
        state
    }

    #[test]
    fn q_and_esc_quit_from_normal_mode() {
        let mut state = loaded();
        assert_eq!(press(&mut state, KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(&mut state, KeyCode::Esc), KeyAction::Quit);
    }

    #[test]
    fn help_overlay_swallows_quit_keys() {
        let mut state = loaded();
        press(&mut state, KeyCode::Char('?'));
        assert_eq!(state.mode, Mode::HelpOverlay);
        press(&mut state, KeyCode::Char('j'));
        assert_eq!(state.help_scroll, 1);
        assert_eq!(press(&mut state, KeyCode::Char('q')), KeyAction::Continue);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn j_then_tab_folds_and_reopens_the_file() {
        let mut state = loaded();
        for _ in 0..3 {
            press(&mut state, KeyCode::Char('j'));
        }
        assert_eq!(state.cursor, 3);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.view.file_mode("unstaged:src/lib.rs"), FileExpanded::Collapsed);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.view.file_mode("unstaged:src/lib.rs"), FileExpanded::HeadersOnly);
    }

    #[test]
    fn alt_digit_is_global_and_plain_digit_is_scoped() {
        let mut state = loaded();
        state.cursor = 8; // README.md in the staged section
        press(&mut state, KeyCode::Char('3'));
        assert_eq!(state.view.file_mode("staged:README.md"), FileExpanded::Full);
        assert_eq!(state.view.file_mode("unstaged:src/lib.rs"), FileExpanded::HeadersOnly);
        assert_eq!(state.view.visibility_level.get(), 2);

        handle_key(KeyEvent::new(KeyCode::Char('4'), KeyModifiers::ALT), &mut state);
        assert_eq!(state.view.visibility_level.get(), 4);
        assert_eq!(state.view.file_mode("unstaged:src/lib.rs"), FileExpanded::Full);
    }

    #[test]
    fn ctrl_d_moves_half_a_page() {
        let mut state = loaded();
        state.viewport_height = 6;
        handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL), &mut state);
        assert_eq!(state.cursor, 3);
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.cursor, 3);
        press(&mut state, KeyCode::Char('G'));
        assert_eq!(state.cursor, state.tree.len() - 1);
    }

    #[test]
    fn shift_tab_and_reset() {
        let mut state = loaded();
        press(&mut state, KeyCode::BackTab);
        assert!(state.view.is_section_collapsed("staged"));
        press(&mut state, KeyCode::Char('R'));
        assert!(!state.view.is_section_collapsed("staged"));
        assert_eq!(state.tree.len(), 13);
    }
}
