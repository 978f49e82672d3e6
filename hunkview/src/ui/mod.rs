//! UI rendering for hunkview.
//!
//! [`render`] is the single entry point called from the event loop's
//! `terminal.draw()` closure. `tree` decides what goes on each line,
//! `status_view` styles those lines, `layout` splits the screen and draws the
//! status bar.

pub mod help;
pub mod keybindings;
mod layout;
pub mod status_view;
pub mod tree;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Renders one frame: status view, status bar, and the help overlay on top when
/// it is open.
///
/// Takes `state` mutably to cache the viewport height and scroll offset for the
/// next key press.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [main, status_bar] = layout::compute_layout(frame);

    status_view::render_status_view(frame, main, state, theme);
    layout::render_status_bar(frame, status_bar, state, theme);

    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}
