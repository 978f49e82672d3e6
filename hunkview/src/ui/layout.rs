//! Screen layout and the status bar.
//!
//! Pure layout arithmetic plus the one-row status bar. Recomputed every frame
//! from `frame.area()`, so resizes need no bookkeeping.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use hunkview_core::Scope;

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Returns `[status_view, status_bar]` for the current frame.
pub fn compute_layout(frame: &Frame) -> [Rect; 2] {
    frame
        .area()
        .layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]))
}

/// Renders the bottom bar: mode, visibility level, HEAD, the scope under the
/// cursor, and a loading marker while a refresh is in flight.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mode_text = match state.mode {
        Mode::Normal => " NORMAL ",
        Mode::HelpOverlay => " HELP ",
    };

    let mut spans = vec![
        Span::styled(
            mode_text,
            Style::default().fg(theme.status_mode).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" L{} ", state.view.visibility_level)),
        Span::raw(format!(" {} ", state.status.head)),
        Span::raw(format!(" {} ", describe_scope(&state.scope_at_cursor()))),
    ];
    if state.loading {
        spans.push(Span::styled(" loading… ", Style::default().add_modifier(Modifier::ITALIC)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}

/// Short label for a scope, e.g. `hunk 2 of unstaged:src/lib.rs`.
pub fn describe_scope(scope: &Scope) -> String {
    match scope {
        Scope::Global => "global".to_owned(),
        Scope::Section { section_key } => format!("section {section_key}"),
        Scope::File { file_key, .. } => format!("file {file_key}"),
        Scope::Hunk { file_key, hunk_index, .. } => format!("hunk {} of {file_key}", hunk_index + 1),
    }
}
