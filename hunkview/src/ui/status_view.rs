//! Status view rendering.
//!
//! Turns the rows laid out by [`StatusTree`](super::tree::StatusTree) into styled
//! `Line`s. Only the rows inside the viewport are converted each frame.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use hunkview_core::FileExpanded;

use super::tree::Row;
use crate::app::AppState;
use crate::theme::Theme;

const OPEN: &str = "▾ ";
const CLOSED: &str = "▸ ";
/// File showing hunk headers with folded bodies.
const HEADERS: &str = "▹ ";

/// Draws the bordered status view into `area`.
///
/// Caches the inner height in `state` and scrolls it to keep the cursor visible
/// before picking which rows to draw.
pub fn render_status_view(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let block = Block::bordered()
        .title(" hunkview ")
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    state.viewport_height = inner.height;
    state.follow_cursor();

    if state.tree.len() <= 2 && state.loading {
        frame.render_widget(Paragraph::new(" Reading repository status..."), inner);
        return;
    }

    let cursor_style = Style::default().bg(theme.cursor_bg);
    let lines: Vec<Line<'static>> = state
        .tree
        .rows
        .iter()
        .enumerate()
        .skip(state.scroll)
        .take(usize::from(inner.height))
        .map(|(index, row)| {
            let line = row_line(row, theme);
            if index == state.cursor {
                line.patch_style(cursor_style)
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn marker(open: bool) -> &'static str {
    if open {
        OPEN
    } else {
        CLOSED
    }
}

/// Styled text for one row.
pub fn row_line(row: &Row, theme: &Theme) -> Line<'static> {
    let bold = Modifier::BOLD;
    match row {
        Row::Head(name) => Line::from(vec![
            Span::raw("Head: "),
            Span::styled(name.clone(), Style::default().fg(theme.head).add_modifier(bold)),
        ]),
        Row::Blank => Line::default(),
        Row::Section { kind, count, collapsed } => Line::from(vec![
            Span::styled(
                format!("{}{}", marker(!collapsed), kind.title()),
                Style::default().fg(theme.section_header).add_modifier(bold),
            ),
            Span::styled(format!(" ({count})"), Style::default().fg(theme.section_count)),
        ]),
        Row::File { status, path, hunk_count, mode } => {
            let fold = match mode {
                FileExpanded::Collapsed => CLOSED,
                FileExpanded::HeadersOnly => HEADERS,
                FileExpanded::Full => OPEN,
            };
            let hunks = match hunk_count {
                1 => " (1 hunk)".to_owned(),
                n => format!(" ({n} hunks)"),
            };
            Line::from(vec![
                Span::raw(format!("  {fold}")),
                Span::styled(format!("{status} "), Style::default().fg(theme.file_status(*status))),
                Span::raw(path.clone()),
                Span::styled(hunks, Style::default().fg(theme.section_count)),
            ])
        }
        Row::HunkHeader { header, expanded } => Line::from(vec![
            Span::raw(format!("    {}", marker(*expanded))),
            Span::styled(header.clone(), Style::default().fg(theme.hunk_header)),
        ]),
        Row::Diff(line) => Line::from(Span::styled(
            format!("      {}{}", line.origin, line.content),
            Style::default().fg(theme.diff_line(line.origin)),
        )),
        Row::Commit { short, summary, expanded } => Line::from(vec![
            Span::raw(format!("  {}", marker(*expanded))),
            Span::styled(format!("{short} "), Style::default().fg(theme.commit_hash)),
            Span::raw(summary.clone()),
        ]),
        Row::Message(text) => Line::from(Span::styled(
            format!("      {text}"),
            Style::default().fg(theme.commit_message),
        )),
    }
}
