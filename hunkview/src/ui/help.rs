//! Help overlay.
//!
//! Drawn last inside the same `terminal.draw()` closure; `Clear` erases the
//! status view underneath before the bordered text is drawn.

use ratatui::{
    layout::Constraint,
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Draws the key reference centred over the status view, scrolled by
/// `help_scroll` rows. Skipped on terminals narrower than 40 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help: j/k scroll, ? or Esc to close ")
        .border_style(Style::default().fg(theme.border));

    frame.render_widget(
        Paragraph::new(help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Movement"),
        Line::from("  j / k         Cursor down / up"),
        Line::from("  g / G         First / last line"),
        Line::from("  Ctrl-d / u    Half page down / up"),
        Line::from(""),
        Line::from("Folding"),
        Line::from("  Tab           Toggle the hunk, file, section or commit under the cursor"),
        Line::from("  Shift-Tab     Open all sections if any is folded, else fold them all"),
        Line::from("  h             Show the file under the cursor as hunk headers only"),
        Line::from("  1 - 4         Set the visibility level for the item under the cursor"),
        Line::from("  Alt-1 - 4     Set the visibility level for everything"),
        Line::from("  R             Forget all folding and start over at the current level"),
        Line::from(""),
        Line::from("Levels"),
        Line::from("  1   sections folded"),
        Line::from("  2   files show hunk headers"),
        Line::from("  3   hunk bodies shown"),
        Line::from("  4   commit messages shown"),
        Line::from(""),
        Line::from("General"),
        Line::from("  r             Re-read the repository status"),
        Line::from("  ?             Open / close this help"),
        Line::from("  q / Esc       Quit"),
    ])
}
