//! Color themes.
//!
//! Two built-ins: `dark` sticks to the ANSI 16 colors and works everywhere,
//! `catppuccin-mocha` uses the Mocha palette in RGB and wants a truecolor
//! terminal.

use ratatui::style::Color;

/// Every color the status view uses.
#[derive(Debug, Clone)]
pub struct Theme {
    pub head: Color,
    pub section_header: Color,
    /// Item count and fold marker after a section title.
    pub section_count: Color,

    pub file_added: Color,
    pub file_removed: Color,
    pub file_modified: Color,
    pub file_renamed: Color,
    pub file_untracked: Color,

    pub hunk_header: Color,
    pub diff_added: Color,
    pub diff_removed: Color,
    pub diff_context: Color,

    pub commit_hash: Color,
    pub commit_message: Color,

    /// Background of the row under the cursor.
    pub cursor_bg: Color,

    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_mode: Color,

    pub border: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            head: Color::Cyan,
            section_header: Color::Magenta,
            section_count: Color::DarkGray,

            file_added: Color::Green,
            file_removed: Color::Red,
            file_modified: Color::Yellow,
            file_renamed: Color::Blue,
            file_untracked: Color::DarkGray,

            hunk_header: Color::Cyan,
            diff_added: Color::Green,
            diff_removed: Color::Red,
            diff_context: Color::Reset,

            commit_hash: Color::Yellow,
            commit_message: Color::Gray,

            cursor_bg: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode: Color::Cyan,

            border: Color::Cyan,
        }
    }

    /// Palette: <https://github.com/catppuccin/catppuccin>, Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let teal = Color::Rgb(148, 226, 213); // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let peach = Color::Rgb(250, 179, 135); // #fab387
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let subtext0 = Color::Rgb(166, 173, 200); // #a6adc8
        let surface0 = Color::Rgb(49, 50, 68); // #313244
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let text = Color::Rgb(205, 214, 244); // #cdd6f4

        Self {
            head: lavender,
            section_header: mauve,
            section_count: overlay1,

            file_added: green,
            file_removed: red,
            file_modified: yellow,
            file_renamed: blue,
            file_untracked: overlay1,

            hunk_header: teal,
            diff_added: green,
            diff_removed: red,
            diff_context: text,

            commit_hash: peach,
            commit_message: subtext0,

            cursor_bg: surface0,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode: lavender,

            border: lavender,
        }
    }

    /// Resolves a theme name from config or the command line.
    ///
    /// Unknown names fall back to `dark()` with a warning in the log.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                log::warn!("unknown theme '{other}', falling back to 'dark'");
                Self::dark()
            }
        }
    }

    /// Color for a file status letter.
    pub fn file_status(&self, status: char) -> Color {
        match status {
            'A' => self.file_added,
            'D' => self.file_removed,
            'R' => self.file_renamed,
            '?' => self.file_untracked,
            _ => self.file_modified,
        }
    }

    /// Color for a diff body line by origin.
    pub fn diff_line(&self, origin: char) -> Color {
        match origin {
            '+' => self.diff_added,
            '-' => self.diff_removed,
            _ => self.diff_context,
        }
    }
}
