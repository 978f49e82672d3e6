//! Terminal lifecycle.
//!
//! The status view draws to a buffered stderr so stdout stays free for pipes
//! (`hunkview | cat` still shows the view). Raw mode and the alternate screen
//! are not undone on drop, so every exit path, including the panic hook, calls
//! [`restore_tui`].

use std::io::{stderr, BufWriter, Stderr};
use std::panic;
use std::sync::{atomic::AtomicBool, Arc};

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;

pub type Tui = Terminal<CrosstermBackend<BufWriter<Stderr>>>;

/// Enables raw mode and enters the alternate screen.
///
/// # Errors
///
/// Returns `Err` if the terminal refuses raw mode or the escape sequences
/// cannot be written.
pub fn init_tui() -> std::io::Result<Tui> {
    let mut out = BufWriter::new(stderr());
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Leaves the alternate screen and disables raw mode. Safe to call twice.
///
/// # Errors
///
/// Returns `Err` if either step fails.
pub fn restore_tui() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stderr(), LeaveAlternateScreen)?;
    Ok(())
}

/// Chains a panic hook that restores the terminal before the previous hook
/// prints the message. Install before [`init_tui`].
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_tui();
        previous(info);
    }));
}

/// Returns a flag that flips to `true` when SIGTERM arrives.
///
/// # Errors
///
/// Returns `Err` if the handler cannot be registered.
pub fn register_sigterm() -> std::io::Result<Arc<AtomicBool>> {
    let term = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGTERM, Arc::clone(&term))?;
    Ok(term)
}
