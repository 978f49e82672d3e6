//! hunkview: a foldable git status view for the terminal.
//!
//! Entry point for the `hunkview` binary. Wires together the CLI and config
//! (`config`), the terminal lifecycle (`tui`), the event bus (`event`), the git
//! worker thread (`git`), and the expansion state from `hunkview-core` held in
//! `app::AppState`.
//!
//! # Startup sequence
//!
//! 1. Parse arguments, start the file logger, load the config file.
//! 2. `Repository::discover` on the target path, so a bad path fails before the
//!    terminal is touched.
//! 3. `install_panic_hook()`, then `register_sigterm()`, then `init_tui()`.
//! 4. Spawn the event task and the git worker thread, and queue the first
//!    status read.
//!
//! The event loop lives in `run_loop`; `restore_tui()` runs once after it returns,
//! whether it ended in a quit key, SIGTERM, or an error.

mod app;
mod config;
mod error;
mod event;
mod git;
#[cfg(test)]
mod test_support;
mod theme;
mod tui;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::time::Duration;

use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::error::{AppError, LogInitError};
use crate::event::AppEvent;
use crate::git::types::StatusRequest;
use crate::ui::keybindings::{handle_key, KeyAction};

#[derive(Parser)]
#[command(name = "hunkview", about = "Foldable git status view", version)]
struct Args {
    /// Path inside the repository to show
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Starting visibility level (1-4), overriding the config file
    #[arg(short, long)]
    level: Option<i64>,

    /// Theme name: dark or catppuccin-mocha
    #[arg(short, long)]
    theme: Option<String>,

    /// Where to write the debug log
    #[arg(long, default_value = "hunkview.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<(), LogInitError> {
    let file = File::create(path).map_err(|source| LogInitError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(LevelFilter::Debug, log_config, file)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    // Printed before the TUI takes over stderr.
    if let Err(e) = init_logging(&args.log_file) {
        eprintln!("hunkview: logging disabled: {e}");
    }

    let config = config::load_or_default(&config::config_path());
    let theme = theme::Theme::from_name(args.theme.as_deref().unwrap_or(&config.theme));
    let level = args.level.or(config.visibility_level);

    let repo = git2::Repository::discover(&args.path)?;
    let workdir = repo
        .workdir()
        .map(PathBuf::from)
        .unwrap_or_else(|| repo.path().to_path_buf());
    drop(repo);
    info!("hunkview starting in {} at level {level:?}", workdir.display());

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    let (git_tx, git_rx) = crossbeam_channel::unbounded::<StatusRequest>();
    let worker_tx = handler.tx.clone();
    let recent_commits = config.recent_commits;
    std::thread::spawn(move || {
        git::worker::git_worker_loop(workdir, recent_commits, git_rx, worker_tx)
    });

    let mut state = app::AppState::new(level);
    state.git_tx = Some(git_tx);
    state.request_refresh();

    let result = run_loop(&mut terminal, &mut state, &theme, &mut rx, &term_flag).await;

    tui::restore_tui()?;
    if let Err(e) = &result {
        error!("event loop failed: {e}");
    }
    info!("hunkview exiting");
    result
}

/// Drains events until quit, SIGTERM, or a draw error.
async fn run_loop(
    terminal: &mut tui::Tui,
    state: &mut app::AppState,
    theme: &theme::Theme,
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
    term_flag: &std::sync::atomic::AtomicBool,
) -> Result<(), AppError> {
    loop {
        tokio::select! {
            // Heartbeat so SIGTERM is noticed even when no events arrive.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {}
            maybe_event = rx.recv() => match maybe_event {
                Some(AppEvent::Render) => {
                    terminal.draw(|frame| ui::render(frame, state, theme))?;
                }
                Some(AppEvent::Key(key)) => {
                    if handle_key(key, state) == KeyAction::Quit {
                        return Ok(());
                    }
                }
                Some(AppEvent::StatusLoaded(status)) => state.apply_status(*status),
                // ratatui picks up the new size from frame.area() on the next draw
                Some(AppEvent::Resize(_, _)) => {}
                Some(AppEvent::Quit) | None => return Ok(()),
            },
        }
        if term_flag.load(Ordering::Relaxed) {
            info!("SIGTERM received");
            return Ok(());
        }
    }
}
