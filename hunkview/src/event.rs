//! Event bus for hunkview.
//!
//! Terminal input, the render timer and git worker results are all funnelled into
//! one `AppEvent` channel that the main loop drains. Only key presses are
//! forwarded; release and repeat events are dropped.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::git::types::StatusSnapshot;

/// Render cadence (about 30 frames per second).
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Debug)]
pub enum AppEvent {
    /// A key press (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Time to draw a frame.
    Render,
    /// A fresh status read from the git worker.
    StatusLoaded(Box<StatusSnapshot>),
    /// The input stream ended.
    Quit,
}

/// Channel pair for [`AppEvent`]s. `tx` is cloned into every producer.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the task that turns crossterm input and the render timer into events.
///
/// The task stops once the receiver is gone or the terminal stream ends; in the
/// latter case it sends a final [`AppEvent::Quit`].
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut render_interval = interval(RENDER_INTERVAL);
        let mut reader = EventStream::new();

        loop {
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            let sent = tokio::select! {
                _ = render_tick => tx.send(AppEvent::Render),
                maybe_event = crossterm_event => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        tx.send(AppEvent::Key(key))
                    }
                    Some(Ok(Event::Resize(w, h))) => tx.send(AppEvent::Resize(w, h)),
                    Some(Ok(_)) => Ok(()),
                    Some(Err(e)) => {
                        log::warn!("terminal event error: {e}");
                        Ok(())
                    }
                    None => {
                        let _ = tx.send(AppEvent::Quit);
                        break;
                    }
                },
            };
            if sent.is_err() {
                break;
            }
        }
    });
}
