//! Terminal event pump
//!
//! crossterm polling is blocking, so it runs on its own thread and forwards
//! events to the async runner over a channel.

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tracing::debug;

/// How long the poller waits for input before emitting a tick
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Key press (releases are filtered out)
    Key(KeyEvent),
    Resize(u16, u16),
    /// No input within the tick interval
    Tick,
}

/// Receives terminal events from the polling thread
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        debug!(?tick_rate, "EventHandler::new: called");
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                        Ok(event::Event::Resize(w, h)) => Event::Resize(w, h),
                        _ => continue,
                    }
                } else {
                    Event::Tick
                };

                if tx.send(event).is_err() {
                    debug!("EventHandler: channel closed, exiting loop");
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Next event, or `None` once the polling thread has stopped
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
