//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::time::{interval, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal tick (timers and animations)
    Tick,
    /// Terminal resized
    Resize,
}

/// Merges terminal input with a fixed-rate tick
pub struct EventHandler {
    terminal: EventStream,
    ticks: IntervalStream,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let mut ticks = interval(tick_rate);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            terminal: EventStream::new(),
            ticks: IntervalStream::new(ticks),
        }
    }

    /// Wait for the next event; `None` once terminal input has ended
    pub async fn next(&mut self) -> Option<std::io::Result<Event>> {
        loop {
            tokio::select! {
                _ = self.ticks.next() => return Some(Ok(Event::Tick)),
                event = self.terminal.next() => {
                    match event? {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            return Some(Ok(Event::Key(key)));
                        }
                        Ok(CrosstermEvent::Resize(_, _)) => return Some(Ok(Event::Resize)),
                        Ok(_) => {}
                        Err(e) => return Some(Err(e)),
                    }
                }
            }
        }
    }
}
