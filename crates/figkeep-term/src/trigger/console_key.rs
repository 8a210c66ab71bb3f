//! Single-key trigger for the Windows console.
//!
//! The console input buffer is polled with a zero timeout; no mode switch
//! is needed, so there is nothing to restore.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use figkeep_common::error::{FigkeepError, Result};

use super::KeyTrigger;

/// Fires when a key press is buffered on the console.
#[derive(Debug)]
pub struct ConsoleKeyTrigger {
    _private: (),
}

impl ConsoleKeyTrigger {
    /// Probes the console input buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FigkeepError::Unsupported`] when standard input is not a
    /// console that can be polled.
    pub fn new() -> Result<Self> {
        let _ = event::poll(Duration::ZERO)
            .map_err(|e| FigkeepError::unsupported("console key buffer", e))?;
        Ok(Self { _private: () })
    }
}

impl KeyTrigger for ConsoleKeyTrigger {
    fn poll(&mut self) -> bool {
        match event::poll(Duration::ZERO) {
            // One buffered event per tick; only a key press counts.
            Ok(true) => event::read().is_ok_and(|event| is_key_press(&event)),
            Ok(false) => false,
            Err(e) => {
                tracing::debug!(error = %e, "console poll failed");
                false
            }
        }
    }
}

/// Whether a console event ends the hold.
fn is_key_press(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.kind == KeyEventKind::Press)
}
