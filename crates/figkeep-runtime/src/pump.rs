//! One bounded GUI event-processing step.

use std::time::Duration;

use figkeep_common::types::WindowId;

use crate::window::WindowSystem;

/// Which primitive served a pump call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpPath {
    /// The lowest-numbered window's own event loop.
    Window(WindowId),
    /// The library-wide pump.
    Global,
}

/// Adapter over the window system's event pumping primitives.
///
/// Prefers the lowest-numbered window's own event loop, which does not
/// redraw or refocus unrelated windows, and falls back to the library-wide
/// pump. Never fails: errors are logged and dropped.
#[derive(Clone, Copy)]
pub struct EventPump<'a> {
    windows: &'a dyn WindowSystem,
}

impl<'a> EventPump<'a> {
    /// Creates a pump over `windows`.
    pub const fn new(windows: &'a dyn WindowSystem) -> Self {
        Self { windows }
    }

    /// Processes events for up to `timeout`.
    pub fn pump(&self, timeout: Duration) -> PumpPath {
        let target = self
            .windows
            .open_windows()
            .ok()
            .and_then(|ids| ids.into_iter().min());

        if let Some(id) = target {
            if let Some(event_loop) = self.windows.event_loop(id) {
                match event_loop.run_for(timeout) {
                    Ok(()) => return PumpPath::Window(id),
                    Err(e) => {
                        tracing::debug!(
                            window = %id,
                            error = %e,
                            "window event loop failed; using global pump"
                        );
                    }
                }
            }
        }

        if let Err(e) = self.windows.pump_all_events(timeout) {
            tracing::debug!(error = %e, "global event pump failed");
        }
        PumpPath::Global
    }
}

impl std::fmt::Debug for EventPump<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPump")
            .field("backend", &self.windows.backend())
            .finish()
    }
}
