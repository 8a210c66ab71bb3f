//! Window system abstraction.
//!
//! The plotting library is an external collaborator; these traits are the
//! whole surface figkeep consumes from it. Optional capabilities have
//! default bodies so a minimal implementation only lists windows and pumps
//! events.

use std::time::Duration;

use figkeep_common::error::{FigkeepError, Result};
use figkeep_common::types::{Geometry, WindowId};

use crate::backend::RaiseMethod;

/// A window's own event loop, run for a bounded time.
pub trait EventLoopPump {
    /// Processes this window's events for up to `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop cannot run; the caller falls back to the
    /// library-wide pump.
    fn run_for(&self, timeout: Duration) -> Result<()>;
}

/// The windowing collaborator.
pub trait WindowSystem {
    /// Name of the active rendering backend (for example `"TkAgg"`).
    fn backend(&self) -> String;

    /// Ids of the windows currently open; empty when none are.
    ///
    /// # Errors
    ///
    /// Returns an error if the window list cannot be read.
    fn open_windows(&self) -> Result<Vec<WindowId>>;

    /// The window's own event loop, when the backend exposes one.
    fn event_loop(&self, _id: WindowId) -> Option<&dyn EventLoopPump> {
        None
    }

    /// Processes pending events for every window, sleeping up to `timeout`
    /// when idle.
    ///
    /// # Errors
    ///
    /// Returns an error if the library fails to pump events.
    fn pump_all_events(&self, timeout: Duration) -> Result<()>;

    /// Shows every window and blocks until they are closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the library fails to show windows.
    fn show_blocking(&self) -> Result<()>;

    /// Brings a window to the foreground using `method`.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be raised that way.
    fn raise(&self, _id: WindowId, _method: RaiseMethod) -> Result<()> {
        Ok(())
    }

    /// Current on-screen geometry of a window, if known.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to report it.
    fn geometry(&self, _id: WindowId) -> Result<Option<Geometry>> {
        Ok(None)
    }

    /// Moves and resizes a window.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot place windows.
    fn set_geometry(&self, _id: WindowId, _geometry: Geometry) -> Result<()> {
        Err(FigkeepError::unsupported(
            "window placement",
            "backend cannot move windows",
        ))
    }
}

/// Whether at least one window is open.
///
/// A window list that cannot be read counts as "none open", so a broken
/// collaborator ends a hold instead of stalling it.
pub fn any_windows_open(windows: &dyn WindowSystem) -> bool {
    match windows.open_windows() {
        Ok(ids) => !ids.is_empty(),
        Err(e) => {
            tracing::debug!(error = %e, "could not list windows; treating as closed");
            false
        }
    }
}
