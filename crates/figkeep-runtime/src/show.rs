//! Nonblocking show and refresh ticks.
//!
//! Both calls are best-effort: collaborator failures are reported once
//! through the warn-once registry and the returned [`ShowStatus`] still
//! describes the path that was taken.

use figkeep_common::config::{RefreshOptions, ShowOptions};
use figkeep_common::types::{ShowStatus, WindowId};
use figkeep_common::warn::{self, WarnRegistry};

use crate::backend::{self, is_gui_backend};
use crate::window::WindowSystem;

/// Reason reported when the backend cannot show windows.
pub const REASON_NON_GUI: &str = "non-GUI backend; nothing to show";
/// Reason reported after a blocking show.
pub const REASON_BLOCKING: &str = "blocking show";
/// Reason reported after a nonblocking show.
pub const REASON_SHOW: &str = "nonblocking show";
/// Reason reported after a refresh.
pub const REASON_REFRESH: &str = "nonblocking refresh";

/// Warn-once key for a failing blocking show.
pub const WARN_SHOW_BLOCKING: &str = "show:blocking";
/// Warn-once key for a failing pump during show.
pub const WARN_SHOW_PUMP: &str = "show:pump";
/// Warn-once key for a failing pump during refresh.
pub const WARN_REFRESH_PUMP: &str = "refresh:pump";
/// Warn-once key for a failing raise during refresh.
pub const WARN_REFRESH_FOREGROUND: &str = "refresh:in_foreground";

/// Show/refresh front end bound to a window system and warning registry.
pub struct Presenter<'a> {
    windows: &'a dyn WindowSystem,
    warnings: &'a WarnRegistry,
}

impl<'a> Presenter<'a> {
    /// Creates a presenter reporting to the process-wide registry.
    pub fn new(windows: &'a dyn WindowSystem) -> Self {
        Self {
            windows,
            warnings: warn::global(),
        }
    }

    /// Reports to `warnings` instead.
    #[must_use]
    pub const fn with_warnings(mut self, warnings: &'a WarnRegistry) -> Self {
        self.warnings = warnings;
        self
    }

    /// Displays every window, by default without blocking.
    ///
    /// The nonblocking path pumps events for all windows once, which is a
    /// convenient single GUI tick but touches every open figure.
    pub fn show(&self, options: ShowOptions) -> ShowStatus {
        let backend = self.windows.backend();
        if !is_gui_backend(&backend) {
            return status(backend, !options.block, false, REASON_NON_GUI);
        }

        if options.block {
            if let Err(e) = self.windows.show_blocking() {
                let _ = self.warnings.warn_once(
                    WARN_SHOW_BLOCKING,
                    "show: blocking show failed; continuing",
                    Some(&e),
                );
            }
            return status(backend, false, false, REASON_BLOCKING);
        }

        if let Err(e) = self.windows.pump_all_events(options.pause) {
            let _ = self.warnings.warn_once(
                WARN_SHOW_PUMP,
                "show: event pump failed; continuing",
                Some(&e),
            );
        }
        status(backend, true, true, REASON_SHOW)
    }

    /// Redraws after artists were updated: one "movie frame".
    ///
    /// Call once per window even when several of its axes changed.
    pub fn refresh(&self, id: WindowId, options: RefreshOptions) -> ShowStatus {
        let backend = self.windows.backend();
        if !is_gui_backend(&backend) {
            return status(backend, true, false, REASON_NON_GUI);
        }

        if let Err(e) = self.windows.pump_all_events(options.pause) {
            let _ = self.warnings.warn_once(
                WARN_REFRESH_PUMP,
                "refresh: event pump failed; continuing",
                Some(&e),
            );
        }

        if options.in_foreground {
            if let Err(e) = backend::try_raise(self.windows, id) {
                let _ = self.warnings.warn_once(
                    WARN_REFRESH_FOREGROUND,
                    "refresh: in_foreground failed; continuing",
                    Some(&e),
                );
            }
        }

        status(backend, true, true, REASON_REFRESH)
    }
}

impl std::fmt::Debug for Presenter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presenter")
            .field("backend", &self.windows.backend())
            .finish_non_exhaustive()
    }
}

fn status(backend: String, requested: bool, used: bool, reason: &str) -> ShowStatus {
    ShowStatus {
        backend,
        nonblocking_requested: requested,
        nonblocking_used: used,
        reason: reason.to_owned(),
    }
}

/// Displays every window; see [`Presenter::show`].
pub fn show(windows: &dyn WindowSystem, options: ShowOptions) -> ShowStatus {
    Presenter::new(windows).show(options)
}

/// Refreshes one window; see [`Presenter::refresh`].
pub fn refresh(windows: &dyn WindowSystem, id: WindowId, options: RefreshOptions) -> ShowStatus {
    Presenter::new(windows).refresh(id, options)
}
