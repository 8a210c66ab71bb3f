//! Backend name classification and window-raising strategy.

use figkeep_common::constants::ENV_BACKEND;
use figkeep_common::error::{FigkeepError, Result};
use figkeep_common::types::WindowId;
use figkeep_common::warn::{self, WarnRegistry};

use crate::window::WindowSystem;

/// GUI toolkit behind an interactive backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolkit {
    /// GTK 3 or GTK 4.
    Gtk,
    /// Native macOS (Cocoa).
    MacOs,
    /// Qt 5 or Qt 6.
    Qt,
    /// Tk.
    Tk,
    /// wxWidgets.
    Wx,
}

/// Whether a backend opens real windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Interactive backend driven by a GUI toolkit.
    Gui(Toolkit),
    /// Image, vector, notebook, or web backend.
    NonGui,
}

/// Classifies a backend by name, ignoring case.
#[must_use]
pub fn classify(backend: &str) -> BackendKind {
    let toolkit = match backend.trim().to_ascii_lowercase().as_str() {
        "gtk3agg" | "gtk3cairo" | "gtk4agg" | "gtk4cairo" => Toolkit::Gtk,
        "macosx" => Toolkit::MacOs,
        "qtagg" | "qtcairo" | "qt5agg" | "qt5cairo" => Toolkit::Qt,
        "tkagg" | "tkcairo" => Toolkit::Tk,
        "wx" | "wxagg" | "wxcairo" => Toolkit::Wx,
        _ => return BackendKind::NonGui,
    };
    BackendKind::Gui(toolkit)
}

/// Whether `backend` opens interactive windows.
#[must_use]
pub fn is_gui_backend(backend: &str) -> bool {
    matches!(classify(backend), BackendKind::Gui(_))
}

/// Warn-once key for a configured backend that cannot be read.
pub const WARN_GET_BACKEND: &str = "recommended_backend:get_backend";

/// Preferred interactive backend per operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendPreferences {
    /// Backend for macOS.
    pub macos: String,
    /// Backend for Linux.
    pub linux: String,
    /// Backend for Windows.
    pub windows: String,
    /// Backend for anything else.
    pub other: String,
    /// Keep a backend the user already configured.
    pub respect_existing: bool,
}

impl Default for BackendPreferences {
    fn default() -> Self {
        Self {
            macos: "macosx".into(),
            linux: "TkAgg".into(),
            windows: "TkAgg".into(),
            other: "TkAgg".into(),
            respect_existing: true,
        }
    }
}

impl BackendPreferences {
    /// Backend for `os`, named as in [`std::env::consts::OS`].
    #[must_use]
    pub fn for_os(&self, os: &str) -> &str {
        match os {
            "macos" => &self.macos,
            "linux" => &self.linux,
            "windows" => &self.windows,
            _ => &self.other,
        }
    }

    /// Picks a backend for `os`, given the one already configured.
    ///
    /// A non-empty `existing` name wins when `respect_existing` is set.
    #[must_use]
    pub fn recommend(&self, os: &str, existing: Option<&str>) -> String {
        match existing.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) if self.respect_existing => name.to_owned(),
            _ => self.for_os(os).to_owned(),
        }
    }
}

/// The backend named by `MPLBACKEND`, if set.
///
/// # Errors
///
/// Returns [`FigkeepError::InvalidArgument`] if the variable is not
/// valid Unicode.
pub fn configured_backend() -> Result<Option<String>> {
    match std::env::var(ENV_BACKEND) {
        Ok(name) => Ok(Some(name)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(raw)) => Err(FigkeepError::InvalidArgument {
            message: format!("{ENV_BACKEND} is not valid Unicode: {raw:?}"),
        }),
    }
}

/// Recommends a backend for the running platform.
///
/// `current` looks up the backend already configured; it is only asked
/// when `prefs.respect_existing` is set. A failed lookup is reported once
/// and the platform default is used.
pub fn recommended_backend(
    prefs: &BackendPreferences,
    current: impl FnOnce() -> Result<Option<String>>,
) -> String {
    recommend_with(prefs, std::env::consts::OS, current, warn::global())
}

fn recommend_with(
    prefs: &BackendPreferences,
    os: &str,
    current: impl FnOnce() -> Result<Option<String>>,
    warnings: &WarnRegistry,
) -> String {
    if !prefs.respect_existing {
        return prefs.for_os(os).to_owned();
    }
    let existing = current().unwrap_or_else(|e| {
        let _ = warnings.warn_once(
            WARN_GET_BACKEND,
            "recommended_backend: reading the configured backend failed; using platform default",
            Some(&e),
        );
        None
    });
    prefs.recommend(os, existing.as_deref())
}

/// A concrete way of bringing a window to the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaiseMethod {
    /// The window manager object's generic raise.
    Manager,
    /// The macOS manager's raise.
    MacOs,
    /// Qt: show, raise, then activate.
    Qt,
    /// Tk: lift, then force focus.
    Tk,
}

/// How windows of a backend are raised, chosen once from its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaiseStrategy {
    /// Nothing to raise.
    NoOp,
    /// Use the window manager's generic raise.
    ManagerRaise,
    /// Use a toolkit-specific sequence.
    Platform(RaiseMethod),
}

impl RaiseStrategy {
    /// Picks the strategy for a backend kind.
    #[must_use]
    pub const fn for_kind(kind: BackendKind) -> Self {
        match kind {
            BackendKind::NonGui => Self::NoOp,
            BackendKind::Gui(Toolkit::MacOs) => Self::Platform(RaiseMethod::MacOs),
            BackendKind::Gui(Toolkit::Qt) => Self::Platform(RaiseMethod::Qt),
            BackendKind::Gui(Toolkit::Tk) => Self::Platform(RaiseMethod::Tk),
            BackendKind::Gui(Toolkit::Gtk | Toolkit::Wx) => Self::ManagerRaise,
        }
    }

    /// Picks the strategy for a backend name.
    #[must_use]
    pub fn for_backend(backend: &str) -> Self {
        Self::for_kind(classify(backend))
    }

    /// The method handed to the window system, if any.
    #[must_use]
    pub const fn method(self) -> Option<RaiseMethod> {
        match self {
            Self::NoOp => None,
            Self::ManagerRaise => Some(RaiseMethod::Manager),
            Self::Platform(method) => Some(method),
        }
    }
}

/// Raises a window, reporting failures.
pub(crate) fn try_raise(windows: &dyn WindowSystem, id: WindowId) -> Result<()> {
    match RaiseStrategy::for_backend(&windows.backend()).method() {
        Some(method) => windows.raise(id, method),
        None => Ok(()),
    }
}

/// Best-effort: brings a window to the foreground.
///
/// Returns whether a raise was performed. Failures are logged and
/// swallowed.
pub fn raise_window(windows: &dyn WindowSystem, id: WindowId) -> bool {
    let strategy = RaiseStrategy::for_backend(&windows.backend());
    if strategy == RaiseStrategy::NoOp {
        return false;
    }
    match try_raise(windows, id) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(window = %id, error = %e, "raise failed");
            false
        }
    }
}
