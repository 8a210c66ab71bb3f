//! Keeping windows alive at the end of a terminal-run program.
//!
//! [`HoldLoop::run`] moves through three phases. On entry it checks its
//! gates (GUI backend, interactive standard input, at least one open
//! window) and returns straight away if any fails, without touching the
//! terminal. Otherwise it acquires a key trigger, prints the prompt for
//! the trigger it actually got, and waits. Each tick of the wait checks, in order:
//!
//! 1. are any windows still open? if not, done;
//! 2. did the trigger fire? if so, done;
//! 3. pump GUI events for one poll interval.
//!
//! The trigger is a value owned by `run`; it is dropped on every exit,
//! including a panic unwinding out of the tick loop, and dropping it
//! restores any terminal mode it changed.

use figkeep_common::config::HoldConfig;
use figkeep_common::types::TriggerKind;
use figkeep_common::warn::{self, WarnRegistry};
use figkeep_term::console::{Console, Stdio};
use figkeep_term::trigger::enter::EnterTrigger;
use figkeep_term::trigger::{KeyTrigger, NeverTrigger};

use crate::backend;
use crate::pump::EventPump;
use crate::window::{WindowSystem, any_windows_open};

/// Warn-once key for a missing single-key facility.
pub const WARN_ANY_KEY: &str = "hold_windows:any_key";
/// Warn-once key for a reader thread that could not start.
pub const WARN_ENTER_THREAD: &str = "hold_windows:enter_thread";

/// Why a hold returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// The backend does not open windows.
    NonGuiBackend,
    /// Standard input is not a terminal and `only_if_tty` is set.
    NotInteractive,
    /// No window was open on entry.
    NoWindows,
    /// The key trigger fired.
    TriggerFired,
    /// Every window was closed while waiting.
    WindowsClosed,
}

impl HoldOutcome {
    /// Whether the loop actually waited.
    #[must_use]
    pub const fn waited(self) -> bool {
        matches!(self, Self::TriggerFired | Self::WindowsClosed)
    }
}

/// The wait-for-key-or-close coordinator.
pub struct HoldLoop<'a> {
    windows: &'a dyn WindowSystem,
    console: &'a dyn Console,
    warnings: &'a WarnRegistry,
    config: HoldConfig,
}

impl<'a> HoldLoop<'a> {
    /// Creates a loop over `windows` reading from `console`.
    pub fn new(
        windows: &'a dyn WindowSystem,
        console: &'a dyn Console,
        config: HoldConfig,
    ) -> Self {
        Self {
            windows,
            console,
            warnings: warn::global(),
            config,
        }
    }

    /// Reports degradations to `warnings` instead of the process registry.
    #[must_use]
    pub const fn with_warnings(mut self, warnings: &'a WarnRegistry) -> Self {
        self.warnings = warnings;
        self
    }

    /// Runs until a key is pressed or every window is closed.
    pub fn run(&self) -> HoldOutcome {
        let backend = self.windows.backend();
        if !backend::is_gui_backend(&backend) {
            tracing::debug!(backend = %backend, "non-GUI backend; not holding");
            return HoldOutcome::NonGuiBackend;
        }
        if self.config.only_if_tty && !self.console.is_interactive() {
            tracing::debug!("standard input is not a terminal; not holding");
            return HoldOutcome::NotInteractive;
        }
        if !any_windows_open(self.windows) {
            return HoldOutcome::NoWindows;
        }

        let (mut trigger, kind) = self.acquire_trigger();
        if let Some(text) = self.config.prompt.resolve(kind) {
            self.console.print_prompt(text);
        }
        self.wait(trigger.as_mut())
    }

    /// Opens the configured trigger, degrading AnyKey to Enter and Enter
    /// to a trigger that never fires. Returns the kind actually in use.
    fn acquire_trigger(&self) -> (Box<dyn KeyTrigger>, TriggerKind) {
        if self.config.trigger == TriggerKind::AnyKey {
            match self.console.any_key() {
                Ok(trigger) => return (trigger, TriggerKind::AnyKey),
                Err(e) => {
                    let _ = self.warnings.warn_once(
                        WARN_ANY_KEY,
                        "hold_windows: AnyKey trigger unavailable; falling back to Enter",
                        Some(&e),
                    );
                }
            }
        }
        let trigger: Box<dyn KeyTrigger> = match EnterTrigger::spawn(self.console.line_source()) {
            Ok(trigger) => Box::new(trigger),
            Err(e) => {
                let _ = self.warnings.warn_once(
                    WARN_ENTER_THREAD,
                    "hold_windows: Enter trigger unavailable; waiting for windows to close",
                    Some(&e),
                );
                Box::new(NeverTrigger)
            }
        };
        (trigger, TriggerKind::Enter)
    }

    fn wait(&self, trigger: &mut dyn KeyTrigger) -> HoldOutcome {
        let pump = EventPump::new(self.windows);
        let interval = self.config.poll_interval;
        let mut ticks: u64 = 0;
        tracing::debug!(?interval, "holding windows");

        let outcome = loop {
            if !any_windows_open(self.windows) {
                break HoldOutcome::WindowsClosed;
            }
            if trigger.poll() {
                break HoldOutcome::TriggerFired;
            }
            let _ = pump.pump(interval);
            ticks += 1;
        };

        tracing::debug!(?outcome, ticks, "hold finished");
        outcome
    }
}

impl std::fmt::Debug for HoldLoop<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoldLoop")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Keeps windows open until a key is pressed or all of them are closed,
/// reading from the process's standard input.
pub fn hold_windows(windows: &dyn WindowSystem, config: HoldConfig) -> HoldOutcome {
    HoldLoop::new(windows, &Stdio, config).run()
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::io::{BufRead, Cursor};
    use std::time::Duration;

    use figkeep_common::error::{FigkeepError, Result};
    use figkeep_common::types::WindowId;

    use super::*;

    struct Windows {
        backend: &'static str,
        open: Cell<u32>,
        close_after_pumps: Option<u32>,
        pumps: Cell<u32>,
    }

    impl Windows {
        fn open(count: u32) -> Self {
            Self {
                backend: "TkAgg",
                open: Cell::new(count),
                close_after_pumps: None,
                pumps: Cell::new(0),
            }
        }
    }

    impl WindowSystem for Windows {
        fn backend(&self) -> String {
            self.backend.into()
        }

        fn open_windows(&self) -> Result<Vec<WindowId>> {
            Ok((1..=self.open.get()).map(WindowId::new).collect())
        }

        fn pump_all_events(&self, _timeout: Duration) -> Result<()> {
            self.pumps.set(self.pumps.get() + 1);
            if self.close_after_pumps == Some(self.pumps.get()) {
                self.open.set(0);
            }
            Ok(())
        }

        fn show_blocking(&self) -> Result<()> {
            Ok(())
        }
    }

    /// Fires after a fixed number of polls.
    struct Scripted {
        polls_left: u32,
    }

    impl KeyTrigger for Scripted {
        fn poll(&mut self) -> bool {
            self.polls_left = self.polls_left.saturating_sub(1);
            self.polls_left == 0
        }
    }

    struct FakeConsole {
        tty: bool,
        any_key_fires_after: Option<u32>,
        prompts: RefCell<Vec<String>>,
        any_key_requests: Cell<u32>,
    }

    impl FakeConsole {
        fn tty() -> Self {
            Self {
                tty: true,
                any_key_fires_after: Some(1),
                prompts: RefCell::new(Vec::new()),
                any_key_requests: Cell::new(0),
            }
        }
    }

    impl Console for FakeConsole {
        fn is_interactive(&self) -> bool {
            self.tty
        }

        fn print_prompt(&self, text: &str) {
            self.prompts.borrow_mut().push(text.to_owned());
        }

        fn line_source(&self) -> Box<dyn BufRead + Send> {
            Box::new(Cursor::new(b"\n".to_vec()))
        }

        fn any_key(&self) -> Result<Box<dyn KeyTrigger>> {
            self.any_key_requests.set(self.any_key_requests.get() + 1);
            match self.any_key_fires_after {
                Some(polls_left) => Ok(Box::new(Scripted { polls_left })),
                None => Err(FigkeepError::unsupported("cbreak mode", "not a terminal")),
            }
        }
    }

    fn config() -> HoldConfig {
        HoldConfig::default().poll_interval(Duration::ZERO)
    }

    #[test]
    fn non_gui_backend_returns_immediately() {
        let mut ws = Windows::open(1);
        ws.backend = "Agg";
        let console = FakeConsole::tty();
        let outcome = HoldLoop::new(&ws, &console, config()).run();
        assert_eq!(outcome, HoldOutcome::NonGuiBackend);
        assert_eq!(ws.pumps.get(), 0);
        assert_eq!(console.any_key_requests.get(), 0);
    }

    #[test]
    fn non_tty_returns_without_pumping() {
        let ws = Windows::open(1);
        let mut console = FakeConsole::tty();
        console.tty = false;
        let outcome = HoldLoop::new(&ws, &console, config()).run();
        assert_eq!(outcome, HoldOutcome::NotInteractive);
        assert_eq!(ws.pumps.get(), 0);
        assert!(console.prompts.borrow().is_empty());
    }

    #[test]
    fn tty_gate_can_be_bypassed() {
        let ws = Windows::open(1);
        let mut console = FakeConsole::tty();
        console.tty = false;
        let outcome = HoldLoop::new(&ws, &console, config().only_if_tty(false)).run();
        assert_eq!(outcome, HoldOutcome::TriggerFired);
    }

    #[test]
    fn no_windows_skips_trigger_and_prompt() {
        let ws = Windows::open(0);
        let console = FakeConsole::tty();
        let outcome = HoldLoop::new(&ws, &console, config()).run();
        assert_eq!(outcome, HoldOutcome::NoWindows);
        assert_eq!(ws.pumps.get(), 0);
        assert_eq!(console.any_key_requests.get(), 0);
        assert!(console.prompts.borrow().is_empty());
    }

    #[test]
    fn trigger_on_first_poll_skips_pump() {
        let ws = Windows::open(1);
        let console = FakeConsole::tty();
        let outcome = HoldLoop::new(&ws, &console, config()).run();
        assert_eq!(outcome, HoldOutcome::TriggerFired);
        assert_eq!(ws.pumps.get(), 0);
    }

    #[test]
    fn pumps_once_per_quiet_tick() {
        let ws = Windows::open(2);
        let mut console = FakeConsole::tty();
        console.any_key_fires_after = Some(4);
        let outcome = HoldLoop::new(&ws, &console, config()).run();
        assert_eq!(outcome, HoldOutcome::TriggerFired);
        assert_eq!(ws.pumps.get(), 3);
    }

    #[test]
    fn closing_windows_ends_wait() {
        let mut ws = Windows::open(1);
        ws.close_after_pumps = Some(2);
        let mut console = FakeConsole::tty();
        console.any_key_fires_after = Some(u32::MAX);
        let outcome = HoldLoop::new(&ws, &console, config()).run();
        assert_eq!(outcome, HoldOutcome::WindowsClosed);
        assert_eq!(ws.pumps.get(), 2);
    }

    #[test]
    fn default_prompt_printed_once() {
        let ws = Windows::open(1);
        let console = FakeConsole::tty();
        let _ = HoldLoop::new(&ws, &console, config()).run();
        assert_eq!(*console.prompts.borrow(), vec!["Press any key to exit...".to_owned()]);
    }

    #[test]
    fn silent_prompt_prints_nothing() {
        let ws = Windows::open(1);
        let console = FakeConsole::tty();
        let _ = HoldLoop::new(&ws, &console, config().silent()).run();
        assert!(console.prompts.borrow().is_empty());
    }

    #[test]
    fn enter_trigger_never_asks_for_any_key() {
        let ws = Windows::open(1);
        let console = FakeConsole::tty();
        let cfg = config().trigger(TriggerKind::Enter);
        let outcome = HoldLoop::new(&ws, &console, cfg).run();
        assert_eq!(outcome, HoldOutcome::TriggerFired);
        assert_eq!(console.any_key_requests.get(), 0);
        assert_eq!(*console.prompts.borrow(), vec!["Press Enter to exit...".to_owned()]);
    }

    #[test]
    fn unsupported_any_key_falls_back_and_warns_once() {
        let ws = Windows::open(1);
        let mut console = FakeConsole::tty();
        console.any_key_fires_after = None;
        let registry = WarnRegistry::new();

        for _ in 0..2 {
            let outcome = HoldLoop::new(&ws, &console, config())
                .with_warnings(&registry)
                .run();
            assert_eq!(outcome, HoldOutcome::TriggerFired);
        }
        assert_eq!(console.any_key_requests.get(), 2);
        assert!(registry.contains(WARN_ANY_KEY));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn fallback_prompt_names_enter() {
        let ws = Windows::open(1);
        let mut console = FakeConsole::tty();
        console.any_key_fires_after = None;
        let registry = WarnRegistry::new();

        let _ = HoldLoop::new(&ws, &console, config())
            .with_warnings(&registry)
            .run();
        assert_eq!(*console.prompts.borrow(), vec!["Press Enter to exit...".to_owned()]);
    }

    #[test]
    fn outcome_reports_waiting() {
        assert!(HoldOutcome::TriggerFired.waited());
        assert!(HoldOutcome::WindowsClosed.waited());
        assert!(!HoldOutcome::NoWindows.waited());
    }
}
