//! End-to-end tests for the hold loop against scripted collaborators.
//!
//! Covered scenarios:
//! - Enter trigger with a line already waiting on input
//! - no windows open on entry, with and without a prompt
//! - AnyKey unavailable: transparent fallback to Enter with one warning
//! - windows closing while the trigger stays quiet
//! - the trigger resource is released when the tick loop panics

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::cell::Cell;
use std::io::{BufRead, Cursor};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use figkeep_common::config::{HoldConfig, Prompt};
use figkeep_common::error::{FigkeepError, Result};
use figkeep_common::types::{TriggerKind, WindowId};
use figkeep_common::warn::WarnRegistry;
use figkeep_runtime::hold::{HoldLoop, HoldOutcome, WARN_ANY_KEY};
use figkeep_runtime::window::WindowSystem;
use figkeep_term::console::Console;
use figkeep_term::trigger::KeyTrigger;

// ── Collaborators ────────────────────────────────────────────────────

struct Windows {
    open: Cell<u32>,
    pumps: Cell<u32>,
    close_after: Option<u32>,
    panic_on_pump: bool,
}

impl Windows {
    fn new(open: u32) -> Self {
        Self {
            open: Cell::new(open),
            pumps: Cell::new(0),
            close_after: None,
            panic_on_pump: false,
        }
    }
}

impl WindowSystem for Windows {
    fn backend(&self) -> String {
        "TkAgg".into()
    }

    fn open_windows(&self) -> Result<Vec<WindowId>> {
        Ok((1..=self.open.get()).map(WindowId::new).collect())
    }

    fn pump_all_events(&self, _timeout: Duration) -> Result<()> {
        assert!(!self.panic_on_pump, "renderer crashed");
        self.pumps.set(self.pumps.get() + 1);
        if self.close_after == Some(self.pumps.get()) {
            self.open.set(0);
        }
        Ok(())
    }

    fn show_blocking(&self) -> Result<()> {
        Ok(())
    }
}

/// Never fires; records whether it is still alive.
struct Tracked {
    alive: Arc<AtomicBool>,
}

impl KeyTrigger for Tracked {
    fn poll(&mut self) -> bool {
        false
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

struct Terminal {
    input: &'static [u8],
    any_key: bool,
    alive: Arc<AtomicBool>,
    prompts: Cell<u32>,
}

impl Terminal {
    fn new(input: &'static [u8], any_key: bool) -> Self {
        Self {
            input,
            any_key,
            alive: Arc::new(AtomicBool::new(false)),
            prompts: Cell::new(0),
        }
    }
}

impl Console for Terminal {
    fn is_interactive(&self) -> bool {
        true
    }

    fn print_prompt(&self, _text: &str) {
        self.prompts.set(self.prompts.get() + 1);
    }

    fn line_source(&self) -> Box<dyn BufRead + Send> {
        Box::new(Cursor::new(self.input.to_vec()))
    }

    fn any_key(&self) -> Result<Box<dyn KeyTrigger>> {
        if !self.any_key {
            return Err(FigkeepError::unsupported("cbreak mode", "no termios"));
        }
        self.alive.store(true, Ordering::SeqCst);
        Ok(Box::new(Tracked {
            alive: Arc::clone(&self.alive),
        }))
    }
}

fn fast() -> HoldConfig {
    HoldConfig::default().poll_interval(Duration::from_millis(1))
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn enter_with_pending_line_returns_promptly() {
    let ws = Windows::new(1);
    let term = Terminal::new(b"\n", true);
    let cfg = fast().trigger(TriggerKind::Enter).silent();

    let outcome = HoldLoop::new(&ws, &term, cfg).run();

    assert_eq!(outcome, HoldOutcome::TriggerFired);
    assert!(!term.alive.load(Ordering::SeqCst), "Enter must not open a key trigger");
    assert_eq!(term.prompts.get(), 0);
}

#[test]
fn no_windows_returns_before_anything() {
    for trigger in [TriggerKind::AnyKey, TriggerKind::Enter] {
        let ws = Windows::new(0);
        let term = Terminal::new(b"\n", true);
        let outcome = HoldLoop::new(&ws, &term, fast().trigger(trigger).silent()).run();

        assert_eq!(outcome, HoldOutcome::NoWindows);
        assert_eq!(ws.pumps.get(), 0);
        assert_eq!(term.prompts.get(), 0);
        assert!(!term.alive.load(Ordering::SeqCst));
    }
}

#[test]
fn unavailable_any_key_falls_back_to_enter() {
    let ws = Windows::new(1);
    let term = Terminal::new(b"\n", false);
    let registry = WarnRegistry::new();

    let outcome = HoldLoop::new(&ws, &term, fast().silent())
        .with_warnings(&registry)
        .run();

    assert_eq!(outcome, HoldOutcome::TriggerFired);
    assert!(registry.contains(WARN_ANY_KEY));
    assert_eq!(registry.len(), 1);
}

#[test]
fn fallback_warning_is_emitted_once_across_holds() {
    let registry = WarnRegistry::new();
    for _ in 0..3 {
        let ws = Windows::new(1);
        let term = Terminal::new(b"\n", false);
        let _ = HoldLoop::new(&ws, &term, fast().silent())
            .with_warnings(&registry)
            .run();
    }
    assert_eq!(registry.len(), 1);
}

#[test]
fn closing_all_windows_ends_wait_without_input() {
    let mut ws = Windows::new(2);
    ws.close_after = Some(5);
    let term = Terminal::new(b"", true);

    let outcome = HoldLoop::new(&ws, &term, fast()).run();

    assert_eq!(outcome, HoldOutcome::WindowsClosed);
    assert_eq!(ws.pumps.get(), 5);
    assert_eq!(term.prompts.get(), 1);
    assert!(!term.alive.load(Ordering::SeqCst), "trigger released on exit");
}

#[test]
fn trigger_released_when_tick_panics() {
    let mut ws = Windows::new(1);
    ws.panic_on_pump = true;
    let term = Terminal::new(b"", true);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        HoldLoop::new(&ws, &term, fast().prompt(Prompt::Silent)).run()
    }));

    assert!(result.is_err());
    assert!(!term.alive.load(Ordering::SeqCst), "trigger must be dropped while unwinding");
}

#[test]
fn invalid_trigger_name_is_the_only_error() {
    let err = HoldConfig::default().trigger_named("DoubleClick").unwrap_err();
    assert!(matches!(err, FigkeepError::InvalidArgument { .. }));
}
