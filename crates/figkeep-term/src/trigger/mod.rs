//! Key triggers: pollable "has the user pressed the key yet" predicates.
//!
//! A trigger owns whatever OS state it needs (a worker thread, a saved
//! terminal mode) and releases it when dropped, so the scope of the value
//! is the scope of the resource.

pub mod enter;

#[cfg(unix)]
pub mod cbreak;

#[cfg(windows)]
pub mod console_key;

use figkeep_common::error::Result;

/// A non-blocking key-press detector.
pub trait KeyTrigger {
    /// Returns `true` once the trigger condition has been met.
    ///
    /// Must not block. Consumes at most one pending key per call.
    fn poll(&mut self) -> bool;
}

impl<T: KeyTrigger + ?Sized> KeyTrigger for Box<T> {
    fn poll(&mut self) -> bool {
        (**self).poll()
    }
}

/// A trigger that never fires.
///
/// Used when no input facility could be set up at all; the hold loop then
/// ends only when every window is closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverTrigger;

impl KeyTrigger for NeverTrigger {
    fn poll(&mut self) -> bool {
        false
    }
}

/// Opens the platform's single-key trigger on standard input.
///
/// # Errors
///
/// Returns [`Unsupported`](figkeep_common::error::FigkeepError::Unsupported)
/// when the platform facility is missing or standard input is not a
/// console; the caller decides the fallback.
#[cfg(unix)]
pub fn any_key() -> Result<Box<dyn KeyTrigger>> {
    let trigger = cbreak::CbreakTrigger::new(std::io::stdin())?;
    Ok(Box::new(trigger))
}

/// Opens the platform's single-key trigger on standard input.
///
/// # Errors
///
/// Returns [`Unsupported`](figkeep_common::error::FigkeepError::Unsupported)
/// when the console input buffer cannot be polled.
#[cfg(windows)]
pub fn any_key() -> Result<Box<dyn KeyTrigger>> {
    let trigger = console_key::ConsoleKeyTrigger::new()?;
    Ok(Box::new(trigger))
}

/// Opens the platform's single-key trigger on standard input.
///
/// # Errors
///
/// Always fails: this platform has no single-key facility.
#[cfg(not(any(unix, windows)))]
pub fn any_key() -> Result<Box<dyn KeyTrigger>> {
    Err(figkeep_common::error::FigkeepError::unsupported(
        "any-key input",
        "no console key facility on this platform",
    ))
}
