//! Simulated window system for the demo.
//!
//! Windows exist only as a count; they close when a deadline passes or
//! when the interrupt flag is raised, so Ctrl+C ends a hold through its
//! normal exit path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use figkeep_common::error::Result;
use figkeep_common::types::WindowId;
use figkeep_runtime::window::WindowSystem;

/// A fixed set of pretend windows.
#[derive(Debug)]
pub struct SimulatedWindows {
    backend: String,
    count: u32,
    closes_at: Option<Instant>,
    interrupted: Arc<AtomicBool>,
}

impl SimulatedWindows {
    /// Opens `count` windows reporting `backend`.
    pub fn new(backend: impl Into<String>, count: u32, lifetime: Option<Duration>) -> Self {
        Self {
            backend: backend.into(),
            count,
            closes_at: lifetime.map(|d| Instant::now() + d),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that closes every window once set.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    fn closed(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
            || self.closes_at.is_some_and(|at| Instant::now() >= at)
    }
}

impl WindowSystem for SimulatedWindows {
    fn backend(&self) -> String {
        self.backend.clone()
    }

    fn open_windows(&self) -> Result<Vec<WindowId>> {
        if self.closed() {
            return Ok(Vec::new());
        }
        Ok((1..=self.count).map(WindowId::new).collect())
    }

    fn pump_all_events(&self, timeout: Duration) -> Result<()> {
        std::thread::sleep(timeout);
        Ok(())
    }

    fn show_blocking(&self) -> Result<()> {
        while !self.closed() {
            std::thread::sleep(Duration::from_millis(50));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_close_after_lifetime() {
        let ws = SimulatedWindows::new("TkAgg", 2, Some(Duration::ZERO));
        assert!(ws.open_windows().unwrap_or_default().is_empty());
    }

    #[test]
    fn interrupt_closes_windows() {
        let ws = SimulatedWindows::new("TkAgg", 2, None);
        assert_eq!(ws.open_windows().unwrap_or_default().len(), 2);
        ws.interrupt_flag().store(true, Ordering::SeqCst);
        assert!(ws.open_windows().unwrap_or_default().is_empty());
    }
}
