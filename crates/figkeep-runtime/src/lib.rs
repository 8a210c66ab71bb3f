//! # figkeep-runtime
//!
//! Keeps plot windows alive and responsive from a terminal-run program.
//!
//! - [`hold_windows`](hold::hold_windows): wait for a key press or for every
//!   window to close, pumping GUI events in between.
//! - [`show`](show::show) / [`refresh`](show::refresh): nonblocking display
//!   ticks that report the path taken as a
//!   [`ShowStatus`](figkeep_common::types::ShowStatus).
//! - [`GeometryCache`](geometry::GeometryCache): remembers window
//!   positions across runs, keyed by tag and machine.
//!
//! The plotting library itself is reached only through the
//! [`WindowSystem`](window::WindowSystem) trait.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod backend;
pub mod geometry;
pub mod hold;
pub mod pump;
pub mod show;
pub mod window;

pub use hold::{HoldLoop, HoldOutcome, hold_windows};
pub use window::WindowSystem;
