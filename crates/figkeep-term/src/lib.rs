//! # figkeep-term
//!
//! Detects "the user pressed a key" on standard input without blocking
//! the caller's event loop.
//!
//! Two trigger flavors are provided:
//! - [`EnterTrigger`](trigger::enter::EnterTrigger): a worker thread blocks
//!   on one line read and signals completion through a one-shot channel.
//! - [`any_key`](trigger::any_key): single-key polling. On Unix the
//!   terminal is switched to cbreak mode for the trigger's lifetime and
//!   restored on drop; on Windows the console input buffer is polled.
//!
//! Every trigger implements [`KeyTrigger`](trigger::KeyTrigger), and
//! [`Console`](console::Console) bundles the standard-input facilities the
//! hold loop needs so tests can substitute their own.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod console;
pub mod trigger;

pub use console::{Console, Stdio, is_interactive};
pub use trigger::KeyTrigger;
