//! # figkeep-common
//!
//! Shared types, error definitions, configuration models, constants,
//! and the process-wide warn-once registry used across the figkeep
//! workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the primitives the terminal and runtime
//! crates build upon.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod warn;
