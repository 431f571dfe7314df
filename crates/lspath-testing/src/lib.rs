//! Testing infrastructure for lspath tests.
//!
//! This crate provides utilities for writing robust tests:
//! - `TraceScript`: Builds trace text in either shell's PS4 shape
//! - `TestWorld`: Isolated temporary HOME with directories, symlinks and CLI execution
//! - `assertions`: Custom assertions for attribution and flow checks

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::TraceScript;
pub use world::{CliResult, TestWorld};
