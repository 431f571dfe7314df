// lspath - where did each PATH entry come from?
//
// The binary is a thin shell around the library crates:
// - lspath-runtime captures (or replays) a shell startup trace
// - lspath-engine turns the trace into a frozen AnalysisResult
// - this crate only parses flags, dispatches, and renders
//
// Presentation never mutates the result. Extra filesystem facts shown in the
// report (missing directories, directory contents) come from lspath-core probes.

mod args;
mod commands;
mod handlers;
pub mod presentation;
pub mod types;

pub use args::{AcquireArgs, Cli, Commands};
pub use commands::run;
