// Runtime - trace acquisition for the engine
// Spawns the sandboxed shell, streams its trace, loads configuration

pub mod capture;
pub mod config;
pub mod error;
pub mod executor;
pub mod shell;
pub mod stream;

pub use capture::{
    acquire, capture_trace, live_path, replay_file, CaptureInterruption, TraceCapture, TraceSource,
};
pub use config::{resolve_config_path, Config, DEFAULT_BASELINE};
pub use error::{Error, Result};
pub use shell::{ps4_for, ShellProfile, BASH_PS4, ZSH_PS4};
pub use stream::{parse_stream, TraceStream};
