use clap::ValueEnum;
use lspath_types::ShellFamily;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Which view of PATH to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Live PATH, attributed through a sandboxed trace
    #[default]
    Unified,
    /// PATH as a fresh shell would build it
    Trace,
    /// Live PATH only, no trace
    Session,
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Unified => write!(f, "unified"),
            AnalysisMode::Trace => write!(f, "trace"),
            AnalysisMode::Session => write!(f, "session"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ShellArg {
    Zsh,
    Bash,
}

impl fmt::Display for ShellArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellArg::Zsh => write!(f, "zsh"),
            ShellArg::Bash => write!(f, "bash"),
        }
    }
}

impl From<ShellArg> for ShellFamily {
    fn from(arg: ShellArg) -> Self {
        match arg {
            ShellArg::Zsh => ShellFamily::Zsh,
            ShellArg::Bash => ShellFamily::Bash,
        }
    }
}
