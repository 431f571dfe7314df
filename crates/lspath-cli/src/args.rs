use crate::types::{AnalysisMode, LogLevel, OutputFormat, ShellArg};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lspath")]
#[command(about = "Explain where every directory in your shell PATH comes from", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Config file (default: $LSPATH_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Attribute every PATH entry to the startup file that added it (default)
    Analyze {
        #[command(flatten)]
        acquire: AcquireArgs,

        /// Show source, contents, startup phase and category per entry
        #[arg(long, short)]
        verbose: bool,
    },

    /// Print the lines around FILE:LINE
    Context {
        file: String,

        line: u32,

        #[arg(long, default_value = "3")]
        radius: u32,
    },

    /// List the contents of a PATH directory
    Ls { dir: String },

    /// Show which PATH directory provides a command and who added it
    Which {
        query: String,

        #[command(flatten)]
        acquire: AcquireArgs,
    },
}

/// How the trace is obtained and which view is built from it.
#[derive(Args, Debug, Clone, Default)]
pub struct AcquireArgs {
    #[arg(long, default_value = "unified")]
    pub mode: AnalysisMode,

    /// Parse a saved trace file instead of starting a shell
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Shell to trace (default: from $SHELL)
    #[arg(long)]
    pub shell: Option<ShellArg>,

    /// PATH handed to the traced shell
    #[arg(long)]
    pub baseline: Option<String>,

    /// Seconds before the traced shell is killed
    #[arg(long)]
    pub timeout: Option<u64>,
}
