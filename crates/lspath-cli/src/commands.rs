use super::args::{AcquireArgs, Cli, Commands};
use super::handlers;
use crate::types::LogLevel;
use anyhow::Result;
use lspath_runtime::Config;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    // No subcommand means the default unified analysis
    let command = cli.command.unwrap_or(Commands::Analyze {
        acquire: AcquireArgs::default(),
        verbose: false,
    });

    match command {
        Commands::Analyze { acquire, verbose } => {
            let config = load_config(cli.config.as_deref(), &acquire)?;
            handlers::analyze::handle(&config, &acquire, verbose, cli.format)
        }

        Commands::Context { file, line, radius } => {
            handlers::context::handle(&file, line, radius, cli.format)
        }

        Commands::Ls { dir } => handlers::ls::handle(&dir, cli.format),

        Commands::Which { query, acquire } => {
            let config = load_config(cli.config.as_deref(), &acquire)?;
            handlers::which::handle(&config, &acquire, &query, cli.format)
        }
    }
}

/// RUST_LOG wins over `--log-level`. Logs go to stderr so JSON on stdout stays clean.
fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Config file values, overridden by acquisition flags.
fn load_config(explicit: Option<&str>, acquire: &AcquireArgs) -> Result<Config> {
    let mut config = Config::load(explicit)?;

    if let Some(shell) = acquire.shell {
        config.shell = Some(shell.into());
    }
    if let Some(baseline) = &acquire.baseline {
        config.baseline_path = baseline.clone();
    }
    if let Some(timeout) = acquire.timeout {
        config.timeout_secs = timeout;
    }

    config.validate()?;
    Ok(config)
}
