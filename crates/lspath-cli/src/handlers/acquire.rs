use crate::args::AcquireArgs;
use crate::types::AnalysisMode;
use anyhow::{Context, Result};
use lspath_engine::{analyze_session, analyze_trace, analyze_unified};
use lspath_runtime::{acquire, live_path, Config, ShellProfile, TraceCapture, TraceSource};
use lspath_types::AnalysisResult;
use tracing::{info, warn};

/// Acquire a trace (unless the mode needs none) and build the requested view.
///
/// An interrupted capture still yields a result; the reason is appended to
/// the global diagnostics so the partial attribution is visible.
pub fn build_analysis(config: &Config, args: &AcquireArgs) -> Result<AnalysisResult> {
    let live = live_path();
    info!(mode = %args.mode, "building PATH analysis");

    let (mut result, capture) = match args.mode {
        AnalysisMode::Session => return Ok(analyze_session(&live)),
        AnalysisMode::Trace => {
            let capture = capture_events(config, args)?;
            (analyze_trace(&capture.events, &config.baseline_path), capture)
        }
        AnalysisMode::Unified => {
            let capture = capture_events(config, args)?;
            let result = analyze_unified(
                &live,
                &capture.events,
                &config.baseline_path,
                &config.extra_system_dirs,
            );
            (result, capture)
        }
    };

    if let Some(reason) = &capture.interruption {
        warn!(%reason, "reporting partial analysis");
        result.diagnostics.push(format!(
            "WARNING: Trace capture incomplete ({}). Attribution is based on the first {} trace lines only.",
            reason,
            capture.events.len()
        ));
    }

    Ok(result)
}

fn capture_events(config: &Config, args: &AcquireArgs) -> Result<TraceCapture> {
    let source = match &args.replay {
        Some(path) => TraceSource::Replay(path.clone()),
        None => TraceSource::Shell(ShellProfile::from_env(config.shell)),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let capture = runtime.block_on(acquire(&source, config));
    if let TraceSource::Replay(path) = &source {
        return capture.with_context(|| format!("Failed to replay trace {}", path.display()));
    }
    Ok(capture?)
}
