use crate::config::Config;
use crate::executor::spawn_traced_shell;
use crate::shell::ShellProfile;
use crate::stream::parse_stream;
use crate::{Error, Result};
use futures::StreamExt;
use lspath_types::TraceEvent;
use serde::Serialize;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

/// Why a capture ended before the trace was complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum CaptureInterruption {
    /// The shell did not finish within the deadline and was killed
    TimedOut { after_secs: u64 },
    /// Reading the trace failed part way
    Stream(String),
}

impl fmt::Display for CaptureInterruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureInterruption::TimedOut { after_secs } => {
                write!(f, "shell startup did not finish within {}s", after_secs)
            }
            CaptureInterruption::Stream(msg) => write!(f, "trace stream failed: {}", msg),
        }
    }
}

/// Where trace text comes from.
#[derive(Debug, Clone)]
pub enum TraceSource {
    /// Run the shell now
    Shell(ShellProfile),
    /// Re-read a previously saved trace
    Replay(PathBuf),
}

/// Events gathered from one source, possibly partial.
#[derive(Debug, Clone, Default)]
pub struct TraceCapture {
    pub events: Vec<TraceEvent>,
    pub interruption: Option<CaptureInterruption>,
}

impl TraceCapture {
    pub fn is_complete(&self) -> bool {
        self.interruption.is_none()
    }
}

pub async fn acquire(source: &TraceSource, config: &Config) -> Result<TraceCapture> {
    match source {
        TraceSource::Shell(profile) => capture_trace(profile, config).await,
        TraceSource::Replay(path) => replay_file(path, config.queue_capacity).await,
    }
}

/// Run `profile` under trace and collect its events.
///
/// Launch failure is an error. A timeout or read failure is not: the events
/// seen so far are returned with the reason attached.
pub async fn capture_trace(profile: &ShellProfile, config: &Config) -> Result<TraceCapture> {
    let mut child = spawn_traced_shell(profile, &config.baseline_path)?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| Error::Io(std::io::Error::other("traced shell stderr was not captured")))?;

    let deadline = Instant::now() + config.timeout();
    let timed_out = CaptureInterruption::TimedOut {
        after_secs: config.timeout_secs,
    };

    let mut stream = parse_stream(stderr, config.queue_capacity);
    let mut events = Vec::new();

    let mut interruption = loop {
        match timeout_at(deadline, stream.next()).await {
            Ok(Some(event)) => events.push(event),
            Ok(None) => break stream.finish().await.err().map(CaptureInterruption::Stream),
            Err(_) => {
                stream.abort();
                break Some(timed_out.clone());
            }
        }
    };

    if interruption.is_none() {
        match timeout_at(deadline, child.wait()).await {
            Ok(Ok(status)) => debug!(%status, "traced shell exited"),
            Ok(Err(err)) => warn!(error = %err, "could not reap traced shell"),
            Err(_) => interruption = Some(timed_out),
        }
    }

    if let Some(reason) = &interruption {
        warn!(%reason, events = events.len(), "trace capture interrupted");
        if let Err(err) = child.kill().await {
            debug!(error = %err, "traced shell already gone");
        }
    }

    info!(events = events.len(), complete = interruption.is_none(), "trace captured");
    Ok(TraceCapture { events, interruption })
}

/// Parse a saved trace file through the same streaming parser.
pub async fn replay_file(path: &Path, queue_capacity: usize) -> Result<TraceCapture> {
    let file = tokio::fs::File::open(path).await?;
    let (events, status) = parse_stream(file, queue_capacity).drain().await;

    info!(path = %path.display(), events = events.len(), "trace replayed");
    Ok(TraceCapture {
        events,
        interruption: status.err().map(CaptureInterruption::Stream),
    })
}

/// PATH of this process, the "live session" side of unification.
pub fn live_path() -> String {
    path_value(std::env::var_os("PATH"))
}

fn path_value(raw: Option<OsString>) -> String {
    let Some(raw) = raw else {
        warn!("PATH is not set; the live session is empty");
        return String::new();
    };
    match raw.into_string() {
        Ok(value) => value,
        Err(raw) => {
            warn!("PATH is not valid UTF-8; undecodable bytes were replaced");
            raw.to_string_lossy().into_owned()
        }
    }
}
