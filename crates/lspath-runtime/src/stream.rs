use futures::stream::{Stream, StreamExt};
use lspath_engine::parse_line;
use lspath_types::TraceEvent;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Parse trace text on a background task.
///
/// Events go through a bounded queue of `capacity`; a read failure goes to a
/// separate one-shot slot, so reporting it never waits on the consumer.
/// Non-trace lines and invalid UTF-8 are tolerated.
pub fn parse_stream<R>(reader: R, capacity: usize) -> TraceStream
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let (err_tx, err_rx) = oneshot::channel();

    let task = tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        let mut lines = 0usize;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    lines += 1;
                    let text = String::from_utf8_lossy(&buf);
                    let line = text.trim_end_matches(['\n', '\r']);
                    if let Some(event) = parse_line(line)
                        && tx.send(event).await.is_err()
                    {
                        // Consumer went away
                        break;
                    }
                }
                Err(err) => {
                    warn!(error = %err, lines, "trace stream read failed");
                    let _ = err_tx.send(err);
                    return;
                }
            }
        }
        debug!(lines, "trace stream finished");
    });

    TraceStream {
        events: rx,
        error: err_rx,
        task,
    }
}

/// Forward-only sequence of parsed events; runs once.
pub struct TraceStream {
    events: mpsc::Receiver<TraceEvent>,
    error: oneshot::Receiver<io::Error>,
    task: JoinHandle<()>,
}

impl TraceStream {
    /// Stop the producer without waiting for it.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Close the queue, wait for the producer and report its read error, if any.
    ///
    /// Events not yet received are discarded.
    pub async fn finish(self) -> Result<(), String> {
        let TraceStream {
            mut events,
            error,
            task,
        } = self;
        events.close();

        if let Err(join) = task.await
            && !join.is_cancelled()
        {
            return Err(format!("trace reader task failed: {}", join));
        }

        match error.await {
            Ok(err) => Err(err.to_string()),
            // Sender dropped without reporting: clean end of stream
            Err(_) => Ok(()),
        }
    }

    /// Receive every event, then [`Self::finish`].
    pub async fn drain(mut self) -> (Vec<TraceEvent>, Result<(), String>) {
        let mut events = Vec::new();
        while let Some(event) = self.next().await {
            events.push(event);
        }
        let status = self.finish().await;
        (events, status)
    }
}

impl Stream for TraceStream {
    type Item = TraceEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.poll_recv(cx)
    }
}
