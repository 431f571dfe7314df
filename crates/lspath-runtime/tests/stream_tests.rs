use futures::StreamExt;
use lspath_runtime::{parse_stream, replay_file, CaptureInterruption};
use lspath_testing::TraceScript;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// Yields its data once, then fails every read.
struct FailingReader {
    data: Option<Vec<u8>>,
}

impl AsyncRead for FailingReader {
    fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        match self.data.take() {
            Some(data) => {
                buf.put_slice(&data);
                Poll::Ready(Ok(()))
            }
            None => Poll::Ready(Err(io::Error::other("device went away"))),
        }
    }
}

#[tokio::test]
async fn test_stream_yields_events_in_order() {
    let text = TraceScript::zsh()
        .noise("welcome banner")
        .run("/etc/zshenv", 1, "true")
        .assign_path("/etc/zprofile", 3, "/usr/bin:/opt/tool")
        .render();

    let mut stream = parse_stream(io::Cursor::new(text.into_bytes()), 4);
    let first = stream.next().await.unwrap();
    let second = stream.next().await.unwrap();
    assert!(stream.next().await.is_none());
    assert_eq!(stream.finish().await, Ok(()));

    assert_eq!(first.file, "/etc/zshenv");
    assert_eq!(second.path_change.as_deref(), Some("/usr/bin:/opt/tool"));
}

#[tokio::test]
async fn test_small_queue_does_not_lose_events() {
    let mut script = TraceScript::bash();
    for line in 1..=500 {
        script = script.run("/home/me/.bashrc", line, "true");
    }

    let (events, status) = parse_stream(io::Cursor::new(script.render().into_bytes()), 1)
        .drain()
        .await;

    assert_eq!(status, Ok(()));
    assert_eq!(events.len(), 500);
    assert_eq!(events[499].line, 500);
}

#[tokio::test]
async fn test_read_error_keeps_parsed_events() {
    let reader = FailingReader {
        data: Some(b"+/etc/zshrc:1>true\n+/etc/zshrc:2>PATH=/a\npartial".to_vec()),
    };

    let (events, status) = parse_stream(reader, 8).drain().await;

    assert_eq!(events.len(), 2);
    assert_eq!(status, Err("device went away".to_string()));
}

#[tokio::test]
async fn test_invalid_utf8_is_tolerated() {
    let mut bytes = b"+/etc/zshrc:1>echo \xff\xfe\n".to_vec();
    bytes.extend_from_slice(b"+/etc/zshrc:2>PATH=/a\n");

    let (events, status) = parse_stream(io::Cursor::new(bytes), 8).drain().await;
    assert_eq!(status, Ok(()));
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn test_dropping_the_consumer_stops_the_producer() {
    let mut script = TraceScript::zsh();
    for line in 1..=100 {
        script = script.run("/etc/zshrc", line, "true");
    }

    let mut stream = parse_stream(io::Cursor::new(script.render().into_bytes()), 1);
    assert!(stream.next().await.is_some());
    assert_eq!(stream.finish().await, Ok(()));
}

#[tokio::test]
async fn test_replay_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zsh.trace");
    TraceScript::zsh()
        .assign_path("/etc/zprofile", 5, "/usr/bin:/bin:/opt/tool")
        .write_to(&path)
        .unwrap();

    let capture = replay_file(&path, 16).await.unwrap();
    assert!(capture.is_complete());
    assert_eq!(capture.events.len(), 1);
    assert_eq!(capture.events[0].line, 5);
}

#[tokio::test]
async fn test_replay_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = replay_file(&dir.path().join("absent.trace"), 16).await;
    assert!(matches!(result, Err(lspath_runtime::Error::Io(_))));
}

#[test]
fn test_interruption_messages() {
    assert_eq!(
        CaptureInterruption::TimedOut { after_secs: 10 }.to_string(),
        "shell startup did not finish within 10s"
    );
    assert_eq!(
        CaptureInterruption::Stream("boom".into()).to_string(),
        "trace stream failed: boom"
    );
}
