//! Headless host: input events as JSON lines.

use canvas::input::InputEvent;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Parse one line. `None` for blank lines.
pub fn parse_event_line(line: &str) -> Option<Result<InputEvent, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// Forward every well-formed event from `reader` to `tx`, skipping malformed
/// lines. Returns the number of events forwarded.
///
/// # Errors
///
/// Returns the underlying I/O error if reading fails.
pub async fn forward_events<R>(reader: R, tx: mpsc::Sender<InputEvent>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0;
    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        match parse_event_line(&line) {
            None => {}
            Some(Ok(event)) => {
                if tx.send(event).await.is_err() {
                    debug!("session stopped; no longer reading input");
                    break;
                }
                forwarded += 1;
            }
            Some(Err(e)) => warn!(line = line_no, error = %e, "skipping malformed input event"),
        }
    }
    Ok(forwarded)
}

#[cfg(test)]
#[path = "host_test.rs"]
mod tests;
