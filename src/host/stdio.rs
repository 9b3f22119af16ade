//! Stdin/stdout JSON bridge for the host session.
//!
//! Reads newline-delimited JSON `CommandEnvelope` messages, dispatches them
//! to a [`HostSession`] and writes one `ResponseEnvelope` per line.
//!
//! Tab mutations (`tab.*`, `select`) run in arrival order. Read-only commands
//! (`search`, `history`, `probe`) are spawned so a later search can supersede
//! an earlier one still waiting on slow tabs; their responses may therefore
//! arrive out of order and must be matched by `request_id`.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tokio::task::JoinSet;

use crate::error::{AppError, Result};
use crate::host::contract::{CommandEnvelope, ResponseEnvelope};
use crate::host::session::HostSession;

/// Run the bridge over the process's stdin and stdout until stdin closes.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or stdout cannot be written.
pub async fn run_stdio_bridge(session: Arc<HostSession>) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    run_bridge(session, reader, tokio::io::stdout()).await
}

/// Run the bridge over arbitrary streams until `reader` reaches EOF and
/// every in-flight command has answered.
///
/// # Errors
///
/// Returns an error if `reader` cannot be read or `writer` cannot be written.
pub async fn run_bridge<R, W>(session: Arc<HostSession>, mut reader: R, writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let writer = Arc::new(Mutex::new(writer));
    let mut in_flight = JoinSet::new();
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        // EOF
        if bytes_read == 0 {
            tracing::info!("input closed (EOF); draining in-flight commands");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let envelope = match parse_envelope(trimmed) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "rejected command envelope");
                let response = ResponseEnvelope::error("parse-error", e.to_string());
                write_response(&writer, &response).await?;
                continue;
            }
        };

        if envelope.command.is_concurrent() {
            let session = Arc::clone(&session);
            let writer = Arc::clone(&writer);
            in_flight.spawn(async move {
                let response = session.handle(envelope).await;
                write_response(&writer, &response).await
            });
        } else {
            let response = session.handle(envelope).await;
            write_response(&writer, &response).await?;
        }

        // Reap finished commands so write failures surface promptly.
        while let Some(joined) = in_flight.try_join_next() {
            joined.map_err(|e| AppError::Protocol(format!("command task failed: {e}")))??;
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        joined.map_err(|e| AppError::Protocol(format!("command task failed: {e}")))??;
    }
    Ok(())
}

fn parse_envelope(raw: &str) -> Result<CommandEnvelope> {
    let envelope: CommandEnvelope = serde_json::from_str(raw)
        .map_err(|e| AppError::Protocol(format!("failed to parse command envelope: {e}")))?;
    envelope.validate()?;
    Ok(envelope)
}

/// Write a single JSON line and flush.
async fn write_response<W>(writer: &Mutex<W>, response: &ResponseEnvelope) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut json = serde_json::to_string(response)?;
    json.push('\n');
    let mut w = writer.lock().await;
    w.write_all(json.as_bytes()).await?;
    w.flush().await?;
    Ok(())
}
