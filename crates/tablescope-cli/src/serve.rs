//! JSON-lines bridge server.
//!
//! Each input line is one request; each reply is one output line. The `sql`
//! notifications a request causes are written before its reply.

use tablescope_bridge::{Bridge, Notification};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

/// Serves requests from `input` until it ends, then closes the session.
pub async fn serve<R, W>(bridge: &Bridge, input: R, output: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut notifications = bridge.subscribe();
    let mut lines = input.lines();
    info!(endpoints = ?Bridge::endpoints(), "Serving bridge");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = bridge.handle_json(&line).await;
        forward_notifications(&mut notifications, output).await?;
        write_line(output, &reply).await?;
    }

    debug!("Input closed");
    if let Err(e) = bridge.close().await {
        warn!(error = %e, "Failed to close session");
    }
    Ok(())
}

async fn forward_notifications<W>(
    notifications: &mut broadcast::Receiver<Notification>,
    output: &mut W,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        match notifications.try_recv() {
            Ok(notification) => write_line(output, &notification.to_json()).await?,
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Dropped sql notifications");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => return Ok(()),
        }
    }
}

async fn write_line<W>(output: &mut W, line: &str) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
