//! reveal-replay - play a bot answer through the reveal runtime
//!
//! Reads a raw bot response from stdin and writes every frame the runtime
//! publishes to stdout as one JSON line, until the reveal is finished.

use reveal_chat::{Message, RevealConfig, RevealHandle};
use std::io::Write;
use tokio::io::AsyncReadExt;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, stdout carries frames
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reveal_chat=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let mut raw = String::new();
    tokio::io::stdin().read_to_string(&mut raw).await?;

    let config = RevealConfig::from_env();
    tracing::info!(tick_ms = %config.tick.as_millis(), bytes = raw.len(), "Replaying response");

    let handle = RevealHandle::spawn(&config);
    let mut frames = handle.subscribe();
    handle.sync(vec![Message::bot(raw)]).await?;

    let mut stdout = std::io::stdout().lock();
    let mut count = 0usize;
    loop {
        let frame = match frames.recv().await {
            Ok(frame) => frame,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Output too slow, frames skipped");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        serde_json::to_writer(&mut stdout, &frame)?;
        writeln!(stdout)?;
        count += 1;

        if !frame.is_animating() {
            break;
        }
    }
    stdout.flush()?;

    tracing::info!(frames = count, "Replay finished");
    handle.shutdown().await;

    Ok(())
}
