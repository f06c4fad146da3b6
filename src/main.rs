use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::*;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tornado_client::cli::{self, Args};
use tornado_client::{HttpMessageLog, Message, SendOutcome, SyncEngine, TranscriptView};

// ---------------------------------------------------------------------------
// Terminal transcript view
// ---------------------------------------------------------------------------

/// A terminal is always tailing its output, so the viewport counts as
/// permanently at the bottom and scrolling is a no-op; the input line is
/// consumed by the read loop, so there is nothing to clear.
struct TerminalView;

impl TranscriptView for TerminalView {
    fn push(&mut self, message: &Message, own: bool) {
        let stamp = format!("[{}]", message.timestamp).dimmed();
        let name = if own {
            message.login.bright_cyan().bold()
        } else {
            message.login.bright_yellow()
        };
        println!("{} {} {}", stamp, name, message.content);
    }

    fn near_bottom(&self) -> bool {
        true
    }

    fn scroll_to_bottom(&mut self) {}

    fn clear_input(&mut self) {}
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let base_url = cli::resolve_base_url(args.url.as_deref());
    let session = cli::resolve_session(args.session.as_deref());

    let mut builder = HttpMessageLog::builder(&base_url);
    if let Some(cookie) = session {
        builder = builder.session_cookie(cookie);
    }
    let service = builder.build();

    let engine = Arc::new(
        SyncEngine::new(args.user_id, service, TerminalView)
            .with_poll_interval(Duration::from_millis(args.interval_ms)),
    );

    info!(url = %base_url, interval_ms = args.interval_ms, "starting transcript sync");
    let handle = engine.start();

    // Each stdin line is one outbound message; EOF ends the session.
    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match engine.send(&line).await {
            Ok(SendOutcome::Sent) | Ok(SendOutcome::SkippedEmpty) => {}
            Err(e) => warn!(error = %e, "send failed, message not persisted"),
        }
    }

    handle.stop();
    Ok(())
}
