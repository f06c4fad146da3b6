use clap::Parser;
use std::env;

#[derive(Parser)]
#[command(name = "tornado-client")]
#[command(version = "0.1.0")]
#[command(about = "Terminal transcript client for a Tornado chat server")]
pub struct Args {
    /// Numeric id of the logged-in user (tags transcript entries as own/other)
    #[arg(long)]
    pub user_id: u64,

    /// Base URL of the Tornado server (falls back to $TORNADO_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Session cookie value for the authenticated user (falls back to $TORNADO_SESSION)
    #[arg(long)]
    pub session: Option<String>,

    /// Poll interval in milliseconds
    #[arg(long, default_value = "2000")]
    pub interval_ms: u64,
}

/// Resolve the server base URL: flag first, then `TORNADO_URL`, then the
/// development default.
pub fn resolve_base_url(flag: Option<&str>) -> String {
    flag.map(str::to_string)
        .or_else(|| env::var("TORNADO_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:3000".to_string())
}

/// Resolve the session cookie: flag first, then `TORNADO_SESSION`.
pub fn resolve_session(flag: Option<&str>) -> Option<String> {
    flag.map(str::to_string).or_else(|| env::var("TORNADO_SESSION").ok())
}
