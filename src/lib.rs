//! # tornado-client
//!
//! Client-side synchronization engine for a Tornado chat server's message
//! log. The server owns the log; this crate keeps a growing, ordered,
//! duplicate-free local transcript in sync with it by short-interval
//! polling, while coexisting with user-initiated sends and a scroll
//! position the reader may be actively controlling.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let service = HttpMessageLog::builder("http://127.0.0.1:3000")
//!     .session_cookie(cookie)
//!     .build();
//! let engine = Arc::new(SyncEngine::new(user_id, service, view));
//! let handle = engine.start();
//! // ... engine.send("hello").await? ...
//! handle.stop();
//! ```

pub mod cli;
pub mod client;
pub mod error;
pub mod model;
pub mod sync;
pub mod view;

pub use client::{HttpConfig, HttpMessageLog, HttpMessageLogBuilder, MessageLog};
pub use error::ClientError;
pub use model::Message;
pub use sync::{PollOutcome, SendOutcome, SyncEngine, SyncHandle, DEFAULT_POLL_INTERVAL};
pub use view::{TranscriptView, Viewport, NEAR_BOTTOM_THRESHOLD_PX};
