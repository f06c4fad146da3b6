//! # Transcript sync engine
//!
//! Keeps a growing, ordered, duplicate-free local transcript in sync with
//! the server-held message log by short-interval polling.
//!
//! ## Guarantees
//! - Monotonic cursor: advances only via `max(cursor, id)` over merged ids
//! - No overlapping fetches: a capacity-1 permit slot guards the request;
//!   a poll arriving while one is in flight is skipped, not queued
//! - Arrival order: batches merge in the exact order the server returned
//!   them; the engine never resorts
//! - Reader-respecting scroll: only an own message, or a reader already at
//!   the bottom, moves the viewport
//!
//! ## NOT responsible for
//! - Rendering (that is the [`TranscriptView`] collaborator)
//! - Transport (that is the [`MessageLog`] collaborator)
//! - Retry/backoff — a failed poll mutates nothing and the next timer tick
//!   is the retry

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::client::MessageLog;
use crate::error::ClientError;
use crate::model::Message;
use crate::view::TranscriptView;

/// Timer period between unconditional poll attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Consecutive poll failures before diagnostics escalate from warn to error.
const FAILURE_ESCALATION_THRESHOLD: u32 = 5;

/// What a single [`SyncEngine::poll`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A fetch was already in flight; this call touched nothing.
    Skipped,
    /// The fetch succeeded and returned no new messages.
    Quiet,
    /// New messages were merged into the transcript.
    Merged { appended: usize, scrolled: bool },
}

/// What a single [`SyncEngine::send`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The body was whitespace-only; no request was issued and the input
    /// affordance was left alone.
    SkippedEmpty,
    /// The message was accepted by the server.
    Sent,
}

struct EngineState<V> {
    transcript: Vec<Message>,
    view: V,
}

/// Owns the cursor, the in-flight slot, and the transcript; drives fetches
/// against the message log and merges results into the view.
///
/// All collaborators are constructor-injected; the engine holds no global
/// state. Methods take `&self`; the engine is shared between the interval
/// loop and the send path via [`Arc`].
pub struct SyncEngine<S, V> {
    identity: u64,
    service: S,
    cursor: AtomicU64,
    state: Mutex<EngineState<V>>,
    // Capacity-1 slot: the permit is held exactly while one fetch is
    // outstanding. try_acquire failure means a poll is in flight; skip.
    slot: Semaphore,
    poll_interval: Duration,
}

impl<S, V> SyncEngine<S, V>
where
    S: MessageLog,
    V: TranscriptView,
{
    /// Create an engine for the local user `identity`, fetching through
    /// `service` and rendering into `view`. Cursor starts at 0 ("no
    /// messages observed").
    pub fn new(identity: u64, service: S, view: V) -> Self {
        SyncEngine {
            identity,
            service,
            cursor: AtomicU64::new(0),
            state: Mutex::new(EngineState {
                transcript: Vec::new(),
                view,
            }),
            slot: Semaphore::new(1),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the timer period (default 2 s).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Highest message id merged so far; 0 before the first merge.
    pub fn cursor(&self) -> u64 {
        self.cursor.load(Ordering::Acquire)
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Snapshot of the transcript in merge order.
    pub fn transcript(&self) -> Vec<Message> {
        self.state.lock().unwrap().transcript.clone()
    }

    /// Fetch everything newer than the cursor and merge it.
    ///
    /// If a fetch is already outstanding the call is a no-op
    /// ([`PollOutcome::Skipped`]) — cooperative exclusion, not an error.
    /// A transport failure propagates with cursor, transcript, and view
    /// untouched; recovery is the caller's next call (log-and-continue in
    /// [`run`](Self::run)).
    ///
    /// # Panics
    /// This function never panics.
    pub async fn poll(&self) -> Result<PollOutcome, ClientError> {
        let _permit = match self.slot.try_acquire() {
            Ok(permit) => permit,
            Err(_) => {
                debug!("poll already in flight, skipping");
                return Ok(PollOutcome::Skipped);
            }
        };

        let cursor = self.cursor.load(Ordering::Acquire);
        let batch = self.service.fetch_after(cursor).await?;
        if batch.is_empty() {
            return Ok(PollOutcome::Quiet);
        }

        let mut state = self.state.lock().unwrap();
        // Sampled before any append: "was the reader at the bottom when the
        // batch arrived", not after the transcript grew under them.
        let was_near_bottom = state.view.near_bottom();
        let mut own_in_batch = false;
        let appended = batch.len();

        for message in batch {
            let own = message.is_from(self.identity);
            own_in_batch |= own;
            state.view.push(&message, own);
            self.cursor.fetch_max(message.id, Ordering::AcqRel);
            state.transcript.push(message);
        }

        let scrolled = was_near_bottom || own_in_batch;
        if scrolled {
            state.view.scroll_to_bottom();
        }

        Ok(PollOutcome::Merged { appended, scrolled })
        // _permit drops here; the slot frees only after the merge is done.
    }

    /// Submit one outbound message.
    ///
    /// A whitespace-only body is silently absorbed ([`SendOutcome::SkippedEmpty`]):
    /// no request, no input clearing. Otherwise the input affordance is
    /// cleared before the network call resolves, and a successful append
    /// immediately triggers one poll so the sent message appears without
    /// waiting for the next tick. The engine never synthesizes the sent
    /// message locally and never rolls back the cleared input — the
    /// transcript only ever reflects what a poll returned.
    pub async fn send(&self, body: &str) -> Result<SendOutcome, ClientError> {
        let content = body.trim();
        if content.is_empty() {
            return Ok(SendOutcome::SkippedEmpty);
        }

        self.state.lock().unwrap().view.clear_input();
        self.service.append(content).await?;

        // A failed post-send poll is soft: the sent message stays invisible
        // until a later poll succeeds.
        if let Err(e) = self.poll().await {
            warn!(error = %e, "post-send poll failed, next tick will catch up");
        }

        Ok(SendOutcome::Sent)
    }
}

impl<S, V> SyncEngine<S, V>
where
    S: MessageLog + 'static,
    V: TranscriptView + Send + 'static,
{
    /// Run the polling loop indefinitely.
    ///
    /// Ticks unconditionally at the configured interval regardless of the
    /// prior outcome. Failures are soft-errors — logged and retried at the
    /// next tick; diagnostics escalate after repeated consecutive failures.
    ///
    /// Cancel the task (drop the `JoinHandle`) to stop the loop cleanly.
    ///
    /// # Panics
    /// This function never panics.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut consecutive_failures: u32 = 0;

        loop {
            ticker.tick().await;

            match self.poll().await {
                Ok(outcome) => {
                    consecutive_failures = 0;
                    if let PollOutcome::Merged { appended, scrolled } = outcome {
                        debug!(appended, scrolled, "merged new messages");
                    }
                }
                Err(e) => {
                    consecutive_failures = consecutive_failures.saturating_add(1);

                    if consecutive_failures >= FAILURE_ESCALATION_THRESHOLD {
                        error!(
                            error = %e,
                            consecutive_failures,
                            "poll failed repeatedly, will retry next tick"
                        );
                    } else {
                        warn!(error = %e, "poll failed, will retry next tick");
                    }
                }
            }
        }
    }

    /// Spawn the polling loop and return a handle that stops it.
    pub fn start(self: &Arc<Self>) -> SyncHandle {
        SyncHandle {
            task: tokio::spawn(Arc::clone(self).run()),
        }
    }
}

/// Handle to a running polling loop.
pub struct SyncHandle {
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Abort the polling loop. An in-flight fetch is abandoned, not awaited.
    pub fn stop(self) {
        self.task.abort();
    }
}
