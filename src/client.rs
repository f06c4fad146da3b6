//! HTTP client for the Tornado message-log API.
//!
//! The sync engine talks to the server through the [`MessageLog`] trait so
//! that tests (and non-HTTP embeddings) can substitute their own log.
//! [`HttpMessageLog`] is the production implementation over reqwest.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;
use crate::model::{Message, NewMessage};

/// The message-log service as seen by the sync engine.
///
/// The service contract requires exact `after` filtering: `fetch_after(c)`
/// never returns a message with `id <= c`, and batches arrive ascending by
/// id. The engine builds its no-duplicate guarantee on that contract rather
/// than deduplicating client-side.
pub trait MessageLog: Send + Sync {
    /// Fetch all messages with `id > cursor`, ascending.
    fn fetch_after(
        &self,
        cursor: u64,
    ) -> impl Future<Output = Result<Vec<Message>, ClientError>> + Send;

    /// Append one outbound message. The response body is ignored — the
    /// caller re-derives truth via the next fetch.
    fn append(&self, content: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// Configuration for [`HttpMessageLog`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL of the Tornado server (e.g. `http://127.0.0.1:3000`).
    pub base_url: String,
    /// TCP connection timeout.
    pub connect_timeout: Duration,
    /// Per-request read timeout.
    pub request_timeout: Duration,
    /// Session cookie value for the authenticated user. The server answers
    /// 401 to both endpoints without one.
    pub session_cookie: Option<String>,
}

impl HttpConfig {
    /// Create a config with sensible defaults.
    ///
    /// - connect_timeout: 3 s
    /// - request_timeout: 10 s
    /// - session_cookie: none
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(3),
            request_timeout: Duration::from_secs(10),
            session_cookie: None,
        }
    }
}

/// reqwest-backed [`MessageLog`] over the Tornado HTTP API.
///
/// Use [`HttpMessageLog::builder`] for construction.
pub struct HttpMessageLog {
    config: HttpConfig,
    http: reqwest::Client,
}

impl HttpMessageLog {
    /// Start building a client aimed at `base_url`.
    pub fn builder(base_url: impl Into<String>) -> HttpMessageLogBuilder {
        HttpMessageLogBuilder::new(base_url)
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn with_session(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.session_cookie {
            Some(cookie) => req.header(reqwest::header::COOKIE, format!("session={cookie}")),
            None => req,
        }
    }
}

impl MessageLog for HttpMessageLog {
    /// `GET /api/messages?last_id={cursor}`.
    ///
    /// # Returns
    /// - `Ok(batch)` — on a 2xx response with a parseable JSON array;
    ///   empty when nothing is newer than the cursor.
    /// - `Err(ClientError::Connect)` — when the TCP connection fails.
    /// - `Err(ClientError::Http)` — when the server replies non-2xx
    ///   (401 for a missing/expired session).
    /// - `Err(ClientError::Json)` — when the body cannot be parsed.
    async fn fetch_after(&self, cursor: u64) -> Result<Vec<Message>, ClientError> {
        let url = format!("{}/api/messages?last_id={}", self.config.base_url, cursor);
        let resp = self
            .with_session(self.http.get(&url))
            .send()
            .await
            .map_err(|e| ClientError::Connect {
                url: url.clone(),
                detail: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(ClientError::Http {
                status: resp.status().as_u16(),
                url,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| ClientError::Json {
            detail: e.to_string(),
        })?;

        serde_json::from_slice::<Vec<Message>>(&bytes).map_err(|e| ClientError::Json {
            detail: e.to_string(),
        })
    }

    /// `POST /api/messages` with body `{ "content": ... }`.
    ///
    /// The server assigns id, author, and timestamp; the response body is
    /// not inspected.
    async fn append(&self, content: &str) -> Result<(), ClientError> {
        let url = format!("{}/api/messages", self.config.base_url);
        let resp = self
            .with_session(self.http.post(&url).json(&NewMessage { content }))
            .send()
            .await
            .map_err(|e| ClientError::Connect {
                url: url.clone(),
                detail: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(ClientError::Http {
                status: resp.status().as_u16(),
                url,
            });
        }

        Ok(())
    }
}

/// Builder for [`HttpMessageLog`].
///
/// # Example
/// ```rust,ignore
/// let log = HttpMessageLog::builder("http://127.0.0.1:3000")
///     .session_cookie(token)
///     .request_timeout(Duration::from_secs(5))
///     .build();
/// ```
pub struct HttpMessageLogBuilder {
    config: HttpConfig,
}

impl HttpMessageLogBuilder {
    /// Create a builder targeting `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config: HttpConfig::new(base_url),
        }
    }

    /// Override the TCP connect timeout (default 3 s).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Override the per-request read timeout (default 10 s).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Attach the session cookie value for the authenticated user.
    pub fn session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.config.session_cookie = Some(cookie.into());
        self
    }

    /// Consume the builder and construct an [`HttpMessageLog`].
    pub fn build(self) -> HttpMessageLog {
        // reqwest::Client::builder() can fail in extreme environments, but
        // unwrap_or_default() falls back to a default client instead of panicking.
        let http = reqwest::Client::builder()
            .connect_timeout(self.config.connect_timeout)
            .timeout(self.config.request_timeout)
            .build()
            .unwrap_or_default();

        HttpMessageLog {
            config: self.config,
            http,
        }
    }
}
