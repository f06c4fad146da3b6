use thiserror::Error;

/// Errors surfaced by the message-log client.
///
/// Each variant carries enough context to diagnose the failure without
/// needing to inspect the originating error directly.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server replied with a non-2xx HTTP status code.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// A TCP-level connection could not be established.
    #[error("connection failed to {url}: {detail}")]
    Connect { url: String, detail: String },

    /// Response body could not be parsed as the expected JSON structure.
    #[error("response body was not valid message JSON: {detail}")]
    Json { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http_includes_status_and_url() {
        let err = ClientError::Http {
            status: 401,
            url: "http://localhost:3000/api/messages?last_id=0".to_string(),
        };
        let s = err.to_string();
        assert!(s.contains("401"), "expected status in display: {s}");
        assert!(s.contains("/api/messages"), "expected url in display: {s}");
    }

    #[test]
    fn display_connect_includes_detail() {
        let err = ClientError::Connect {
            url: "http://localhost:3000".to_string(),
            detail: "connection refused".to_string(),
        };
        let s = err.to_string();
        assert!(s.contains("http://localhost:3000"), "url in display: {s}");
        assert!(s.contains("connection refused"), "detail in display: {s}");
    }

    #[test]
    fn display_json_includes_detail() {
        let err = ClientError::Json {
            detail: "missing field `id`".to_string(),
        };
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn client_error_is_std_error() {
        // Compile-time proof that ClientError implements std::error::Error.
        fn assert_error<E: std::error::Error>(_: &E) {}
        let err = ClientError::Http { status: 500, url: "x".to_string() };
        assert_error(&err);
    }

    #[test]
    fn client_error_debug_formats() {
        let err = ClientError::Connect {
            url: "http://a".to_string(),
            detail: "refused".to_string(),
        };
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("Connect"), "Debug should contain variant name: {dbg}");
    }
}
