use thiserror::Error;

/// Top-level error type for the `wireflow-transport` crate.
///
/// Every dispatch failure mode ends up here: connection problems,
/// timeouts, non-2xx statuses, and malformed request parts. The core
/// crate maps these into its own taxonomy -- consumers of the core never
/// see a raw `reqwest::Error`.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP failure: connection refused, DNS, timeout, or a non-2xx
    /// status (via `error_for_status`).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request URL did not parse.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The method string is not a valid HTTP method.
    #[error("Invalid HTTP method: {method}")]
    InvalidMethod { method: String },

    /// A header name or value could not be encoded.
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// TLS setup or certificate error while building the client.
    #[error("TLS error: {0}")]
    Tls(String),
}

impl TransportError {
    /// The HTTP status carried by this error, if the server answered at
    /// all. `None` for connection-level failures (refused, DNS, timeout)
    /// and for malformed requests that never left the process.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the dispatch failed by exceeding the configured
    /// timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Returns `true` if the server could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect())
    }
}
