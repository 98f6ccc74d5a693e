// HTTP transport implementation
//
// Wraps `reqwest::Client` behind the `Transport` trait. Mirrors the
// contract the orchestration core was written against: non-2xx statuses
// are dispatch failures (the error carries the status), bodies are decoded
// as JSON with a plain-string fallback.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, trace};
use url::Url;

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::{Transport, TransportRequest, TransportResponse};

/// reqwest-backed [`Transport`].
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport from a [`TransportConfig`].
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        Ok(Self {
            http: config.build_client()?,
        })
    }

    /// Create a transport around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    fn build_headers(request: &TransportRequest) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn dispatch(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            TransportError::InvalidMethod {
                method: request.method.clone(),
            }
        })?;
        let url = Url::parse(&request.url)?;
        let headers = Self::build_headers(&request)?;

        debug!(method = %method, url = %url, "dispatching request");

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        // Non-2xx is a failed dispatch; the status travels in the error.
        let response = builder.send().await?.error_for_status()?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_owned();
        let response_headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_owned(), v.to_owned()))
            })
            .collect();

        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            None
        } else {
            // JSON when it parses, raw text otherwise.
            Some(serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            }))
        };

        trace!(status = status.as_u16(), "dispatch complete");

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            headers: response_headers,
            body,
        })
    }
}
