//! HTTP transport backed by `reqwest`.

use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportFault};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Sends requests to a remote admin API rooted at `base_url`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportFault> {
        let base_url: String = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportFault::Unreachable(format!("{base_url}: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportFault> {
        let url = self.url(&request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            if e.is_timeout() {
                TransportFault::Timeout
            } else {
                TransportFault::Unreachable(url.clone())
            }
        })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportFault::Timeout
            } else {
                TransportFault::Malformed(e.to_string())
            }
        })?;

        // Error pages are often plain text; keep them as a JSON string.
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        debug!(status = status.as_u16(), "Response received");
        Ok(ApiResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let transport = HttpTransport::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.url("/api/stores"), "http://localhost:3000/api/stores");
    }

    #[tokio::test]
    async fn test_refused_connection_is_a_fault() {
        let transport = HttpTransport::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let result = transport.send(ApiRequest::new(Method::Get, "/api/stores")).await;
        assert!(matches!(
            result,
            Err(TransportFault::Unreachable(_)) | Err(TransportFault::Timeout)
        ));
    }
}
