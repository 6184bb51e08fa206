//! # Transport
//!
//! The request/response boundary between the orchestrator and whatever holds
//! the catalog. The orchestrator only ever sees a status code and a JSON body;
//! [`TransportFault`] covers the cases where no response arrived at all.
//!
//! Implementations:
//! - [`HttpTransport`](http::HttpTransport) talks to a remote admin API.
//! - [`LocalTransport`](local::LocalTransport) serves the in-memory catalog.
//! - [`MockTransport`](mock::MockTransport) replays scripted responses in tests.

pub mod http;
pub mod local;
pub mod mock;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            status_text: StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or_default()
                .to_string(),
            body,
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFault {
    #[error("could not reach {0}")]
    Unreachable(String),

    #[error("request timed out")]
    Timeout,

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Sends one request and waits for its response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportFault>;
}

/// Which status codes count as success.
///
/// `ExactOk` is the dashboard's historical contract: only a literal 200 is a
/// success, so a `201 Created` is handled exactly like a `500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessCriterion {
    #[default]
    ExactOk,
    AnySuccess,
}

impl SuccessCriterion {
    pub fn is_success(self, status: u16) -> bool {
        match self {
            SuccessCriterion::ExactOk => status == 200,
            SuccessCriterion::AnySuccess => (200..300).contains(&status),
        }
    }
}
