//! # Mock Transport
//!
//! Scripted responses for exercising the orchestrator without a backend.
//!
//! Expectations are consumed in order; a request that does not match the next
//! expectation (or arrives when none is left) panics, which fails the test.
//!
//! ```rust,ignore
//! let mock = MockTransport::new();
//! mock.expect(Method::Delete, "/api/s1/categories/c1").respond(409);
//! let release = mock.expect(Method::Post, "/api/s1/billboards").hold().respond(200);
//!
//! // ... drive the orchestrator, then let the held request finish:
//! release.release();
//! mock.verify();
//! ```

use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportFault};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

enum Reply {
    Response(ApiResponse),
    Fault(TransportFault),
}

struct Expectation {
    method: Method,
    path: String,
    reply: Reply,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
struct Shared {
    expectations: VecDeque<Expectation>,
    requests: Vec<ApiRequest>,
}

/// A transport that replays queued expectations.
#[derive(Clone, Default)]
pub struct MockTransport {
    shared: Arc<Mutex<Shared>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects the next request to be `method path`.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            gate: None,
            shared: self.shared.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.lock().expectations.len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    gate: Option<(oneshot::Sender<()>, oneshot::Receiver<()>)>,
    shared: Arc<Mutex<Shared>>,
}

impl ExpectationBuilder {
    /// Keeps the request in flight until the returned [`Release`] is used or dropped.
    pub fn hold(mut self) -> Self {
        self.gate = Some(oneshot::channel());
        self
    }

    pub fn respond(self, status: u16) -> Release {
        self.respond_with(status, Value::Null)
    }

    pub fn respond_with(self, status: u16, body: Value) -> Release {
        self.push(Reply::Response(ApiResponse::new(status, body)))
    }

    pub fn fault(self, fault: TransportFault) -> Release {
        self.push(Reply::Fault(fault))
    }

    fn push(self, reply: Reply) -> Release {
        let (release, gate) = match self.gate {
            Some((tx, rx)) => (Some(tx), Some(rx)),
            None => (None, None),
        };
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .expectations
            .push_back(Expectation {
                method: self.method,
                path: self.path,
                reply,
                gate,
            });
        Release(release)
    }
}

/// Lets a held request complete. Dropping it has the same effect.
pub struct Release(Option<oneshot::Sender<()>>);

impl Release {
    pub fn release(self) {
        if let Some(tx) = self.0 {
            let _ = tx.send(());
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportFault> {
        let expectation = {
            let mut shared = self.lock();
            shared.requests.push(request.clone());
            shared.expectations.pop_front()
        };

        let Some(expectation) = expectation else {
            panic!("Unexpected request: {} {}", request.method, request.path);
        };
        if expectation.method != request.method || expectation.path != request.path {
            panic!(
                "Expected {} {}, got {} {}",
                expectation.method, expectation.path, request.method, request.path
            );
        }

        if let Some(gate) = expectation.gate {
            let _ = gate.await;
        }

        match expectation.reply {
            Reply::Response(response) => Ok(response),
            Reply::Fault(fault) => Err(fault),
        }
    }
}
