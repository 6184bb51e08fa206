//! Post-mutation navigation.
//!
//! After a successful mutation the dashboard re-fetches the current listing
//! and, depending on the action, moves to another route. The orchestrator only
//! talks to a [`Router`]; what a route renders is not its concern.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

pub trait Router: Send + Sync {
    /// Re-fetches the data behind the current view.
    fn refresh(&self);

    /// Moves to `route`, e.g. `/store_1/billboards`.
    fn push(&self, route: &str);
}

/// Logs router calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRouter;

impl Router for TracingRouter {
    fn refresh(&self) {
        info!("🔄 Refresh");
    }

    fn push(&self, route: &str) {
        info!(route, "➡️ Navigate");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEvent {
    Refresh,
    Push(String),
}

/// Records router calls, for assertions.
#[derive(Debug, Default, Clone)]
pub struct RouteLog {
    events: Arc<Mutex<Vec<RouteEvent>>>,
}

impl RouteLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RouteEvent> {
        self.lock().clone()
    }

    /// Most recent `push` target.
    pub fn current(&self) -> Option<String> {
        self.lock().iter().rev().find_map(|event| match event {
            RouteEvent::Push(route) => Some(route.clone()),
            RouteEvent::Refresh => None,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RouteEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Router for RouteLog {
    fn refresh(&self) {
        self.lock().push(RouteEvent::Refresh);
    }

    fn push(&self, route: &str) {
        self.lock().push(RouteEvent::Push(route.to_string()));
    }
}
