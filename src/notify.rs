//! # Notifications
//!
//! Transient status messages tied to the phases of one asynchronous action:
//! a loading notice while the action runs, then exactly one terminal notice.
//!
//! [`NotificationSequencer::begin`] shows the loading notice and hands back a
//! [`LoadingToken`]. [`NotificationSequencer::resolve`] dismisses it and then
//! shows the outcome; resolving the same token again does nothing. Code that
//! can exit early wraps the token in a [`PendingNotice`], which resolves
//! silently on drop so no loading notice is ever left behind.

use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NoticeId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeLevel {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: NoticeId,
    pub level: NoticeLevel,
    pub message: String,
}

/// Where notices are displayed.
pub trait NotificationSink: Send + Sync {
    fn show(&self, notice: &Notice);
    fn dismiss(&self, id: NoticeId);
}

/// How an action ended, from the user's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Error(String),
    /// Dismiss the loading notice without a terminal notice.
    Silent,
}

/// Proof that a loading notice is live. Not `Clone`: one token per `begin`.
#[derive(Debug, PartialEq, Eq)]
pub struct LoadingToken {
    id: NoticeId,
}

impl LoadingToken {
    pub fn id(&self) -> NoticeId {
        self.id
    }
}

struct Inner {
    sink: Arc<dyn NotificationSink>,
    next_id: AtomicU64,
    live: Mutex<HashSet<NoticeId>>,
}

/// Issues loading notices and resolves them. Clones share state.
#[derive(Clone)]
pub struct NotificationSequencer {
    inner: Arc<Inner>,
}

impl NotificationSequencer {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            inner: Arc::new(Inner {
                sink,
                next_id: AtomicU64::new(1),
                live: Mutex::new(HashSet::new()),
            }),
        }
    }

    /// Shows a loading notice.
    pub fn begin(&self, message: impl Into<String>) -> LoadingToken {
        let id = self.next_id();
        self.live().insert(id);
        self.inner.sink.show(&Notice {
            id,
            level: NoticeLevel::Loading,
            message: message.into(),
        });
        LoadingToken { id }
    }

    /// Like [`begin`](Self::begin), but resolves silently if dropped unresolved.
    pub fn pending(&self, message: impl Into<String>) -> PendingNotice {
        PendingNotice {
            sequencer: self.clone(),
            token: Some(self.begin(message)),
        }
    }

    /// Dismisses the loading notice, then shows the outcome.
    ///
    /// Returns `false` when the token was already resolved; nothing is shown.
    pub fn resolve(&self, token: &LoadingToken, outcome: Outcome) -> bool {
        if !self.live().remove(&token.id) {
            debug!(id = token.id.0, "Notice already resolved");
            return false;
        }
        self.inner.sink.dismiss(token.id);

        let (level, message) = match outcome {
            Outcome::Success(message) => (NoticeLevel::Success, message),
            Outcome::Error(message) => (NoticeLevel::Error, message),
            Outcome::Silent => return true,
        };
        let id = self.next_id();
        self.inner.sink.show(&Notice { id, level, message });
        true
    }

    /// Number of loading notices still showing.
    pub fn live_count(&self) -> usize {
        self.live().len()
    }

    fn next_id(&self) -> NoticeId {
        NoticeId(self.inner.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn live(&self) -> MutexGuard<'_, HashSet<NoticeId>> {
        self.inner.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A loading notice that resolves itself when dropped.
pub struct PendingNotice {
    sequencer: NotificationSequencer,
    token: Option<LoadingToken>,
}

impl PendingNotice {
    pub fn finish(mut self, outcome: Outcome) -> bool {
        match self.token.take() {
            Some(token) => self.sequencer.resolve(&token, outcome),
            None => false,
        }
    }
}

impl Drop for PendingNotice {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            self.sequencer.resolve(&token, Outcome::Silent);
        }
    }
}

/// Writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn show(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Loading => info!(id = notice.id.0, "⏳ {}", notice.message),
            NoticeLevel::Success => info!(id = notice.id.0, "✅ {}", notice.message),
            NoticeLevel::Error => error!(id = notice.id.0, "❌ {}", notice.message),
        }
    }

    fn dismiss(&self, id: NoticeId) {
        debug!(id = id.0, "Notice dismissed");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeEvent {
    Shown(Notice),
    Dismissed(NoticeId),
}

/// Records every notice event, for assertions.
#[derive(Debug, Default, Clone)]
pub struct NoticeLog {
    events: Arc<Mutex<Vec<NoticeEvent>>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NoticeEvent> {
        self.lock().clone()
    }

    /// Messages shown at `level`, oldest first.
    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                NoticeEvent::Shown(notice) if notice.level == level => Some(notice.message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Loading notices shown but not yet dismissed.
    pub fn live_loading(&self) -> usize {
        let events = self.lock();
        events
            .iter()
            .filter(|event| match event {
                NoticeEvent::Shown(notice) => {
                    notice.level == NoticeLevel::Loading
                        && !events.contains(&NoticeEvent::Dismissed(notice.id))
                }
                NoticeEvent::Dismissed(_) => false,
            })
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<NoticeEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for NoticeLog {
    fn show(&self, notice: &Notice) {
        self.lock().push(NoticeEvent::Shown(notice.clone()));
    }

    fn dismiss(&self, id: NoticeId) {
        self.lock().push(NoticeEvent::Dismissed(id));
    }
}
