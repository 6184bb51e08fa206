//! Confirmation before a delete reaches the orchestrator.

use crate::descriptor::EntityKind;
use crate::model::StoreId;
use crate::orchestrator::engine::{ActionOrchestrator, ActionOutcome, ActionReport, InstanceKey, Mutation, ViewScope};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Closed,
    Open,
}

/// The delete dialog of one entity instance.
///
/// Opens only on explicit request and never while a mutation for the instance
/// is submitting. Once confirmed it stays open, showing the busy flag, until
/// the delete reaches a terminal state, then closes whatever the outcome.
pub struct ConfirmationGate {
    orchestrator: ActionOrchestrator,
    key: InstanceKey,
    state: Mutex<GateState>,
}

impl ConfirmationGate {
    pub fn new(orchestrator: ActionOrchestrator, kind: EntityKind, store_id: &StoreId, id: impl Into<String>) -> Self {
        let id: String = id.into();
        Self {
            orchestrator,
            key: InstanceKey::new(kind, store_id, Some(id.as_str())),
            state: Mutex::new(GateState::Closed),
        }
    }

    pub fn state(&self) -> GateState {
        *self.lock()
    }

    pub fn is_open(&self) -> bool {
        self.state() == GateState::Open
    }

    /// True while a mutation of this instance is submitting; the dialog's
    /// buttons are disabled.
    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_submitting(&self.key)
    }

    pub fn open(&self) -> bool {
        if self.is_busy() {
            debug!(key = ?self.key, "Gate busy, not opening");
            return false;
        }
        *self.lock() = GateState::Open;
        true
    }

    /// Dismisses the dialog. Ignored while the delete is in flight.
    pub fn cancel(&self) -> bool {
        if self.is_busy() {
            return false;
        }
        *self.lock() = GateState::Closed;
        true
    }

    /// Runs the delete. `None` when the gate was not open or the delete is
    /// already in flight; the gate stays open until that delete settles.
    pub async fn confirm(&self, view: &ViewScope) -> Option<ActionReport> {
        if !self.is_open() {
            return None;
        }
        if self.is_busy() {
            debug!(key = ?self.key, "Delete already submitting");
            return None;
        }
        let id = self.key.id.clone().unwrap_or_default();
        let report = self
            .orchestrator
            .dispatch(view, self.key.kind, &self.key.store_id, Mutation::Delete { id })
            .await;
        if matches!(report.outcome, ActionOutcome::Ignored) {
            return Some(report);
        }
        *self.lock() = GateState::Closed;
        Some(report)
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
