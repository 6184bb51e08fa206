//! # Orchestration
//!
//! The write side of the dashboard: one generic engine that submits
//! mutations for every entity kind, the confirmation gate in front of
//! deletes, the guard that explains blocked deletes, and the clipboard copy.

pub mod clipboard;
pub mod engine;
pub mod error;
pub mod gate;
pub mod integrity;

pub use clipboard::{copy_id, Clipboard, ClipboardError, MemoryClipboard};
pub use engine::{
    ActionContext, ActionOrchestrator, ActionOutcome, ActionReport, ActionState, InstanceKey, Mutation, MutationKind,
    ViewScope, GENERIC_FAILURE,
};
pub use error::ActionError;
pub use gate::{ConfirmationGate, GateState};
pub use integrity::{IntegrityPolicy, ReferentialIntegrityGuard};
