//! # Framework Errors
//!
//! Errors raised by the resource actors themselves, independent of which
//! catalog kind they hold.

use crate::model::ValidationError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid draft: {0}")]
    Invalid(#[from] ValidationError),
}
