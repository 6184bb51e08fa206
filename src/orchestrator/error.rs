use crate::descriptor::EntityKind;
use crate::transport::{ApiResponse, TransportFault};
use thiserror::Error;

/// Why a mutation attempt failed. Every failure is terminal for its attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// No response arrived.
    #[error(transparent)]
    Transport(#[from] TransportFault),

    /// A response arrived but did not meet the success criterion.
    #[error("request failed with status {status} {status_text}")]
    NonSuccess { status: u16, status_text: String },

    /// The backend refused the mutation because rows of `blocking` still
    /// reference the target.
    #[error("{kind} is still referenced")]
    IntegrityConflict {
        kind: EntityKind,
        blocking: Vec<EntityKind>,
    },
}

impl ActionError {
    /// Classifies an unsuccessful response. A 409 is a conflict; its body may
    /// list the blocking kinds by path segment.
    pub fn from_response(kind: EntityKind, response: &ApiResponse) -> Self {
        if response.status != 409 {
            return ActionError::NonSuccess {
                status: response.status,
                status_text: response.status_text.clone(),
            };
        }

        let blocking = response
            .body
            .get("blocking")
            .and_then(|value| value.as_array())
            .map(|names| {
                names
                    .iter()
                    .filter_map(|name| name.as_str().and_then(EntityKind::from_segment))
                    .collect()
            })
            .unwrap_or_default();
        ActionError::IntegrityConflict { kind, blocking }
    }
}
