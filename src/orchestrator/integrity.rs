//! Turns a failed delete into guidance naming what must be removed first.

use crate::descriptor::EntityKind;
use crate::orchestrator::engine::MutationKind;
use crate::orchestrator::error::ActionError;
use serde::Deserialize;

/// How delete failures are attributed to referential integrity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrityPolicy {
    /// Only a structured conflict from the backend yields guidance; any other
    /// failure gets the generic message.
    #[default]
    Structured,
    /// Every delete failure is presumed to be a conflict with the kind's
    /// configured dependents, whatever actually went wrong.
    Presumed,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferentialIntegrityGuard {
    policy: IntegrityPolicy,
}

impl ReferentialIntegrityGuard {
    pub fn new(policy: IntegrityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> IntegrityPolicy {
        self.policy
    }

    /// Guidance for a failed mutation of `kind`, or `None` when the failure is
    /// not an integrity problem.
    pub fn explain(&self, kind: EntityKind, mutation: MutationKind, error: &ActionError) -> Option<String> {
        if mutation != MutationKind::Delete {
            return None;
        }
        let descriptor = kind.descriptor();

        match (self.policy, error) {
            (_, ActionError::IntegrityConflict { blocking, .. }) => {
                if blocking.is_empty() && descriptor.dependents.is_empty() {
                    return None;
                }
                Some(descriptor.integrity_guidance(blocking))
            }
            (IntegrityPolicy::Presumed, _) if !descriptor.dependents.is_empty() => {
                Some(descriptor.integrity_guidance(&[]))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportFault;

    fn conflict(kind: EntityKind, blocking: Vec<EntityKind>) -> ActionError {
        ActionError::IntegrityConflict { kind, blocking }
    }

    #[test]
    fn test_structured_conflict_names_blocking_kind() {
        let guard = ReferentialIntegrityGuard::default();
        assert_eq!(
            guard.explain(
                EntityKind::Category,
                MutationKind::Delete,
                &conflict(EntityKind::Category, vec![EntityKind::Product])
            ),
            Some("Make sure you removed all products using this category first.".into())
        );
    }

    #[test]
    fn test_structured_ignores_transport_faults() {
        let guard = ReferentialIntegrityGuard::new(IntegrityPolicy::Structured);
        let error = ActionError::Transport(TransportFault::Timeout);
        assert_eq!(guard.explain(EntityKind::Billboard, MutationKind::Delete, &error), None);
    }

    #[test]
    fn test_presumed_blames_dependents_for_any_failure() {
        let guard = ReferentialIntegrityGuard::new(IntegrityPolicy::Presumed);
        let error = ActionError::NonSuccess {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        for kind in [EntityKind::Category, EntityKind::Size, EntityKind::Color] {
            let guidance = guard.explain(kind, MutationKind::Delete, &error).unwrap();
            assert!(guidance.contains("all products"), "{guidance}");
        }
        assert_eq!(
            guard.explain(EntityKind::Billboard, MutationKind::Delete, &error),
            Some("Make sure you removed all categories using this billboard first.".into())
        );
        assert_eq!(guard.explain(EntityKind::OrderItem, MutationKind::Delete, &error), None);
    }

    #[test]
    fn test_only_deletes_get_guidance() {
        let guard = ReferentialIntegrityGuard::new(IntegrityPolicy::Presumed);
        let error = conflict(EntityKind::Billboard, vec![EntityKind::Category]);
        assert_eq!(guard.explain(EntityKind::Billboard, MutationKind::Update, &error), None);
    }
}
