//! # Resource Trait
//!
//! The contract every catalog row type implements to be owned by a generic
//! [`ResourceActor`](crate::framework::ResourceActor).
//!
//! Writing the actor loop once against this trait means the eight entity kinds
//! share one implementation of create, read, list, full-record replace, delete
//! and reference counting. Associated types keep the payloads apart: a
//! `CategoryDraft` can never reach the `Product` actor.

use crate::descriptor::EntityKind;
use crate::model::{StoreId, ValidationError};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// A pointer from one row to another row of the given kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub kind: EntityKind,
    pub id: String,
}

impl Reference {
    pub fn new(kind: EntityKind, id: impl AsRef<str>) -> Self {
        Self {
            kind,
            id: id.as_ref().to_string(),
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// Trait that every catalog row implements to be managed by `ResourceActor`.
///
/// # Drafts
/// A draft is the full record a user submits. It is used both to create a row
/// and to replace one on update; there are no partial patches.
///
/// # References
/// [`Resource::references`] lists the rows this row points at, excluding the
/// owning store, which is implied by [`Resource::store_id`]. The catalog uses
/// it to find dependents before a delete.
pub trait Resource: Clone + Debug + Serialize + Send + Sync + 'static {
    /// Typed id; `From<u32>` lets the actor hand out sequential ids.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32> + From<String>;

    /// The full-record payload for create and update.
    type Draft: Debug + Send + Sync + DeserializeOwned + 'static;

    const KIND: EntityKind;

    /// Builds a new row. Validation failures leave the store untouched.
    fn from_draft(
        id: Self::Id,
        store_id: StoreId,
        draft: Self::Draft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError>;

    /// Replaces every user-editable field. Must validate before mutating.
    fn replace(&mut self, draft: Self::Draft) -> Result<(), ValidationError>;

    fn id(&self) -> &Self::Id;

    fn store_id(&self) -> &StoreId;

    fn created_at(&self) -> DateTime<Utc>;

    /// Rows a draft would point at once stored.
    fn draft_references(_draft: &Self::Draft) -> Vec<Reference> {
        Vec::new()
    }

    /// Rows this row points at.
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// True when this row holds a reference to `target`, including the
    /// implicit reference to its owning store.
    fn refers_to(&self, target: &Reference) -> bool {
        let owned_by_target = target.kind == EntityKind::Store
            && Self::KIND != EntityKind::Store
            && self.store_id().as_str() == target.id;
        owned_by_target || self.references().contains(target)
    }
}
