use crate::descriptor::EntityKind;
use crate::framework::Resource;
use crate::model::validation::{require, ValidationError};
use crate::model::StoreId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tenant of the catalog. Every other row belongs to exactly one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub owner_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or renaming a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDraft {
    pub name: String,
    /// Filled in by the authentication layer; kept as-is on rename.
    #[serde(default)]
    pub owner_id: String,
}

impl StoreDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)
    }
}

impl Resource for Store {
    type Id = StoreId;
    type Draft = StoreDraft;

    const KIND: EntityKind = EntityKind::Store;

    /// A store owns itself, so the requested `store_id` is ignored.
    fn from_draft(
        id: StoreId,
        _store_id: StoreId,
        draft: StoreDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            owner_id: draft.owner_id,
            name: draft.name,
            created_at,
        })
    }

    fn replace(&mut self, draft: StoreDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.name = draft.name;
        if !draft.owner_id.is_empty() {
            self.owner_id = draft.owner_id;
        }
        Ok(())
    }

    fn id(&self) -> &StoreId {
        &self.id
    }

    fn store_id(&self) -> &StoreId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
