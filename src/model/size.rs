use crate::descriptor::EntityKind;
use crate::framework::Resource;
use crate::model::validation::{require, ValidationError};
use crate::model::{SizeId, StoreId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A size option such as "Large" / "L".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: SizeId,
    pub store_id: StoreId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeDraft {
    pub name: String,
    pub value: String,
}

impl SizeDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("value", &self.value)
    }
}

impl Resource for Size {
    type Id = SizeId;
    type Draft = SizeDraft;

    const KIND: EntityKind = EntityKind::Size;

    fn from_draft(
        id: SizeId,
        store_id: StoreId,
        draft: SizeDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            store_id,
            name: draft.name,
            value: draft.value,
            created_at,
        })
    }

    fn replace(&mut self, draft: SizeDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.name = draft.name;
        self.value = draft.value;
        Ok(())
    }

    fn id(&self) -> &SizeId {
        &self.id
    }

    fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
