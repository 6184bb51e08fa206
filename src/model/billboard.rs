use crate::descriptor::EntityKind;
use crate::framework::Resource;
use crate::model::validation::{require, ValidationError};
use crate::model::{BillboardId, StoreId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hero banner that categories point at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: BillboardId,
    pub store_id: StoreId,
    pub label: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardDraft {
    pub label: String,
    pub image_url: String,
}

impl BillboardDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("label", &self.label)?;
        require("imageUrl", &self.image_url)
    }
}

impl Resource for Billboard {
    type Id = BillboardId;
    type Draft = BillboardDraft;

    const KIND: EntityKind = EntityKind::Billboard;

    fn from_draft(
        id: BillboardId,
        store_id: StoreId,
        draft: BillboardDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            store_id,
            label: draft.label,
            image_url: draft.image_url,
            created_at,
        })
    }

    fn replace(&mut self, draft: BillboardDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.label = draft.label;
        self.image_url = draft.image_url;
        Ok(())
    }

    fn id(&self) -> &BillboardId {
        &self.id
    }

    fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
