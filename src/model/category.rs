use crate::descriptor::EntityKind;
use crate::framework::{Reference, Resource};
use crate::model::validation::{require, ValidationError};
use crate::model::{BillboardId, CategoryId, StoreId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product category, shown under one billboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub store_id: StoreId,
    pub billboard_id: BillboardId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    pub billboard_id: BillboardId,
}

impl CategoryDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("billboardId", self.billboard_id.as_str())
    }
}

impl Resource for Category {
    type Id = CategoryId;
    type Draft = CategoryDraft;

    const KIND: EntityKind = EntityKind::Category;

    fn from_draft(
        id: CategoryId,
        store_id: StoreId,
        draft: CategoryDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            store_id,
            billboard_id: draft.billboard_id,
            name: draft.name,
            created_at,
        })
    }

    fn replace(&mut self, draft: CategoryDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.name = draft.name;
        self.billboard_id = draft.billboard_id;
        Ok(())
    }

    fn id(&self) -> &CategoryId {
        &self.id
    }

    fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn draft_references(draft: &CategoryDraft) -> Vec<Reference> {
        vec![Reference::new(EntityKind::Billboard, &draft.billboard_id)]
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new(EntityKind::Billboard, &self.billboard_id)]
    }
}
