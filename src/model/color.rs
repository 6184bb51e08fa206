use crate::descriptor::EntityKind;
use crate::framework::Resource;
use crate::model::validation::{require, require_hex_color, ValidationError};
use crate::model::{ColorId, StoreId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A color option; `value` is a hex color like `#1a2b3c`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: ColorId,
    pub store_id: StoreId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorDraft {
    pub name: String,
    pub value: String,
}

impl ColorDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_hex_color("value", &self.value)
    }
}

impl Resource for Color {
    type Id = ColorId;
    type Draft = ColorDraft;

    const KIND: EntityKind = EntityKind::Color;

    fn from_draft(
        id: ColorId,
        store_id: StoreId,
        draft: ColorDraft,
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

    fn replace(&mut self, draft: ColorDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.name = draft.name;
        self.value = draft.value;
        Ok(())
    }

    fn id(&self) -> &ColorId {
        &self.id
    }

    fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
