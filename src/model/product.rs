use crate::descriptor::EntityKind;
use crate::framework::{Reference, Resource};
use crate::model::validation::{require, require_non_negative, ValidationError};
use crate::model::{CategoryId, ColorId, ProductId, SizeId, StoreId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sellable product.
///
/// `is_archived` hides the product from the storefront without deleting it;
/// rows are never soft-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub category_id: CategoryId,
    pub size_id: SizeId,
    pub color_id: ColorId,
    pub name: String,
    pub price: Decimal,
    pub is_featured: bool,
    pub is_archived: bool,
    pub images: Vec<ProductImage>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    pub size_id: SizeId,
    pub color_id: ColorId,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_archived: bool,
}

impl ProductDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_non_negative("price", self.price)?;
        require("categoryId", self.category_id.as_str())?;
        require("sizeId", self.size_id.as_str())?;
        require("colorId", self.color_id.as_str())?;
        self.images.iter().try_for_each(|image| require("images", &image.url))
    }
}

impl Resource for Product {
    type Id = ProductId;
    type Draft = ProductDraft;

    const KIND: EntityKind = EntityKind::Product;

    fn from_draft(
        id: ProductId,
        store_id: StoreId,
        draft: ProductDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            store_id,
            category_id: draft.category_id,
            size_id: draft.size_id,
            color_id: draft.color_id,
            name: draft.name,
            price: draft.price,
            is_featured: draft.is_featured,
            is_archived: draft.is_archived,
            images: draft.images,
            created_at,
        })
    }

    fn replace(&mut self, draft: ProductDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.category_id = draft.category_id;
        self.size_id = draft.size_id;
        self.color_id = draft.color_id;
        self.name = draft.name;
        self.price = draft.price;
        self.is_featured = draft.is_featured;
        self.is_archived = draft.is_archived;
        self.images = draft.images;
        Ok(())
    }

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn draft_references(draft: &ProductDraft) -> Vec<Reference> {
        vec![
            Reference::new(EntityKind::Category, &draft.category_id),
            Reference::new(EntityKind::Size, &draft.size_id),
            Reference::new(EntityKind::Color, &draft.color_id),
        ]
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new(EntityKind::Category, &self.category_id),
            Reference::new(EntityKind::Size, &self.size_id),
            Reference::new(EntityKind::Color, &self.color_id),
        ]
    }
}
