//! Orders placed through the storefront and the items they contain.
//!
//! Totals are never stored: an order's total is derived from its items by
//! the listing pipeline. Each item stands for exactly one unit of a product.

use crate::descriptor::EntityKind;
use crate::framework::{Reference, Resource};
use crate::model::validation::{require, ValidationError};
use crate::model::{OrderId, OrderItemId, ProductId, StoreId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub store_id: StoreId,
    pub phone: String,
    pub address: String,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub is_paid: bool,
}

impl Resource for Order {
    type Id = OrderId;
    type Draft = OrderDraft;

    const KIND: EntityKind = EntityKind::Order;

    /// Checkout creates orders before contact details are known, so empty
    /// phone and address are accepted.
    fn from_draft(
        id: OrderId,
        store_id: StoreId,
        draft: OrderDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            store_id,
            phone: draft.phone,
            address: draft.address,
            is_paid: draft.is_paid,
            created_at,
        })
    }

    fn replace(&mut self, draft: OrderDraft) -> Result<(), ValidationError> {
        self.phone = draft.phone;
        self.address = draft.address;
        self.is_paid = draft.is_paid;
        Ok(())
    }

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub store_id: StoreId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDraft {
    pub order_id: OrderId,
    pub product_id: ProductId,
}

impl OrderItemDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("orderId", self.order_id.as_str())?;
        require("productId", self.product_id.as_str())
    }
}

impl Resource for OrderItem {
    type Id = OrderItemId;
    type Draft = OrderItemDraft;

    const KIND: EntityKind = EntityKind::OrderItem;

    fn from_draft(
        id: OrderItemId,
        store_id: StoreId,
        draft: OrderItemDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            store_id,
            order_id: draft.order_id,
            product_id: draft.product_id,
            created_at,
        })
    }

    fn replace(&mut self, draft: OrderItemDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.order_id = draft.order_id;
        self.product_id = draft.product_id;
        Ok(())
    }

    fn id(&self) -> &OrderItemId {
        &self.id
    }

    fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn draft_references(draft: &OrderItemDraft) -> Vec<Reference> {
        vec![
            Reference::new(EntityKind::Order, &draft.order_id),
            Reference::new(EntityKind::Product, &draft.product_id),
        ]
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new(EntityKind::Order, &self.order_id),
            Reference::new(EntityKind::Product, &self.product_id),
        ]
    }
}
