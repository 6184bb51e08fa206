//! # Entity Descriptors
//!
//! Static metadata for every entity kind in the catalog: where its endpoints
//! live, what the dashboard calls it, and which other kinds reference it.
//!
//! The orchestrator is written once and parameterized by these descriptors,
//! so adding a kind means adding a row here rather than another copy of the
//! create/update/delete flow.
//!
//! ```rust
//! use catalog_admin::descriptor::EntityKind;
//!
//! let billboards = EntityKind::Billboard.descriptor();
//! assert_eq!(billboards.collection_path("store_1"), "/api/store_1/billboards");
//! assert_eq!(billboards.instance_path("store_1", "billboard_7"), "/api/store_1/billboards/billboard_7");
//! assert_eq!(billboards.dependents, &[EntityKind::Category]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// One of the catalog's entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Store,
    Billboard,
    Category,
    Size,
    Color,
    Product,
    Order,
    OrderItem,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Store,
        EntityKind::Billboard,
        EntityKind::Category,
        EntityKind::Size,
        EntityKind::Color,
        EntityKind::Product,
        EntityKind::Order,
        EntityKind::OrderItem,
    ];

    /// Static metadata for this kind. Every kind has a descriptor.
    pub fn descriptor(self) -> &'static EntityDescriptor {
        match self {
            EntityKind::Store => &STORE,
            EntityKind::Billboard => &BILLBOARD,
            EntityKind::Category => &CATEGORY,
            EntityKind::Size => &SIZE,
            EntityKind::Color => &COLOR,
            EntityKind::Product => &PRODUCT,
            EntityKind::Order => &ORDER,
            EntityKind::OrderItem => &ORDER_ITEM,
        }
    }

    /// Resolves a URL path segment (`"billboards"`) back to its kind.
    pub fn from_segment(segment: &str) -> Option<EntityKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.descriptor().segment == segment)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().singular)
    }
}

/// Static metadata for one entity kind.
#[derive(Debug)]
pub struct EntityDescriptor {
    pub kind: EntityKind,
    /// Capitalized name used in notifications ("Billboard").
    pub label: &'static str,
    /// Lowercase singular ("billboard").
    pub singular: &'static str,
    /// Lowercase plural used in guidance text ("order items").
    pub plural: &'static str,
    /// URL path segment ("billboards").
    pub segment: &'static str,
    /// Route parameter name shown in the API reference ("billboardId").
    pub id_param: &'static str,
    /// The field an update most visibly changes ("label", "name").
    pub title_field: &'static str,
    /// Kinds whose rows reference this kind; any such row blocks deletion.
    pub dependents: &'static [EntityKind],
}

static STORE: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Store,
    label: "Store",
    singular: "store",
    plural: "stores",
    segment: "stores",
    id_param: "storeId",
    title_field: "name",
    dependents: &[
        EntityKind::Billboard,
        EntityKind::Category,
        EntityKind::Size,
        EntityKind::Color,
        EntityKind::Product,
        EntityKind::Order,
    ],
};

static BILLBOARD: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Billboard,
    label: "Billboard",
    singular: "billboard",
    plural: "billboards",
    segment: "billboards",
    id_param: "billboardId",
    title_field: "label",
    dependents: &[EntityKind::Category],
};

static CATEGORY: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Category,
    label: "Category",
    singular: "category",
    plural: "categories",
    segment: "categories",
    id_param: "categoryId",
    title_field: "name",
    dependents: &[EntityKind::Product],
};

static SIZE: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Size,
    label: "Size",
    singular: "size",
    plural: "sizes",
    segment: "sizes",
    id_param: "sizeId",
    title_field: "name",
    dependents: &[EntityKind::Product],
};

static COLOR: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Color,
    label: "Color",
    singular: "color",
    plural: "colors",
    segment: "colors",
    id_param: "colorId",
    title_field: "name",
    dependents: &[EntityKind::Product],
};

static PRODUCT: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Product,
    label: "Product",
    singular: "product",
    plural: "products",
    segment: "products",
    id_param: "productId",
    title_field: "name",
    dependents: &[EntityKind::OrderItem],
};

static ORDER: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Order,
    label: "Order",
    singular: "order",
    plural: "orders",
    segment: "orders",
    id_param: "orderId",
    title_field: "address",
    dependents: &[EntityKind::OrderItem],
};

static ORDER_ITEM: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::OrderItem,
    label: "Order item",
    singular: "order item",
    plural: "order items",
    segment: "order-items",
    id_param: "orderItemId",
    title_field: "productId",
    dependents: &[],
};

impl EntityDescriptor {
    /// `GET`/`POST` endpoint for the kind's collection inside one store.
    pub fn collection_path(&self, store_id: &str) -> String {
        match self.kind {
            EntityKind::Store => "/api/stores".to_string(),
            _ => format!("/api/{store_id}/{}", self.segment),
        }
    }

    /// `GET`/`PATCH`/`DELETE` endpoint for one instance.
    ///
    /// Stores are addressed by their own id; `store_id` and `id` coincide.
    pub fn instance_path(&self, store_id: &str, id: &str) -> String {
        match self.kind {
            EntityKind::Store => format!("/api/stores/{id}"),
            _ => format!("/api/{store_id}/{}/{id}", self.segment),
        }
    }

    /// Dashboard route of the kind's listing page.
    pub fn listing_route(&self, store_id: &str) -> String {
        match self.kind {
            EntityKind::Store => "/".to_string(),
            _ => format!("/{store_id}/{}", self.segment),
        }
    }

    /// Guidance shown when a delete is blocked by the given dependent kinds.
    ///
    /// An empty `blocking` list falls back to every configured dependent.
    pub fn integrity_guidance(&self, blocking: &[EntityKind]) -> String {
        let kinds = if blocking.is_empty() {
            self.dependents
        } else {
            blocking
        };
        let names: Vec<&str> = kinds.iter().map(|k| k.descriptor().plural).collect();
        format!(
            "Make sure you removed all {} using this {} first.",
            join_names(&names),
            self.singular
        )
    }

    /// The public endpoints of this kind, as listed in the dashboard's API panel.
    pub fn api_routes(&self, store_id: &str) -> Vec<ApiRoute> {
        let collection = self.collection_path(store_id);
        let instance = format!("{collection}/{{{}}}", self.id_param);
        vec![
            ApiRoute::public("GET", collection.clone()),
            ApiRoute::public("GET", instance.clone()),
            ApiRoute::admin("POST", collection),
            ApiRoute::admin("PATCH", instance.clone()),
            ApiRoute::admin("DELETE", instance),
        ]
    }
}

/// One row of the API reference panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRoute {
    pub method: &'static str,
    pub path: String,
    /// Reads are public; mutations require an authenticated store owner.
    pub admin_only: bool,
}

impl ApiRoute {
    fn public(method: &'static str, path: String) -> Self {
        Self { method, path, admin_only: false }
    }

    fn admin(method: &'static str, path: String) -> Self {
        Self { method, path, admin_only: true }
    }
}

fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
