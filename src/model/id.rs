//! Newtype ids for type-safe entity references.
//!
//! Use the `define_id!` macro to create string-backed id wrappers so a
//! `CategoryId` can never be passed where a `ProductId` is expected.

/// Defines a serde-transparent string id with a generated-id prefix.
///
/// ```rust
/// # use catalog_admin::define_id;
/// define_id!(WidgetId, "widget");
///
/// assert_eq!(WidgetId::from(3).as_str(), "widget_3");
/// assert_eq!(WidgetId::new("w-9").to_string(), "w-9");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        /// Sequential ids handed out by the in-memory catalog.
        impl From<u32> for $name {
            fn from(n: u32) -> Self {
                Self(format!("{}_{}", $prefix, n))
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(StoreId, "store");
define_id!(BillboardId, "billboard");
define_id!(CategoryId, "category");
define_id!(SizeId, "size");
define_id!(ColorId, "color");
define_id!(ProductId, "product");
define_id!(OrderId, "order");
define_id!(OrderItemId, "item");
