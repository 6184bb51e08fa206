//! Display rows for the per-kind listing tables.

use crate::descriptor::EntityKind;
use crate::listing::format::{long_date, PriceFormatter};
use crate::listing::orders::AggregationError;
use crate::model::{Billboard, Category, Color, Product, Size};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardRow {
    pub id: String,
    pub label: String,
    pub created_at: String,
}

impl From<&Billboard> for BillboardRow {
    fn from(billboard: &Billboard) -> Self {
        Self {
            id: billboard.id.to_string(),
            label: billboard.label.clone(),
            created_at: long_date(billboard.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub billboard_label: String,
    pub created_at: String,
}

/// Shared by sizes and colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRow {
    pub id: String,
    pub name: String,
    pub value: String,
    pub created_at: String,
}

pub type SizeRow = ValueRow;
pub type ColorRow = ValueRow;

impl From<&Size> for ValueRow {
    fn from(size: &Size) -> Self {
        Self {
            id: size.id.to_string(),
            name: size.name.clone(),
            value: size.value.clone(),
            created_at: long_date(size.created_at),
        }
    }
}

impl From<&Color> for ValueRow {
    fn from(color: &Color) -> Self {
        Self {
            id: color.id.to_string(),
            name: color.name.clone(),
            value: color.value.clone(),
            created_at: long_date(color.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub is_featured: bool,
    pub is_archived: bool,
    pub price: String,
    pub category: String,
    pub size: String,
    /// The color's hex value, rendered as a swatch.
    pub color: String,
    pub created_at: String,
}

fn lookup<'a, T>(
    rows: &'a [T],
    kind: EntityKind,
    id: &str,
    id_of: impl Fn(&T) -> &str,
) -> Result<&'a T, AggregationError> {
    rows.iter()
        .find(|row| id_of(row) == id)
        .ok_or_else(|| AggregationError::DanglingReference {
            kind,
            id: id.to_string(),
        })
}

pub fn category_rows(categories: &[Category], billboards: &[Billboard]) -> Result<Vec<CategoryRow>, AggregationError> {
    categories
        .iter()
        .map(|category| {
            let billboard = lookup(billboards, EntityKind::Billboard, category.billboard_id.as_str(), |b| {
                b.id.as_str()
            })?;
            Ok(CategoryRow {
                id: category.id.to_string(),
                name: category.name.clone(),
                billboard_label: billboard.label.clone(),
                created_at: long_date(category.created_at),
            })
        })
        .collect()
}

pub fn product_rows(
    products: &[Product],
    categories: &[Category],
    sizes: &[Size],
    colors: &[Color],
    formatter: &PriceFormatter,
) -> Result<Vec<ProductRow>, AggregationError> {
    let categories: HashMap<&str, &Category> = categories.iter().map(|c| (c.id.as_str(), c)).collect();

    products
        .iter()
        .map(|product| {
            let category = categories
                .get(product.category_id.as_str())
                .ok_or_else(|| AggregationError::DanglingReference {
                    kind: EntityKind::Category,
                    id: product.category_id.to_string(),
                })?;
            let size = lookup(sizes, EntityKind::Size, product.size_id.as_str(), |s| s.id.as_str())?;
            let color = lookup(colors, EntityKind::Color, product.color_id.as_str(), |c| c.id.as_str())?;
            Ok(ProductRow {
                id: product.id.to_string(),
                name: product.name.clone(),
                is_featured: product.is_featured,
                is_archived: product.is_archived,
                price: formatter.format(product.price),
                category: category.name.clone(),
                size: size.name.clone(),
                color: color.value.clone(),
                created_at: long_date(product.created_at),
            })
        })
        .collect()
}
