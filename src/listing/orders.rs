//! # Order Aggregation
//!
//! Flattens normalized orders into display rows: the distinct product names
//! of an order's items joined in item order, the total as the sum of the
//! referenced prices (one unit per item), and a long-form creation date.
//!
//! The pipeline is pure. A product id that does not resolve is an invariant
//! violation of the catalog and surfaces as [`AggregationError`].

use crate::descriptor::EntityKind;
use crate::listing::format::{long_date, PriceFormatter};
use crate::model::{Order, OrderItem, Product, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

pub const PRODUCT_DELIMITER: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error("{kind} {id} referenced by a listing row does not exist")]
    DanglingReference { kind: EntityKind, id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDisplayRow {
    pub id: String,
    pub phone: String,
    pub address: String,
    pub is_paid: bool,
    pub products: String,
    pub total_price: String,
    pub created_at: String,
}

/// Products indexed by id for repeated lookups.
pub fn index_products(products: &[Product]) -> HashMap<&ProductId, &Product> {
    products.iter().map(|p| (&p.id, p)).collect()
}

/// Builds the row of one order. `items` may contain other orders' items and
/// must be in creation order.
pub fn aggregate(
    order: &Order,
    items: &[OrderItem],
    products: &HashMap<&ProductId, &Product>,
    formatter: &PriceFormatter,
) -> Result<OrderDisplayRow, AggregationError> {
    let mut names: Vec<&str> = Vec::new();
    let mut total = Decimal::ZERO;

    for item in items.iter().filter(|item| item.order_id == order.id) {
        let product = products
            .get(&item.product_id)
            .ok_or_else(|| AggregationError::DanglingReference {
                kind: EntityKind::Product,
                id: item.product_id.to_string(),
            })?;
        total += product.price;
        if !names.contains(&product.name.as_str()) {
            names.push(&product.name);
        }
    }

    Ok(OrderDisplayRow {
        id: order.id.to_string(),
        phone: order.phone.clone(),
        address: order.address.clone(),
        is_paid: order.is_paid,
        products: names.join(PRODUCT_DELIMITER),
        total_price: formatter.format(total),
        created_at: long_date(order.created_at),
    })
}

/// Rows for every order, in the order given.
pub fn aggregate_all(
    orders: &[Order],
    items: &[OrderItem],
    products: &[Product],
    formatter: &PriceFormatter,
) -> Result<Vec<OrderDisplayRow>, AggregationError> {
    let products = index_products(products);
    orders
        .iter()
        .map(|order| aggregate(order, items, &products, formatter))
        .collect()
}
