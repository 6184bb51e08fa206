//! # Listings
//!
//! The read side of the dashboard. [`ListingView`] loads one store's rows from
//! the catalog and projects them into display rows; the projections themselves
//! are pure functions in [`orders`] and [`rows`].

pub mod format;
pub mod orders;
pub mod rows;

pub use format::{long_date, Currency, PriceFormatter};
pub use orders::{aggregate, aggregate_all, AggregationError, OrderDisplayRow};
pub use rows::{BillboardRow, CategoryRow, ColorRow, ProductRow, SizeRow};

use crate::lifecycle::{Catalog, CatalogError};
use crate::model::{Billboard, Category, Color, Order, OrderItem, Product, Size, StoreId};
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListingError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

/// Display rows of one store, newest first.
#[derive(Clone)]
pub struct ListingView {
    catalog: Catalog,
    formatter: PriceFormatter,
}

impl ListingView {
    pub fn new(catalog: Catalog, formatter: PriceFormatter) -> Self {
        Self { catalog, formatter }
    }

    #[instrument(skip(self))]
    pub async fn billboards(&self, store_id: &StoreId) -> Result<Vec<BillboardRow>, ListingError> {
        let billboards = self.catalog.rows::<Billboard>(store_id).await?;
        Ok(billboards.iter().map(BillboardRow::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn categories(&self, store_id: &StoreId) -> Result<Vec<CategoryRow>, ListingError> {
        let categories = self.catalog.rows::<Category>(store_id).await?;
        let billboards = self.catalog.rows::<Billboard>(store_id).await?;
        Ok(rows::category_rows(&categories, &billboards)?)
    }

    #[instrument(skip(self))]
    pub async fn sizes(&self, store_id: &StoreId) -> Result<Vec<SizeRow>, ListingError> {
        let sizes = self.catalog.rows::<Size>(store_id).await?;
        Ok(sizes.iter().map(SizeRow::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn colors(&self, store_id: &StoreId) -> Result<Vec<ColorRow>, ListingError> {
        let colors = self.catalog.rows::<Color>(store_id).await?;
        Ok(colors.iter().map(ColorRow::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn products(&self, store_id: &StoreId) -> Result<Vec<ProductRow>, ListingError> {
        let products = self.catalog.rows::<Product>(store_id).await?;
        let categories = self.catalog.rows::<Category>(store_id).await?;
        let sizes = self.catalog.rows::<Size>(store_id).await?;
        let colors = self.catalog.rows::<Color>(store_id).await?;
        Ok(rows::product_rows(&products, &categories, &sizes, &colors, &self.formatter)?)
    }

    #[instrument(skip(self))]
    pub async fn orders(&self, store_id: &StoreId) -> Result<Vec<OrderDisplayRow>, ListingError> {
        let orders = self.catalog.rows::<Order>(store_id).await?;
        // Listings come newest first; product names follow item creation order.
        let mut items = self.catalog.rows::<OrderItem>(store_id).await?;
        items.reverse();
        let products = self.catalog.rows::<Product>(store_id).await?;
        Ok(aggregate_all(&orders, &items, &products, &self.formatter)?)
    }
}
