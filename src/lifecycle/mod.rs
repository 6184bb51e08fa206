//! Process-level wiring: the in-memory catalog, configuration and tracing.

pub mod catalog_system;
pub mod config;
pub mod tracing;

pub use catalog_system::{Catalog, CatalogError, CatalogSystem, Catalogued};
pub use config::{AdminConfig, Backend, ConfigError};
pub use self::tracing::setup_tracing;
