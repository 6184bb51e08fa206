//! Catalog rows and the drafts used to create or replace them.
//!
//! Each row type implements [`Resource`](crate::framework::Resource) so the
//! in-memory catalog can hold it in a generic actor.

pub mod billboard;
pub mod category;
pub mod color;
pub mod id;
pub mod order;
pub mod product;
pub mod size;
pub mod store;
pub mod validation;

pub use billboard::*;
pub use category::*;
pub use color::*;
pub use id::*;
pub use order::*;
pub use product::*;
pub use size::*;
pub use store::*;
pub use validation::ValidationError;
