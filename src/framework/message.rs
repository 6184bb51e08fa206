//! # Generic Messages
//!
//! The request enum exchanged between a `ResourceClient` and its
//! `ResourceActor`. Every variant carries a oneshot sender for the reply.

use crate::framework::entity::{Reference, Resource};
use crate::framework::error::FrameworkError;
use crate::model::StoreId;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Operations a resource actor understands.
///
/// - **Create** builds a row from a draft inside a store.
/// - **Get** / **List** read rows; `List { store_id: None }` spans all stores.
/// - **Update** replaces the full record.
/// - **Delete** removes the row and returns it.
/// - **Referencing** counts rows that point at `target`.
#[derive(Debug)]
pub enum ResourceRequest<T: Resource> {
    Create {
        store_id: StoreId,
        draft: T::Draft,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        store_id: Option<StoreId>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        draft: T::Draft,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
    Referencing {
        target: Reference,
        respond_to: Response<usize>,
    },
}
