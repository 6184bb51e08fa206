//! # Generic Client
//!
//! The cloneable handle used to talk to a `ResourceActor`.

use crate::framework::entity::{Reference, Resource};
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use crate::model::StoreId;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for one `ResourceActor<T>`.
///
/// Holds only a sender, so clones are cheap and can be shared across tasks.
/// Every call fails with [`FrameworkError::ActorClosed`] once the actor is gone.
pub struct ResourceClient<T: Resource> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: `T` itself need not be `Clone` for the handle to be.
impl<T: Resource> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, store_id: StoreId, draft: T::Draft) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create {
            store_id,
            draft,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Rows of one store, newest first. `None` lists every store.
    pub async fn list(&self, store_id: Option<StoreId>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List {
            store_id,
            respond_to,
        })
        .await
    }

    pub async fn update(&self, id: T::Id, draft: T::Draft) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            draft,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    /// Number of rows that point at `target`.
    pub async fn referencing(&self, target: Reference) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Referencing { target, respond_to })
            .await
    }
}
