//! # Generic Resource Actor
//!
//! `ResourceActor<T>` owns every row of one entity kind and processes requests
//! strictly one at a time, so the table needs no lock. Each actor runs in its
//! own Tokio task and stops when the last `ResourceClient` is dropped.

use crate::framework::client::ResourceClient;
use crate::framework::entity::Resource;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The server half of a resource: the row table plus the request receiver.
///
/// Rows are kept in insertion order as well as by id so listings come back
/// newest-first without depending on clock resolution.
pub struct ResourceActor<T: Resource> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    next_id: u32,
}

impl<T: Resource> ResourceActor<T> {
    /// Creates the actor and the client that talks to it.
    ///
    /// `buffer_size` bounds the request queue; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the event loop until every client is gone.
    pub async fn run(mut self) {
        let entity_type = T::KIND.descriptor().label;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create {
                    store_id,
                    draft,
                    respond_to,
                } => {
                    debug!(entity_type, %store_id, ?draft, "Create");
                    let id = T::Id::from(self.next_id);
                    match T::from_draft(id.clone(), store_id, draft, Utc::now()) {
                        Ok(item) => {
                            self.next_id += 1;
                            self.store.insert(id.clone(), item.clone());
                            self.order.push(id.clone());
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::Invalid(e)));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List {
                    store_id,
                    respond_to,
                } => {
                    let items: Vec<T> = self
                        .order
                        .iter()
                        .rev()
                        .filter_map(|id| self.store.get(id))
                        .filter(|item| store_id.as_ref().map_or(true, |s| item.store_id() == s))
                        .cloned()
                        .collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    draft,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?draft, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    match item.replace(draft) {
                        Ok(()) => {
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(item.clone()));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::Invalid(e)));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    match self.store.remove(&id) {
                        Some(item) => {
                            self.order.retain(|kept| kept != &id);
                            info!(entity_type, %id, size = self.store.len(), "Deleted");
                            let _ = respond_to.send(Ok(item));
                        }
                        None => {
                            warn!(entity_type, %id, "Not found");
                            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        }
                    }
                }
                ResourceRequest::Referencing { target, respond_to } => {
                    let count = self.store.values().filter(|item| item.refers_to(&target)).count();
                    debug!(entity_type, ?target, count, "Referencing");
                    let _ = respond_to.send(Ok(count));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
