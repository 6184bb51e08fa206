use crate::descriptor::EntityKind;
use crate::framework::{FrameworkError, Reference, Resource, ResourceActor, ResourceClient};
use crate::model::{Billboard, Category, Color, Order, OrderItem, Product, Size, Store, StoreId};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

const ACTOR_BUFFER: usize = 32;

/// Failures of the in-memory catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("invalid {kind}: {reason}")]
    Invalid { kind: EntityKind, reason: String },

    /// A reference field points at a row that is missing or lives in another store.
    #[error("{0} does not exist in this store")]
    DanglingReference(Reference),

    /// Delete refused while rows of the `blocking` kinds still point at the target.
    #[error("{kind} is still referenced by {blocking:?}")]
    Conflict {
        kind: EntityKind,
        blocking: Vec<EntityKind>,
    },

    #[error("{kind} actor unavailable: {source}")]
    Unavailable {
        kind: EntityKind,
        source: FrameworkError,
    },
}

impl CatalogError {
    fn from_framework(kind: EntityKind, err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => CatalogError::NotFound { kind, id },
            FrameworkError::Invalid(e) => CatalogError::Invalid {
                kind,
                reason: e.to_string(),
            },
            source => CatalogError::Unavailable { kind, source },
        }
    }
}

/// Binds a row type to its actor inside a [`Catalog`].
pub trait Catalogued: Resource {
    fn client(catalog: &Catalog) -> &ResourceClient<Self>;
}

macro_rules! catalogued {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Catalogued for $ty {
                fn client(catalog: &Catalog) -> &ResourceClient<Self> {
                    &catalog.$field
                }
            }
        )*
    };
}

catalogued! {
    Store => stores,
    Billboard => billboards,
    Category => categories,
    Size => sizes,
    Color => colors,
    Product => products,
    Order => orders,
    OrderItem => order_items,
}

/// Runs `$body` with `$t` aliased to the row type of `$kind`.
macro_rules! by_kind {
    ($kind:expr, $t:ident => $body:expr) => {
        match $kind {
            EntityKind::Store => {
                type $t = Store;
                $body
            }
            EntityKind::Billboard => {
                type $t = Billboard;
                $body
            }
            EntityKind::Category => {
                type $t = Category;
                $body
            }
            EntityKind::Size => {
                type $t = Size;
                $body
            }
            EntityKind::Color => {
                type $t = Color;
                $body
            }
            EntityKind::Product => {
                type $t = Product;
                $body
            }
            EntityKind::Order => {
                type $t = Order;
                $body
            }
            EntityKind::OrderItem => {
                type $t = OrderItem;
                $body
            }
        }
    };
}

/// Cloneable handle to every resource actor of the catalog.
///
/// Reads go straight to the actors. Mutations are serialized by one write
/// lock so a reference check and the write it guards cannot interleave with
/// another mutation.
#[derive(Clone)]
pub struct Catalog {
    stores: ResourceClient<Store>,
    billboards: ResourceClient<Billboard>,
    categories: ResourceClient<Category>,
    sizes: ResourceClient<Size>,
    colors: ResourceClient<Color>,
    products: ResourceClient<Product>,
    orders: ResourceClient<Order>,
    order_items: ResourceClient<OrderItem>,
    write_lock: Arc<Mutex<()>>,
}

impl Catalog {
    /// Creates a row inside `store_id`. Stores ignore `store_id` and own themselves.
    pub async fn insert<T: Catalogued>(&self, store_id: &StoreId, draft: T::Draft) -> Result<T, CatalogError> {
        let _write = self.write_lock.lock().await;
        self.check_draft::<T>(store_id, &draft).await?;
        T::client(self)
            .create(store_id.clone(), draft)
            .await
            .map_err(|e| CatalogError::from_framework(T::KIND, e))
    }

    /// One row, provided it belongs to `store_id`.
    pub async fn fetch<T: Catalogued>(&self, store_id: &StoreId, id: &T::Id) -> Result<T, CatalogError> {
        let row = T::client(self)
            .get(id.clone())
            .await
            .map_err(|e| CatalogError::from_framework(T::KIND, e))?;
        match row {
            Some(row) if T::KIND == EntityKind::Store || row.store_id() == store_id => Ok(row),
            _ => Err(CatalogError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            }),
        }
    }

    /// Rows of one store, newest first. For stores, every store.
    pub async fn rows<T: Catalogued>(&self, store_id: &StoreId) -> Result<Vec<T>, CatalogError> {
        let scope = (T::KIND != EntityKind::Store).then(|| store_id.clone());
        T::client(self)
            .list(scope)
            .await
            .map_err(|e| CatalogError::from_framework(T::KIND, e))
    }

    /// Full-record replacement.
    pub async fn replace<T: Catalogued>(
        &self,
        store_id: &StoreId,
        id: &T::Id,
        draft: T::Draft,
    ) -> Result<T, CatalogError> {
        let _write = self.write_lock.lock().await;
        self.fetch::<T>(store_id, id).await?;
        self.check_draft::<T>(store_id, &draft).await?;
        T::client(self)
            .update(id.clone(), draft)
            .await
            .map_err(|e| CatalogError::from_framework(T::KIND, e))
    }

    /// Deletes a row unless a dependent kind still references it.
    pub async fn remove<T: Catalogued>(&self, store_id: &StoreId, id: &T::Id) -> Result<T, CatalogError> {
        let _write = self.write_lock.lock().await;
        self.fetch::<T>(store_id, id).await?;

        let blocking = self.blocking(T::KIND, &id.to_string()).await?;
        if !blocking.is_empty() {
            warn!(kind = %T::KIND, %id, ?blocking, "Delete refused");
            return Err(CatalogError::Conflict {
                kind: T::KIND,
                blocking,
            });
        }

        T::client(self)
            .delete(id.clone())
            .await
            .map_err(|e| CatalogError::from_framework(T::KIND, e))
    }

    /// Dependent kinds that still hold a reference to `kind`/`id`, in
    /// descriptor order.
    pub async fn blocking(&self, kind: EntityKind, id: &str) -> Result<Vec<EntityKind>, CatalogError> {
        let target = Reference::new(kind, id);
        let mut blocking = Vec::new();
        for &dependent in kind.descriptor().dependents {
            let count = by_kind!(dependent, T => {
                T::client(self)
                    .referencing(target.clone())
                    .await
                    .map_err(|e| CatalogError::from_framework(dependent, e))?
            });
            if count > 0 {
                blocking.push(dependent);
            }
        }
        Ok(blocking)
    }

    async fn check_draft<T: Catalogued>(&self, store_id: &StoreId, draft: &T::Draft) -> Result<(), CatalogError> {
        if T::KIND != EntityKind::Store {
            self.fetch::<Store>(store_id, store_id).await?;
        }
        for reference in T::draft_references(draft) {
            if !self.resolves(store_id, &reference).await? {
                return Err(CatalogError::DanglingReference(reference));
            }
        }
        Ok(())
    }

    async fn resolves(&self, store_id: &StoreId, reference: &Reference) -> Result<bool, CatalogError> {
        let id = reference.id.clone();
        by_kind!(reference.kind, T => {
            match self.fetch::<T>(store_id, &id.into()).await {
                Ok(_) => Ok(true),
                Err(CatalogError::NotFound { .. }) => Ok(false),
                Err(e) => Err(e),
            }
        })
    }

    // JSON surface used by the local transport.

    pub async fn create_json(&self, kind: EntityKind, store_id: &StoreId, body: Value) -> Result<Value, CatalogError> {
        by_kind!(kind, T => {
            let draft = parse_draft::<T>(body)?;
            encode(&self.insert::<T>(store_id, draft).await?)
        })
    }

    pub async fn get_json(&self, kind: EntityKind, store_id: &StoreId, id: &str) -> Result<Value, CatalogError> {
        by_kind!(kind, T => encode(&self.fetch::<T>(store_id, &id.to_string().into()).await?))
    }

    pub async fn list_json(&self, kind: EntityKind, store_id: &StoreId) -> Result<Value, CatalogError> {
        by_kind!(kind, T => encode(&self.rows::<T>(store_id).await?))
    }

    pub async fn update_json(
        &self,
        kind: EntityKind,
        store_id: &StoreId,
        id: &str,
        body: Value,
    ) -> Result<Value, CatalogError> {
        by_kind!(kind, T => {
            let draft = parse_draft::<T>(body)?;
            encode(&self.replace::<T>(store_id, &id.to_string().into(), draft).await?)
        })
    }

    pub async fn delete_json(&self, kind: EntityKind, store_id: &StoreId, id: &str) -> Result<Value, CatalogError> {
        by_kind!(kind, T => encode(&self.remove::<T>(store_id, &id.to_string().into()).await?))
    }
}

fn parse_draft<T: Resource>(body: Value) -> Result<T::Draft, CatalogError> {
    serde_json::from_value(body).map_err(|e| CatalogError::Invalid {
        kind: T::KIND,
        reason: e.to_string(),
    })
}

fn encode<S: serde::Serialize>(value: &S) -> Result<Value, CatalogError> {
    serde_json::to_value(value).map_err(|e| CatalogError::Invalid {
        kind: EntityKind::Store,
        reason: e.to_string(),
    })
}

/// Owns the resource actors behind a [`Catalog`].
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::new();
/// let catalog = system.catalog();
///
/// let store: Store = catalog.insert(&StoreId::new(""), StoreDraft { .. }).await?;
///
/// drop(catalog);
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    catalog: Catalog,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Spawns one actor per entity kind.
    pub fn new() -> Self {
        let mut handles = Vec::with_capacity(EntityKind::ALL.len());

        let (stores, billboards, categories, sizes, colors, products, orders, order_items) = (
            spawn::<Store>(&mut handles),
            spawn::<Billboard>(&mut handles),
            spawn::<Category>(&mut handles),
            spawn::<Size>(&mut handles),
            spawn::<Color>(&mut handles),
            spawn::<Product>(&mut handles),
            spawn::<Order>(&mut handles),
            spawn::<OrderItem>(&mut handles),
        );

        Self {
            catalog: Catalog {
                stores,
                billboards,
                categories,
                sizes,
                colors,
                products,
                orders,
                order_items,
                write_lock: Arc::new(Mutex::new(())),
            },
            handles,
        }
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog.clone()
    }

    /// Closes every actor and waits for it to stop.
    ///
    /// Actors only stop once every [`Catalog`] clone is gone, so callers drop
    /// theirs (and any transport holding one) first.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog...");
        drop(self.catalog);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}

impl Default for CatalogSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn<T: Resource>(handles: &mut Vec<tokio::task::JoinHandle<()>>) -> ResourceClient<T> {
    let (actor, client) = ResourceActor::<T>::new(ACTOR_BUFFER);
    handles.push(tokio::spawn(actor.run()));
    client
}
