//! # Action Orchestrator
//!
//! Drives one create, update or delete of one entity instance end-to-end:
//!
//! ```text
//! Idle ──trigger──▶ Submitting ──200──▶ Succeeded ──▶ Idle
//!                        │
//!                        └──other status / fault──▶ Failed ──▶ Idle
//! ```
//!
//! At most one mutation per [`InstanceKey`] is in flight; a trigger that
//! arrives while one is submitting is ignored. The loading notice shown on
//! entering `Submitting` is dismissed on every exit path, including when the
//! view that started the action is closed and the late response is dropped.

use crate::descriptor::EntityKind;
use crate::model::StoreId;
use crate::navigation::Router;
use crate::notify::{NotificationSequencer, Outcome};
use crate::orchestrator::error::ActionError;
use crate::orchestrator::integrity::{IntegrityPolicy, ReferentialIntegrityGuard};
use crate::transport::{ApiRequest, ApiResponse, Method, SuccessCriterion, Transport};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Shown for every failure that carries no integrity guidance.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

/// One user-submitted change. Drafts are full records.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { draft: Value },
    Update { id: String, draft: Value },
    Delete { id: String },
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create { .. } => MutationKind::Create,
            Mutation::Update { .. } => MutationKind::Update,
            Mutation::Delete { .. } => MutationKind::Delete,
        }
    }

    /// Target instance; `None` for a create.
    pub fn id(&self) -> Option<&str> {
        match self {
            Mutation::Create { .. } => None,
            Mutation::Update { id, .. } | Mutation::Delete { id } => Some(id),
        }
    }
}

/// Single-flight key. Creates share one key per kind and store, like a form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceKey {
    pub kind: EntityKind,
    pub store_id: StoreId,
    pub id: Option<String>,
}

impl InstanceKey {
    pub fn new(kind: EntityKind, store_id: &StoreId, id: Option<&str>) -> Self {
        Self {
            kind,
            store_id: store_id.clone(),
            id: id.map(str::to_string),
        }
    }

    pub fn of(kind: EntityKind, store_id: &StoreId, mutation: &Mutation) -> Self {
        Self::new(kind, store_id, mutation.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Succeeded {
        /// Where the router was sent; `None` when the view only refreshed.
        route: Option<String>,
        body: Value,
    },
    Failed {
        error: ActionError,
        /// The terminal notice shown to the user.
        message: String,
    },
    /// Another mutation for the same instance was already submitting.
    Ignored,
    /// The view closed before the response arrived; nothing was applied.
    Discarded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionReport {
    pub key: InstanceKey,
    pub mutation: MutationKind,
    pub outcome: ActionOutcome,
}

impl ActionReport {
    /// The terminal state reached, or `Idle` when no attempt completed.
    pub fn state(&self) -> ActionState {
        match self.outcome {
            ActionOutcome::Succeeded { .. } => ActionState::Succeeded,
            ActionOutcome::Failed { .. } => ActionState::Failed,
            ActionOutcome::Ignored | ActionOutcome::Discarded => ActionState::Idle,
        }
    }

    pub fn guidance(&self) -> Option<&str> {
        match &self.outcome {
            ActionOutcome::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// The lifetime of the view that started an action.
///
/// Closing it makes in-flight actions drop their responses instead of
/// refreshing or navigating a view that no longer exists.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Handles the orchestrator needs from its surroundings, built once at
/// start-up and passed in.
#[derive(Clone)]
pub struct ActionContext {
    pub transport: Arc<dyn Transport>,
    pub notifier: NotificationSequencer,
    pub router: Arc<dyn Router>,
}

struct Inner {
    context: ActionContext,
    guard: ReferentialIntegrityGuard,
    success: SuccessCriterion,
    in_flight: Mutex<HashSet<InstanceKey>>,
}

/// The generic mutation engine. Clones share the single-flight registry.
#[derive(Clone)]
pub struct ActionOrchestrator {
    inner: Arc<Inner>,
}

impl ActionOrchestrator {
    pub fn new(context: ActionContext) -> Self {
        Self::with_policies(context, SuccessCriterion::default(), IntegrityPolicy::default())
    }

    pub fn with_policies(context: ActionContext, success: SuccessCriterion, integrity: IntegrityPolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                context,
                guard: ReferentialIntegrityGuard::new(integrity),
                success,
                in_flight: Mutex::new(HashSet::new()),
            }),
        }
    }

    pub fn context(&self) -> &ActionContext {
        &self.inner.context
    }

    /// `Submitting` while a mutation for `key` is in flight, otherwise `Idle`.
    pub fn state(&self, key: &InstanceKey) -> ActionState {
        if self.in_flight().contains(key) {
            ActionState::Submitting
        } else {
            ActionState::Idle
        }
    }

    pub fn is_submitting(&self, key: &InstanceKey) -> bool {
        self.state(key) == ActionState::Submitting
    }

    /// Runs one mutation to a terminal state. Never returns an error: every
    /// failure becomes a notice and an [`ActionOutcome::Failed`].
    #[instrument(skip_all, fields(kind = %kind, store_id = %store_id, id = mutation.id()))]
    pub async fn dispatch(
        &self,
        view: &ViewScope,
        kind: EntityKind,
        store_id: &StoreId,
        mutation: Mutation,
    ) -> ActionReport {
        let key = InstanceKey::of(kind, store_id, &mutation);
        let mutation_kind = mutation.kind();
        let report = |outcome| ActionReport {
            key: key.clone(),
            mutation: mutation_kind,
            outcome,
        };

        let Some(_slot) = self.acquire(&key) else {
            debug!("Already submitting, trigger ignored");
            return report(ActionOutcome::Ignored);
        };
        if view.is_closed() {
            return report(ActionOutcome::Discarded);
        }

        let descriptor = kind.descriptor();
        let pending = self.inner.context.notifier.pending(loading_message(kind, mutation_kind));
        let request = build_request(kind, store_id, mutation);

        let result = tokio::select! {
            biased;
            _ = view.token.cancelled() => {
                info!("View closed, response discarded");
                return report(ActionOutcome::Discarded);
            }
            result = self.inner.context.transport.send(request) => result,
        };

        let result = match result {
            Ok(response) if self.inner.success.is_success(response.status) => Ok(response),
            Ok(response) => Err(ActionError::from_response(kind, &response)),
            Err(fault) => Err(ActionError::Transport(fault)),
        };

        match result {
            Ok(ApiResponse { status, body, .. }) => {
                info!(status, "Succeeded");
                pending.finish(Outcome::Success(success_message(kind, mutation_kind)));

                let router = &self.inner.context.router;
                router.refresh();
                let route = success_route(kind, store_id, mutation_kind, &body);
                if let Some(route) = &route {
                    router.push(route);
                }
                report(ActionOutcome::Succeeded { route, body })
            }
            Err(error) => {
                warn!(%error, "Failed");
                let message = self
                    .inner
                    .guard
                    .explain(descriptor.kind, mutation_kind, &error)
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string());
                pending.finish(Outcome::Error(message.clone()));
                report(ActionOutcome::Failed { error, message })
            }
        }
    }

    fn acquire(&self, key: &InstanceKey) -> Option<Slot> {
        if !self.in_flight().insert(key.clone()) {
            return None;
        }
        debug!("Submitting");
        Some(Slot {
            orchestrator: self.clone(),
            key: key.clone(),
        })
    }

    fn in_flight(&self) -> MutexGuard<'_, HashSet<InstanceKey>> {
        self.inner.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the single-flight slot on every exit path.
struct Slot {
    orchestrator: ActionOrchestrator,
    key: InstanceKey,
}

impl Drop for Slot {
    fn drop(&mut self) {
        self.orchestrator.in_flight().remove(&self.key);
    }
}

fn build_request(kind: EntityKind, store_id: &StoreId, mutation: Mutation) -> ApiRequest {
    let descriptor = kind.descriptor();
    let store = store_id.as_str();
    match mutation {
        Mutation::Create { draft } => {
            ApiRequest::new(Method::Post, descriptor.collection_path(store)).with_body(draft)
        }
        Mutation::Update { id, draft } => {
            ApiRequest::new(Method::Patch, descriptor.instance_path(store, &id)).with_body(draft)
        }
        Mutation::Delete { id } => ApiRequest::new(Method::Delete, descriptor.instance_path(store, &id)),
    }
}

pub fn loading_message(kind: EntityKind, mutation: MutationKind) -> String {
    let descriptor = kind.descriptor();
    match mutation {
        MutationKind::Create => format!("Creating {}... Please wait.", descriptor.singular),
        MutationKind::Update => format!(
            "Changing {} {}... Please wait.",
            descriptor.singular, descriptor.title_field
        ),
        MutationKind::Delete => format!("Deleting {}... Please wait.", descriptor.singular),
    }
}

pub fn success_message(kind: EntityKind, mutation: MutationKind) -> String {
    let label = kind.descriptor().label;
    match mutation {
        MutationKind::Create => format!("{label} created."),
        MutationKind::Update => format!("{label} updated."),
        MutationKind::Delete => format!("{label} deleted!"),
    }
}

/// Where to go after a success; `None` stays on the refreshed view.
///
/// A new store opens its own dashboard, a deleted store returns to the root,
/// and other deletes stay on their listing.
pub fn success_route(kind: EntityKind, store_id: &StoreId, mutation: MutationKind, body: &Value) -> Option<String> {
    match (kind, mutation) {
        (EntityKind::Store, MutationKind::Create) => body
            .get("id")
            .and_then(Value::as_str)
            .map(|id| format!("/{id}")),
        (EntityKind::Store, MutationKind::Update) => None,
        (EntityKind::Store, MutationKind::Delete) => Some("/".to_string()),
        (_, MutationKind::Delete) => None,
        (_, _) => Some(kind.descriptor().listing_route(store_id.as_str())),
    }
}
