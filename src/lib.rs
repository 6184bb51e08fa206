//! # Catalog Admin
//!
//! > **Entity lifecycle orchestration for a multi-store catalog dashboard.**
//!
//! A store owns billboards, categories, sizes, colors, products and orders.
//! This crate is the part of its admin dashboard that has real state: how
//! create/update/delete actions are submitted, guarded against double
//! submission, confirmed before deletes, explained when a delete is blocked
//! by dependents, and how orders are flattened into display rows.
//!
//! ## 🏗️ Design
//!
//! ### One engine, many kinds
//! Every kind is described by a static [`EntityDescriptor`](descriptor::EntityDescriptor):
//! its endpoints, its wording and the kinds that depend on it. The
//! [`ActionOrchestrator`](orchestrator::ActionOrchestrator) is written once
//! against descriptors, so billboards and colors share the same state machine.
//!
//! ### Explicit handles
//! Notifications, navigation and the transport are passed in through an
//! [`ActionContext`](orchestrator::ActionContext) built at start-up. Tests
//! swap them for [`NoticeLog`](notify::NoticeLog),
//! [`RouteLog`](navigation::RouteLog) and
//! [`MockTransport`](transport::mock::MockTransport).
//!
//! ### Actors for the in-memory catalog
//! The local backend keeps each kind in a generic
//! [`ResourceActor<T>`](framework::ResourceActor) that processes requests one
//! at a time. [`CatalogSystem`](lifecycle::CatalogSystem) spawns them and
//! enforces referential integrity on top.
//!
//! ## 🗺️ Module Tour
//!
//! - [`descriptor`]: entity kinds and their metadata.
//! - [`model`]: typed rows, drafts and ids.
//! - [`framework`]: the generic resource actor and client.
//! - [`lifecycle`]: catalog wiring, configuration, tracing.
//! - [`transport`]: HTTP, local and mock request/response transports.
//! - [`orchestrator`]: the mutation engine, confirmation gate, integrity guard, clipboard.
//! - [`notify`] / [`navigation`]: notification sequencing and router handles.
//! - [`listing`]: display rows, including the order aggregation pipeline.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo scenarios against the in-memory catalog
//! RUST_LOG=info cargo run
//!
//! # Against a running admin API
//! ADMIN_BACKEND=http ADMIN_API_URL=http://localhost:3000 cargo run
//! ```

pub mod descriptor;
pub mod framework;
pub mod lifecycle;
pub mod listing;
pub mod model;
pub mod navigation;
pub mod notify;
pub mod orchestrator;
pub mod transport;
