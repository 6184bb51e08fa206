//! Generic resource framework backing the in-memory catalog.
//!
//! # Main Components
//!
//! - [`Resource`] - Trait every catalog row implements
//! - [`ResourceActor`] - Task that owns the rows of one kind
//! - [`ResourceClient`] - Cloneable handle for talking to an actor
//! - [`FrameworkError`] - Errors raised by the actors themselves

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::{Reference, Resource};
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
