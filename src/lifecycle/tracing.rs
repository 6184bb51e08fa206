//! # Observability & Tracing
//!
//! Structured logging for the dashboard with the `tracing` crate.
//!
//! Log levels come from `RUST_LOG`; the compact format hides module paths
//! because every event already carries `kind`, `store_id` and `id` fields.
//!
//! ```bash
//! # Notifications, route changes and actor lifecycle
//! RUST_LOG=info cargo run
//!
//! # Plus every request, draft payload and single-flight decision
//! RUST_LOG=debug cargo run
//!
//! # Only the orchestrator
//! RUST_LOG=catalog_admin::orchestrator=debug cargo run
//! ```
//!
//! A delete blocked by dependents reads like this at `info`:
//!
//! ```text
//! INFO dispatch{kind=category store_id=store_1 id="category_1"}: ⏳ Deleting category... Please wait.
//! WARN Delete refused kind=category id=category_1 blocking=[Product]
//! WARN dispatch{kind=category store_id=store_1 id="category_1"}: Failed error=category is still referenced
//! ERROR dispatch{kind=category store_id=store_1 id="category_1"}: ❌ Make sure you removed all products using this category first.
//! ```

/// Installs the global subscriber. Call once, at start-up.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
