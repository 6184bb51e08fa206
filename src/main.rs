//! # Catalog Admin Demo
//!
//! Runs three end-to-end scenarios through the orchestrator:
//!
//! 1. **A**: an order of two products is listed with its joined names and total.
//! 2. **B**: deleting a category still used by products is refused with guidance.
//! 3. **C**: creating a billboard succeeds and returns to the billboard listing.
//!
//! The backend is chosen by `ADMIN_BACKEND`; see [`catalog_admin::lifecycle::config`].

use catalog_admin::descriptor::EntityKind;
use catalog_admin::lifecycle::{setup_tracing, AdminConfig, Backend, Catalog, CatalogSystem};
use catalog_admin::listing::{ListingView, PriceFormatter};
use catalog_admin::model::{Order, OrderDraft, OrderItem, OrderItemDraft, ProductId, StoreId};
use catalog_admin::navigation::TracingRouter;
use catalog_admin::notify::{NotificationSequencer, TracingSink};
use catalog_admin::orchestrator::{
    copy_id, ActionContext, ActionOrchestrator, ActionOutcome, ConfirmationGate, MemoryClipboard, Mutation, ViewScope,
};
use catalog_admin::transport::http::HttpTransport;
use catalog_admin::transport::local::LocalTransport;
use catalog_admin::transport::Transport;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AdminConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting catalog admin demo");

    let system = CatalogSystem::new();
    let (transport, catalog): (Arc<dyn Transport>, Option<Catalog>) = match config.backend {
        Backend::Local => (
            Arc::new(LocalTransport::new(system.catalog())) as Arc<dyn Transport>,
            Some(system.catalog()),
        ),
        Backend::Http => {
            let http = HttpTransport::new(&config.api_url, config.request_timeout).map_err(|e| e.to_string())?;
            (Arc::new(http) as Arc<dyn Transport>, None)
        }
    };

    let notifier = NotificationSequencer::new(Arc::new(TracingSink));
    let orchestrator = ActionOrchestrator::with_policies(
        ActionContext {
            transport,
            notifier: notifier.clone(),
            router: Arc::new(TracingRouter),
        },
        config.success,
        config.integrity,
    );
    let view = ViewScope::new();
    let demo = Demo {
        orchestrator: &orchestrator,
        view: &view,
    };

    // Seed a store the way an owner would, through the dashboard forms.
    let store_id = StoreId::new(demo.create(EntityKind::Store, &StoreId::new(""), json!({ "name": "Demo Store" })).await?);
    let billboard = demo
        .create(EntityKind::Billboard, &store_id, json!({ "label": "Summer", "imageUrl": "https://img/summer.png" }))
        .await?;
    let category = demo
        .create(EntityKind::Category, &store_id, json!({ "name": "Shirts", "billboardId": billboard }))
        .await?;
    let size = demo
        .create(EntityKind::Size, &store_id, json!({ "name": "Medium", "value": "M" }))
        .await?;
    let color = demo
        .create(EntityKind::Color, &store_id, json!({ "name": "Navy", "value": "#000080" }))
        .await?;
    let mut products = Vec::new();
    for (name, price) in [("Product A", "19.99"), ("Product B", "5.00")] {
        let id = demo
            .create(
                EntityKind::Product,
                &store_id,
                json!({
                    "name": name,
                    "price": price,
                    "categoryId": category,
                    "sizeId": size,
                    "colorId": color,
                    "images": [{ "url": "https://img/product.png" }],
                }),
            )
            .await?;
        products.push(ProductId::new(id));
    }

    copy_id(&notifier, &MemoryClipboard::new(), EntityKind::Billboard, &billboard).map_err(|e| e.to_string())?;

    // Scenario A: order aggregation.
    match &catalog {
        Some(catalog) => {
            let span = info_span!("scenario_a");
            async {
                // Orders arrive through checkout, not the dashboard.
                let order: Order = catalog
                    .insert(
                        &store_id,
                        OrderDraft {
                            phone: "555-0100".into(),
                            address: "1 Main St".into(),
                            is_paid: true,
                        },
                    )
                    .await
                    .map_err(|e| e.to_string())?;
                for product_id in &products {
                    catalog
                        .insert::<OrderItem>(
                            &store_id,
                            OrderItemDraft {
                                order_id: order.id.clone(),
                                product_id: product_id.clone(),
                            },
                        )
                        .await
                        .map_err(|e| e.to_string())?;
                }

                let listing = ListingView::new(catalog.clone(), PriceFormatter::new(config.currency));
                for row in listing.orders(&store_id).await.map_err(|e| e.to_string())? {
                    info!(products = %row.products, total = %row.total_price, created = %row.created_at, "Order row");
                }
                Ok::<_, String>(())
            }
            .instrument(span)
            .await?;
        }
        None => warn!("Scenario A needs the local catalog, skipped"),
    }

    // Scenario B: blocked delete behind the confirmation gate.
    let gate = ConfirmationGate::new(orchestrator.clone(), EntityKind::Category, &store_id, category.clone());
    gate.open();
    if let Some(report) = gate.confirm(&view).instrument(info_span!("scenario_b")).await {
        info!(state = ?report.state(), guidance = ?report.guidance(), gate = ?gate.state(), "Category delete");
    }

    // Scenario C: billboard create returns to the listing.
    let report = orchestrator
        .dispatch(
            &view,
            EntityKind::Billboard,
            &store_id,
            Mutation::Create {
                draft: json!({ "label": "Winter", "imageUrl": "https://img/winter.png" }),
            },
        )
        .instrument(info_span!("scenario_c"))
        .await;
    if let ActionOutcome::Succeeded { route, .. } = &report.outcome {
        info!(state = ?report.state(), ?route, "Billboard create");
    }

    for route in EntityKind::Billboard.descriptor().api_routes(store_id.as_str()) {
        info!(method = route.method, path = %route.path, admin_only = route.admin_only, "API");
    }

    view.close();
    drop(gate);
    drop(demo);
    drop(orchestrator);
    drop(catalog);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}

struct Demo<'a> {
    orchestrator: &'a ActionOrchestrator,
    view: &'a ViewScope,
}

impl Demo<'_> {
    /// Creates a row and returns its id.
    async fn create(&self, kind: EntityKind, store_id: &StoreId, draft: Value) -> Result<String, String> {
        let report = self
            .orchestrator
            .dispatch(self.view, kind, store_id, Mutation::Create { draft })
            .await;
        match report.outcome {
            ActionOutcome::Succeeded { body, .. } => body
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| format!("{kind} created without an id")),
            other => Err(format!("could not create {kind}: {other:?}")),
        }
    }
}
