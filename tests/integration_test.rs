use catalog_admin::descriptor::EntityKind;
use catalog_admin::lifecycle::{Catalog, CatalogSystem};
use catalog_admin::listing::{ListingView, PriceFormatter};
use catalog_admin::model::{Order, OrderDraft, OrderItem, OrderItemDraft, ProductId, StoreId};
use catalog_admin::navigation::{RouteEvent, RouteLog};
use catalog_admin::notify::{NoticeLevel, NoticeLog, NotificationSequencer};
use catalog_admin::orchestrator::{
    ActionContext, ActionError, ActionOrchestrator, ActionOutcome, ActionState, ConfirmationGate, GateState,
    IntegrityPolicy, Mutation, ViewScope,
};
use catalog_admin::transport::local::LocalTransport;
use catalog_admin::transport::SuccessCriterion;
use serde_json::{json, Value};
use std::sync::Arc;

struct Harness {
    system: CatalogSystem,
    orchestrator: ActionOrchestrator,
    notices: NoticeLog,
    routes: RouteLog,
    view: ViewScope,
}

impl Harness {
    fn new() -> Self {
        Self::with_policy(IntegrityPolicy::Structured)
    }

    fn with_policy(integrity: IntegrityPolicy) -> Self {
        let system = CatalogSystem::new();
        let notices = NoticeLog::new();
        let routes = RouteLog::new();
        let orchestrator = ActionOrchestrator::with_policies(
            ActionContext {
                transport: Arc::new(LocalTransport::new(system.catalog())),
                notifier: NotificationSequencer::new(Arc::new(notices.clone())),
                router: Arc::new(routes.clone()),
            },
            SuccessCriterion::ExactOk,
            integrity,
        );
        Self {
            system,
            orchestrator,
            notices,
            routes,
            view: ViewScope::new(),
        }
    }

    fn catalog(&self) -> Catalog {
        self.system.catalog()
    }

    async fn create(&self, kind: EntityKind, store_id: &str, draft: Value) -> String {
        let report = self
            .orchestrator
            .dispatch(&self.view, kind, &StoreId::new(store_id), Mutation::Create { draft })
            .await;
        match report.outcome {
            ActionOutcome::Succeeded { body, .. } => body["id"].as_str().expect("created row has an id").to_string(),
            other => panic!("create {kind} failed: {other:?}"),
        }
    }

    /// A store with one billboard, category, size, color and two products.
    async fn seed(&self) -> Seed {
        let store = self.create(EntityKind::Store, "", json!({ "name": "Demo" })).await;
        let billboard = self
            .create(EntityKind::Billboard, &store, json!({ "label": "Summer", "imageUrl": "https://img/s.png" }))
            .await;
        let category = self
            .create(EntityKind::Category, &store, json!({ "name": "Shirts", "billboardId": billboard }))
            .await;
        let size = self
            .create(EntityKind::Size, &store, json!({ "name": "Medium", "value": "M" }))
            .await;
        let color = self
            .create(EntityKind::Color, &store, json!({ "name": "Navy", "value": "#000080" }))
            .await;
        let mut products = Vec::new();
        for (name, price) in [("Product A", "19.99"), ("Product B", "5.00")] {
            products.push(
                self.create(
                    EntityKind::Product,
                    &store,
                    json!({
                        "name": name,
                        "price": price,
                        "categoryId": category,
                        "sizeId": size,
                        "colorId": color,
                    }),
                )
                .await,
            );
        }
        Seed {
            store,
            billboard,
            category,
            products,
        }
    }
}

struct Seed {
    store: String,
    billboard: String,
    category: String,
    products: Vec<String>,
}

#[tokio::test]
async fn test_scenario_a_order_display_row() {
    let harness = Harness::new();
    let seed = harness.seed().await;
    let catalog = harness.catalog();
    let store_id = StoreId::new(&seed.store);

    let order: Order = catalog
        .insert(
            &store_id,
            OrderDraft {
                phone: "555-0100".into(),
                address: "1 Main St".into(),
                is_paid: false,
            },
        )
        .await
        .unwrap();
    for product in &seed.products {
        catalog
            .insert::<OrderItem>(
                &store_id,
                OrderItemDraft {
                    order_id: order.id.clone(),
                    product_id: ProductId::new(product.as_str()),
                },
            )
            .await
            .unwrap();
    }

    let listing = ListingView::new(catalog, PriceFormatter::default());
    let rows = listing.orders(&store_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].products, "Product A, Product B");
    assert_eq!(rows[0].total_price, "$24.99");
    assert_eq!(rows[0].phone, "555-0100");
    assert!(!rows[0].is_paid);

    assert_eq!(listing.orders(&store_id).await.unwrap(), rows);
}

#[tokio::test]
async fn test_scenario_b_blocked_category_delete() {
    let harness = Harness::new();
    let seed = harness.seed().await;
    let store_id = StoreId::new(&seed.store);

    let gate = ConfirmationGate::new(harness.orchestrator.clone(), EntityKind::Category, &store_id, &seed.category);
    assert!(gate.open());
    let report = gate.confirm(&harness.view).await.unwrap();

    assert_eq!(report.state(), ActionState::Failed);
    assert_eq!(gate.state(), GateState::Closed);
    let ActionOutcome::Failed { error, message } = &report.outcome else {
        panic!("expected failure");
    };
    assert_eq!(
        error,
        &ActionError::IntegrityConflict {
            kind: EntityKind::Category,
            blocking: vec![EntityKind::Product],
        }
    );
    assert_eq!(message, "Make sure you removed all products using this category first.");
    assert_eq!(
        harness.notices.messages(NoticeLevel::Error),
        vec!["Make sure you removed all products using this category first."]
    );
    assert_eq!(harness.notices.live_loading(), 0);

    // The category survived.
    let listing = ListingView::new(harness.catalog(), PriceFormatter::default());
    assert_eq!(listing.categories(&store_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_scenario_c_billboard_create_navigates_to_listing() {
    let harness = Harness::new();
    let seed = harness.seed().await;
    let store_id = StoreId::new(&seed.store);

    let report = harness
        .orchestrator
        .dispatch(
            &harness.view,
            EntityKind::Billboard,
            &store_id,
            Mutation::Create {
                draft: json!({ "label": "Winter", "imageUrl": "https://img/w.png" }),
            },
        )
        .await;

    assert_eq!(report.state(), ActionState::Succeeded);
    let expected = format!("/{}/billboards", seed.store);
    assert!(matches!(&report.outcome, ActionOutcome::Succeeded { route: Some(route), .. } if *route == expected));
    assert_eq!(harness.routes.current(), Some(expected));
    assert_eq!(harness.notices.messages(NoticeLevel::Success).last().map(String::as_str), Some("Billboard created."));

    let listing = ListingView::new(harness.catalog(), PriceFormatter::default());
    let billboards = listing.billboards(&store_id).await.unwrap();
    assert_eq!(billboards[0].label, "Winter");
    assert_eq!(billboards[1].id, seed.billboard);
}

#[tokio::test]
async fn test_delete_after_dependents_removed() {
    let harness = Harness::new();
    let seed = harness.seed().await;
    let store_id = StoreId::new(&seed.store);

    for product in &seed.products {
        let report = harness
            .orchestrator
            .dispatch(&harness.view, EntityKind::Product, &store_id, Mutation::Delete { id: product.clone() })
            .await;
        assert_eq!(report.state(), ActionState::Succeeded);
    }

    let routes_before = harness.routes.events().len();
    let report = harness
        .orchestrator
        .dispatch(
            &harness.view,
            EntityKind::Category,
            &store_id,
            Mutation::Delete {
                id: seed.category.clone(),
            },
        )
        .await;
    assert_eq!(report.state(), ActionState::Succeeded);
    // Deletes stay on the listing and only refresh it.
    assert_eq!(harness.routes.events()[routes_before..], [RouteEvent::Refresh]);
    assert_eq!(harness.notices.messages(NoticeLevel::Success).last().map(String::as_str), Some("Category deleted!"));
}

#[tokio::test]
async fn test_store_lifecycle_routes() {
    let harness = Harness::new();
    let store = harness.create(EntityKind::Store, "", json!({ "name": "Pop-up" })).await;
    assert_eq!(harness.routes.current(), Some(format!("/{store}")));

    let store_id = StoreId::new(&store);
    let report = harness
        .orchestrator
        .dispatch(
            &harness.view,
            EntityKind::Store,
            &store_id,
            Mutation::Update {
                id: store.clone(),
                draft: json!({ "name": "Flagship" }),
            },
        )
        .await;
    assert!(matches!(report.outcome, ActionOutcome::Succeeded { route: None, .. }));

    let report = harness
        .orchestrator
        .dispatch(&harness.view, EntityKind::Store, &store_id, Mutation::Delete { id: store.clone() })
        .await;
    assert_eq!(report.state(), ActionState::Succeeded);
    assert_eq!(harness.routes.current(), Some("/".to_string()));
}

#[tokio::test]
async fn test_invalid_draft_gets_generic_message() {
    let harness = Harness::new();
    let seed = harness.seed().await;

    let report = harness
        .orchestrator
        .dispatch(
            &harness.view,
            EntityKind::Color,
            &StoreId::new(&seed.store),
            Mutation::Create {
                draft: json!({ "name": "Red", "value": "red" }),
            },
        )
        .await;
    assert!(matches!(
        report.outcome,
        ActionOutcome::Failed {
            error: ActionError::NonSuccess { status: 400, .. },
            ..
        }
    ));
    assert_eq!(report.guidance(), Some("Something went wrong. Please try again."));
}

#[tokio::test]
async fn test_presumed_policy_blames_dependents_for_missing_row() {
    let harness = Harness::with_policy(IntegrityPolicy::Presumed);
    let seed = harness.seed().await;

    let report = harness
        .orchestrator
        .dispatch(
            &harness.view,
            EntityKind::Billboard,
            &StoreId::new(&seed.store),
            Mutation::Delete {
                id: "billboard_404".into(),
            },
        )
        .await;
    assert_eq!(
        report.guidance(),
        Some("Make sure you removed all categories using this billboard first.")
    );
}

#[tokio::test]
async fn test_listing_projections() {
    let harness = Harness::new();
    let seed = harness.seed().await;
    let store_id = StoreId::new(&seed.store);
    let listing = ListingView::new(harness.catalog(), PriceFormatter::default());

    let categories = listing.categories(&store_id).await.unwrap();
    assert_eq!(categories[0].billboard_label, "Summer");

    let products = listing.products(&store_id).await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Product B");
    assert_eq!(products[0].price, "$5.00");
    assert_eq!(products[0].category, "Shirts");
    assert_eq!(products[0].size, "Medium");
    assert_eq!(products[0].color, "#000080");

    assert_eq!(listing.sizes(&store_id).await.unwrap()[0].value, "M");
    assert_eq!(listing.colors(&store_id).await.unwrap()[0].name, "Navy");
}

#[tokio::test]
async fn test_system_shuts_down_cleanly() {
    let harness = Harness::new();
    harness.seed().await;

    let Harness { system, orchestrator, .. } = harness;
    drop(orchestrator);
    assert!(system.shutdown().await.is_ok());
}
