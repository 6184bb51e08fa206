use catalog_admin::descriptor::EntityKind;
use catalog_admin::model::StoreId;
use catalog_admin::navigation::RouteLog;
use catalog_admin::notify::{NoticeEvent, NoticeLevel, NoticeLog, NotificationSequencer};
use catalog_admin::orchestrator::{
    ActionContext, ActionError, ActionOrchestrator, ActionOutcome, ActionState, ConfirmationGate, GateState,
    InstanceKey, IntegrityPolicy, Mutation, ViewScope, GENERIC_FAILURE,
};
use catalog_admin::transport::mock::MockTransport;
use catalog_admin::transport::{Method, SuccessCriterion, TransportFault};
use serde_json::json;
use std::sync::Arc;

const SIZE_PATH: &str = "/api/s1/sizes/size_1";

fn setup(success: SuccessCriterion) -> (ActionOrchestrator, MockTransport, NoticeLog, RouteLog) {
    let mock = MockTransport::new();
    let notices = NoticeLog::new();
    let routes = RouteLog::new();
    let orchestrator = ActionOrchestrator::with_policies(
        ActionContext {
            transport: Arc::new(mock.clone()),
            notifier: NotificationSequencer::new(Arc::new(notices.clone())),
            router: Arc::new(routes.clone()),
        },
        success,
        IntegrityPolicy::Structured,
    );
    (orchestrator, mock, notices, routes)
}

fn store() -> StoreId {
    StoreId::new("s1")
}

fn delete_size() -> Mutation {
    Mutation::Delete { id: "size_1".into() }
}

fn size_key() -> InstanceKey {
    InstanceKey::new(EntityKind::Size, &store(), Some("size_1"))
}

async fn wait_until_submitting(orchestrator: &ActionOrchestrator, key: &InstanceKey) {
    while !orchestrator.is_submitting(key) {
        tokio::task::yield_now().await;
    }
}

/// The loading notice is dismissed before the terminal notice, exactly once.
fn assert_clean_sequence(notices: &NoticeLog) {
    let events = notices.events();
    assert_eq!(events.len(), 3, "{events:?}");
    let NoticeEvent::Shown(loading) = &events[0] else {
        panic!("expected loading notice first: {events:?}");
    };
    assert_eq!(loading.level, NoticeLevel::Loading);
    assert_eq!(events[1], NoticeEvent::Dismissed(loading.id));
    assert!(matches!(&events[2], NoticeEvent::Shown(n) if n.level != NoticeLevel::Loading));
    assert_eq!(notices.live_loading(), 0);
}

#[tokio::test]
async fn test_single_flight_per_instance() {
    let (orchestrator, mock, _notices, _routes) = setup(SuccessCriterion::ExactOk);
    let release = mock.expect(Method::Delete, SIZE_PATH).hold().respond(200);
    let view = ViewScope::new();

    let first = tokio::spawn({
        let orchestrator = orchestrator.clone();
        let view = view.clone();
        async move {
            orchestrator
                .dispatch(&view, EntityKind::Size, &store(), delete_size())
                .await
        }
    });
    wait_until_submitting(&orchestrator, &size_key()).await;

    let second = orchestrator
        .dispatch(&view, EntityKind::Size, &store(), delete_size())
        .await;
    assert_eq!(second.outcome, ActionOutcome::Ignored);
    assert_eq!(second.state(), ActionState::Idle);
    assert_eq!(orchestrator.state(&size_key()), ActionState::Submitting);

    release.release();
    let first = first.await.unwrap();
    assert_eq!(first.state(), ActionState::Succeeded);
    assert_eq!(orchestrator.state(&size_key()), ActionState::Idle);
    assert_eq!(mock.requests().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_other_instances_are_not_blocked() {
    let (orchestrator, mock, _notices, _routes) = setup(SuccessCriterion::ExactOk);
    let release = mock.expect(Method::Delete, SIZE_PATH).hold().respond(200);
    mock.expect(Method::Delete, "/api/s1/sizes/size_2").respond(200);
    let view = ViewScope::new();

    let first = tokio::spawn({
        let orchestrator = orchestrator.clone();
        let view = view.clone();
        async move {
            orchestrator
                .dispatch(&view, EntityKind::Size, &store(), delete_size())
                .await
        }
    });
    wait_until_submitting(&orchestrator, &size_key()).await;

    let other = orchestrator
        .dispatch(&view, EntityKind::Size, &store(), Mutation::Delete { id: "size_2".into() })
        .await;
    assert_eq!(other.state(), ActionState::Succeeded);

    release.release();
    assert_eq!(first.await.unwrap().state(), ActionState::Succeeded);
    mock.verify();
}

#[tokio::test]
async fn test_cleanup_on_success() {
    let (orchestrator, mock, notices, _routes) = setup(SuccessCriterion::ExactOk);
    mock.expect(Method::Delete, SIZE_PATH).respond(200);

    let report = orchestrator
        .dispatch(&ViewScope::new(), EntityKind::Size, &store(), delete_size())
        .await;
    assert_eq!(report.state(), ActionState::Succeeded);
    assert_clean_sequence(&notices);
    assert_eq!(notices.messages(NoticeLevel::Success), vec!["Size deleted!"]);
}

#[tokio::test]
async fn test_cleanup_on_non_success_status() {
    let (orchestrator, mock, notices, routes) = setup(SuccessCriterion::ExactOk);
    mock.expect(Method::Delete, SIZE_PATH).respond(500);

    let report = orchestrator
        .dispatch(&ViewScope::new(), EntityKind::Size, &store(), delete_size())
        .await;
    assert_eq!(report.state(), ActionState::Failed);
    assert_clean_sequence(&notices);
    assert_eq!(notices.messages(NoticeLevel::Error), vec![GENERIC_FAILURE]);
    assert!(routes.events().is_empty());
}

#[tokio::test]
async fn test_cleanup_on_transport_fault() {
    let (orchestrator, mock, notices, _routes) = setup(SuccessCriterion::ExactOk);
    mock.expect(Method::Delete, SIZE_PATH).fault(TransportFault::Timeout);

    let report = orchestrator
        .dispatch(&ViewScope::new(), EntityKind::Size, &store(), delete_size())
        .await;
    assert!(matches!(
        report.outcome,
        ActionOutcome::Failed {
            error: ActionError::Transport(TransportFault::Timeout),
            ..
        }
    ));
    assert_clean_sequence(&notices);
    assert_eq!(orchestrator.state(&size_key()), ActionState::Idle);
}

#[tokio::test]
async fn test_created_is_treated_like_server_error() {
    let (orchestrator, mock, notices, routes) = setup(SuccessCriterion::ExactOk);
    let path = "/api/s1/billboards";
    mock.expect(Method::Post, path).respond_with(201, json!({ "id": "billboard_1" }));
    mock.expect(Method::Post, path).respond(500);

    let mut outcomes = Vec::new();
    for _ in 0..2 {
        let report = orchestrator
            .dispatch(
                &ViewScope::new(),
                EntityKind::Billboard,
                &store(),
                Mutation::Create {
                    draft: json!({ "label": "Sale", "imageUrl": "https://img/sale.png" }),
                },
            )
            .await;
        assert_eq!(report.state(), ActionState::Failed);
        outcomes.push(report.guidance().map(str::to_string));
    }

    assert_eq!(outcomes[0], outcomes[1]);
    assert_eq!(notices.messages(NoticeLevel::Error), vec![GENERIC_FAILURE, GENERIC_FAILURE]);
    assert!(routes.events().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_any_success_accepts_created() {
    let (orchestrator, mock, _notices, routes) = setup(SuccessCriterion::AnySuccess);
    mock.expect(Method::Post, "/api/s1/colors")
        .respond_with(201, json!({ "id": "color_1" }));

    let report = orchestrator
        .dispatch(
            &ViewScope::new(),
            EntityKind::Color,
            &store(),
            Mutation::Create {
                draft: json!({ "name": "Red", "value": "#f00" }),
            },
        )
        .await;
    assert_eq!(report.state(), ActionState::Succeeded);
    assert_eq!(routes.current(), Some("/s1/colors".to_string()));
}

#[tokio::test]
async fn test_closed_view_discards_late_response() {
    let (orchestrator, mock, notices, routes) = setup(SuccessCriterion::ExactOk);
    let release = mock.expect(Method::Delete, SIZE_PATH).hold().respond(200);
    let view = ViewScope::new();

    let pending = tokio::spawn({
        let orchestrator = orchestrator.clone();
        let view = view.clone();
        async move {
            orchestrator
                .dispatch(&view, EntityKind::Size, &store(), delete_size())
                .await
        }
    });
    wait_until_submitting(&orchestrator, &size_key()).await;

    view.close();
    release.release();
    let report = pending.await.unwrap();

    assert_eq!(report.outcome, ActionOutcome::Discarded);
    assert!(routes.events().is_empty());
    assert!(notices.messages(NoticeLevel::Success).is_empty());
    assert_eq!(notices.live_loading(), 0);
    assert_eq!(orchestrator.state(&size_key()), ActionState::Idle);
}

#[tokio::test]
async fn test_gate_stays_open_while_deleting() {
    let (orchestrator, mock, _notices, _routes) = setup(SuccessCriterion::ExactOk);
    let release = mock
        .expect(Method::Delete, SIZE_PATH)
        .hold()
        .respond_with(409, json!({ "blocking": ["products"] }));
    let view = ViewScope::new();
    let gate = Arc::new(ConfirmationGate::new(orchestrator.clone(), EntityKind::Size, &store(), "size_1"));

    assert_eq!(gate.state(), GateState::Closed);
    assert!(gate.open());

    let confirming = tokio::spawn({
        let gate = gate.clone();
        let view = view.clone();
        async move { gate.confirm(&view).await }
    });
    wait_until_submitting(&orchestrator, &size_key()).await;

    assert!(gate.is_busy());
    assert!(gate.is_open());
    assert!(!gate.cancel(), "dialog cannot be dismissed mid-delete");

    release.release();
    let report = confirming.await.unwrap().unwrap();
    assert_eq!(report.state(), ActionState::Failed);
    assert_eq!(
        report.guidance(),
        Some("Make sure you removed all products using this size first.")
    );
    assert_eq!(gate.state(), GateState::Closed);
    assert!(!gate.is_busy());
}

#[tokio::test]
async fn test_gate_second_confirm_keeps_dialog_open() {
    let (orchestrator, mock, _notices, _routes) = setup(SuccessCriterion::ExactOk);
    let release = mock.expect(Method::Delete, SIZE_PATH).hold().respond(200);
    let view = ViewScope::new();
    let gate = Arc::new(ConfirmationGate::new(orchestrator.clone(), EntityKind::Size, &store(), "size_1"));
    assert!(gate.open());

    let confirming = tokio::spawn({
        let gate = gate.clone();
        let view = view.clone();
        async move { gate.confirm(&view).await }
    });
    wait_until_submitting(&orchestrator, &size_key()).await;

    assert!(gate.confirm(&view).await.is_none());
    assert!(gate.is_busy());
    assert_eq!(gate.state(), GateState::Open);

    release.release();
    let report = confirming.await.unwrap().unwrap();
    assert_eq!(report.state(), ActionState::Succeeded);
    assert_eq!(gate.state(), GateState::Closed);
    assert_eq!(mock.requests().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_gate_requires_explicit_open() {
    let (orchestrator, mock, _notices, _routes) = setup(SuccessCriterion::ExactOk);
    let gate = ConfirmationGate::new(orchestrator, EntityKind::Size, &store(), "size_1");

    assert!(gate.confirm(&ViewScope::new()).await.is_none());
    assert!(mock.requests().is_empty());

    assert!(gate.open());
    assert!(gate.cancel());
    assert_eq!(gate.state(), GateState::Closed);
    assert!(gate.confirm(&ViewScope::new()).await.is_none());
}

#[tokio::test]
async fn test_gate_refuses_to_open_while_busy() {
    let (orchestrator, mock, _notices, _routes) = setup(SuccessCriterion::ExactOk);
    let release = mock.expect(Method::Delete, SIZE_PATH).hold().respond(200);
    let view = ViewScope::new();

    let pending = tokio::spawn({
        let orchestrator = orchestrator.clone();
        let view = view.clone();
        async move {
            orchestrator
                .dispatch(&view, EntityKind::Size, &store(), delete_size())
                .await
        }
    });
    wait_until_submitting(&orchestrator, &size_key()).await;

    let gate = ConfirmationGate::new(orchestrator.clone(), EntityKind::Size, &store(), "size_1");
    assert!(!gate.open());

    release.release();
    pending.await.unwrap();
    assert!(gate.open());
}
