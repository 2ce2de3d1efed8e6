#![allow(clippy::float_cmp)]

use super::*;
use crate::api::fake::{Call, FakeService};
use canvas::doc::{Element, ElementKind};
use canvas::input::{Button, Key, Modifiers};

fn note(id: i64, x: f64, y: f64) -> Element {
    Element {
        id,
        project_id: 1,
        kind: ElementKind::Note,
        content: "existing".into(),
        x,
        y,
        width: 200.0,
        height: 60.0,
        completed: false,
        z_index: 1,
    }
}

async fn mount(service: FakeService) -> (Arc<FakeService>, Session) {
    let service = Arc::new(service);
    let session = Session::mount(service.as_ref(), service.clone(), Some("default")).await.unwrap();
    (service, session)
}

fn press(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerDown { x, y, button: Button::Primary, modifiers: Modifiers::default() }
}

fn key(name: &str) -> InputEvent {
    InputEvent::KeyDown { key: Key(name.into()), modifiers: Modifiers::default() }
}

// =============================================================================
// mount
// =============================================================================

#[tokio::test]
async fn mount_resolves_project_then_lists_elements() {
    let (service, session) = mount(FakeService::new(vec![note(42, 10.0, 10.0)])).await;
    assert_eq!(service.calls(), vec![Call::ResolveProject(Some("default".into())), Call::List(1)]);
    assert_eq!(session.project().id, 1);
    assert_eq!(session.controller().store.len(), 1);
    assert_eq!(session.controller().sync_state(0), Some(SyncState::Synced));
}

#[tokio::test]
async fn mount_fails_when_listing_fails() {
    let mut fake = FakeService::new(Vec::new());
    fake.fail_listing = true;
    let service = Arc::new(fake);
    let result = Session::mount(service.as_ref(), service.clone(), None).await;
    assert!(matches!(result, Err(ApiError::Response { status: 503, .. })));
}

// =============================================================================
// Durable edits
// =============================================================================

#[tokio::test]
async fn drag_persists_one_position_update() {
    let (service, mut session) = mount(FakeService::new(vec![note(42, 10.0, 10.0)])).await;
    session.handle_input(press(10.0, 10.0));
    session.handle_input(InputEvent::PointerMove { x: 20.0, y: 25.0 });
    session.handle_input(InputEvent::PointerMove { x: 30.0, y: 40.0 });
    session.handle_input(InputEvent::PointerUp { x: 30.0, y: 40.0 });
    session.settle().await;

    assert_eq!(service.writes(), vec![Call::Position(42, 30.0, 40.0)]);
    let el = session.controller().element(0).unwrap();
    assert_eq!((el.x, el.y), (30.0, 40.0));
}

#[tokio::test]
async fn create_patches_server_id() {
    let (service, mut session) = mount(FakeService::new(Vec::new())).await;
    session.handle_input(InputEvent::DoubleClick { x: 100.0, y: 100.0 });
    session.settle().await;

    let el = session.controller().element(0).unwrap();
    assert_eq!(el.id, 100);
    assert_eq!((el.x, el.y), (0.0, 70.0));
    assert_eq!(session.controller().sync_state(0), Some(SyncState::Synced));
    assert!(matches!(service.writes().as_slice(), [Call::Create(_)]));
}

#[tokio::test]
async fn delete_of_persisted_element_is_mirrored() {
    let (service, mut session) = mount(FakeService::new(vec![note(42, 10.0, 10.0)])).await;
    session.handle_input(press(10.0, 10.0));
    session.handle_input(InputEvent::PointerUp { x: 10.0, y: 10.0 });
    session.handle_input(key("Delete"));
    session.settle().await;

    assert!(session.controller().store.is_empty());
    assert_eq!(service.writes(), vec![Call::Position(42, 10.0, 10.0), Call::Delete(42)]);
}

#[tokio::test]
async fn create_failure_keeps_element_local() {
    let mut fake = FakeService::new(Vec::new());
    fake.fail_creates = true;
    let (service, mut session) = mount(fake).await;
    session.handle_input(InputEvent::DoubleClick { x: 0.0, y: 0.0 });
    session.handle_input(InputEvent::EditorInput { text: "draft".into() });
    session.handle_input(InputEvent::EditorBlur);
    session.settle().await;

    assert_eq!(session.controller().store.len(), 1);
    assert_eq!(session.controller().sync_state(0), Some(SyncState::LocalOnly));
    assert_eq!(session.controller().element(0).unwrap().content, "draft");
    assert_eq!(service.writes().len(), 1);
}

// =============================================================================
// Races with an in-flight create
// =============================================================================

#[tokio::test]
async fn delete_before_create_answers_is_a_noop() {
    let (service, mut session) = mount(FakeService::new(Vec::new()).gated()).await;
    session.handle_input(InputEvent::DoubleClick { x: 100.0, y: 100.0 });
    session.handle_input(key("Escape"));
    session.handle_input(key("Delete"));
    assert!(session.controller().store.is_empty());

    service.release_create();
    session.settle().await;

    assert!(session.controller().store.is_empty());
    assert!(matches!(service.writes().as_slice(), [Call::Create(_)]));
}

#[tokio::test]
async fn edit_during_pending_create_is_flushed_after_ack() {
    let (service, mut session) = mount(FakeService::new(Vec::new()).gated()).await;
    session.handle_input(InputEvent::DoubleClick { x: 100.0, y: 100.0 });
    session.handle_input(InputEvent::EditorInput { text: "written early".into() });
    let actions = session.handle_input(InputEvent::EditorBlur);
    assert!(!actions.iter().any(Action::is_durable));

    service.release_create();
    session.settle().await;

    let writes = service.writes();
    assert_eq!(writes.len(), 2);
    assert!(matches!(&writes[1], Call::Update(100, el) if el.content == "written early"));
}

#[tokio::test]
async fn ack_lands_on_moved_index_after_earlier_delete() {
    let (service, mut session) = mount(FakeService::new(vec![note(42, 500.0, 500.0)]).gated()).await;
    session.handle_input(InputEvent::DoubleClick { x: 100.0, y: 100.0 });
    session.handle_input(key("Escape"));
    session.handle_input(press(510.0, 510.0));
    session.handle_input(InputEvent::PointerUp { x: 510.0, y: 510.0 });
    session.handle_input(key("Delete"));

    service.release_create();
    session.settle().await;

    assert_eq!(session.controller().store.len(), 1);
    assert_eq!(session.controller().element(0).unwrap().id, 100);
    assert!(service.writes().contains(&Call::Delete(42)));
}

// =============================================================================
// run
// =============================================================================

#[tokio::test]
async fn run_applies_events_in_order_and_settles() {
    let (service, session) = mount(FakeService::new(Vec::new())).await;
    let (tx, rx) = mpsc::channel(8);
    for event in [
        InputEvent::DoubleClick { x: 100.0, y: 100.0 },
        InputEvent::EditorInput { text: "first".into() },
        InputEvent::EditorBlur,
    ] {
        tx.send(event).await.unwrap();
    }
    drop(tx);

    let controller = session.run(rx).await;
    let el = controller.element(0).unwrap();
    assert_eq!(el.content, "first");
    assert_ne!(el.id, 0);
    let writes = service.writes();
    assert_eq!(writes.len(), 2);
    assert!(matches!(&writes[1], Call::Update(_, el) if el.content == "first"));
}
