use std::sync::Arc;

use assert_matches::assert_matches;

use stockroom::lifecycle::{ShipError, WarehouseSystem};
use stockroom::model::{OrderDraft, OrderStatus, ShipmentPhase};
use stockroom::sinks::mock::MockSink;
use stockroom::sinks::OrderSink;
use stockroom::store::LocalStore;

async fn start_system(
    dir: &std::path::Path,
    optimistic: bool,
) -> (WarehouseSystem, Arc<MockSink>, Arc<MockSink>) {
    let server = Arc::new(MockSink::new("warehouse-server"));
    let sheet = Arc::new(MockSink::new("spreadsheet"));
    let system = WarehouseSystem::start_with_sinks(
        dir,
        Arc::clone(&server) as Arc<dyn OrderSink>,
        Arc::clone(&sheet) as Arc<dyn OrderSink>,
        optimistic,
    )
    .await
    .unwrap();
    (system, server, sheet)
}

fn draft() -> OrderDraft {
    OrderDraft {
        name: "Widget".into(),
        sender: "Alice".into(),
        zone: "A".into(),
        shelf: "3".into(),
        position: "2".into(),
    }
}

/// Seeds one order through the add flow (server accepts the upload).
async fn seed_one(system: &WarehouseSystem, server: &MockSink) {
    server.expect_accept();
    system.flow.add_order(draft()).await.unwrap();
}

/// Shipping with nothing selected is refused before any side effect.
#[tokio::test]
async fn ship_without_selection_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let (system, server, _sheet) = start_system(dir.path(), true).await;
    seed_one(&system, &server).await;

    let err = system.flow.ship_order(None).await.unwrap_err();
    assert_matches!(err, ShipError::NoSelection);
    assert_eq!(err.to_string(), "Please select an order first");

    assert_eq!(system.flow.orders().await.unwrap().len(), 1);
    system.shutdown().await.unwrap();
}

/// A selection that no longer names an entry is refused the same way.
#[tokio::test]
async fn ship_with_unknown_index_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let (system, _server, _sheet) = start_system(dir.path(), true).await;

    let err = system.flow.ship_order(Some(5)).await.unwrap_err();
    assert_matches!(err, ShipError::UnknownOrder(5));
    system.shutdown().await.unwrap();
}

/// Both endpoints accept: the order leaves the collection, the persisted
/// snapshot follows, and the shipment record is cleared.
#[tokio::test]
async fn ship_removes_order_when_both_endpoints_accept() {
    let dir = tempfile::tempdir().unwrap();
    let (system, server, sheet) = start_system(dir.path(), true).await;
    seed_one(&system, &server).await;

    server.expect_accept();
    sheet.expect_accept();
    system.flow.ship_order(Some(0)).await.unwrap();

    assert!(system.flow.orders().await.unwrap().is_empty());

    let store = LocalStore::open(dir.path()).await.unwrap();
    assert!(store.load_orders().await.is_empty());
    assert_eq!(store.load_shipment().await, None);

    // Both endpoints received the shipped copy.
    let shipped = &server.submissions()[1];
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert_eq!(sheet.submissions()[0], *shipped);

    server.verify();
    sheet.verify();
    system.shutdown().await.unwrap();
}

/// Warehouse server rejects: the entry stays, flipped to shipped in memory
/// only, with a pending record awaiting retry. The persisted collection
/// still shows the old status — memory and disk deliberately disagree
/// until the shipment completes.
#[tokio::test]
async fn server_rejection_leaves_the_optimistic_window() {
    let dir = tempfile::tempdir().unwrap();
    let (system, server, sheet) = start_system(dir.path(), true).await;
    seed_one(&system, &server).await;

    server.expect_reject(503, None);
    let err = system.flow.ship_order(Some(0)).await.unwrap_err();
    assert_matches!(err, ShipError::Server(_));

    let orders = system.flow.orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Shipped);

    let store = LocalStore::open(dir.path()).await.unwrap();
    assert_eq!(store.load_orders().await[0].status, OrderStatus::Received);

    let record = store.load_shipment().await.unwrap();
    assert_eq!(record.phase, ShipmentPhase::Pending);

    assert!(sheet.submissions().is_empty());
    system.shutdown().await.unwrap();
}

/// Spreadsheet rejects after the server accepted: retrying finishes the
/// shipment without re-posting to the server.
#[tokio::test]
async fn retry_after_spreadsheet_failure_skips_the_server() {
    let dir = tempfile::tempdir().unwrap();
    let (system, server, sheet) = start_system(dir.path(), true).await;
    seed_one(&system, &server).await;

    server.expect_accept();
    sheet.expect_reject(500, None);
    let err = system.flow.ship_order(Some(0)).await.unwrap_err();
    assert_matches!(err, ShipError::Spreadsheet(_));

    let store = LocalStore::open(dir.path()).await.unwrap();
    assert_eq!(
        store.load_shipment().await.unwrap().phase,
        ShipmentPhase::ServerAcked
    );

    // Retry: only the spreadsheet is contacted again.
    sheet.expect_accept();
    system.flow.ship_order(Some(0)).await.unwrap();

    assert!(system.flow.orders().await.unwrap().is_empty());
    assert_eq!(store.load_shipment().await, None);
    // One add upload + one ship attempt; no redundant second ship post.
    assert_eq!(server.submissions().len(), 2);
    assert_eq!(sheet.submissions().len(), 2);

    server.verify();
    sheet.verify();
    system.shutdown().await.unwrap();
}

/// With optimistic status off, a failed ship leaves the stored entry
/// untouched; only the copies sent out carry the shipped status.
#[tokio::test]
async fn non_optimistic_mode_keeps_the_stored_status() {
    let dir = tempfile::tempdir().unwrap();
    let (system, server, _sheet) = start_system(dir.path(), false).await;
    seed_one(&system, &server).await;

    server.expect_reject(503, None);
    let err = system.flow.ship_order(Some(0)).await.unwrap_err();
    assert_matches!(err, ShipError::Server(_));

    let orders = system.flow.orders().await.unwrap();
    assert_eq!(orders[0].status, OrderStatus::Received);
    assert_eq!(server.submissions()[1].status, OrderStatus::Shipped);

    system.shutdown().await.unwrap();
}
