//! Alert service tests
//!
//! - New alerts start active and require an existing product
//! - Activation always sends exactly one notification
//! - A failed activation send does not fail the toggle
//! - History lists deactivated alerts newest first

mod helpers;

use std::{sync::Arc, time::Duration};

use helpers::{dec, dispatcher, product, InMemoryStore, RecordingSender, OPERATIONS};
use retail_inventory::{services::AlertService, AppError};
use shared::CreateAlertInput;
use tokio_test::assert_ok;

fn service(store: &Arc<InMemoryStore>, sender: Arc<RecordingSender>) -> AlertService {
    AlertService::new(store.clone(), dispatcher(sender, Duration::from_secs(2)))
}

#[tokio::test]
async fn test_create_alert_starts_active() {
    let store = InMemoryStore::new();
    store.add_product(product(1, 50, dec(100, 2), 1)).await;
    let sender = RecordingSender::new();

    let alert = assert_ok!(
        service(&store, sender.clone())
            .create(CreateAlertInput {
                product_id: 1,
                store_id: Some(1),
                store_chain_id: None,
                threshold: 10,
            })
            .await
    );

    assert!(alert.is_active);
    assert_eq!(alert.threshold, 10);
    assert_eq!(sender.attempts().await, 0);
}

#[tokio::test]
async fn test_create_alert_for_missing_product_fails() {
    let store = InMemoryStore::new();

    let err = service(&store, RecordingSender::new())
        .create(CreateAlertInput {
            product_id: 7,
            store_id: None,
            store_chain_id: None,
            threshold: 10,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_create_alert_rejects_negative_threshold() {
    let store = InMemoryStore::new();
    store.add_product(product(1, 50, dec(100, 2), 1)).await;

    let err = service(&store, RecordingSender::new())
        .create(CreateAlertInput {
            product_id: 1,
            store_id: None,
            store_chain_id: None,
            threshold: -1,
        })
        .await
        .unwrap_err();

    match err {
        AppError::Validation { field, .. } => assert_eq!(field, "threshold"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_activation_notifies_even_above_threshold() {
    let store = InMemoryStore::new();
    store.add_chain(1, "Lidl").await;
    store.add_store(1, "Lidl Obor", 1).await;
    store.add_product(product(1, 500, dec(100, 2), 1)).await;
    let alert = store.add_alert(1, Some(1), None, 5, false).await;
    let sender = RecordingSender::new();

    let details = assert_ok!(service(&store, sender.clone()).set_active(alert.id, true).await);

    assert!(details.alert.is_active);
    let sent = sender.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, OPERATIONS);
    assert_eq!(sent[0].subject, "Stock Alert Triggered");
    assert!(sent[0].body.contains("Product: Product 1"));
    assert!(sent[0].body.contains("Store: Lidl Obor"));
    assert!(sent[0].body.contains("Threshold: 5"));
}

#[tokio::test]
async fn test_reactivating_active_alert_notifies_again() {
    let store = InMemoryStore::new();
    store.add_product(product(1, 500, dec(100, 2), 1)).await;
    let alert = store.add_alert(1, None, None, 5, true).await;
    let sender = RecordingSender::new();
    let service = service(&store, sender.clone());

    assert_ok!(service.set_active(alert.id, true).await);
    assert_ok!(service.set_active(alert.id, true).await);

    assert_eq!(sender.attempts().await, 2);
}

#[tokio::test]
async fn test_deactivation_does_not_notify() {
    let store = InMemoryStore::new();
    store.add_product(product(1, 1, dec(100, 2), 1)).await;
    let alert = store.add_alert(1, None, None, 5, true).await;
    let sender = RecordingSender::new();

    let details = assert_ok!(service(&store, sender.clone()).set_active(alert.id, false).await);

    assert!(!details.alert.is_active);
    assert_eq!(sender.attempts().await, 0);
}

#[tokio::test]
async fn test_failed_activation_send_keeps_toggle() {
    let store = InMemoryStore::new();
    store.add_product(product(1, 1, dec(100, 2), 1)).await;
    let alert = store.add_alert(1, None, None, 5, false).await;
    let sender = RecordingSender::failing_on(&[0]);

    let details = assert_ok!(service(&store, sender.clone()).set_active(alert.id, true).await);

    assert!(details.alert.is_active);
    assert!(store.alert(alert.id).await.unwrap().is_active);
    assert_eq!(sender.attempts().await, 1);
    assert!(sender.sent().await.is_empty());
}

#[tokio::test]
async fn test_activation_location_falls_back_to_chain_then_unknown() {
    let store = InMemoryStore::new();
    store.add_chain(4, "Carrefour").await;
    store.add_product(product(1, 1, dec(100, 2), 1)).await;
    let chain_alert = store.add_alert(1, None, Some(4), 5, false).await;
    let bare_alert = store.add_alert(1, None, None, 5, false).await;
    let sender = RecordingSender::new();
    let service = service(&store, sender.clone());

    assert_ok!(service.set_active(chain_alert.id, true).await);
    assert_ok!(service.set_active(bare_alert.id, true).await);

    let sent = sender.sent().await;
    assert!(sent[0].body.contains("Store: Carrefour"));
    assert!(sent[1].body.contains("Store: Unknown Store"));
}

#[tokio::test]
async fn test_toggle_missing_alert_is_not_found() {
    let store = InMemoryStore::new();
    let sender = RecordingSender::new();

    let err = service(&store, sender.clone()).set_active(12, true).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(sender.attempts().await, 0);
}

#[tokio::test]
async fn test_history_lists_inactive_newest_first() {
    let store = InMemoryStore::new();
    store.add_product(product(1, 1, dec(100, 2), 1)).await;
    let first = store.add_alert(1, None, None, 5, false).await;
    store.add_alert(1, None, None, 6, true).await;
    let third = store.add_alert(1, None, None, 7, false).await;

    let service = service(&store, RecordingSender::new());
    let history = assert_ok!(service.list_history().await);
    let active = assert_ok!(service.list_active().await);

    let ids: Vec<i32> = history.iter().map(|d| d.alert.id).collect();
    assert_eq!(ids, vec![third.id, first.id]);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].alert.threshold, 6);
}
