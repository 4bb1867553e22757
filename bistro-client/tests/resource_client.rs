// bistro-client/tests/resource_client.rs
// 集成测试 - 资源客户端 (内存后端)

mod common;

use std::time::Duration;

use bistro_client::{
    ClientError, DiningTablePayload, FetchError, MenuCategory, MenuItem, Role, TableStatus,
    UserCreate, UserUpdate,
};
use common::{Backend, GOOD_TOKEN, harness};
use serde_json::json;

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let h = harness(Backend::with_users());
    let users = h.api.users();

    for token in [None, Some(""), Some("   ")] {
        let err = users.list(token).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingCredential));
        let err = users.remove(&1, token).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingCredential));
    }
    assert_eq!(h.transport.calls(), 0);
}

#[tokio::test]
async fn test_list_returns_records_in_order() {
    let h = harness(Backend::with_users());
    let users = h.api.users().list(Some(GOOD_TOKEN)).await.unwrap();

    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(users[1].role, Role::Kitchen);
    assert_eq!(h.transport.calls(), 1);
}

#[tokio::test]
async fn test_list_object_body_is_empty() {
    let h = harness(Backend::with_users());
    h.backend.set_list_body(json!({}));

    let users = h.api.users().list(Some(GOOD_TOKEN)).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_list_skips_malformed_elements() {
    let h = harness(Backend::new());
    h.backend.set_list_body(json!([
        {"id": 1, "name": "A", "username": "a", "role": "waiter"},
        {"id": "oops"},
        {"id": 3, "name": "C", "username": "c", "role": "butcher"},
    ]));

    let users = h.api.users().list(Some(GOOD_TOKEN)).await.unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, [1, 3]);
    assert_eq!(users[1].role, Role::Butchery);
}

#[tokio::test]
async fn test_list_by_role_filters() {
    let h = harness(Backend::with_users());
    let waiters = h
        .api
        .users()
        .list_by_role(Some(GOOD_TOKEN), Role::Waiter)
        .await
        .unwrap();
    assert_eq!(waiters.len(), 1);
    assert_eq!(waiters[0].username, "a");
}

#[tokio::test]
async fn test_create_returns_server_entity() {
    let h = harness(Backend::with_users());
    let created = h
        .api
        .users()
        .create(
            &UserCreate {
                name: "C".into(),
                username: "c".into(),
                password: "pw".into(),
                role: Role::Cashier,
            },
            Some(GOOD_TOKEN),
        )
        .await
        .unwrap();

    assert_eq!(created.id, 3);
    assert_eq!(created.role, Role::Cashier);
    assert!(h.backend.records("users")[2].get("password").is_none());
}

#[tokio::test]
async fn test_update_and_get() {
    let h = harness(Backend::with_users());
    let users = h.api.users();
    let update = UserUpdate {
        name: Some("B2".into()),
        ..Default::default()
    };

    let updated = users.update(&2, &update, Some(GOOD_TOKEN)).await.unwrap();
    assert_eq!(updated.name, "B2");
    assert_eq!(updated.role, Role::Kitchen);

    let fetched = users.get(&2, Some(GOOD_TOKEN)).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_missing_carries_server_message() {
    let h = harness(Backend::with_users());
    let err = h
        .api
        .users()
        .update(&99, &UserUpdate::default(), Some(GOOD_TOKEN))
        .await
        .unwrap_err();

    match err {
        ClientError::Fetch(e) => assert_eq!(e, FetchError::new(Some(404), "not found")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_remove() {
    let h = harness(Backend::with_users());
    let users = h.api.users();

    users.remove(&1, Some(GOOD_TOKEN)).await.unwrap();
    assert_eq!(h.backend.records("users").len(), 1);

    let err = users.remove(&1, Some(GOOD_TOKEN)).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_rejected_token_is_auth_failure() {
    let h = harness(Backend::with_users());
    let err = h.api.users().list(Some("stale")).await.unwrap_err();

    assert!(err.is_auth_rejected());
    assert_eq!(err.user_message(), "Token has expired");
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let h = harness(Backend::with_users());
    h.backend.set_delay(Duration::from_millis(500));
    let users = h.api.users().with_timeout(Duration::from_millis(50));

    let err = users.list(Some(GOOD_TOKEN)).await.unwrap_err();
    match err {
        ClientError::Fetch(e) => assert_eq!(e, FetchError::timed_out()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_tables_round_trip() {
    let h = harness(Backend::new());
    let tables = h.api.tables();

    let mut payload = DiningTablePayload::new("T1");
    payload.is_vip = true;
    let created = tables.create(&payload, Some(GOOD_TOKEN)).await.unwrap();
    assert_eq!(created.number, "T1");
    assert_eq!(created.status, TableStatus::Available);
    assert!(created.is_vip);

    let mut payload = DiningTablePayload::from(&created);
    payload.status = TableStatus::Occupied;
    payload.waiter_id = Some(1);
    let updated = tables
        .update(&created.id, &payload, Some(GOOD_TOKEN))
        .await
        .unwrap();
    assert_eq!(updated.status, TableStatus::Occupied);
    assert_eq!(updated.waiter_id, Some(1));
}

#[tokio::test]
async fn test_menu_items_by_category() {
    let h = harness(Backend::new());
    h.backend.seed(
        "menu-items",
        vec![
            json!({"id": 1, "name": "Kitfo", "price": 350.0, "category": "raw_meat"}),
            json!({"id": 2, "name": "Tej", "price": 120.5, "category": "drinks"}),
        ],
    );

    let items: Vec<MenuItem> = h
        .api
        .menu_items()
        .list_by_category(Some(GOOD_TOKEN), MenuCategory::RawMeat)
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Kitfo");
    assert!(items[0].is_available);
}
