use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{id_of, seed_city, seed_user, test_server};

#[tokio::test]
async fn test_subscription_lifecycle() {
    let server = test_server();
    let city_id = seed_city(&server).await;
    let client_id = seed_user(&server, city_id, "client").await;
    let master_id = seed_user(&server, city_id, "master").await;
    let other_master = seed_user(&server, city_id, "master").await;

    let created = server
        .post("/api/subscriptions")
        .json(&json!({ "client_id": client_id, "master_id": master_id }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body = created.json::<Value>();
    let path = format!("/api/subscriptions/{}", id_of(&body));

    let moved = server
        .put(&path)
        .json(&json!({ "client_id": client_id, "master_id": other_master }))
        .await;
    moved.assert_status_ok();
    let moved = moved.json::<Value>();
    assert_eq!(moved["master_id"], other_master.to_string());
    assert_eq!(moved["created_at"], body["created_at"]);

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    let gone = server.get(&path).await;
    gone.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(gone.json::<Value>()["error"], "subscription not found");
}

#[tokio::test]
async fn test_subscription_sides_must_have_matching_roles() {
    let server = test_server();
    let city_id = seed_city(&server).await;
    let client_id = seed_user(&server, city_id, "client").await;
    let master_id = seed_user(&server, city_id, "master").await;

    let swapped = server
        .post("/api/subscriptions")
        .json(&json!({ "client_id": master_id, "master_id": client_id }))
        .await;
    swapped.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        swapped.json::<Value>()["error"],
        "client_id must refer to a client"
    );

    let missing = server
        .post("/api/subscriptions")
        .json(&json!({ "client_id": client_id }))
        .await;
    missing.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        missing.json::<Value>()["error"],
        "client_id and master_id are required"
    );
}

#[tokio::test]
async fn test_deleting_master_drops_subscription() {
    let server = test_server();
    let city_id = seed_city(&server).await;
    let client_id = seed_user(&server, city_id, "client").await;
    let master_id = seed_user(&server, city_id, "master").await;

    let created = server
        .post("/api/subscriptions")
        .json(&json!({ "client_id": client_id, "master_id": master_id }))
        .await
        .json::<Value>();

    server
        .delete(&format!("/api/users/{}", master_id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/api/subscriptions/{}", id_of(&created)))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
