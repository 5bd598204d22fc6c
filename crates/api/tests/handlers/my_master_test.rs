use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{id_of, seed_city, seed_user, test_server};

#[tokio::test]
async fn test_saved_master_round_trip() {
    let server = test_server();
    let city_id = seed_city(&server).await;
    let client_id = seed_user(&server, city_id, "client").await;
    let master_id = seed_user(&server, city_id, "master").await;

    let created = server
        .post("/api/my_masters")
        .json(&json!({ "client_id": client_id, "master_id": master_id }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let path = format!("/api/my_masters/{}", id_of(&created.json::<Value>()));

    let fetched = server.get(&path).await.json::<Value>();
    assert_eq!(fetched["client_id"], client_id.to_string());
    assert_eq!(fetched["master_id"], master_id.to_string());

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_saved_master_must_be_a_master() {
    let server = test_server();
    let city_id = seed_city(&server).await;
    let client_id = seed_user(&server, city_id, "client").await;
    let friend_id = seed_user(&server, city_id, "client").await;

    let response = server
        .post("/api/my_masters")
        .json(&json!({ "client_id": client_id, "master_id": friend_id }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "master_id must refer to a master"
    );
}

#[tokio::test]
async fn test_updating_unknown_saved_master_is_not_found() {
    let server = test_server();
    let city_id = seed_city(&server).await;
    let client_id = seed_user(&server, city_id, "client").await;
    let master_id = seed_user(&server, city_id, "master").await;

    let response = server
        .put(&format!("/api/my_masters/{}", Uuid::new_v4()))
        .json(&json!({ "client_id": client_id, "master_id": master_id }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "my master not found");
}
