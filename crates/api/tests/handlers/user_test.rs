use axum::http::StatusCode;
use axum::body::Bytes;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{id_of, seed_city, seed_user, test_server};

#[tokio::test]
async fn test_create_and_update_user() {
    let server = test_server();
    let city_id = seed_city(&server).await;

    let created = server
        .post("/api/users")
        .json(&json!({ "tg_id": 42, "username": "aigerim", "role": "client", "city_id": city_id }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body = created.json::<Value>();
    assert_eq!(body["role"], "client");
    assert_eq!(body["tg_id"], 42);

    let path = format!("/api/users/{}", id_of(&body));
    let updated = server
        .put(&path)
        .json(&json!({ "tg_id": 42, "username": "aigerim_k", "role": "master", "city_id": city_id }))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["username"], "aigerim_k");
}

#[tokio::test]
async fn test_user_validation_messages() {
    let server = test_server();
    let city_id = seed_city(&server).await;

    let cases = [
        (json!({ "username": "a", "role": "admin", "city_id": city_id }), "invalid user role"),
        (json!({ "username": " ", "role": "client", "city_id": city_id }), "username cannot be empty"),
        (json!({ "username": "a", "role": "client" }), "city_id is required"),
        (
            json!({ "username": "a", "role": "client", "city_id": Uuid::new_v4() }),
            "invalid city_id",
        ),
    ];

    for (body, message) in cases {
        let response = server.post("/api/users").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], message);
    }
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let server = test_server();
    let path = format!("/api/users/{}", Uuid::new_v4());

    let response = server.get(&path).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "user not found");

    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_photo_upload_points_at_stored_file() {
    let server = test_server();
    let city_id = seed_city(&server).await;
    let user_id = seed_user(&server, city_id, "client").await;

    let response = server
        .post(&format!("/api/users/{}/photo", user_id))
        .content_type("image/jpeg")
        .bytes(Bytes::from_static(b"\xff\xd8\xff"))
        .await;
    response.assert_status_ok();

    let photo = response.json::<Value>()["photo_url"]
        .as_str()
        .unwrap()
        .to_string();
    let file = server.get(&format!("/api/files/{}", photo)).await;
    file.assert_status_ok();
    assert_eq!(file.as_bytes().as_ref(), b"\xff\xd8\xff");
}
