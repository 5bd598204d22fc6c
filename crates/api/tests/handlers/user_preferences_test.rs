use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{id_of, seed_city, seed_user, test_server};

#[tokio::test]
async fn test_preferences_follow_category_lifecycle() {
    let server = test_server();
    let city_id = seed_city(&server).await;
    let user_id = seed_user(&server, city_id, "client").await;
    let category = server
        .post("/api/service_categories")
        .json(&json!({ "name": "Massage" }))
        .await
        .json::<Value>();

    let created = server
        .post("/api/user_preferences")
        .json(&json!({
            "user_id": user_id,
            "preferred_category_id": id_of(&category),
            "max_price": 12000.0,
            "max_distance_km": 7,
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let path = format!("/api/user_preferences/{}", id_of(&created.json::<Value>()));

    server
        .delete(&format!("/api/service_categories/{}", id_of(&category)))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let kept = server.get(&path).await.json::<Value>();
    assert_eq!(kept["preferred_category_id"], Value::Null);
    assert_eq!(kept["max_distance_km"], 7);
}

#[rstest]
#[case(json!({ "max_price": -1.0 }), "max_price cannot be negative")]
#[case(json!({ "max_distance_km": -1 }), "max_distance_km cannot be negative")]
#[case(json!({ "preferred_category_id": Uuid::new_v4() }), "invalid preferred_category_id")]
#[tokio::test]
async fn test_invalid_preferences_are_rejected(#[case] overrides: Value, #[case] message: &str) {
    let server = test_server();
    let city_id = seed_city(&server).await;
    let user_id = seed_user(&server, city_id, "client").await;

    let mut body = json!({ "user_id": user_id, "max_price": 100.0, "max_distance_km": 3 });
    for (key, value) in overrides.as_object().unwrap() {
        body[key] = value.clone();
    }

    let response = server.post("/api/user_preferences").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], message);
}

#[tokio::test]
async fn test_preferences_for_unknown_user_are_rejected() {
    let server = test_server();

    let response = server
        .post("/api/user_preferences")
        .json(&json!({ "user_id": Uuid::new_v4() }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "invalid user_id");
}
