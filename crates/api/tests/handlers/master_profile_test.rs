use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{id_of, seed_city, seed_master, seed_user, test_server};

#[tokio::test]
async fn test_profile_defaults_and_rating_update() {
    let server = test_server();
    let (_, profile_id) = seed_master(&server).await;
    let path = format!("/api/master_profiles/{}", profile_id);

    let profile = server.get(&path).await.json::<Value>();
    assert_eq!(profile["status"], "active");
    assert_eq!(profile["rating"], 4.5);

    let rated = server
        .put(&format!("{}/rating", path))
        .json(&json!({ "rating": 3.0 }))
        .await;
    rated.assert_status_ok();
    assert_eq!(rated.json::<Value>()["rating"], 3.0);

    server
        .put(&format!("{}/rating", path))
        .json(&json!({ "rating": 7.0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_requires_master_user() {
    let server = test_server();
    let city_id = seed_city(&server).await;
    let client_id = seed_user(&server, city_id, "client").await;

    let response = server
        .post("/api/master_profiles")
        .json(&json!({ "user_id": client_id, "qr_code": "qr" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "user must have master role");

    let response = server
        .post("/api/master_profiles")
        .json(&json!({ "user_id": Uuid::new_v4(), "qr_code": "qr" }))
        .await;
    assert_eq!(response.json::<Value>()["error"], "invalid user_id");
}

#[tokio::test]
async fn test_catalogue_filters_and_pages() {
    let server = test_server();
    let city_id = seed_city(&server).await;

    let category = server
        .post("/api/service_categories")
        .json(&json!({ "name": "Nails" }))
        .await
        .json::<Value>();

    for (rating, price) in [(4.9, 30.0), (4.1, 10.0), (2.0, 50.0)] {
        let user_id = seed_user(&server, city_id, "master").await;
        server
            .post("/api/master_profiles")
            .json(&json!({ "user_id": user_id, "qr_code": "qr", "rating": rating }))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/services")
            .json(&json!({
                "user_id": user_id,
                "category_id": id_of(&category),
                "title": "Gel manicure",
                "price": price,
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let all = server
        .get("/api/master_profiles")
        .add_query_param("category", "Nails")
        .add_query_param("city", "alma")
        .await
        .json::<Value>();
    assert_eq!(all["total"], 3);
    let ratings: Vec<f64> = all["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["rating"].as_f64().unwrap())
        .collect();
    assert_eq!(ratings, vec![4.9, 4.1, 2.0]);

    let filtered = server
        .get("/api/master_profiles")
        .add_query_param("query", "MANICURE")
        .add_query_param("price_to", 35)
        .add_query_param("rating", 4)
        .add_query_param("page_size", 1)
        .add_query_param("page", 2)
        .await
        .json::<Value>();
    assert_eq!(filtered["total"], 2);
    assert_eq!(filtered["results"][0]["rating"], 4.1);
}

#[tokio::test]
async fn test_inverted_price_range_is_rejected() {
    let server = test_server();

    let response = server
        .get("/api/master_profiles")
        .add_query_param("price_from", 50)
        .add_query_param("price_to", 10)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "price_from cannot exceed price_to"
    );
}

#[tokio::test]
async fn test_deleting_category_detaches_services() {
    let server = test_server();
    let city_id = seed_city(&server).await;
    let user_id = seed_user(&server, city_id, "master").await;

    let category = server
        .post("/api/service_categories")
        .json(&json!({ "name": "Brows" }))
        .await
        .json::<Value>();
    let service = server
        .post("/api/services")
        .json(&json!({ "user_id": user_id, "category_id": id_of(&category), "title": "Tint" }))
        .await
        .json::<Value>();

    server
        .delete(&format!("/api/service_categories/{}", id_of(&category)))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let service = server
        .get(&format!("/api/services/{}", id_of(&service)))
        .await
        .json::<Value>();
    assert_eq!(service["category_id"], Value::Null);
}

#[tokio::test]
async fn test_catalogue_with_huge_page_is_empty() {
    let server = test_server();
    seed_master(&server).await;

    let response = server
        .get("/api/master_profiles")
        .add_query_param("page", i64::MAX)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 1);
    assert_eq!(body["results"], json!([]));
}
