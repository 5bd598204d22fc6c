use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{id_of, test_server};

#[tokio::test]
async fn test_country_code_is_uppercased() {
    let server = test_server();

    let country = server
        .post("/api/countries")
        .json(&json!({ "name": "Georgia", "code": "ge" }))
        .await;
    country.assert_status(StatusCode::CREATED);
    assert_eq!(country.json::<Value>()["code"], "GE");
}

#[tokio::test]
async fn test_city_listing_filters_by_name() {
    let server = test_server();
    let country = server
        .post("/api/countries")
        .json(&json!({ "name": "Kazakhstan", "code": "KZ" }))
        .await
        .json::<Value>();

    for name in ["Astana", "Almaty", "Shymkent"] {
        server
            .post("/api/cities")
            .json(&json!({ "name": name, "country_id": id_of(&country), "timezone": "Asia/Almaty" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let found = server
        .get("/api/cities")
        .add_query_param("name", "a")
        .add_query_param("page_size", 2)
        .await
        .json::<Value>();
    assert_eq!(found["total"], 2);
    assert_eq!(found["results"][0]["name"], "Almaty");
    assert_eq!(found["results"][1]["name"], "Astana");

    let everything = server.get("/api/cities").await.json::<Value>();
    assert_eq!(everything["total"], 3);
}

#[tokio::test]
async fn test_city_needs_existing_country() {
    let server = test_server();

    let response = server
        .post("/api/cities")
        .json(&json!({ "name": "Nowhere", "country_id": Uuid::new_v4() }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "invalid country_id");
}

#[tokio::test]
async fn test_referenced_country_cannot_be_deleted() {
    let server = test_server();
    let country = server
        .post("/api/countries")
        .json(&json!({ "name": "Kazakhstan", "code": "KZ" }))
        .await
        .json::<Value>();
    server
        .post("/api/cities")
        .json(&json!({ "name": "Almaty", "country_id": id_of(&country) }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .delete(&format!("/api/countries/{}", id_of(&country)))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_city_listing_past_the_last_page_is_empty() {
    let server = test_server();
    let country = server
        .post("/api/countries")
        .json(&json!({ "name": "Kazakhstan", "code": "KZ" }))
        .await
        .json::<Value>();
    server
        .post("/api/cities")
        .json(&json!({ "name": "Almaty", "country_id": id_of(&country) }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/cities")
        .add_query_param("page", i64::MAX)
        .add_query_param("page_size", 100)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 1);
    assert_eq!(body["results"], json!([]));
}
