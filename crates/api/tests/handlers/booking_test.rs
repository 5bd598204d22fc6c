use axum::http::StatusCode;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{id_of, seed_city, seed_user, test_server};
use axum_test::TestServer;

struct Parties {
    client_id: Uuid,
    master_id: Uuid,
    service_id: Uuid,
}

async fn seed_parties(server: &TestServer) -> Parties {
    let city_id = seed_city(server).await;
    let client_id = seed_user(server, city_id, "client").await;
    let master_id = seed_user(server, city_id, "master").await;

    let service = server
        .post("/api/services")
        .json(&json!({ "user_id": master_id, "title": "Manicure", "price": 25.0, "duration": "1h" }))
        .await
        .json::<Value>();

    Parties {
        client_id,
        master_id,
        service_id: id_of(&service),
    }
}

fn booking_body(parties: &Parties, status: &str) -> Value {
    json!({
        "client_id": parties.client_id,
        "master_id": parties.master_id,
        "service_id": parties.service_id,
        "booking_time": Utc::now() + Duration::days(1),
        "status": status,
    })
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let server = test_server();
    let parties = seed_parties(&server).await;

    let created = server
        .post("/api/bookings")
        .json(&booking_body(&parties, "pending"))
        .await;
    created.assert_status(StatusCode::CREATED);
    let path = format!("/api/bookings/{}", id_of(&created.json::<Value>()));

    // Status moves freely, even backwards
    for status in ["completed", "pending", "canceled"] {
        let updated = server
            .put(&format!("{}/status", path))
            .json(&json!({ "status": status }))
            .await;
        updated.assert_status_ok();
        assert_eq!(updated.json::<Value>()["status"], status);
    }

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_status_is_a_validation_error() {
    let server = test_server();
    let parties = seed_parties(&server).await;

    let created = server
        .post("/api/bookings")
        .json(&booking_body(&parties, "pending"))
        .await
        .json::<Value>();

    let response = server
        .put(&format!("/api/bookings/{}/status", id_of(&created)))
        .json(&json!({ "status": "archived" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "invalid booking status");
}

#[tokio::test]
async fn test_booking_in_the_past_is_rejected() {
    let server = test_server();
    let parties = seed_parties(&server).await;

    let mut body = booking_body(&parties, "pending");
    body["booking_time"] = json!(Utc::now() - Duration::hours(1));

    let response = server.post("/api/bookings").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "booking_time must be in the future"
    );
}

#[tokio::test]
async fn test_roles_are_checked() {
    let server = test_server();
    let parties = seed_parties(&server).await;

    let swapped = Parties {
        client_id: parties.master_id,
        master_id: parties.client_id,
        service_id: parties.service_id,
    };
    let response = server
        .post("/api/bookings")
        .json(&booking_body(&swapped, "pending"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "client_id must refer to a client"
    );
}

#[tokio::test]
async fn test_reviews_follow_their_booking() {
    let server = test_server();
    let parties = seed_parties(&server).await;

    let booking = server
        .post("/api/bookings")
        .json(&booking_body(&parties, "completed"))
        .await
        .json::<Value>();
    let booking_path = format!("/api/bookings/{}", id_of(&booking));

    let out_of_range = server
        .post("/api/reviews")
        .json(&json!({ "booking_id": id_of(&booking), "rating": 6 }))
        .await;
    out_of_range.assert_status(StatusCode::BAD_REQUEST);

    let review = server
        .post("/api/reviews")
        .json(&json!({ "booking_id": id_of(&booking), "rating": 5, "comment": "great" }))
        .await;
    review.assert_status(StatusCode::CREATED);
    let review_path = format!("/api/reviews/{}", id_of(&review.json::<Value>()));

    // Deleting the booking takes its reviews with it
    server.delete(&booking_path).await.assert_status(StatusCode::NO_CONTENT);
    server.get(&review_path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_referenced_client_cannot_be_deleted() {
    let server = test_server();
    let parties = seed_parties(&server).await;

    server
        .post("/api/bookings")
        .json(&booking_body(&parties, "pending"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .delete(&format!("/api/users/{}", parties.client_id))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_payment_status_updates() {
    let server = test_server();
    let parties = seed_parties(&server).await;

    let payment = server
        .post("/api/payments")
        .json(&json!({
            "client_id": parties.client_id,
            "master_id": parties.master_id,
            "amount": 12.5,
            "currency": "TON",
            "payment_type": "tip",
            "status": "pending",
        }))
        .await;
    payment.assert_status(StatusCode::CREATED);
    let path = format!("/api/payments/{}/status", id_of(&payment.json::<Value>()));

    let completed = server.put(&path).json(&json!({ "status": "completed" })).await;
    completed.assert_status_ok();
    assert_eq!(completed.json::<Value>()["status"], "completed");

    server
        .put(&path)
        .json(&json!({ "status": "refunded" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
