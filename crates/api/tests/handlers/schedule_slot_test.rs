use axum::http::{HeaderName, HeaderValue, StatusCode};
use beautyton_api::config::SlotAccessPolicy;
use beautyton_core::errors::SLOT_OVERLAP_MESSAGE;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{id_of, seed_master, test_server, test_server_with_policy};

fn slot_body(master_id: Uuid, start: &str, end: &str, status: &str) -> Value {
    json!({
        "master_id": master_id,
        "start_time": format!("2025-07-01T{}:00Z", start),
        "end_time": format!("2025-07-01T{}:00Z", end),
        "status": status,
    })
}

fn user_header(id: Uuid) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-user-id"),
        HeaderValue::from_str(&id.to_string()).unwrap(),
    )
}

#[tokio::test]
async fn test_overlapping_committed_slot_is_rejected() {
    let server = test_server();
    let (_, master_id) = seed_master(&server).await;

    // S1 booked 09:00-10:00
    let s1 = server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "09:00", "10:00", "booked"))
        .await;
    s1.assert_status(StatusCode::CREATED);

    // S2 reserved 09:30-10:30 collides with S1
    let s2 = server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "09:30", "10:30", "reserved"))
        .await;
    s2.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(s2.json::<Value>()["error"], SLOT_OVERLAP_MESSAGE);

    // S3 busy 10:00-11:00 only touches S1
    let s3 = server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "10:00", "11:00", "busy"))
        .await;
    s3.assert_status(StatusCode::CREATED);

    let slots = server
        .get("/api/schedule_slots")
        .add_query_param("master_id", master_id)
        .await
        .json::<Vec<Value>>();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["status"], "booked");
    assert_eq!(slots[1]["status"], "busy");
}

#[tokio::test]
async fn test_free_slots_never_block() {
    let server = test_server();
    let (_, master_id) = seed_master(&server).await;

    server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "09:00", "12:00", "free"))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "10:00", "11:00", "booked"))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_update_keeps_own_range_and_detects_neighbours() {
    let server = test_server();
    let (_, master_id) = seed_master(&server).await;

    let first = server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "09:00", "10:00", "booked"))
        .await
        .json::<Value>();
    server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "11:00", "12:00", "busy"))
        .await
        .assert_status(StatusCode::CREATED);

    let path = format!("/api/schedule_slots/{}", id_of(&first));

    // Same range, new status: no self-conflict
    let unchanged = server
        .put(&path)
        .json(&slot_body(master_id, "09:00", "10:00", "reserved"))
        .await;
    unchanged.assert_status_ok();
    assert_eq!(unchanged.json::<Value>()["status"], "reserved");

    // Stretching into the neighbour fails
    server
        .put(&path)
        .json(&slot_body(master_id, "09:00", "11:30", "reserved"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_for_missing_master_is_not_found() {
    let server = test_server();

    let response = server
        .get("/api/schedule_slots")
        .add_query_param("master_id", Uuid::new_v4())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "master profile not found");
}

#[tokio::test]
async fn test_list_without_master_id_is_rejected() {
    let server = test_server();

    let response = server.get("/api/schedule_slots").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "master_id is required");
}

#[tokio::test]
async fn test_create_for_missing_master_is_not_found() {
    let server = test_server();

    server
        .post("/api/schedule_slots")
        .json(&slot_body(Uuid::new_v4(), "09:00", "10:00", "booked"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_slot_fields_are_rejected() {
    let server = test_server();
    let (_, master_id) = seed_master(&server).await;

    let reversed = server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "10:00", "09:00", "booked"))
        .await;
    reversed.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        reversed.json::<Value>()["error"],
        "end_time must be after start_time"
    );

    let unknown_status = server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "09:00", "10:00", "taken"))
        .await;
    unknown_status.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status.json::<Value>()["error"], "invalid slot status");
}

#[tokio::test]
async fn test_get_and_delete_slot() {
    let server = test_server();
    let (_, master_id) = seed_master(&server).await;

    let created = server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "09:00", "10:00", "booked"))
        .await
        .json::<Value>();
    let path = format!("/api/schedule_slots/{}", id_of(&created));

    let fetched = server.get(&path).await.json::<Value>();
    assert_eq!(fetched["date"], "2025-07-01");
    assert_eq!(fetched["slot_type"], "manual");

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_policy_requires_the_owning_user() {
    let server = test_server_with_policy(SlotAccessPolicy::Owner);
    let (owner_id, master_id) = seed_master(&server).await;

    // Anonymous
    server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "09:00", "10:00", "booked"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // Someone else
    let (name, value) = user_header(Uuid::new_v4());
    server
        .post("/api/schedule_slots")
        .add_header(name, value)
        .json(&slot_body(master_id, "09:00", "10:00", "booked"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // The owner
    let (name, value) = user_header(owner_id);
    server
        .post("/api/schedule_slots")
        .add_header(name, value)
        .json(&slot_body(master_id, "09:00", "10:00", "booked"))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_user_header_is_rejected() {
    let server = test_server();
    let (_, master_id) = seed_master(&server).await;

    server
        .post("/api/schedule_slots")
        .add_header(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_static("someone"),
        )
        .json(&slot_body(master_id, "09:00", "10:00", "booked"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_master_removes_its_slots() {
    let server = test_server();
    let (_, master_id) = seed_master(&server).await;

    let slot = server
        .post("/api/schedule_slots")
        .json(&slot_body(master_id, "09:00", "10:00", "booked"))
        .await
        .json::<Value>();

    server
        .delete(&format!("/api/master_profiles/{}", master_id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/schedule_slots/{}", id_of(&slot)))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_cannot_move_slot_into_foreign_calendar() {
    let server = test_server_with_policy(SlotAccessPolicy::Owner);
    let (owner_id, own_master) = seed_master(&server).await;
    let (_, foreign_master) = seed_master(&server).await;

    let (name, value) = user_header(owner_id);
    let created = server
        .post("/api/schedule_slots")
        .add_header(name, value)
        .json(&slot_body(own_master, "09:00", "10:00", "booked"))
        .await;
    created.assert_status(StatusCode::CREATED);
    let path = format!("/api/schedule_slots/{}", id_of(&created.json::<Value>()));

    let (name, value) = user_header(owner_id);
    server
        .put(&path)
        .add_header(name, value)
        .json(&slot_body(foreign_master, "09:00", "10:00", "booked"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let slot = server.get(&path).await.json::<Value>();
    assert_eq!(slot["master_id"], own_master.to_string());
    let foreign_slots = server
        .get("/api/schedule_slots")
        .add_query_param("master_id", foreign_master)
        .await
        .json::<Vec<Value>>();
    assert!(foreign_slots.is_empty());
}

#[tokio::test]
async fn test_slot_can_move_between_masters_when_allowed() {
    let server = test_server();
    let (_, first) = seed_master(&server).await;
    let (_, second) = seed_master(&server).await;

    let created = server
        .post("/api/schedule_slots")
        .json(&slot_body(first, "09:00", "10:00", "busy"))
        .await
        .json::<Value>();

    let moved = server
        .put(&format!("/api/schedule_slots/{}", id_of(&created)))
        .json(&slot_body(second, "09:00", "10:00", "busy"))
        .await;
    moved.assert_status_ok();
    assert_eq!(moved.json::<Value>()["master_id"], second.to_string());
}
