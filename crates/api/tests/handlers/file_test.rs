use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::body::Bytes;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::test_server;

#[tokio::test]
async fn test_upload_then_download() {
    let server = test_server();

    let uploaded = server
        .post("/api/files")
        .content_type("text/plain")
        .add_header(
            HeaderName::from_static("x-file-name"),
            HeaderValue::from_static("notes.txt"),
        )
        .bytes(Bytes::from_static(b"hello"))
        .await;
    uploaded.assert_status(StatusCode::CREATED);

    let meta = uploaded.json::<Value>();
    assert_eq!(meta["name"], "notes.txt");
    assert_eq!(meta["size"], 5);
    assert_eq!(meta["mime_type"], "text/plain");

    let downloaded = server
        .get(&format!("/api/files/{}", meta["id"].as_str().unwrap()))
        .await;
    downloaded.assert_status_ok();
    assert_eq!(downloaded.header(header::CONTENT_TYPE), "text/plain");
    assert_eq!(downloaded.text(), "hello");
}

#[tokio::test]
async fn test_empty_upload_is_rejected() {
    let server = test_server();

    let response = server
        .post("/api/files")
        .content_type("text/plain")
        .bytes(Bytes::new())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "file size must be positive");
}

#[tokio::test]
async fn test_unknown_file_is_not_found() {
    let server = test_server();

    let response = server.get("/api/files/0123456789abcdef").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "file not found");
}
