use serde_json::Value;

use crate::test_utils::test_server;

#[tokio::test]
async fn test_health_and_version() {
    let server = test_server();

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "ok");

    let version = server.get("/version").await.json::<Value>();
    assert_eq!(version["name"], "beautyton-api");
    assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));
}
