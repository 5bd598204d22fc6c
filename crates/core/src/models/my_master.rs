use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A master saved to a client's personal list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyMaster {
    pub id: Uuid,
    pub client_id: Uuid,
    pub master_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MyMasterRequest {
    pub client_id: Uuid,
    pub master_id: Uuid,
}
