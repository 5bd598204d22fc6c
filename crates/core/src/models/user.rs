use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

string_enum! {
    UserRole {
        Master => "master",
        Client => "client",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub tg_id: i64,
    pub username: String,
    pub role: UserRole,
    pub photo_url: String,
    pub city_id: Uuid,
    pub ton_wallet: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /users` and `PUT /users/:id`. Missing fields decode as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    pub tg_id: i64,
    pub username: String,
    pub role: String,
    pub photo_url: String,
    pub city_id: Uuid,
    pub ton_wallet: String,
}
