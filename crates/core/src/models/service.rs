use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub photo_url: String,
    pub price: f64,
    pub duration: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceRequest {
    pub category_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub photo_url: String,
    pub price: f64,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceCategoryRequest {
    pub name: String,
}
