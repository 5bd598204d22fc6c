use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterProfile {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub qr_code: String,
    pub bio: String,
    pub status: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterProfileRequest {
    pub user_id: Option<Uuid>,
    pub qr_code: String,
    pub bio: String,
    pub status: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRatingRequest {
    pub rating: f64,
}

/// Search filters for the master catalogue. `None` disables a filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterProfileFilter {
    /// Case-insensitive substring of one of the master's service titles.
    pub query: Option<String>,
    /// Exact service category name.
    pub category: Option<String>,
    /// Case-insensitive substring of the master's city name.
    pub city: Option<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    /// Minimum profile rating.
    pub rating: Option<f64>,
}
