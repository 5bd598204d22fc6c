use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalogue defaults a user has chosen for themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub id: Uuid,
    pub user_id: Uuid,
    pub preferred_category_id: Option<Uuid>,
    pub max_price: f64,
    pub max_distance_km: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferencesRequest {
    pub user_id: Uuid,
    pub preferred_category_id: Option<Uuid>,
    pub max_price: f64,
    pub max_distance_km: i32,
}
