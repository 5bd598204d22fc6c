use std::sync::Arc;

use uuid::Uuid;

use crate::{
    errors::{MarketError, MarketResult},
    models::user_preferences::{UserPreferences, UserPreferencesRequest},
    repositories::{ServiceCategoryRepository, UserPreferencesRepository, UserRepository},
};

pub struct UserPreferencesUsecase {
    preferences: Arc<dyn UserPreferencesRepository>,
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn ServiceCategoryRepository>,
}

impl UserPreferencesUsecase {
    pub fn new(
        preferences: Arc<dyn UserPreferencesRepository>,
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn ServiceCategoryRepository>,
    ) -> Self {
        Self {
            preferences,
            users,
            categories,
        }
    }

    pub async fn get_user_preferences(&self, id: Uuid) -> MarketResult<UserPreferences> {
        self.preferences
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("user preferences not found"))
    }

    /// Validates the request; a nil category id counts as no preference.
    async fn build(
        &self,
        id: Uuid,
        request: UserPreferencesRequest,
    ) -> MarketResult<UserPreferences> {
        if request.user_id.is_nil() {
            return Err(MarketError::validation("user_id is required"));
        }
        if request.max_price < 0.0 {
            return Err(MarketError::validation("max_price cannot be negative"));
        }
        if request.max_distance_km < 0 {
            return Err(MarketError::validation("max_distance_km cannot be negative"));
        }
        if self.users.get_by_id(request.user_id).await?.is_none() {
            return Err(MarketError::validation("invalid user_id"));
        }

        let preferred_category_id = request.preferred_category_id.filter(|id| !id.is_nil());
        if let Some(category_id) = preferred_category_id {
            if self.categories.get_by_id(category_id).await?.is_none() {
                return Err(MarketError::validation("invalid preferred_category_id"));
            }
        }

        Ok(UserPreferences {
            id,
            user_id: request.user_id,
            preferred_category_id,
            max_price: request.max_price,
            max_distance_km: request.max_distance_km,
        })
    }

    pub async fn create_user_preferences(
        &self,
        request: UserPreferencesRequest,
    ) -> MarketResult<UserPreferences> {
        let preferences = self.build(Uuid::new_v4(), request).await?;
        self.preferences.create(&preferences).await?;
        Ok(preferences)
    }

    pub async fn update_user_preferences(
        &self,
        id: Uuid,
        request: UserPreferencesRequest,
    ) -> MarketResult<UserPreferences> {
        let preferences = self.build(id, request).await?;
        self.get_user_preferences(id).await?;
        self.preferences.update(&preferences).await?;
        Ok(preferences)
    }

    pub async fn delete_user_preferences(&self, id: Uuid) -> MarketResult<()> {
        if !self.preferences.delete(id).await? {
            return Err(MarketError::not_found("user preferences not found"));
        }
        Ok(())
    }
}
