use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{MarketError, MarketResult},
    models::user::{User, UserRequest, UserRole},
    repositories::{CityRepository, UserRepository},
};

use super::file::FileUsecase;

pub struct UserUsecase {
    users: Arc<dyn UserRepository>,
    cities: Arc<dyn CityRepository>,
    files: FileUsecase,
}

fn validate(request: &UserRequest) -> MarketResult<UserRole> {
    let role = request
        .role
        .parse::<UserRole>()
        .map_err(|_| MarketError::validation("invalid user role"))?;
    if request.username.trim().is_empty() {
        return Err(MarketError::validation("username cannot be empty"));
    }
    if request.city_id.is_nil() {
        return Err(MarketError::validation("city_id is required"));
    }
    Ok(role)
}

impl UserUsecase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        cities: Arc<dyn CityRepository>,
        files: FileUsecase,
    ) -> Self {
        Self {
            users,
            cities,
            files,
        }
    }

    async fn validate(&self, request: &UserRequest) -> MarketResult<UserRole> {
        let role = validate(request)?;
        if self.cities.get_by_id(request.city_id).await?.is_none() {
            return Err(MarketError::validation("invalid city_id"));
        }
        Ok(role)
    }

    pub async fn get_user(&self, id: Uuid) -> MarketResult<User> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("user not found"))
    }

    pub async fn create_user(&self, request: UserRequest) -> MarketResult<User> {
        let role = self.validate(&request).await?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            tg_id: request.tg_id,
            username: request.username,
            role,
            photo_url: request.photo_url,
            city_id: request.city_id,
            ton_wallet: request.ton_wallet,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        info!("Created {} user {}", user.role, user.id);
        Ok(user)
    }

    pub async fn update_user(&self, id: Uuid, request: UserRequest) -> MarketResult<User> {
        let role = self.validate(&request).await?;
        let existing = self.get_user(id).await?;

        let user = User {
            tg_id: request.tg_id,
            username: request.username,
            role,
            photo_url: request.photo_url,
            city_id: request.city_id,
            ton_wallet: request.ton_wallet,
            updated_at: Utc::now(),
            ..existing
        };
        self.users.update(&user).await?;
        Ok(user)
    }

    pub async fn delete_user(&self, id: Uuid) -> MarketResult<()> {
        if !self.users.delete(id).await? {
            return Err(MarketError::not_found("user not found"));
        }
        info!("Deleted user {}", id);
        Ok(())
    }

    /// Stores the photo and points `photo_url` at the new file id.
    pub async fn upload_photo(
        &self,
        id: Uuid,
        name: Option<String>,
        mime_type: &str,
        content: Vec<u8>,
    ) -> MarketResult<User> {
        let mut user = self.get_user(id).await?;
        let file = self.files.upload(name, mime_type, content).await?;

        user.photo_url = file.id;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        Ok(user)
    }
}
