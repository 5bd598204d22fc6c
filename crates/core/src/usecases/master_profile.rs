use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{MarketError, MarketResult},
    models::{
        master_profile::{MasterProfile, MasterProfileFilter, MasterProfileRequest},
        pagination::{ListResponse, Page, PageRequest},
        user::UserRole,
    },
    repositories::{MasterProfileRepository, UserRepository},
};

use super::require_role;

const DEFAULT_STATUS: &str = "active";

pub struct MasterProfileUsecase {
    profiles: Arc<dyn MasterProfileRepository>,
    users: Arc<dyn UserRepository>,
}

fn validate_rating(rating: f64) -> MarketResult<()> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(MarketError::validation("rating must be between 0 and 5"));
    }
    Ok(())
}

impl MasterProfileUsecase {
    pub fn new(profiles: Arc<dyn MasterProfileRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { profiles, users }
    }

    pub async fn get_profile(&self, id: Uuid) -> MarketResult<MasterProfile> {
        self.profiles
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("master profile not found"))
    }

    async fn validate(&self, request: &MasterProfileRequest) -> MarketResult<()> {
        if request.qr_code.trim().is_empty() {
            return Err(MarketError::validation("qr_code is required"));
        }
        validate_rating(request.rating)?;

        if let Some(user_id) = request.user_id {
            require_role(
                self.users.as_ref(),
                user_id,
                UserRole::Master,
                "invalid user_id",
                "user must have master role",
            )
            .await?;
        }
        Ok(())
    }

    pub async fn create_profile(&self, request: MasterProfileRequest) -> MarketResult<MasterProfile> {
        self.validate(&request).await?;

        let now = Utc::now();
        let profile = MasterProfile {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            qr_code: request.qr_code,
            bio: request.bio,
            status: if request.status.is_empty() {
                DEFAULT_STATUS.to_string()
            } else {
                request.status
            },
            rating: request.rating,
            created_at: now,
            updated_at: now,
        };
        self.profiles.create(&profile).await?;

        info!("Created master profile {}", profile.id);
        Ok(profile)
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        request: MasterProfileRequest,
    ) -> MarketResult<MasterProfile> {
        self.validate(&request).await?;
        let existing = self.get_profile(id).await?;

        let profile = MasterProfile {
            user_id: request.user_id,
            qr_code: request.qr_code,
            bio: request.bio,
            status: if request.status.is_empty() {
                existing.status.clone()
            } else {
                request.status
            },
            rating: request.rating,
            updated_at: Utc::now(),
            ..existing
        };
        self.profiles.update(&profile).await?;
        Ok(profile)
    }

    pub async fn update_rating(&self, id: Uuid, rating: f64) -> MarketResult<MasterProfile> {
        validate_rating(rating)?;

        let mut profile = self.get_profile(id).await?;
        profile.rating = rating;
        profile.updated_at = Utc::now();
        self.profiles.update(&profile).await?;
        Ok(profile)
    }

    /// Deleting a profile also removes its schedule slots.
    pub async fn delete_profile(&self, id: Uuid) -> MarketResult<()> {
        if !self.profiles.delete(id).await? {
            return Err(MarketError::not_found("master profile not found"));
        }
        info!("Deleted master profile {}", id);
        Ok(())
    }

    pub async fn list_profiles(
        &self,
        filter: MasterProfileFilter,
        page: PageRequest,
    ) -> MarketResult<ListResponse<MasterProfile>> {
        if let (Some(from), Some(to)) = (filter.price_from, filter.price_to) {
            if from > to {
                return Err(MarketError::validation("price_from cannot exceed price_to"));
            }
        }
        if matches!(filter.price_from, Some(p) if p < 0.0) || matches!(filter.price_to, Some(p) if p < 0.0) {
            return Err(MarketError::validation("price cannot be negative"));
        }

        let (results, total) = self.profiles.list(&filter, Page::from(page)).await?;
        Ok(ListResponse { results, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::User;
    use crate::repositories::{MockMasterProfileRepository, MockUserRepository};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    fn user(id: Uuid, role: UserRole) -> User {
        User {
            id,
            tg_id: 7,
            username: "u".to_string(),
            role,
            photo_url: String::new(),
            city_id: Uuid::new_v4(),
            ton_wallet: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request(user_id: Option<Uuid>) -> MasterProfileRequest {
        MasterProfileRequest {
            user_id,
            qr_code: "qr-1".to_string(),
            rating: 4.0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_requires_master_role_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .returning(|id| Ok(Some(user(id, UserRole::Client))));
        let mut profiles = MockMasterProfileRepository::new();
        profiles.expect_create().times(0);
        let uc = MasterProfileUsecase::new(Arc::new(profiles), Arc::new(users));

        let err = uc.create_profile(request(Some(Uuid::new_v4()))).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation error: user must have master role");
    }

    #[tokio::test]
    async fn create_defaults_status() {
        let mut profiles = MockMasterProfileRepository::new();
        profiles.expect_create().times(1).returning(|_| Ok(()));
        let uc = MasterProfileUsecase::new(Arc::new(profiles), Arc::new(MockUserRepository::new()));

        let profile = uc.create_profile(request(None)).await.unwrap();
        assert_eq!(profile.status, "active");
    }

    #[tokio::test]
    async fn rating_out_of_range_is_rejected() {
        let mut profiles = MockMasterProfileRepository::new();
        profiles.expect_get_by_id().times(0);
        let uc = MasterProfileUsecase::new(Arc::new(profiles), Arc::new(MockUserRepository::new()));

        let err = uc.update_rating(Uuid::new_v4(), 5.5).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation error: rating must be between 0 and 5");
    }

    #[tokio::test]
    async fn list_clamps_page_before_querying() {
        let mut profiles = MockMasterProfileRepository::new();
        profiles
            .expect_list()
            .with(
                eq(MasterProfileFilter::default()),
                eq(Page {
                    page: 1,
                    page_size: 100,
                }),
            )
            .returning(|_, _| Ok((vec![], 0)));
        let uc = MasterProfileUsecase::new(Arc::new(profiles), Arc::new(MockUserRepository::new()));

        let listed = uc
            .list_profiles(
                MasterProfileFilter::default(),
                PageRequest {
                    page: Some(0),
                    page_size: Some(500),
                },
            )
            .await
            .unwrap();
        assert_eq!(listed.total, 0);
    }
}
