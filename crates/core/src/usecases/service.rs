use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{MarketError, MarketResult},
    models::{
        service::{Service, ServiceCategory, ServiceCategoryRequest, ServiceRequest},
        user::UserRole,
    },
    repositories::{ServiceCategoryRepository, ServiceRepository, UserRepository},
};

use super::{file::FileUsecase, require_role};

pub struct ServiceUsecase {
    services: Arc<dyn ServiceRepository>,
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn ServiceCategoryRepository>,
    files: FileUsecase,
}

impl ServiceUsecase {
    pub fn new(
        services: Arc<dyn ServiceRepository>,
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn ServiceCategoryRepository>,
        files: FileUsecase,
    ) -> Self {
        Self {
            services,
            users,
            categories,
            files,
        }
    }

    pub async fn get_service(&self, id: Uuid) -> MarketResult<Service> {
        self.services
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("service not found"))
    }

    async fn validate(&self, request: &ServiceRequest) -> MarketResult<()> {
        if request.title.trim().is_empty() {
            return Err(MarketError::validation("title is required"));
        }
        if request.price < 0.0 {
            return Err(MarketError::validation("price cannot be negative"));
        }

        if let Some(user_id) = request.user_id {
            require_role(
                self.users.as_ref(),
                user_id,
                UserRole::Master,
                "invalid user_id",
                "user_id must refer to a master",
            )
            .await?;
        }
        if let Some(category_id) = request.category_id {
            if self.categories.get_by_id(category_id).await?.is_none() {
                return Err(MarketError::validation("invalid category_id"));
            }
        }
        Ok(())
    }

    pub async fn create_service(&self, request: ServiceRequest) -> MarketResult<Service> {
        self.validate(&request).await?;

        let service = Service {
            id: Uuid::new_v4(),
            category_id: request.category_id,
            user_id: request.user_id,
            title: request.title,
            description: request.description,
            photo_url: request.photo_url,
            price: request.price,
            duration: request.duration,
            created_at: Utc::now(),
        };
        self.services.create(&service).await?;

        info!("Created service {} ({})", service.id, service.title);
        Ok(service)
    }

    pub async fn update_service(&self, id: Uuid, request: ServiceRequest) -> MarketResult<Service> {
        self.validate(&request).await?;
        let existing = self.get_service(id).await?;

        let service = Service {
            category_id: request.category_id,
            user_id: request.user_id,
            title: request.title,
            description: request.description,
            photo_url: request.photo_url,
            price: request.price,
            duration: request.duration,
            ..existing
        };
        self.services.update(&service).await?;
        Ok(service)
    }

    pub async fn delete_service(&self, id: Uuid) -> MarketResult<()> {
        if !self.services.delete(id).await? {
            return Err(MarketError::not_found("service not found"));
        }
        info!("Deleted service {}", id);
        Ok(())
    }

    pub async fn upload_photo(
        &self,
        id: Uuid,
        name: Option<String>,
        mime_type: &str,
        content: Vec<u8>,
    ) -> MarketResult<Service> {
        let mut service = self.get_service(id).await?;
        let file = self.files.upload(name, mime_type, content).await?;

        service.photo_url = file.id;
        self.services.update(&service).await?;
        Ok(service)
    }
}

pub struct ServiceCategoryUsecase {
    categories: Arc<dyn ServiceCategoryRepository>,
}

fn validate_category(request: &ServiceCategoryRequest) -> MarketResult<()> {
    if request.name.trim().is_empty() {
        return Err(MarketError::validation("name is required"));
    }
    Ok(())
}

impl ServiceCategoryUsecase {
    pub fn new(categories: Arc<dyn ServiceCategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn get_category(&self, id: Uuid) -> MarketResult<ServiceCategory> {
        self.categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("service category not found"))
    }

    pub async fn create_category(&self, request: ServiceCategoryRequest) -> MarketResult<ServiceCategory> {
        validate_category(&request)?;

        let category = ServiceCategory {
            id: Uuid::new_v4(),
            name: request.name,
        };
        self.categories.create(&category).await?;
        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        request: ServiceCategoryRequest,
    ) -> MarketResult<ServiceCategory> {
        validate_category(&request)?;
        let mut category = self.get_category(id).await?;

        category.name = request.name;
        self.categories.update(&category).await?;
        Ok(category)
    }

    /// Services of a deleted category keep existing without a category.
    pub async fn delete_category(&self, id: Uuid) -> MarketResult<()> {
        if !self.categories.delete(id).await? {
            return Err(MarketError::not_found("service category not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::User;
    use crate::repositories::{
        MockFileStore, MockServiceCategoryRepository, MockServiceRepository, MockUserRepository,
    };
    use rstest::rstest;

    fn usecase(
        services: MockServiceRepository,
        users: MockUserRepository,
        categories: MockServiceCategoryRepository,
    ) -> ServiceUsecase {
        ServiceUsecase::new(
            Arc::new(services),
            Arc::new(users),
            Arc::new(categories),
            FileUsecase::new(Arc::new(MockFileStore::new())),
        )
    }

    #[rstest]
    #[case("", 10.0, "title is required")]
    #[case("Manicure", -1.0, "price cannot be negative")]
    #[tokio::test]
    async fn create_validates_fields(#[case] title: &str, #[case] price: f64, #[case] message: &str) {
        let mut services = MockServiceRepository::new();
        services.expect_create().times(0);
        let uc = usecase(services, MockUserRepository::new(), MockServiceCategoryRepository::new());

        let request = ServiceRequest {
            title: title.to_string(),
            price,
            ..Default::default()
        };
        let err = uc.create_service(request).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Validation error: {}", message));
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let mut categories = MockServiceCategoryRepository::new();
        categories.expect_get_by_id().returning(|_| Ok(None));
        let uc = usecase(MockServiceRepository::new(), MockUserRepository::new(), categories);

        let request = ServiceRequest {
            title: "Manicure".to_string(),
            category_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        let err = uc.create_service(request).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation error: invalid category_id");
    }

    #[tokio::test]
    async fn create_requires_master_owner() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_id().returning(|id| {
            Ok(Some(User {
                id,
                tg_id: 1,
                username: "c".to_string(),
                role: UserRole::Client,
                photo_url: String::new(),
                city_id: Uuid::new_v4(),
                ton_wallet: String::new(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        let uc = usecase(MockServiceRepository::new(), users, MockServiceCategoryRepository::new());

        let request = ServiceRequest {
            title: "Manicure".to_string(),
            user_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        let err = uc.create_service(request).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation error: user_id must refer to a master");
    }

    #[tokio::test]
    async fn category_name_is_required() {
        let uc = ServiceCategoryUsecase::new(Arc::new(MockServiceCategoryRepository::new()));

        let err = uc
            .create_category(ServiceCategoryRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: name is required");
    }
}
