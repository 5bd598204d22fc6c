use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{MarketError, MarketResult},
    models::subscription::{Subscription, SubscriptionRequest},
    repositories::{SubscriptionRepository, UserRepository},
};

use super::require_client_and_master;

pub struct SubscriptionUsecase {
    subscriptions: Arc<dyn SubscriptionRepository>,
    users: Arc<dyn UserRepository>,
}

impl SubscriptionUsecase {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            subscriptions,
            users,
        }
    }

    pub async fn get_subscription(&self, id: Uuid) -> MarketResult<Subscription> {
        self.subscriptions
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("subscription not found"))
    }

    pub async fn create_subscription(
        &self,
        request: SubscriptionRequest,
    ) -> MarketResult<Subscription> {
        require_client_and_master(self.users.as_ref(), request.client_id, request.master_id)
            .await?;

        let subscription = Subscription {
            id: Uuid::new_v4(),
            client_id: request.client_id,
            master_id: request.master_id,
            created_at: Utc::now(),
        };
        self.subscriptions.create(&subscription).await?;

        info!(
            "Client {} subscribed to master {}",
            subscription.client_id, subscription.master_id
        );
        Ok(subscription)
    }

    pub async fn update_subscription(
        &self,
        id: Uuid,
        request: SubscriptionRequest,
    ) -> MarketResult<Subscription> {
        require_client_and_master(self.users.as_ref(), request.client_id, request.master_id)
            .await?;
        let existing = self.get_subscription(id).await?;

        let subscription = Subscription {
            id,
            client_id: request.client_id,
            master_id: request.master_id,
            created_at: existing.created_at,
        };
        self.subscriptions.update(&subscription).await?;
        Ok(subscription)
    }

    pub async fn delete_subscription(&self, id: Uuid) -> MarketResult<()> {
        if !self.subscriptions.delete(id).await? {
            return Err(MarketError::not_found("subscription not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{User, UserRole};
    use crate::repositories::{MockSubscriptionRepository, MockUserRepository};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn user(id: Uuid, role: UserRole) -> User {
        User {
            id,
            tg_id: 7,
            username: "follower".to_string(),
            role,
            photo_url: String::new(),
            city_id: Uuid::new_v4(),
            ton_wallet: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Users whose role is decided by which id is asked for.
    fn users_with(
        client_id: Uuid,
        client_role: UserRole,
        master_role: UserRole,
    ) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_get_by_id().returning(move |id| {
            let role = if id == client_id { client_role } else { master_role };
            Ok(Some(user(id, role)))
        });
        users
    }

    #[rstest]
    #[case(Uuid::nil(), Uuid::new_v4())]
    #[case(Uuid::new_v4(), Uuid::nil())]
    #[tokio::test]
    async fn both_ids_are_required(#[case] client_id: Uuid, #[case] master_id: Uuid) {
        let mut users = MockUserRepository::new();
        users.expect_get_by_id().times(0);
        let uc = SubscriptionUsecase::new(
            Arc::new(MockSubscriptionRepository::new()),
            Arc::new(users),
        );

        let err = uc
            .create_subscription(SubscriptionRequest { client_id, master_id })
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: client_id and master_id are required"
        );
    }

    #[rstest]
    #[case(UserRole::Master, UserRole::Master, "client_id must refer to a client")]
    #[case(UserRole::Client, UserRole::Client, "master_id must refer to a master")]
    #[tokio::test]
    async fn roles_must_match_sides(
        #[case] client_role: UserRole,
        #[case] master_role: UserRole,
        #[case] message: &str,
    ) {
        let client_id = Uuid::new_v4();
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions.expect_create().times(0);
        let uc = SubscriptionUsecase::new(
            Arc::new(subscriptions),
            Arc::new(users_with(client_id, client_role, master_role)),
        );

        let err = uc
            .create_subscription(SubscriptionRequest {
                client_id,
                master_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), format!("Validation error: {}", message));
    }

    #[tokio::test]
    async fn update_keeps_creation_time() {
        let client_id = Uuid::new_v4();
        let created_at = Utc::now() - chrono::Duration::days(3);
        let existing = Subscription {
            id: Uuid::new_v4(),
            client_id,
            master_id: Uuid::new_v4(),
            created_at,
        };
        let id = existing.id;
        let new_master = Uuid::new_v4();

        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        subscriptions
            .expect_update()
            .withf(move |s| s.master_id == new_master && s.created_at == created_at)
            .times(1)
            .returning(|_| Ok(()));
        let uc = SubscriptionUsecase::new(
            Arc::new(subscriptions),
            Arc::new(users_with(client_id, UserRole::Client, UserRole::Master)),
        );

        let updated = uc
            .update_subscription(
                id,
                SubscriptionRequest {
                    client_id,
                    master_id: new_master,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, id);
    }

    #[tokio::test]
    async fn deleting_missing_subscription_is_not_found() {
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions.expect_delete().returning(|_| Ok(false));
        let uc = SubscriptionUsecase::new(
            Arc::new(subscriptions),
            Arc::new(MockUserRepository::new()),
        );

        let err = uc.delete_subscription(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, MarketError::NotFound(_)));
    }
}
