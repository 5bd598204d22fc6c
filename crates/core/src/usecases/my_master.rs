use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{MarketError, MarketResult},
    models::my_master::{MyMaster, MyMasterRequest},
    repositories::{MyMasterRepository, UserRepository},
};

use super::require_client_and_master;

pub struct MyMasterUsecase {
    my_masters: Arc<dyn MyMasterRepository>,
    users: Arc<dyn UserRepository>,
}

impl MyMasterUsecase {
    pub fn new(my_masters: Arc<dyn MyMasterRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { my_masters, users }
    }

    pub async fn get_my_master(&self, id: Uuid) -> MarketResult<MyMaster> {
        self.my_masters
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("my master not found"))
    }

    pub async fn create_my_master(&self, request: MyMasterRequest) -> MarketResult<MyMaster> {
        require_client_and_master(self.users.as_ref(), request.client_id, request.master_id)
            .await?;

        let entry = MyMaster {
            id: Uuid::new_v4(),
            client_id: request.client_id,
            master_id: request.master_id,
            created_at: Utc::now(),
        };
        self.my_masters.create(&entry).await?;

        info!("Client {} saved master {}", entry.client_id, entry.master_id);
        Ok(entry)
    }

    pub async fn update_my_master(
        &self,
        id: Uuid,
        request: MyMasterRequest,
    ) -> MarketResult<MyMaster> {
        require_client_and_master(self.users.as_ref(), request.client_id, request.master_id)
            .await?;
        let existing = self.get_my_master(id).await?;

        let entry = MyMaster {
            id,
            client_id: request.client_id,
            master_id: request.master_id,
            created_at: existing.created_at,
        };
        self.my_masters.update(&entry).await?;
        Ok(entry)
    }

    pub async fn delete_my_master(&self, id: Uuid) -> MarketResult<()> {
        if !self.my_masters.delete(id).await? {
            return Err(MarketError::not_found("my master not found"));
        }
        Ok(())
    }
}
