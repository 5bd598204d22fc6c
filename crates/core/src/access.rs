//! Per-master authorization for schedule writes.
//!
//! Schedule mutations ask an [`AccessPolicy`] whether the acting user may
//! touch a master's calendar. The policy is injected into the usecase so the
//! deployment decides how strict it is.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::MarketResult;
use crate::repositories::MasterProfileRepository;

/// The authenticated caller, as established by the authentication layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actor {
    /// `None` for anonymous requests.
    pub user_id: Option<Uuid>,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

#[async_trait]
pub trait AccessPolicy: Send + Sync {
    /// Whether `actor` may modify the calendar of master profile `master_id`.
    async fn authorize(&self, actor: &Actor, master_id: Uuid) -> MarketResult<bool>;
}

/// Grants every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl AccessPolicy for AllowAll {
    async fn authorize(&self, _actor: &Actor, _master_id: Uuid) -> MarketResult<bool> {
        Ok(true)
    }
}

/// Grants a request only when the actor is the user owning the master profile.
pub struct MasterOwnership {
    masters: Arc<dyn MasterProfileRepository>,
}

impl MasterOwnership {
    pub fn new(masters: Arc<dyn MasterProfileRepository>) -> Self {
        Self { masters }
    }
}

#[async_trait]
impl AccessPolicy for MasterOwnership {
    async fn authorize(&self, actor: &Actor, master_id: Uuid) -> MarketResult<bool> {
        let Some(user_id) = actor.user_id else {
            return Ok(false);
        };

        let owner = self
            .masters
            .get_by_id(master_id)
            .await?
            .and_then(|profile| profile.user_id);

        Ok(owner == Some(user_id))
    }
}
