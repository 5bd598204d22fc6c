//! # Actor Extraction
//!
//! Authentication happens in front of this service; the authenticating proxy
//! forwards the caller's user id in the `X-User-Id` header. Requests without
//! the header act anonymously, which only the permissive slot access policy
//! accepts.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use beautyton_core::{access::Actor, errors::MarketError};
use uuid::Uuid;

use super::error_handling::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor yielding the [`Actor`] of the current request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(CurrentActor(Actor::anonymous()));
        };

        let user_id = value
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .ok_or_else(|| AppError(MarketError::validation("invalid X-User-Id header")))?;

        Ok(CurrentActor(Actor::user(user_id)))
    }
}
