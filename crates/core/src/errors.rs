use thiserror::Error;

/// Message reported when a slot write collides with a committed slot.
pub const SLOT_OVERLAP_MESSAGE: &str = "slot overlaps with existing booked, busy, or reserved slot";

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{}", SLOT_OVERLAP_MESSAGE)]
    SlotOverlap,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl MarketError {
    pub fn not_found(what: impl Into<String>) -> Self {
        MarketError::NotFound(what.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        MarketError::Validation(message.into())
    }
}

pub type MarketResult<T> = Result<T, MarketError>;
