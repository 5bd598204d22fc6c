use std::sync::Arc;

use uuid::Uuid;

use crate::{
    errors::{MarketError, MarketResult},
    models::review::{Review, ReviewRequest},
    repositories::{BookingRepository, ReviewRepository},
};

pub struct ReviewUsecase {
    reviews: Arc<dyn ReviewRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl ReviewUsecase {
    pub fn new(reviews: Arc<dyn ReviewRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { reviews, bookings }
    }

    pub async fn get_review(&self, id: Uuid) -> MarketResult<Review> {
        self.reviews
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("review not found"))
    }

    async fn validate(&self, request: &ReviewRequest) -> MarketResult<()> {
        if request.booking_id.is_nil() {
            return Err(MarketError::validation("booking_id is required"));
        }
        if !(1..=5).contains(&request.rating) {
            return Err(MarketError::validation("rating must be between 1 and 5"));
        }
        if self.bookings.get_by_id(request.booking_id).await?.is_none() {
            return Err(MarketError::validation("invalid booking_id"));
        }
        Ok(())
    }

    pub async fn create_review(&self, request: ReviewRequest) -> MarketResult<Review> {
        self.validate(&request).await?;

        let review = Review {
            id: Uuid::new_v4(),
            booking_id: request.booking_id,
            rating: request.rating,
            comment: request.comment,
        };
        self.reviews.create(&review).await?;
        Ok(review)
    }

    pub async fn update_review(&self, id: Uuid, request: ReviewRequest) -> MarketResult<Review> {
        self.validate(&request).await?;
        self.get_review(id).await?;

        let review = Review {
            id,
            booking_id: request.booking_id,
            rating: request.rating,
            comment: request.comment,
        };
        self.reviews.update(&review).await?;
        Ok(review)
    }

    pub async fn delete_review(&self, id: Uuid) -> MarketResult<()> {
        if !self.reviews.delete(id).await? {
            return Err(MarketError::not_found("review not found"));
        }
        Ok(())
    }
}
