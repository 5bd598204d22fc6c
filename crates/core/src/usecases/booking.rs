use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{MarketError, MarketResult},
    models::{
        booking::{Booking, BookingRequest, BookingStatus},
        user::UserRole,
    },
    repositories::{BookingRepository, ServiceRepository, UserRepository},
};

use super::require_role;

pub struct BookingUsecase {
    bookings: Arc<dyn BookingRepository>,
    users: Arc<dyn UserRepository>,
    services: Arc<dyn ServiceRepository>,
}

/// Any member of the status set is accepted; there is no transition graph.
pub fn parse_status(raw: &str) -> MarketResult<BookingStatus> {
    raw.parse::<BookingStatus>()
        .map_err(|_| MarketError::validation("invalid booking status"))
}

struct BookingFields {
    booking_time: DateTime<Utc>,
    status: BookingStatus,
}

fn validate(request: &BookingRequest) -> MarketResult<BookingFields> {
    if request.client_id.is_nil() || request.master_id.is_nil() || request.service_id.is_nil() {
        return Err(MarketError::validation(
            "client_id, master_id, and service_id are required",
        ));
    }
    let booking_time = request
        .booking_time
        .filter(|time| *time > Utc::now())
        .ok_or_else(|| MarketError::validation("booking_time must be in the future"))?;
    let status = parse_status(&request.status)?;

    Ok(BookingFields {
        booking_time,
        status,
    })
}

impl BookingUsecase {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        users: Arc<dyn UserRepository>,
        services: Arc<dyn ServiceRepository>,
    ) -> Self {
        Self {
            bookings,
            users,
            services,
        }
    }

    pub async fn get_booking(&self, id: Uuid) -> MarketResult<Booking> {
        self.bookings
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("booking not found"))
    }

    pub async fn create_booking(&self, request: BookingRequest) -> MarketResult<Booking> {
        let fields = validate(&request)?;

        require_role(
            self.users.as_ref(),
            request.client_id,
            UserRole::Client,
            "invalid client_id",
            "client_id must refer to a client",
        )
        .await?;
        require_role(
            self.users.as_ref(),
            request.master_id,
            UserRole::Master,
            "invalid master_id",
            "master_id must refer to a master",
        )
        .await?;
        if self.services.get_by_id(request.service_id).await?.is_none() {
            return Err(MarketError::validation("invalid service_id"));
        }

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            client_id: request.client_id,
            master_id: request.master_id,
            service_id: request.service_id,
            booking_time: fields.booking_time,
            status: fields.status,
            created_at: now,
            updated_at: now,
        };
        self.bookings.create(&booking).await?;

        info!(
            "Created booking {} for client {} with master {}",
            booking.id, booking.client_id, booking.master_id
        );
        Ok(booking)
    }

    pub async fn update_booking(&self, id: Uuid, request: BookingRequest) -> MarketResult<Booking> {
        let fields = validate(&request)?;
        let existing = self.get_booking(id).await?;

        let booking = Booking {
            client_id: request.client_id,
            master_id: request.master_id,
            service_id: request.service_id,
            booking_time: fields.booking_time,
            status: fields.status,
            updated_at: Utc::now(),
            ..existing
        };
        self.bookings.update(&booking).await?;
        Ok(booking)
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> MarketResult<Booking> {
        let status = parse_status(status)?;

        let mut booking = self.get_booking(id).await?;
        let previous = booking.status;
        booking.status = status;
        booking.updated_at = Utc::now();
        self.bookings.update(&booking).await?;

        info!("Booking {} moved from {} to {}", id, previous, status);
        Ok(booking)
    }

    /// Reviews of the booking go with it; slots referencing it are detached.
    pub async fn delete_booking(&self, id: Uuid) -> MarketResult<()> {
        if !self.bookings.delete(id).await? {
            return Err(MarketError::not_found("booking not found"));
        }
        info!("Deleted booking {}", id);
        Ok(())
    }
}
