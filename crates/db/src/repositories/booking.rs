use beautyton_core::models::booking::Booking;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbBooking;

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, client_id, master_id, service_id, booking_time, status, created_at, updated_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

pub async fn create_booking(pool: &Pool<Postgres>, booking: &Booking) -> Result<()> {
    tracing::debug!(
        "Creating booking: id={}, client={}, master={}",
        booking.id, booking.client_id, booking.master_id
    );

    sqlx::query(
        r#"
        INSERT INTO bookings (id, client_id, master_id, service_id, booking_time, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(booking.id)
    .bind(booking.client_id)
    .bind(booking.master_id)
    .bind(booking.service_id)
    .bind(booking.booking_time)
    .bind(booking.status.as_str())
    .bind(booking.created_at)
    .bind(booking.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_booking(pool: &Pool<Postgres>, booking: &Booking) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE bookings
        SET client_id = $2, master_id = $3, service_id = $4, booking_time = $5, status = $6,
            updated_at = $7
        WHERE id = $1
        "#,
    )
    .bind(booking.id)
    .bind(booking.client_id)
    .bind(booking.master_id)
    .bind(booking.service_id)
    .bind(booking.booking_time)
    .bind(booking.status.as_str())
    .bind(booking.updated_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Removes the booking and its reviews, detaching any slots that referenced it.
pub async fn delete_booking(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
