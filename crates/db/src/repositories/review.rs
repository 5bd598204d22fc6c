use beautyton_core::models::review::Review;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbReview;

pub async fn get_review_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbReview>> {
    let review = sqlx::query_as::<_, DbReview>(
        "SELECT id, booking_id, rating, comment FROM reviews WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(review)
}

pub async fn create_review(pool: &Pool<Postgres>, review: &Review) -> Result<()> {
    sqlx::query("INSERT INTO reviews (id, booking_id, rating, comment) VALUES ($1, $2, $3, $4)")
        .bind(review.id)
        .bind(review.booking_id)
        .bind(review.rating)
        .bind(&review.comment)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_review(pool: &Pool<Postgres>, review: &Review) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE reviews SET booking_id = $2, rating = $3, comment = $4 WHERE id = $1",
    )
    .bind(review.id)
    .bind(review.booking_id)
    .bind(review.rating)
    .bind(&review.comment)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_review(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
