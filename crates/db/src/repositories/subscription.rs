use beautyton_core::models::subscription::Subscription;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbSubscription;

pub async fn get_subscription_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbSubscription>> {
    let subscription = sqlx::query_as::<_, DbSubscription>(
        "SELECT id, client_id, master_id, created_at FROM subscriptions WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(subscription)
}

pub async fn create_subscription(pool: &Pool<Postgres>, subscription: &Subscription) -> Result<()> {
    sqlx::query(
        "INSERT INTO subscriptions (id, client_id, master_id, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(subscription.id)
    .bind(subscription.client_id)
    .bind(subscription.master_id)
    .bind(subscription.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_subscription(
    pool: &Pool<Postgres>,
    subscription: &Subscription,
) -> Result<bool> {
    let result =
        sqlx::query("UPDATE subscriptions SET client_id = $2, master_id = $3 WHERE id = $1")
            .bind(subscription.id)
            .bind(subscription.client_id)
            .bind(subscription.master_id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_subscription(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
