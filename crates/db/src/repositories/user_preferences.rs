use beautyton_core::models::user_preferences::UserPreferences;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbUserPreferences;

pub async fn get_user_preferences_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbUserPreferences>> {
    let preferences = sqlx::query_as::<_, DbUserPreferences>(
        r#"
        SELECT id, user_id, preferred_category_id, max_price, max_distance_km
        FROM user_preferences
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(preferences)
}

pub async fn create_user_preferences(
    pool: &Pool<Postgres>,
    preferences: &UserPreferences,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_preferences
            (id, user_id, preferred_category_id, max_price, max_distance_km)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(preferences.id)
    .bind(preferences.user_id)
    .bind(preferences.preferred_category_id)
    .bind(preferences.max_price)
    .bind(preferences.max_distance_km)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_user_preferences(
    pool: &Pool<Postgres>,
    preferences: &UserPreferences,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE user_preferences
        SET user_id = $2, preferred_category_id = $3, max_price = $4, max_distance_km = $5
        WHERE id = $1
        "#,
    )
    .bind(preferences.id)
    .bind(preferences.user_id)
    .bind(preferences.preferred_category_id)
    .bind(preferences.max_price)
    .bind(preferences.max_distance_km)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_user_preferences(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM user_preferences WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
