use beautyton_core::models::user::User;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbUser;

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, tg_id, username, role, photo_url, city_id, ton_wallet, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn create_user(pool: &Pool<Postgres>, user: &User) -> Result<()> {
    tracing::debug!("Creating user: id={}, role={}", user.id, user.role);

    sqlx::query(
        r#"
        INSERT INTO users (id, tg_id, username, role, photo_url, city_id, ton_wallet, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(user.id)
    .bind(user.tg_id)
    .bind(&user.username)
    .bind(user.role.as_str())
    .bind(&user.photo_url)
    .bind(user.city_id)
    .bind(&user.ton_wallet)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_user(pool: &Pool<Postgres>, user: &User) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET tg_id = $2, username = $3, role = $4, photo_url = $5, city_id = $6,
            ton_wallet = $7, updated_at = $8
        WHERE id = $1
        "#,
    )
    .bind(user.id)
    .bind(user.tg_id)
    .bind(&user.username)
    .bind(user.role.as_str())
    .bind(&user.photo_url)
    .bind(user.city_id)
    .bind(&user.ton_wallet)
    .bind(user.updated_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_user(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
