use beautyton_core::models::my_master::MyMaster;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbMyMaster;

pub async fn get_my_master_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbMyMaster>> {
    let entry = sqlx::query_as::<_, DbMyMaster>(
        "SELECT id, client_id, master_id, created_at FROM my_masters WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

pub async fn create_my_master(pool: &Pool<Postgres>, entry: &MyMaster) -> Result<()> {
    sqlx::query(
        "INSERT INTO my_masters (id, client_id, master_id, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(entry.id)
    .bind(entry.client_id)
    .bind(entry.master_id)
    .bind(entry.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_my_master(pool: &Pool<Postgres>, entry: &MyMaster) -> Result<bool> {
    let result = sqlx::query("UPDATE my_masters SET client_id = $2, master_id = $3 WHERE id = $1")
        .bind(entry.id)
        .bind(entry.client_id)
        .bind(entry.master_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_my_master(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM my_masters WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
