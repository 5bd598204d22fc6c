use beautyton_core::models::service::{Service, ServiceCategory};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbService, DbServiceCategory};

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, category_id, user_id, title, description, photo_url, price, duration, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn create_service(pool: &Pool<Postgres>, service: &Service) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO services (id, category_id, user_id, title, description, photo_url, price, duration, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(service.id)
    .bind(service.category_id)
    .bind(service.user_id)
    .bind(&service.title)
    .bind(&service.description)
    .bind(&service.photo_url)
    .bind(service.price)
    .bind(&service.duration)
    .bind(service.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_service(pool: &Pool<Postgres>, service: &Service) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE services
        SET category_id = $2, user_id = $3, title = $4, description = $5, photo_url = $6,
            price = $7, duration = $8
        WHERE id = $1
        "#,
    )
    .bind(service.id)
    .bind(service.category_id)
    .bind(service.user_id)
    .bind(&service.title)
    .bind(&service.description)
    .bind(&service.photo_url)
    .bind(service.price)
    .bind(&service.duration)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_service(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_service_category_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbServiceCategory>> {
    let category = sqlx::query_as::<_, DbServiceCategory>(
        "SELECT id, name FROM service_categories WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

pub async fn create_service_category(pool: &Pool<Postgres>, category: &ServiceCategory) -> Result<()> {
    sqlx::query("INSERT INTO service_categories (id, name) VALUES ($1, $2)")
        .bind(category.id)
        .bind(&category.name)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_service_category(
    pool: &Pool<Postgres>,
    category: &ServiceCategory,
) -> Result<bool> {
    let result = sqlx::query("UPDATE service_categories SET name = $2 WHERE id = $1")
        .bind(category.id)
        .bind(&category.name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Services in the category are kept with `category_id` cleared.
pub async fn delete_service_category(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM service_categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
