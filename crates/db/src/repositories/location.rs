use beautyton_core::models::{
    location::{City, Country},
    pagination::Page,
};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbCity, DbCountry};

pub async fn get_country_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbCountry>> {
    let country = sqlx::query_as::<_, DbCountry>("SELECT id, name, code FROM countries WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(country)
}

pub async fn create_country(pool: &Pool<Postgres>, country: &Country) -> Result<()> {
    sqlx::query("INSERT INTO countries (id, name, code) VALUES ($1, $2, $3)")
        .bind(country.id)
        .bind(&country.name)
        .bind(&country.code)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_country(pool: &Pool<Postgres>, country: &Country) -> Result<bool> {
    let result = sqlx::query("UPDATE countries SET name = $2, code = $3 WHERE id = $1")
        .bind(country.id)
        .bind(&country.name)
        .bind(&country.code)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_country(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM countries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_city_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbCity>> {
    let city = sqlx::query_as::<_, DbCity>(
        "SELECT id, name, country_id, timezone FROM cities WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(city)
}

pub async fn create_city(pool: &Pool<Postgres>, city: &City) -> Result<()> {
    sqlx::query("INSERT INTO cities (id, name, country_id, timezone) VALUES ($1, $2, $3, $4)")
        .bind(city.id)
        .bind(&city.name)
        .bind(city.country_id)
        .bind(&city.timezone)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_city(pool: &Pool<Postgres>, city: &City) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE cities SET name = $2, country_id = $3, timezone = $4 WHERE id = $1",
    )
    .bind(city.id)
    .bind(&city.name)
    .bind(city.country_id)
    .bind(&city.timezone)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_city(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM cities WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Cities whose name contains `name`, case-insensitively, ordered by name.
pub async fn list_cities(
    pool: &Pool<Postgres>,
    name: Option<&str>,
    page: Page,
) -> Result<(Vec<DbCity>, i64)> {
    let cities = sqlx::query_as::<_, DbCity>(
        r#"
        SELECT id, name, country_id, timezone
        FROM cities
        WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
        ORDER BY name ASC, id ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(name)
    .bind(page.page_size)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM cities WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok((cities, total))
}
