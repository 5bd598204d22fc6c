use beautyton_core::models::{
    master_profile::{MasterProfile, MasterProfileFilter},
    pagination::Page,
};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbMasterProfile;

/// Shared by the page query and the count query; binds `$1..$6`.
const FILTER: &str = r#"
    FROM master_profiles mp
    LEFT JOIN users u ON u.id = mp.user_id
    LEFT JOIN cities c ON c.id = u.city_id
    WHERE ($1::TEXT IS NULL OR EXISTS (
            SELECT 1 FROM services s
            WHERE s.user_id = mp.user_id AND s.title ILIKE '%' || $1 || '%'))
      AND ($2::TEXT IS NULL OR EXISTS (
            SELECT 1 FROM services s
            JOIN service_categories sc ON sc.id = s.category_id
            WHERE s.user_id = mp.user_id AND sc.name = $2))
      AND ($3::TEXT IS NULL OR c.name ILIKE '%' || $3 || '%')
      AND (($4::FLOAT8 IS NULL AND $5::FLOAT8 IS NULL) OR EXISTS (
            SELECT 1 FROM services s
            WHERE s.user_id = mp.user_id
              AND ($4::FLOAT8 IS NULL OR s.price >= $4)
              AND ($5::FLOAT8 IS NULL OR s.price <= $5)))
      AND ($6::FLOAT8 IS NULL OR mp.rating >= $6)
"#;

pub async fn get_master_profile_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbMasterProfile>> {
    let profile = sqlx::query_as::<_, DbMasterProfile>(
        r#"
        SELECT id, user_id, qr_code, bio, status, rating, created_at, updated_at
        FROM master_profiles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn create_master_profile(pool: &Pool<Postgres>, profile: &MasterProfile) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO master_profiles (id, user_id, qr_code, bio, status, rating, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(profile.id)
    .bind(profile.user_id)
    .bind(&profile.qr_code)
    .bind(&profile.bio)
    .bind(&profile.status)
    .bind(profile.rating)
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_master_profile(pool: &Pool<Postgres>, profile: &MasterProfile) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE master_profiles
        SET user_id = $2, qr_code = $3, bio = $4, status = $5, rating = $6, updated_at = $7
        WHERE id = $1
        "#,
    )
    .bind(profile.id)
    .bind(profile.user_id)
    .bind(&profile.qr_code)
    .bind(&profile.bio)
    .bind(&profile.status)
    .bind(profile.rating)
    .bind(profile.updated_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Removes the profile; its schedule slots go with it.
pub async fn delete_master_profile(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM master_profiles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn list_master_profiles(
    pool: &Pool<Postgres>,
    filter: &MasterProfileFilter,
    page: Page,
) -> Result<(Vec<DbMasterProfile>, i64)> {
    tracing::debug!("Listing master profiles: filter={:?}, page={:?}", filter, page);

    let select = format!(
        r#"
        SELECT mp.id, mp.user_id, mp.qr_code, mp.bio, mp.status, mp.rating, mp.created_at, mp.updated_at
        {FILTER}
        ORDER BY mp.rating DESC, mp.created_at DESC, mp.id ASC
        LIMIT $7 OFFSET $8
        "#
    );
    let profiles = sqlx::query_as::<_, DbMasterProfile>(&select)
        .bind(filter.query.as_deref())
        .bind(filter.category.as_deref())
        .bind(filter.city.as_deref())
        .bind(filter.price_from)
        .bind(filter.price_to)
        .bind(filter.rating)
        .bind(page.page_size)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    let count = format!("SELECT COUNT(*) {FILTER}");
    let total = sqlx::query_scalar::<_, i64>(&count)
        .bind(filter.query.as_deref())
        .bind(filter.category.as_deref())
        .bind(filter.city.as_deref())
        .bind(filter.price_from)
        .bind(filter.price_to)
        .bind(filter.rating)
        .fetch_one(pool)
        .await?;

    Ok((profiles, total))
}
