use beautyton_core::models::payment::Payment;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbPayment;

pub async fn get_payment_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbPayment>> {
    let payment = sqlx::query_as::<_, DbPayment>(
        r#"
        SELECT id, client_id, master_id, amount, currency, payment_type, ton_transaction_id,
               status, created_at
        FROM payments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(payment)
}

pub async fn create_payment(pool: &Pool<Postgres>, payment: &Payment) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO payments (id, client_id, master_id, amount, currency, payment_type,
                              ton_transaction_id, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(payment.id)
    .bind(payment.client_id)
    .bind(payment.master_id)
    .bind(payment.amount)
    .bind(&payment.currency)
    .bind(payment.payment_type.as_str())
    .bind(&payment.ton_transaction_id)
    .bind(payment.status.as_str())
    .bind(payment.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_payment(pool: &Pool<Postgres>, payment: &Payment) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE payments
        SET client_id = $2, master_id = $3, amount = $4, currency = $5, payment_type = $6,
            ton_transaction_id = $7, status = $8
        WHERE id = $1
        "#,
    )
    .bind(payment.id)
    .bind(payment.client_id)
    .bind(payment.master_id)
    .bind(payment.amount)
    .bind(&payment.currency)
    .bind(payment.payment_type.as_str())
    .bind(&payment.ton_transaction_id)
    .bind(payment.status.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
