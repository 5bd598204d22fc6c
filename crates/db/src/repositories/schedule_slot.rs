use beautyton_core::models::schedule_slot::{ScheduleSlot, SlotStatus};
use beautyton_core::scheduling::{find_conflict, TimeRange};
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

use crate::models::DbScheduleSlot;

/// Outcome of a slot write that re-checks the calendar under a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotWrite {
    Written,
    Overlap,
    MasterMissing,
    SlotMissing,
}

pub async fn get_schedule_slot_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbScheduleSlot>> {
    let slot = sqlx::query_as::<_, DbScheduleSlot>(
        r#"
        SELECT id, master_id, booking_id, date, start_time, end_time, status, slot_type,
               created_at, updated_at
        FROM schedule_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn get_schedule_slots_by_master_id(
    pool: &Pool<Postgres>,
    master_id: Uuid,
) -> Result<Vec<DbScheduleSlot>> {
    let slots = sqlx::query_as::<_, DbScheduleSlot>(
        r#"
        SELECT id, master_id, booking_id, date, start_time, end_time, status, slot_type,
               created_at, updated_at
        FROM schedule_slots
        WHERE master_id = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(master_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// Committed slots of a master intersecting `[start, end)`.
pub async fn find_committed_in_range<'e, E>(
    executor: E,
    master_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbScheduleSlot>>
where
    E: PgExecutor<'e>,
{
    let slots = sqlx::query_as::<_, DbScheduleSlot>(
        r#"
        SELECT id, master_id, booking_id, date, start_time, end_time, status, slot_type,
               created_at, updated_at
        FROM schedule_slots
        WHERE master_id = $1
          AND status = ANY($4)
          AND start_time < $3
          AND end_time > $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(master_id)
    .bind(start)
    .bind(end)
    .bind(SlotStatus::COMMITTED.map(|status| status.as_str()).to_vec())
    .fetch_all(executor)
    .await?;

    Ok(slots)
}

/// Inserts or updates `slot` inside one transaction.
///
/// The master's profile row is locked with `FOR UPDATE` before the overlap
/// test runs, so concurrent writers for the same master are serialized.
pub async fn write_schedule_slot(
    pool: &Pool<Postgres>,
    slot: &ScheduleSlot,
    is_update: bool,
) -> Result<SlotWrite> {
    let mut tx = pool.begin().await?;

    let locked = sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM master_profiles WHERE id = $1 FOR UPDATE",
    )
    .bind(slot.master_id)
    .fetch_optional(&mut *tx)
    .await?;
    if locked.is_none() {
        return Ok(SlotWrite::MasterMissing);
    }

    let range = TimeRange::of(slot);
    let rows = find_committed_in_range(&mut *tx, slot.master_id, range.start, range.end).await?;
    let candidates = rows
        .into_iter()
        .map(ScheduleSlot::try_from)
        .collect::<Result<Vec<_>>>()?;
    let exclude = is_update.then_some(slot.id);
    if let Some(conflict) = find_conflict(&candidates, range, exclude) {
        tracing::debug!("Slot {} collides with slot {}", slot.id, conflict.id);
        return Ok(SlotWrite::Overlap);
    }

    let affected = if is_update {
        sqlx::query(
            r#"
            UPDATE schedule_slots
            SET master_id = $2, booking_id = $3, date = $4, start_time = $5, end_time = $6,
                status = $7, slot_type = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(slot.id)
        .bind(slot.master_id)
        .bind(slot.booking_id)
        .bind(slot.date)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.status.as_str())
        .bind(slot.slot_type.as_str())
        .bind(slot.updated_at)
        .execute(&mut *tx)
        .await?
        .rows_affected()
    } else {
        sqlx::query(
            r#"
            INSERT INTO schedule_slots (id, master_id, booking_id, date, start_time, end_time,
                                        status, slot_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(slot.id)
        .bind(slot.master_id)
        .bind(slot.booking_id)
        .bind(slot.date)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.status.as_str())
        .bind(slot.slot_type.as_str())
        .bind(slot.created_at)
        .bind(slot.updated_at)
        .execute(&mut *tx)
        .await?
        .rows_affected()
    };
    if affected == 0 {
        return Ok(SlotWrite::SlotMissing);
    }

    tx.commit().await?;
    tracing::debug!("Slot {} written for master {}", slot.id, slot.master_id);
    Ok(SlotWrite::Written)
}

pub async fn delete_schedule_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM schedule_slots WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
