//! Slot overlap detection.
//!
//! A master's calendar may hold any number of `free` slots, but committed
//! slots (booked, busy, reserved) must not intersect. Ranges are half-open,
//! so `[10:00, 11:00)` and `[11:00, 12:00)` are adjacent, not overlapping.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{MarketError, MarketResult};
use crate::models::schedule_slot::ScheduleSlot;
use crate::repositories::ScheduleSlotRepository;

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Builds a range from two bounds in either order.
    pub fn new(a: DateTime<Utc>, b: DateTime<Utc>) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn of(slot: &ScheduleSlot) -> Self {
        Self::new(slot.start_time, slot.end_time)
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Returns the first committed candidate intersecting `range`, skipping `exclude`.
pub fn find_conflict<'a, I>(candidates: I, range: TimeRange, exclude: Option<Uuid>) -> Option<&'a ScheduleSlot>
where
    I: IntoIterator<Item = &'a ScheduleSlot>,
{
    candidates
        .into_iter()
        .filter(|slot| Some(slot.id) != exclude)
        .filter(|slot| slot.status.is_committed())
        .find(|slot| TimeRange::of(slot).overlaps(&range))
}

/// Fails with [`MarketError::SlotOverlap`] when `find_conflict` finds a slot.
pub fn ensure_no_conflict(
    candidates: &[ScheduleSlot],
    range: TimeRange,
    exclude: Option<Uuid>,
) -> MarketResult<()> {
    match find_conflict(candidates, range, exclude) {
        Some(conflict) => {
            debug!(
                "Slot range {}..{} collides with slot {} ({})",
                range.start, range.end, conflict.id, conflict.status
            );
            Err(MarketError::SlotOverlap)
        }
        None => Ok(()),
    }
}

/// Queries the master's committed slots around `range` and applies the exact test.
///
/// Store errors propagate unchanged.
pub async fn check_overlap(
    slots: &dyn ScheduleSlotRepository,
    master_id: Uuid,
    range: TimeRange,
    exclude: Option<Uuid>,
) -> MarketResult<()> {
    let candidates = slots
        .find_by_time_range(master_id, range.start, range.end)
        .await?;
    ensure_no_conflict(&candidates, range, exclude)
}
