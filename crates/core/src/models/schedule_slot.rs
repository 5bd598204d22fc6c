use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

string_enum! {
    SlotStatus {
        Free => "free",
        Busy => "busy",
        Booked => "booked",
        Reserved => "reserved",
    }
}

impl SlotStatus {
    /// Statuses that block overlapping slots on the same master.
    pub const COMMITTED: [SlotStatus; 3] = [SlotStatus::Booked, SlotStatus::Busy, SlotStatus::Reserved];

    pub fn is_committed(&self) -> bool {
        Self::COMMITTED.contains(self)
    }
}

string_enum! {
    SlotType {
        Manual => "manual",
        Auto => "auto",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub id: Uuid,
    pub master_id: Uuid,
    pub booking_id: Option<Uuid>,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: SlotStatus,
    pub slot_type: SlotType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /schedule_slots` and `PUT /schedule_slots/:id`.
///
/// `date` defaults to the calendar day of `start_time` and `slot_type`
/// defaults to `manual`; every other field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSlotRequest {
    pub master_id: Option<Uuid>,
    pub booking_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub slot_type: Option<String>,
}
