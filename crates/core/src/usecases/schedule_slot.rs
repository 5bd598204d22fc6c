use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    access::{AccessPolicy, Actor},
    errors::{MarketError, MarketResult},
    models::schedule_slot::{ScheduleSlot, ScheduleSlotRequest, SlotStatus, SlotType},
    repositories::{BookingRepository, MasterProfileRepository, ScheduleSlotRepository},
    scheduling::{self, TimeRange},
};

/// Create, update and delete slots on a master's calendar.
///
/// Every write checks that the referenced master profile and booking exist,
/// rejects ranges that intersect one of the master's committed slots, and
/// asks the injected [`AccessPolicy`] whether the actor may touch that
/// master's calendar.
pub struct ScheduleSlotUsecase {
    slots: Arc<dyn ScheduleSlotRepository>,
    masters: Arc<dyn MasterProfileRepository>,
    bookings: Arc<dyn BookingRepository>,
    access: Arc<dyn AccessPolicy>,
}

/// Request fields after presence and format checks.
struct SlotFields {
    master_id: Uuid,
    booking_id: Option<Uuid>,
    date: NaiveDate,
    range: TimeRange,
    status: SlotStatus,
    slot_type: SlotType,
}

impl SlotFields {
    fn parse(request: ScheduleSlotRequest) -> MarketResult<Self> {
        let master_id = request
            .master_id
            .filter(|id| !id.is_nil())
            .ok_or_else(|| MarketError::validation("master_id is required"))?;
        let start = request
            .start_time
            .ok_or_else(|| MarketError::validation("start_time is required"))?;
        let end = request
            .end_time
            .ok_or_else(|| MarketError::validation("end_time is required"))?;
        if end <= start {
            return Err(MarketError::validation("end_time must be after start_time"));
        }

        let status = request
            .status
            .ok_or_else(|| MarketError::validation("status is required"))?
            .parse::<SlotStatus>()
            .map_err(|_| MarketError::validation("invalid slot status"))?;
        let slot_type = match request.slot_type {
            Some(raw) => raw
                .parse::<SlotType>()
                .map_err(|_| MarketError::validation("invalid slot type"))?,
            None => SlotType::Manual,
        };

        Ok(Self {
            master_id,
            booking_id: request.booking_id,
            date: request.date.unwrap_or_else(|| start.date_naive()),
            range: TimeRange::new(start, end),
            status,
            slot_type,
        })
    }
}

impl ScheduleSlotUsecase {
    pub fn new(
        slots: Arc<dyn ScheduleSlotRepository>,
        masters: Arc<dyn MasterProfileRepository>,
        bookings: Arc<dyn BookingRepository>,
        access: Arc<dyn AccessPolicy>,
    ) -> Self {
        Self {
            slots,
            masters,
            bookings,
            access,
        }
    }

    pub async fn get_slot(&self, id: Uuid) -> MarketResult<ScheduleSlot> {
        self.slots
            .get(id)
            .await?
            .ok_or_else(|| MarketError::not_found("schedule slot not found"))
    }

    /// Lists a master's slots; an unknown master is an error, not an empty list.
    pub async fn list_slots(&self, master_id: Uuid) -> MarketResult<Vec<ScheduleSlot>> {
        self.ensure_master_exists(master_id).await?;
        self.slots.list(master_id).await
    }

    pub async fn create_slot(
        &self,
        actor: &Actor,
        request: ScheduleSlotRequest,
    ) -> MarketResult<ScheduleSlot> {
        let fields = SlotFields::parse(request)?;

        self.ensure_references(&fields).await?;
        self.ensure_free_range(&fields, None).await?;
        self.ensure_authorized(actor, fields.master_id).await?;

        let now = Utc::now();
        let slot = ScheduleSlot {
            id: Uuid::new_v4(),
            master_id: fields.master_id,
            booking_id: fields.booking_id,
            date: fields.date,
            start_time: fields.range.start,
            end_time: fields.range.end,
            status: fields.status,
            slot_type: fields.slot_type,
            created_at: now,
            updated_at: now,
        };
        self.slots.create(&slot).await?;

        info!(
            "Created slot {} for master {} ({}..{}, {})",
            slot.id, slot.master_id, slot.start_time, slot.end_time, slot.status
        );
        Ok(slot)
    }

    pub async fn update_slot(
        &self,
        actor: &Actor,
        id: Uuid,
        request: ScheduleSlotRequest,
    ) -> MarketResult<ScheduleSlot> {
        let fields = SlotFields::parse(request)?;

        let existing = self.get_slot(id).await?;
        self.ensure_authorized(actor, existing.master_id).await?;

        self.ensure_references(&fields).await?;
        self.ensure_free_range(&fields, Some(id)).await?;
        // Moving a slot writes to the target master's calendar as well.
        if fields.master_id != existing.master_id {
            self.ensure_authorized(actor, fields.master_id).await?;
        }

        let slot = ScheduleSlot {
            id,
            master_id: fields.master_id,
            booking_id: fields.booking_id,
            date: fields.date,
            start_time: fields.range.start,
            end_time: fields.range.end,
            status: fields.status,
            slot_type: fields.slot_type,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.slots.update(&slot).await?;

        info!("Updated slot {} ({})", slot.id, slot.status);
        Ok(slot)
    }

    pub async fn delete_slot(&self, actor: &Actor, id: Uuid) -> MarketResult<()> {
        let slot = self.get_slot(id).await?;
        self.ensure_authorized(actor, slot.master_id).await?;

        if !self.slots.delete(id).await? {
            return Err(MarketError::not_found("schedule slot not found"));
        }

        info!("Deleted slot {} of master {}", id, slot.master_id);
        Ok(())
    }

    async fn ensure_master_exists(&self, master_id: Uuid) -> MarketResult<()> {
        match self.masters.get_by_id(master_id).await? {
            Some(_) => Ok(()),
            None => Err(MarketError::not_found("master profile not found")),
        }
    }

    async fn ensure_references(&self, fields: &SlotFields) -> MarketResult<()> {
        self.ensure_master_exists(fields.master_id).await?;

        if let Some(booking_id) = fields.booking_id {
            if self.bookings.get_by_id(booking_id).await?.is_none() {
                return Err(MarketError::not_found("booking not found"));
            }
        }

        Ok(())
    }

    async fn ensure_free_range(&self, fields: &SlotFields, exclude: Option<Uuid>) -> MarketResult<()> {
        let result =
            scheduling::check_overlap(self.slots.as_ref(), fields.master_id, fields.range, exclude).await;
        if let Err(MarketError::SlotOverlap) = &result {
            warn!(
                "Rejected slot {}..{} for master {}: overlap",
                fields.range.start, fields.range.end, fields.master_id
            );
        }
        result
    }

    async fn ensure_authorized(&self, actor: &Actor, master_id: Uuid) -> MarketResult<()> {
        if self.access.authorize(actor, master_id).await? {
            Ok(())
        } else {
            Err(MarketError::Unauthorized)
        }
    }
}
