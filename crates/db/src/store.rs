//! [`PgStore`] implements every repository trait on top of [`crate::repositories`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use beautyton_core::{
    errors::{MarketError, MarketResult},
    models::{
        booking::Booking,
        location::{City, Country},
        master_profile::{MasterProfile, MasterProfileFilter},
        my_master::MyMaster,
        pagination::Page,
        payment::Payment,
        review::Review,
        schedule_slot::ScheduleSlot,
        service::{Service, ServiceCategory},
        subscription::Subscription,
        user::User,
        user_preferences::UserPreferences,
    },
    repositories::{
        BookingRepository, CityRepository, CountryRepository, MasterProfileRepository,
        MyMasterRepository, PaymentRepository, ReviewRepository, ScheduleSlotRepository,
        ServiceCategoryRepository, ServiceRepository, SubscriptionRepository,
        UserPreferencesRepository, UserRepository,
    },
};

use crate::repositories::{
    booking, location, master_profile, my_master, payment, review,
    schedule_slot::{self, SlotWrite},
    service, subscription, user, user_preferences,
};
use crate::DbPool;

const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn is_foreign_key_violation(report: &eyre::Report) -> bool {
    match report.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(err)) => err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
        _ => false,
    }
}

/// Maps a failed write; a broken reference becomes a conflict.
fn write_error(entity: &'static str) -> impl FnOnce(eyre::Report) -> MarketError {
    move |report| {
        if is_foreign_key_violation(&report) {
            MarketError::Conflict(format!("{} references a missing record", entity))
        } else {
            MarketError::Database(report)
        }
    }
}

/// Maps a failed delete; a restricting reference becomes a conflict.
fn delete_error(entity: &'static str) -> impl FnOnce(eyre::Report) -> MarketError {
    move |report| {
        if is_foreign_key_violation(&report) {
            MarketError::Conflict(format!("{} is still referenced", entity))
        } else {
            MarketError::Database(report)
        }
    }
}

fn updated(found: bool, entity: &str) -> MarketResult<()> {
    if found {
        Ok(())
    } else {
        Err(MarketError::not_found(format!("{} not found", entity)))
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<User>> {
        let row = user::get_user_by_id(&self.pool, id).await?;
        Ok(row.map(User::try_from).transpose()?)
    }

    async fn create(&self, value: &User) -> MarketResult<()> {
        user::create_user(&self.pool, value)
            .await
            .map_err(write_error("user"))
    }

    async fn update(&self, value: &User) -> MarketResult<()> {
        let found = user::update_user(&self.pool, value)
            .await
            .map_err(write_error("user"))?;
        updated(found, "user")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        user::delete_user(&self.pool, id)
            .await
            .map_err(delete_error("user"))
    }
}

#[async_trait]
impl MasterProfileRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<MasterProfile>> {
        let row = master_profile::get_master_profile_by_id(&self.pool, id).await?;
        Ok(row.map(MasterProfile::from))
    }

    async fn create(&self, profile: &MasterProfile) -> MarketResult<()> {
        master_profile::create_master_profile(&self.pool, profile)
            .await
            .map_err(write_error("master profile"))
    }

    async fn update(&self, profile: &MasterProfile) -> MarketResult<()> {
        let found = master_profile::update_master_profile(&self.pool, profile)
            .await
            .map_err(write_error("master profile"))?;
        updated(found, "master profile")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        master_profile::delete_master_profile(&self.pool, id)
            .await
            .map_err(delete_error("master profile"))
    }

    async fn list(
        &self,
        filter: &MasterProfileFilter,
        page: Page,
    ) -> MarketResult<(Vec<MasterProfile>, i64)> {
        let (rows, total) = master_profile::list_master_profiles(&self.pool, filter, page).await?;
        Ok((rows.into_iter().map(MasterProfile::from).collect(), total))
    }
}

#[async_trait]
impl ServiceRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Service>> {
        let row = service::get_service_by_id(&self.pool, id).await?;
        Ok(row.map(Service::from))
    }

    async fn create(&self, value: &Service) -> MarketResult<()> {
        service::create_service(&self.pool, value)
            .await
            .map_err(write_error("service"))
    }

    async fn update(&self, value: &Service) -> MarketResult<()> {
        let found = service::update_service(&self.pool, value)
            .await
            .map_err(write_error("service"))?;
        updated(found, "service")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        service::delete_service(&self.pool, id)
            .await
            .map_err(delete_error("service"))
    }
}

#[async_trait]
impl ServiceCategoryRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<ServiceCategory>> {
        let row = service::get_service_category_by_id(&self.pool, id).await?;
        Ok(row.map(ServiceCategory::from))
    }

    async fn create(&self, category: &ServiceCategory) -> MarketResult<()> {
        Ok(service::create_service_category(&self.pool, category).await?)
    }

    async fn update(&self, category: &ServiceCategory) -> MarketResult<()> {
        let found = service::update_service_category(&self.pool, category).await?;
        updated(found, "service category")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        Ok(service::delete_service_category(&self.pool, id).await?)
    }
}

#[async_trait]
impl BookingRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Booking>> {
        let row = booking::get_booking_by_id(&self.pool, id).await?;
        Ok(row.map(Booking::try_from).transpose()?)
    }

    async fn create(&self, value: &Booking) -> MarketResult<()> {
        booking::create_booking(&self.pool, value)
            .await
            .map_err(write_error("booking"))
    }

    async fn update(&self, value: &Booking) -> MarketResult<()> {
        let found = booking::update_booking(&self.pool, value)
            .await
            .map_err(write_error("booking"))?;
        updated(found, "booking")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        booking::delete_booking(&self.pool, id)
            .await
            .map_err(delete_error("booking"))
    }
}

impl PgStore {
    async fn write_slot(&self, slot: &ScheduleSlot, is_update: bool) -> MarketResult<()> {
        let outcome = schedule_slot::write_schedule_slot(&self.pool, slot, is_update)
            .await
            .map_err(write_error("schedule slot"))?;

        match outcome {
            SlotWrite::Written => Ok(()),
            SlotWrite::Overlap => Err(MarketError::SlotOverlap),
            SlotWrite::MasterMissing => Err(MarketError::not_found("master profile not found")),
            SlotWrite::SlotMissing => Err(MarketError::not_found("schedule slot not found")),
        }
    }
}

#[async_trait]
impl ScheduleSlotRepository for PgStore {
    async fn get(&self, id: Uuid) -> MarketResult<Option<ScheduleSlot>> {
        let row = schedule_slot::get_schedule_slot_by_id(&self.pool, id).await?;
        Ok(row.map(ScheduleSlot::try_from).transpose()?)
    }

    async fn create(&self, slot: &ScheduleSlot) -> MarketResult<()> {
        self.write_slot(slot, false).await
    }

    async fn update(&self, slot: &ScheduleSlot) -> MarketResult<()> {
        self.write_slot(slot, true).await
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        Ok(schedule_slot::delete_schedule_slot(&self.pool, id).await?)
    }

    async fn list(&self, master_id: Uuid) -> MarketResult<Vec<ScheduleSlot>> {
        let rows = schedule_slot::get_schedule_slots_by_master_id(&self.pool, master_id).await?;
        let slots = rows
            .into_iter()
            .map(ScheduleSlot::try_from)
            .collect::<eyre::Result<Vec<_>>>()?;
        Ok(slots)
    }

    async fn find_by_time_range(
        &self,
        master_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MarketResult<Vec<ScheduleSlot>> {
        let rows = schedule_slot::find_committed_in_range(&self.pool, master_id, start, end).await?;
        let slots = rows
            .into_iter()
            .map(ScheduleSlot::try_from)
            .collect::<eyre::Result<Vec<_>>>()?;
        Ok(slots)
    }
}

#[async_trait]
impl PaymentRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Payment>> {
        let row = payment::get_payment_by_id(&self.pool, id).await?;
        Ok(row.map(Payment::try_from).transpose()?)
    }

    async fn create(&self, value: &Payment) -> MarketResult<()> {
        payment::create_payment(&self.pool, value)
            .await
            .map_err(write_error("payment"))
    }

    async fn update(&self, value: &Payment) -> MarketResult<()> {
        let found = payment::update_payment(&self.pool, value)
            .await
            .map_err(write_error("payment"))?;
        updated(found, "payment")
    }
}

#[async_trait]
impl ReviewRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Review>> {
        let row = review::get_review_by_id(&self.pool, id).await?;
        Ok(row.map(Review::from))
    }

    async fn create(&self, value: &Review) -> MarketResult<()> {
        review::create_review(&self.pool, value)
            .await
            .map_err(write_error("review"))
    }

    async fn update(&self, value: &Review) -> MarketResult<()> {
        let found = review::update_review(&self.pool, value)
            .await
            .map_err(write_error("review"))?;
        updated(found, "review")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        Ok(review::delete_review(&self.pool, id).await?)
    }
}

#[async_trait]
impl CountryRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Country>> {
        let row = location::get_country_by_id(&self.pool, id).await?;
        Ok(row.map(Country::from))
    }

    async fn create(&self, country: &Country) -> MarketResult<()> {
        Ok(location::create_country(&self.pool, country).await?)
    }

    async fn update(&self, country: &Country) -> MarketResult<()> {
        let found = location::update_country(&self.pool, country).await?;
        updated(found, "country")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        location::delete_country(&self.pool, id)
            .await
            .map_err(delete_error("country"))
    }
}

#[async_trait]
impl CityRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<City>> {
        let row = location::get_city_by_id(&self.pool, id).await?;
        Ok(row.map(City::from))
    }

    async fn create(&self, city: &City) -> MarketResult<()> {
        location::create_city(&self.pool, city)
            .await
            .map_err(write_error("city"))
    }

    async fn update(&self, city: &City) -> MarketResult<()> {
        let found = location::update_city(&self.pool, city)
            .await
            .map_err(write_error("city"))?;
        updated(found, "city")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        location::delete_city(&self.pool, id)
            .await
            .map_err(delete_error("city"))
    }

    async fn list(&self, name: Option<String>, page: Page) -> MarketResult<(Vec<City>, i64)> {
        let (rows, total) = location::list_cities(&self.pool, name.as_deref(), page).await?;
        Ok((rows.into_iter().map(City::from).collect(), total))
    }
}

#[async_trait]
impl SubscriptionRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Subscription>> {
        let row = subscription::get_subscription_by_id(&self.pool, id).await?;
        Ok(row.map(Subscription::from))
    }

    async fn create(&self, value: &Subscription) -> MarketResult<()> {
        subscription::create_subscription(&self.pool, value)
            .await
            .map_err(write_error("subscription"))
    }

    async fn update(&self, value: &Subscription) -> MarketResult<()> {
        let found = subscription::update_subscription(&self.pool, value)
            .await
            .map_err(write_error("subscription"))?;
        updated(found, "subscription")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        Ok(subscription::delete_subscription(&self.pool, id).await?)
    }
}

#[async_trait]
impl MyMasterRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<MyMaster>> {
        let row = my_master::get_my_master_by_id(&self.pool, id).await?;
        Ok(row.map(MyMaster::from))
    }

    async fn create(&self, value: &MyMaster) -> MarketResult<()> {
        my_master::create_my_master(&self.pool, value)
            .await
            .map_err(write_error("my master"))
    }

    async fn update(&self, value: &MyMaster) -> MarketResult<()> {
        let found = my_master::update_my_master(&self.pool, value)
            .await
            .map_err(write_error("my master"))?;
        updated(found, "my master")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        Ok(my_master::delete_my_master(&self.pool, id).await?)
    }
}

#[async_trait]
impl UserPreferencesRepository for PgStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<UserPreferences>> {
        let row = user_preferences::get_user_preferences_by_id(&self.pool, id).await?;
        Ok(row.map(UserPreferences::from))
    }

    async fn create(&self, value: &UserPreferences) -> MarketResult<()> {
        user_preferences::create_user_preferences(&self.pool, value)
            .await
            .map_err(write_error("user preferences"))
    }

    async fn update(&self, value: &UserPreferences) -> MarketResult<()> {
        let found = user_preferences::update_user_preferences(&self.pool, value)
            .await
            .map_err(write_error("user preferences"))?;
        updated(found, "user preferences")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        Ok(user_preferences::delete_user_preferences(&self.pool, id).await?)
    }
}
