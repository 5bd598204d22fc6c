//! Storage contracts consumed by the usecases.
//!
//! `get_by_id` returns `Ok(None)` for a missing row; `delete` returns whether a
//! row was removed. Store failures surface as [`MarketError::Database`].
//!
//! [`MarketError::Database`]: crate::errors::MarketError::Database

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::MarketResult;
use crate::models::{
    booking::Booking,
    file::StoredFile,
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
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<User>>;
    async fn create(&self, user: &User) -> MarketResult<()>;
    async fn update(&self, user: &User) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MasterProfileRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<MasterProfile>>;
    async fn create(&self, profile: &MasterProfile) -> MarketResult<()>;
    async fn update(&self, profile: &MasterProfile) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
    /// One page of matching profiles ordered by rating, plus the total match count.
    async fn list(
        &self,
        filter: &MasterProfileFilter,
        page: Page,
    ) -> MarketResult<(Vec<MasterProfile>, i64)>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Service>>;
    async fn create(&self, service: &Service) -> MarketResult<()>;
    async fn update(&self, service: &Service) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceCategoryRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<ServiceCategory>>;
    async fn create(&self, category: &ServiceCategory) -> MarketResult<()>;
    async fn update(&self, category: &ServiceCategory) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Booking>>;
    async fn create(&self, booking: &Booking) -> MarketResult<()>;
    async fn update(&self, booking: &Booking) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
}

/// Slot storage.
///
/// `create` and `update` must re-run the committed-overlap test atomically
/// with the write and fail with [`MarketError::SlotOverlap`] when it trips, so
/// that concurrent writers for one master cannot both succeed.
///
/// [`MarketError::SlotOverlap`]: crate::errors::MarketError::SlotOverlap
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleSlotRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> MarketResult<Option<ScheduleSlot>>;
    async fn create(&self, slot: &ScheduleSlot) -> MarketResult<()>;
    async fn update(&self, slot: &ScheduleSlot) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
    /// All slots of a master ordered by start time.
    async fn list(&self, master_id: Uuid) -> MarketResult<Vec<ScheduleSlot>>;
    /// Committed slots of a master that may intersect `[start, end)`.
    ///
    /// The result may be a superset; callers apply the exact overlap test.
    async fn find_by_time_range(
        &self,
        master_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MarketResult<Vec<ScheduleSlot>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Payment>>;
    async fn create(&self, payment: &Payment) -> MarketResult<()>;
    async fn update(&self, payment: &Payment) -> MarketResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Review>>;
    async fn create(&self, review: &Review) -> MarketResult<()>;
    async fn update(&self, review: &Review) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Country>>;
    async fn create(&self, country: &Country) -> MarketResult<()>;
    async fn update(&self, country: &Country) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<City>>;
    async fn create(&self, city: &City) -> MarketResult<()>;
    async fn update(&self, city: &City) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
    /// One page of cities whose name contains `name` (case-insensitive), ordered by name.
    async fn list(&self, name: Option<String>, page: Page) -> MarketResult<(Vec<City>, i64)>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Subscription>>;
    async fn create(&self, subscription: &Subscription) -> MarketResult<()>;
    async fn update(&self, subscription: &Subscription) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MyMasterRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<MyMaster>>;
    async fn create(&self, my_master: &MyMaster) -> MarketResult<()>;
    async fn update(&self, my_master: &MyMaster) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPreferencesRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<UserPreferences>>;
    async fn create(&self, preferences: &UserPreferences) -> MarketResult<()>;
    async fn update(&self, preferences: &UserPreferences) -> MarketResult<()>;
    async fn delete(&self, id: Uuid) -> MarketResult<bool>;
}

/// Object storage for uploaded files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn upload(&self, file: &StoredFile, content: Vec<u8>) -> MarketResult<()>;
    async fn get(&self, id: &str) -> MarketResult<Option<(StoredFile, Vec<u8>)>>;
}

/// Every store handle the usecases need, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub master_profiles: Arc<dyn MasterProfileRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub service_categories: Arc<dyn ServiceCategoryRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub schedule_slots: Arc<dyn ScheduleSlotRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub countries: Arc<dyn CountryRepository>,
    pub cities: Arc<dyn CityRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub my_masters: Arc<dyn MyMasterRepository>,
    pub user_preferences: Arc<dyn UserPreferencesRepository>,
    pub files: Arc<dyn FileStore>,
}

impl Repositories {
    /// Uses one store for every relational table and a separate file store.
    pub fn from_store<S>(store: Arc<S>, files: Arc<dyn FileStore>) -> Self
    where
        S: UserRepository
            + MasterProfileRepository
            + ServiceRepository
            + ServiceCategoryRepository
            + BookingRepository
            + ScheduleSlotRepository
            + PaymentRepository
            + ReviewRepository
            + CountryRepository
            + CityRepository
            + SubscriptionRepository
            + MyMasterRepository
            + UserPreferencesRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            master_profiles: store.clone(),
            services: store.clone(),
            service_categories: store.clone(),
            bookings: store.clone(),
            schedule_slots: store.clone(),
            payments: store.clone(),
            reviews: store.clone(),
            countries: store.clone(),
            cities: store.clone(),
            subscriptions: store.clone(),
            my_masters: store.clone(),
            user_preferences: store,
            files,
        }
    }
}
