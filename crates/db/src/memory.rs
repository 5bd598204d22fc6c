//! A process-local store implementing every repository trait.
//!
//! All tables sit behind one async mutex, so each operation (including the
//! slot overlap re-check and write) is atomic. Reference rules match the
//! PostgreSQL schema: writes to a missing parent and deletes of a still
//! referenced row fail with [`MarketError::Conflict`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;
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
    scheduling::{find_conflict, TimeRange},
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    master_profiles: HashMap<Uuid, MasterProfile>,
    services: HashMap<Uuid, Service>,
    service_categories: HashMap<Uuid, ServiceCategory>,
    bookings: HashMap<Uuid, Booking>,
    schedule_slots: HashMap<Uuid, ScheduleSlot>,
    payments: HashMap<Uuid, Payment>,
    reviews: HashMap<Uuid, Review>,
    countries: HashMap<Uuid, Country>,
    cities: HashMap<Uuid, City>,
    subscriptions: HashMap<Uuid, Subscription>,
    my_masters: HashMap<Uuid, MyMaster>,
    user_preferences: HashMap<Uuid, UserPreferences>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing_reference(entity: &str) -> MarketError {
    MarketError::Conflict(format!("{} references a missing record", entity))
}

fn still_referenced(entity: &str) -> MarketError {
    MarketError::Conflict(format!("{} is still referenced", entity))
}

fn require<T>(table: &HashMap<Uuid, T>, id: Option<Uuid>, entity: &str) -> MarketResult<()> {
    match id {
        Some(id) if !table.contains_key(&id) => Err(missing_reference(entity)),
        _ => Ok(()),
    }
}

fn replace<T>(table: &mut HashMap<Uuid, T>, id: Uuid, value: T, entity: &str) -> MarketResult<()> {
    match table.get_mut(&id) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(MarketError::not_found(format!("{} not found", entity))),
    }
}

fn page_of<T>(items: Vec<T>, page: Page) -> Vec<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(0);
    let size = usize::try_from(page.page_size).unwrap_or(0);
    items.into_iter().skip(offset).take(size).collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Tables {
    fn check_user(&self, user: &User) -> MarketResult<()> {
        require(&self.cities, Some(user.city_id), "user")
    }

    fn check_service(&self, service: &Service) -> MarketResult<()> {
        require(&self.service_categories, service.category_id, "service")?;
        require(&self.users, service.user_id, "service")
    }

    fn check_booking(&self, booking: &Booking) -> MarketResult<()> {
        require(&self.users, Some(booking.client_id), "booking")?;
        require(&self.users, Some(booking.master_id), "booking")?;
        require(&self.services, Some(booking.service_id), "booking")
    }

    fn check_pair(&self, client_id: Uuid, master_id: Uuid, entity: &str) -> MarketResult<()> {
        require(&self.users, Some(client_id), entity)?;
        require(&self.users, Some(master_id), entity)
    }

    fn check_preferences(&self, preferences: &UserPreferences) -> MarketResult<()> {
        require(&self.users, Some(preferences.user_id), "user preferences")?;
        require(
            &self.service_categories,
            preferences.preferred_category_id,
            "user preferences",
        )
    }

    fn check_payment(&self, payment: &Payment) -> MarketResult<()> {
        require(&self.users, payment.client_id, "payment")?;
        require(&self.users, payment.master_id, "payment")
    }

    /// Applies the same checks as the locked PostgreSQL write.
    fn check_slot(&self, slot: &ScheduleSlot, exclude: Option<Uuid>) -> MarketResult<()> {
        if !self.master_profiles.contains_key(&slot.master_id) {
            return Err(MarketError::not_found("master profile not found"));
        }
        require(&self.bookings, slot.booking_id, "schedule slot")?;

        let candidates = self
            .schedule_slots
            .values()
            .filter(|existing| existing.master_id == slot.master_id);
        if let Some(conflict) = find_conflict(candidates, TimeRange::of(slot), exclude) {
            debug!("Slot {} collides with slot {}", slot.id, conflict.id);
            return Err(MarketError::SlotOverlap);
        }
        Ok(())
    }

    fn user_is_referenced(&self, id: Uuid) -> bool {
        let id = Some(id);
        self.master_profiles.values().any(|p| p.user_id == id)
            || self.services.values().any(|s| s.user_id == id)
            || self
                .bookings
                .values()
                .any(|b| Some(b.client_id) == id || Some(b.master_id) == id)
            || self
                .payments
                .values()
                .any(|p| p.client_id == id || p.master_id == id)
    }

    fn services_of(&self, user_id: Option<Uuid>) -> impl Iterator<Item = &Service> + '_ {
        self.services
            .values()
            .filter(move |s| user_id.is_some() && s.user_id == user_id)
    }

    fn profile_matches(&self, profile: &MasterProfile, filter: &MasterProfileFilter) -> bool {
        if let Some(query) = &filter.query {
            if !self
                .services_of(profile.user_id)
                .any(|s| contains_ci(&s.title, query))
            {
                return false;
            }
        }

        if let Some(category) = &filter.category {
            let in_category = self.services_of(profile.user_id).any(|s| {
                s.category_id
                    .and_then(|id| self.service_categories.get(&id))
                    .is_some_and(|c| &c.name == category)
            });
            if !in_category {
                return false;
            }
        }

        if let Some(city) = &filter.city {
            let city_name = profile
                .user_id
                .and_then(|id| self.users.get(&id))
                .and_then(|u| self.cities.get(&u.city_id))
                .map(|c| c.name.as_str());
            if !city_name.is_some_and(|name| contains_ci(name, city)) {
                return false;
            }
        }

        if filter.price_from.is_some() || filter.price_to.is_some() {
            let in_range = self.services_of(profile.user_id).any(|s| {
                filter.price_from.is_none_or(|from| s.price >= from)
                    && filter.price_to.is_none_or(|to| s.price <= to)
            });
            if !in_range {
                return false;
            }
        }

        filter.rating.is_none_or(|min| profile.rating >= min)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn create(&self, user: &User) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_user(user)?;
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_user(user)?;
        replace(&mut tables.users, user.id, user.clone(), "user")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.user_is_referenced(id) {
            return Err(still_referenced("user"));
        }
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables
            .subscriptions
            .retain(|_, s| s.client_id != id && s.master_id != id);
        tables
            .my_masters
            .retain(|_, m| m.client_id != id && m.master_id != id);
        tables.user_preferences.retain(|_, p| p.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl MasterProfileRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<MasterProfile>> {
        Ok(self.tables.lock().await.master_profiles.get(&id).cloned())
    }

    async fn create(&self, profile: &MasterProfile) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        require(&tables.users, profile.user_id, "master profile")?;
        tables.master_profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &MasterProfile) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        require(&tables.users, profile.user_id, "master profile")?;
        replace(&mut tables.master_profiles, profile.id, profile.clone(), "master profile")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.master_profiles.remove(&id).is_none() {
            return Ok(false);
        }
        tables.schedule_slots.retain(|_, slot| slot.master_id != id);
        Ok(true)
    }

    async fn list(
        &self,
        filter: &MasterProfileFilter,
        page: Page,
    ) -> MarketResult<(Vec<MasterProfile>, i64)> {
        let tables = self.tables.lock().await;
        let mut matches: Vec<MasterProfile> = tables
            .master_profiles
            .values()
            .filter(|profile| tables.profile_matches(profile, filter))
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then(b.created_at.cmp(&a.created_at))
                .then(a.id.cmp(&b.id))
        });

        let total = matches.len() as i64;
        Ok((page_of(matches, page), total))
    }
}

#[async_trait]
impl ServiceRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Service>> {
        Ok(self.tables.lock().await.services.get(&id).cloned())
    }

    async fn create(&self, service: &Service) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_service(service)?;
        tables.services.insert(service.id, service.clone());
        Ok(())
    }

    async fn update(&self, service: &Service) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_service(service)?;
        replace(&mut tables.services, service.id, service.clone(), "service")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.bookings.values().any(|b| b.service_id == id) {
            return Err(still_referenced("service"));
        }
        Ok(tables.services.remove(&id).is_some())
    }
}

#[async_trait]
impl ServiceCategoryRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<ServiceCategory>> {
        Ok(self.tables.lock().await.service_categories.get(&id).cloned())
    }

    async fn create(&self, category: &ServiceCategory) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.service_categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn update(&self, category: &ServiceCategory) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        replace(
            &mut tables.service_categories,
            category.id,
            category.clone(),
            "service category",
        )
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.service_categories.remove(&id).is_none() {
            return Ok(false);
        }
        for service in tables.services.values_mut() {
            if service.category_id == Some(id) {
                service.category_id = None;
            }
        }
        for preferences in tables.user_preferences.values_mut() {
            if preferences.preferred_category_id == Some(id) {
                preferences.preferred_category_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Booking>> {
        Ok(self.tables.lock().await.bookings.get(&id).cloned())
    }

    async fn create(&self, booking: &Booking) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_booking(booking)?;
        tables.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn update(&self, booking: &Booking) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_booking(booking)?;
        replace(&mut tables.bookings, booking.id, booking.clone(), "booking")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.bookings.remove(&id).is_none() {
            return Ok(false);
        }
        tables.reviews.retain(|_, review| review.booking_id != id);
        for slot in tables.schedule_slots.values_mut() {
            if slot.booking_id == Some(id) {
                slot.booking_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl ScheduleSlotRepository for InMemoryStore {
    async fn get(&self, id: Uuid) -> MarketResult<Option<ScheduleSlot>> {
        Ok(self.tables.lock().await.schedule_slots.get(&id).cloned())
    }

    async fn create(&self, slot: &ScheduleSlot) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_slot(slot, None)?;
        tables.schedule_slots.insert(slot.id, slot.clone());
        Ok(())
    }

    async fn update(&self, slot: &ScheduleSlot) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_slot(slot, Some(slot.id))?;
        replace(&mut tables.schedule_slots, slot.id, slot.clone(), "schedule slot")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        Ok(self.tables.lock().await.schedule_slots.remove(&id).is_some())
    }

    async fn list(&self, master_id: Uuid) -> MarketResult<Vec<ScheduleSlot>> {
        let tables = self.tables.lock().await;
        let mut slots: Vec<ScheduleSlot> = tables
            .schedule_slots
            .values()
            .filter(|slot| slot.master_id == master_id)
            .cloned()
            .collect();
        slots.sort_by_key(|slot| (slot.start_time, slot.id));
        Ok(slots)
    }

    async fn find_by_time_range(
        &self,
        master_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MarketResult<Vec<ScheduleSlot>> {
        let tables = self.tables.lock().await;
        let range = TimeRange::new(start, end);
        let mut slots: Vec<ScheduleSlot> = tables
            .schedule_slots
            .values()
            .filter(|slot| slot.master_id == master_id && slot.status.is_committed())
            .filter(|slot| TimeRange::of(slot).overlaps(&range))
            .cloned()
            .collect();
        slots.sort_by_key(|slot| slot.start_time);
        Ok(slots)
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Payment>> {
        Ok(self.tables.lock().await.payments.get(&id).cloned())
    }

    async fn create(&self, payment: &Payment) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_payment(payment)?;
        tables.payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn update(&self, payment: &Payment) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_payment(payment)?;
        replace(&mut tables.payments, payment.id, payment.clone(), "payment")
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Review>> {
        Ok(self.tables.lock().await.reviews.get(&id).cloned())
    }

    async fn create(&self, review: &Review) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        require(&tables.bookings, Some(review.booking_id), "review")?;
        tables.reviews.insert(review.id, review.clone());
        Ok(())
    }

    async fn update(&self, review: &Review) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        require(&tables.bookings, Some(review.booking_id), "review")?;
        replace(&mut tables.reviews, review.id, review.clone(), "review")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        Ok(self.tables.lock().await.reviews.remove(&id).is_some())
    }
}

#[async_trait]
impl CountryRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Country>> {
        Ok(self.tables.lock().await.countries.get(&id).cloned())
    }

    async fn create(&self, country: &Country) -> MarketResult<()> {
        self.tables
            .lock()
            .await
            .countries
            .insert(country.id, country.clone());
        Ok(())
    }

    async fn update(&self, country: &Country) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        replace(&mut tables.countries, country.id, country.clone(), "country")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.cities.values().any(|c| c.country_id == id) {
            return Err(still_referenced("country"));
        }
        Ok(tables.countries.remove(&id).is_some())
    }
}

#[async_trait]
impl CityRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<City>> {
        Ok(self.tables.lock().await.cities.get(&id).cloned())
    }

    async fn create(&self, city: &City) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        require(&tables.countries, Some(city.country_id), "city")?;
        tables.cities.insert(city.id, city.clone());
        Ok(())
    }

    async fn update(&self, city: &City) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        require(&tables.countries, Some(city.country_id), "city")?;
        replace(&mut tables.cities, city.id, city.clone(), "city")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.users.values().any(|u| u.city_id == id) {
            return Err(still_referenced("city"));
        }
        Ok(tables.cities.remove(&id).is_some())
    }

    async fn list(&self, name: Option<String>, page: Page) -> MarketResult<(Vec<City>, i64)> {
        let tables = self.tables.lock().await;
        let mut matches: Vec<City> = tables
            .cities
            .values()
            .filter(|city| name.as_deref().is_none_or(|n| contains_ci(&city.name, n)))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let total = matches.len() as i64;
        Ok((page_of(matches, page), total))
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<Subscription>> {
        Ok(self.tables.lock().await.subscriptions.get(&id).cloned())
    }

    async fn create(&self, subscription: &Subscription) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_pair(subscription.client_id, subscription.master_id, "subscription")?;
        tables
            .subscriptions
            .insert(subscription.id, subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_pair(subscription.client_id, subscription.master_id, "subscription")?;
        replace(
            &mut tables.subscriptions,
            subscription.id,
            subscription.clone(),
            "subscription",
        )
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        Ok(self.tables.lock().await.subscriptions.remove(&id).is_some())
    }
}

#[async_trait]
impl MyMasterRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<MyMaster>> {
        Ok(self.tables.lock().await.my_masters.get(&id).cloned())
    }

    async fn create(&self, entry: &MyMaster) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_pair(entry.client_id, entry.master_id, "my master")?;
        tables.my_masters.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &MyMaster) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_pair(entry.client_id, entry.master_id, "my master")?;
        replace(&mut tables.my_masters, entry.id, entry.clone(), "my master")
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        Ok(self.tables.lock().await.my_masters.remove(&id).is_some())
    }
}

#[async_trait]
impl UserPreferencesRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> MarketResult<Option<UserPreferences>> {
        Ok(self.tables.lock().await.user_preferences.get(&id).cloned())
    }

    async fn create(&self, preferences: &UserPreferences) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_preferences(preferences)?;
        tables
            .user_preferences
            .insert(preferences.id, preferences.clone());
        Ok(())
    }

    async fn update(&self, preferences: &UserPreferences) -> MarketResult<()> {
        let mut tables = self.tables.lock().await;
        tables.check_preferences(preferences)?;
        replace(
            &mut tables.user_preferences,
            preferences.id,
            preferences.clone(),
            "user preferences",
        )
    }

    async fn delete(&self, id: Uuid) -> MarketResult<bool> {
        Ok(self.tables.lock().await.user_preferences.remove(&id).is_some())
    }
}
