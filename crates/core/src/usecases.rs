//! Validation and repository orchestration, one usecase per entity.
//!
//! Field checks run before any store access and fail with
//! [`MarketError::Validation`]; references to missing rows of another entity
//! are reported as validation errors too, while a missing target row is
//! [`MarketError::NotFound`].
//!
//! [`MarketError::Validation`]: crate::errors::MarketError::Validation
//! [`MarketError::NotFound`]: crate::errors::MarketError::NotFound

use std::sync::Arc;

use uuid::Uuid;

use crate::access::AccessPolicy;
use crate::errors::{MarketError, MarketResult};
use crate::models::user::{User, UserRole};
use crate::repositories::{Repositories, UserRepository};

pub mod booking;
pub mod file;
pub mod location;
pub mod master_profile;
pub mod my_master;
pub mod payment;
pub mod review;
pub mod schedule_slot;
pub mod service;
pub mod subscription;
pub mod user;
pub mod user_preferences;

pub use booking::BookingUsecase;
pub use file::FileUsecase;
pub use location::{CityUsecase, CountryUsecase};
pub use master_profile::MasterProfileUsecase;
pub use my_master::MyMasterUsecase;
pub use payment::PaymentUsecase;
pub use review::ReviewUsecase;
pub use schedule_slot::ScheduleSlotUsecase;
pub use service::{ServiceCategoryUsecase, ServiceUsecase};
pub use subscription::SubscriptionUsecase;
pub use user::UserUsecase;
pub use user_preferences::UserPreferencesUsecase;

/// Every usecase wired to one set of repositories.
pub struct Usecases {
    pub users: UserUsecase,
    pub master_profiles: MasterProfileUsecase,
    pub services: ServiceUsecase,
    pub service_categories: ServiceCategoryUsecase,
    pub bookings: BookingUsecase,
    pub schedule_slots: ScheduleSlotUsecase,
    pub payments: PaymentUsecase,
    pub reviews: ReviewUsecase,
    pub countries: CountryUsecase,
    pub cities: CityUsecase,
    pub subscriptions: SubscriptionUsecase,
    pub my_masters: MyMasterUsecase,
    pub user_preferences: UserPreferencesUsecase,
    pub files: FileUsecase,
}

impl Usecases {
    pub fn new(repos: &Repositories, access: Arc<dyn AccessPolicy>) -> Self {
        let files = FileUsecase::new(repos.files.clone());
        Self {
            users: UserUsecase::new(repos.users.clone(), repos.cities.clone(), files.clone()),
            master_profiles: MasterProfileUsecase::new(
                repos.master_profiles.clone(),
                repos.users.clone(),
            ),
            services: ServiceUsecase::new(
                repos.services.clone(),
                repos.users.clone(),
                repos.service_categories.clone(),
                files.clone(),
            ),
            service_categories: ServiceCategoryUsecase::new(repos.service_categories.clone()),
            bookings: BookingUsecase::new(
                repos.bookings.clone(),
                repos.users.clone(),
                repos.services.clone(),
            ),
            schedule_slots: ScheduleSlotUsecase::new(
                repos.schedule_slots.clone(),
                repos.master_profiles.clone(),
                repos.bookings.clone(),
                access,
            ),
            payments: PaymentUsecase::new(repos.payments.clone(), repos.users.clone()),
            reviews: ReviewUsecase::new(repos.reviews.clone(), repos.bookings.clone()),
            countries: CountryUsecase::new(repos.countries.clone()),
            cities: CityUsecase::new(repos.cities.clone(), repos.countries.clone()),
            subscriptions: SubscriptionUsecase::new(
                repos.subscriptions.clone(),
                repos.users.clone(),
            ),
            my_masters: MyMasterUsecase::new(repos.my_masters.clone(), repos.users.clone()),
            user_preferences: UserPreferencesUsecase::new(
                repos.user_preferences.clone(),
                repos.users.clone(),
                repos.service_categories.clone(),
            ),
            files,
        }
    }
}

/// Loads a referenced user and checks its role.
///
/// A missing user fails with `missing`, a user of another role with `wrong_role`.
pub(crate) async fn require_role(
    users: &dyn UserRepository,
    id: Uuid,
    role: UserRole,
    missing: &str,
    wrong_role: &str,
) -> MarketResult<User> {
    let user = users
        .get_by_id(id)
        .await?
        .ok_or_else(|| MarketError::validation(missing))?;
    if user.role != role {
        return Err(MarketError::validation(wrong_role));
    }
    Ok(user)
}

/// Checks a client/master pair: both set, each pointing at a user of that role.
pub(crate) async fn require_client_and_master(
    users: &dyn UserRepository,
    client_id: Uuid,
    master_id: Uuid,
) -> MarketResult<()> {
    if client_id.is_nil() || master_id.is_nil() {
        return Err(MarketError::validation("client_id and master_id are required"));
    }
    require_role(
        users,
        client_id,
        UserRole::Client,
        "invalid client_id",
        "client_id must refer to a client",
    )
    .await?;
    require_role(
        users,
        master_id,
        UserRole::Master,
        "invalid master_id",
        "master_id must refer to a master",
    )
    .await?;
    Ok(())
}
