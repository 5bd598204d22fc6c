//! Row types as stored in PostgreSQL.
//!
//! Enum columns are plain `VARCHAR`s; converting a row into its domain type
//! fails when the stored value is outside the enum's set.

use chrono::{DateTime, NaiveDate, Utc};
use eyre::Report;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use beautyton_core::models::{
    booking::Booking,
    location::{City, Country},
    master_profile::MasterProfile,
    my_master::MyMaster,
    payment::Payment,
    review::Review,
    schedule_slot::ScheduleSlot,
    service::{Service, ServiceCategory},
    subscription::Subscription,
    user::User,
    user_preferences::UserPreferences,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub tg_id: i64,
    pub username: String,
    pub role: String,
    pub photo_url: String,
    pub city_id: Uuid,
    pub ton_wallet: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbUser> for User {
    type Error = Report;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            tg_id: row.tg_id,
            username: row.username,
            role: row.role.parse()?,
            photo_url: row.photo_url,
            city_id: row.city_id,
            ton_wallet: row.ton_wallet,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMasterProfile {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub qr_code: String,
    pub bio: String,
    pub status: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbMasterProfile> for MasterProfile {
    fn from(row: DbMasterProfile) -> Self {
        MasterProfile {
            id: row.id,
            user_id: row.user_id,
            qr_code: row.qr_code,
            bio: row.bio,
            status: row.status,
            rating: row.rating,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbServiceCategory {
    pub id: Uuid,
    pub name: String,
}

impl From<DbServiceCategory> for ServiceCategory {
    fn from(row: DbServiceCategory) -> Self {
        ServiceCategory {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub photo_url: String,
    pub price: f64,
    pub duration: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            category_id: row.category_id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            photo_url: row.photo_url,
            price: row.price,
            duration: row.duration,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub client_id: Uuid,
    pub master_id: Uuid,
    pub service_id: Uuid,
    pub booking_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbBooking> for Booking {
    type Error = Report;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            client_id: row.client_id,
            master_id: row.master_id,
            service_id: row.service_id,
            booking_time: row.booking_time,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleSlot {
    pub id: Uuid,
    pub master_id: Uuid,
    pub booking_id: Option<Uuid>,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub slot_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbScheduleSlot> for ScheduleSlot {
    type Error = Report;

    fn try_from(row: DbScheduleSlot) -> Result<Self, Self::Error> {
        Ok(ScheduleSlot {
            id: row.id,
            master_id: row.master_id,
            booking_id: row.booking_id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            status: row.status.parse()?,
            slot_type: row.slot_type.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPayment {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub master_id: Option<Uuid>,
    pub amount: f64,
    pub currency: String,
    pub payment_type: String,
    pub ton_transaction_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbPayment> for Payment {
    type Error = Report;

    fn try_from(row: DbPayment) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: row.id,
            client_id: row.client_id,
            master_id: row.master_id,
            amount: row.amount,
            currency: row.currency,
            payment_type: row.payment_type.parse()?,
            ton_transaction_id: row.ton_transaction_id,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub rating: i32,
    pub comment: String,
}

impl From<DbReview> for Review {
    fn from(row: DbReview) -> Self {
        Review {
            id: row.id,
            booking_id: row.booking_id,
            rating: row.rating,
            comment: row.comment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCountry {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

impl From<DbCountry> for Country {
    fn from(row: DbCountry) -> Self {
        Country {
            id: row.id,
            name: row.name,
            code: row.code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCity {
    pub id: Uuid,
    pub name: String,
    pub country_id: Uuid,
    pub timezone: String,
}

impl From<DbCity> for City {
    fn from(row: DbCity) -> Self {
        City {
            id: row.id,
            name: row.name,
            country_id: row.country_id,
            timezone: row.timezone,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubscription {
    pub id: Uuid,
    pub client_id: Uuid,
    pub master_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<DbSubscription> for Subscription {
    fn from(row: DbSubscription) -> Self {
        Subscription {
            id: row.id,
            client_id: row.client_id,
            master_id: row.master_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMyMaster {
    pub id: Uuid,
    pub client_id: Uuid,
    pub master_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<DbMyMaster> for MyMaster {
    fn from(row: DbMyMaster) -> Self {
        MyMaster {
            id: row.id,
            client_id: row.client_id,
            master_id: row.master_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUserPreferences {
    pub id: Uuid,
    pub user_id: Uuid,
    pub preferred_category_id: Option<Uuid>,
    pub max_price: f64,
    pub max_distance_km: i32,
}

impl From<DbUserPreferences> for UserPreferences {
    fn from(row: DbUserPreferences) -> Self {
        UserPreferences {
            id: row.id,
            user_id: row.user_id,
            preferred_category_id: row.preferred_category_id,
            max_price: row.max_price,
            max_distance_km: row.max_distance_km,
        }
    }
}
