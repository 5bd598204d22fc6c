//! Query functions over a PostgreSQL pool, one module per table.
//!
//! Functions take domain values in and hand row types back; the conversion to
//! domain types and the error mapping happen in [`crate::store`].

pub mod booking;
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
