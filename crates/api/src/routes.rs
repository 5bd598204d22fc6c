//! Route tables. Every resource module returns a router over the shared
//! [`ApiState`](crate::ApiState); resource paths live under `/api`.

pub mod booking;
pub mod file;
pub mod health;
pub mod location;
pub mod master_profile;
pub mod my_master;
pub mod payment;
pub mod review;
pub mod schedule_slot;
pub mod service;
pub mod service_category;
pub mod subscription;
pub mod user;
pub mod user_preferences;
