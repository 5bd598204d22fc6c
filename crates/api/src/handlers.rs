//! Request handlers. Each module decodes one resource's requests, calls the
//! matching usecase and encodes the result.

pub mod booking;
pub mod file;
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
