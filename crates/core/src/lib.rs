pub mod access;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod scheduling;
pub mod usecases;
