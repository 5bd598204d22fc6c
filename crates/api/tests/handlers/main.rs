#[path = "../test_utils.rs"]
mod test_utils;

mod booking_test;
mod file_test;
mod health_test;
mod location_test;
mod master_profile_test;
mod middleware_test;
mod my_master_test;
mod schedule_slot_test;
mod subscription_test;
mod user_preferences_test;
mod user_test;
