pub mod auth;
pub mod holidays;
pub mod organizations;
pub mod reports;
pub mod work_event_utils;
pub mod work_events;
