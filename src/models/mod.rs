//! Data models shared across database access and API handlers.

pub mod holiday;
pub mod membership;
pub mod organization;
pub mod user;
pub mod work_event;
