pub mod holiday;
pub mod holiday_import;
pub mod worktime;
