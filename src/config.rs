use anyhow::anyhow;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    pub time_zone: Tz,
    /// Base URL of the national holiday API, without the trailing year segment.
    pub holiday_api_url: String,
    pub holiday_api_key: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/punchclock".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-this-in-production".to_string());

        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        let time_zone_name = env::var("APP_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let holiday_api_url = env::var("HOLIDAY_API_URL")
            .unwrap_or_else(|_| "https://api.szunetnapok.hu".to_string());
        let holiday_api_key = env::var("HOLIDAY_API_KEY").unwrap_or_default();

        Ok(Config {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            time_zone,
            holiday_api_url,
            holiday_api_key,
        })
    }
}
