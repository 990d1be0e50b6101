//! Yearly holiday import job.
//!
//! Intended to run once around the start of each year (cron or by hand).
//! Skips the fetch entirely when the holiday table already has rows for the
//! current year.

use chrono::Datelike;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use punchclock_backend::{
    config::Config,
    db::connection::create_pool,
    services::holiday_import::{count_for_year, fetch_holidays, insert_holidays},
    utils::time::today_local,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "punchclock_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let year = today_local(&config.time_zone).year();

    let existing = count_for_year(&pool, year).await?;
    if existing > 0 {
        tracing::info!(year, existing, "Holidays already imported, nothing to do");
        return Ok(());
    }

    tracing::info!(year, url = %config.holiday_api_url, "Fetching holidays");
    let client = reqwest::Client::new();
    let holidays = fetch_holidays(
        &client,
        &config.holiday_api_url,
        &config.holiday_api_key,
        year,
    )
    .await?;

    let inserted = insert_holidays(&pool, &holidays).await?;
    tracing::info!(year, fetched = holidays.len(), inserted, "Holiday import finished");

    Ok(())
}
