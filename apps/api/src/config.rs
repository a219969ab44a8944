use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Insert the default course catalog when the courses table is empty.
    pub seed_courses: bool,
    /// Cost of one training hour, used for investment estimates.
    pub hourly_training_cost: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://competencias.db".to_string()),
            port: parse_env("PORT", "4000").context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            seed_courses: parse_env("SEED_COURSES", "true")
                .context("SEED_COURSES must be true or false")?,
            hourly_training_cost: parse_env("HOURLY_TRAINING_COST", "50000")
                .context("HOURLY_TRAINING_COST must be a number")?,
        })
    }
}

fn parse_env<T>(key: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Invalid value '{raw}' for '{key}'"))
}
