use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub kafka_broker: String,
    pub port: u16,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub consumer_group: String,
    pub dead_letter_max_attempts: u32,
    pub shutdown_timeout_secs: u64,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let kafka_broker = std::env::var("KAFKA").context("Missing environment variable: KAFKA")?;

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3003".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = std::env::var("DB_MIN_CONNECTION")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MIN_CONNECTION as u32")?;

        let db_max_conn = std::env::var("DB_MAX_CONNECTION")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MAX_CONNECTION as u32")?;

        let consumer_group = std::env::var("CONSUMER_GROUP")
            .unwrap_or_else(|_| "order-service.payment-results".to_string());

        let dead_letter_max_attempts = std::env::var("DEAD_LETTER_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("Unable to parse DEAD_LETTER_MAX_ATTEMPTS as u32")?;

        let shutdown_timeout_secs = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .context("Unable to parse SHUTDOWN_TIMEOUT_SECS as u64")?;

        Ok(Self {
            database_url,
            kafka_broker,
            port,
            db_min_conn,
            db_max_conn,
            consumer_group,
            dead_letter_max_attempts,
            shutdown_timeout_secs,
        })
    }
}
