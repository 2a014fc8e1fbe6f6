// src/config.rs
use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::env;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3030;
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_USD_TO_INR_RATE: f64 = 83.5;
pub const DEFAULT_NOTICE_DISMISS_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub backend_url: String,
    pub usd_to_inr_rate: f64,
    pub notice_dismiss_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            usd_to_inr_rate: DEFAULT_USD_TO_INR_RATE,
            notice_dismiss_ms: DEFAULT_NOTICE_DISMISS_MS,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    /// Call `dotenv().ok()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let port = match lookup("PORT") {
            Some(raw) => parse_var::<u16>("PORT", &raw)?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                defaults.port
            }
        };

        let backend_url = lookup("BACKEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.backend_url);
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(anyhow!("BACKEND_URL must be an http(s) URL, got {:?}", backend_url));
        }

        let usd_to_inr_rate = match lookup("USD_TO_INR_RATE") {
            Some(raw) => parse_var::<f64>("USD_TO_INR_RATE", &raw)?,
            None => defaults.usd_to_inr_rate,
        };
        if !usd_to_inr_rate.is_finite() || usd_to_inr_rate <= 0.0 {
            return Err(anyhow!("USD_TO_INR_RATE must be a positive number, got {}", usd_to_inr_rate));
        }

        let notice_dismiss_ms = match lookup("NOTICE_DISMISS_MS") {
            Some(raw) => parse_var::<u64>("NOTICE_DISMISS_MS", &raw)?,
            None => defaults.notice_dismiss_ms,
        };

        let config = AppConfig {
            port,
            backend_url,
            usd_to_inr_rate,
            notice_dismiss_ms,
        };
        info!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{} has an invalid value: {:?}", key, raw))
}
