// src/context.rs
use crate::config::AppConfig;
use crate::services::backend::BackendClient;
use crate::services::currency::CurrencyConverter;
use anyhow::Result;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub backend: BackendClient,
    pub fx: CurrencyConverter,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Result<Self> {
        let backend = BackendClient::new(config.backend_url.clone())?;
        let fx = CurrencyConverter::new(config.usd_to_inr_rate);
        Ok(AppContext { config, backend, fx })
    }
}
