// src/services/backend.rs
use crate::models::{AnalysisResponse, MarketData, PredictionResponse, PropertyFeatures};
use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the prediction service.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("estate_frontend/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(BackendClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /predict`
    pub async fn predict(&self, features: &PropertyFeatures) -> Result<f64> {
        let response: PredictionResponse = self.post_json("/predict", features).await?;
        if !response.prediction.is_finite() {
            return Err(anyhow!("Backend returned a non-finite prediction"));
        }
        info!("Received prediction: {}", response.prediction);
        Ok(response.prediction)
    }

    /// `POST /analyze`
    pub async fn analyze(&self, features: &PropertyFeatures) -> Result<AnalysisResponse> {
        self.post_json("/analyze", features).await
    }

    /// `GET /api/market-data`. Unavailable or malformed data is `None`.
    pub async fn market_data(&self) -> Option<MarketData> {
        let url = self.url("/api/market-data");
        debug!("Fetching market data from {}", url);
        let response = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!("Market data request returned {}", response.status());
                return None;
            }
            Err(e) => {
                warn!("Failed to load market data: {}", e);
                return None;
            }
        };
        match response.json::<MarketData>().await {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Ignoring malformed market data: {}", e);
                None
            }
        }
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &PropertyFeatures) -> Result<T> {
        let url = self.url(path);
        info!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("{} returned {}: {}", path, status, detail));
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Could not decode response from {}", path))
    }
}
