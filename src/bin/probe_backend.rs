use dotenv::dotenv;
use estate_frontend::config::AppConfig;
use estate_frontend::models::PropertyFeatures;
use estate_frontend::services::backend::BackendClient;
use log::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;
    let backend = BackendClient::new(config.backend_url)?;
    info!("Probing prediction backend at {}", backend.base_url());

    let features = PropertyFeatures {
        area: 1200,
        bedrooms: 3,
        bathrooms: 2,
        year_built: 2015,
        lat: 12.9716,
        lon: 77.5946,
    };

    match backend.predict(&features).await {
        Ok(prediction) => info!("SUCCESS: /predict returned {}", prediction),
        Err(e) => {
            error!("ERROR: /predict failed: {:#}", e);
            return Err(e);
        }
    }

    match backend.analyze(&features).await {
        Ok(analysis) => info!(
            "SUCCESS: /analyze returned score {} with range {}..{}",
            analysis.market_score, analysis.confidence_range.lower, analysis.confidence_range.upper
        ),
        Err(e) => error!("ERROR: /analyze failed: {:#}", e),
    }

    match backend.market_data().await {
        Some(data) => info!(
            "SUCCESS: /api/market-data returned {} amenities, {} transport entries",
            data.amenities.len(),
            data.transportation.len()
        ),
        None => warn!("/api/market-data unavailable"),
    }

    Ok(())
}
