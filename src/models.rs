// src/models.rs
use crate::services::currency::Currency;
use crate::services::insights::PriceAdjustment;
use crate::services::roi::{RoiInput, DEFAULT_DOWN_PAYMENT_PCT};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Live prediction shown before the user has submitted anything.
pub const DEFAULT_LIVE_PREDICTION: f64 = 125375.0;

/// Property attributes sent to `/predict` and `/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFeatures {
    pub area: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub year_built: i32,
    pub lat: f64,
    pub lon: f64,
}

/// Raw prediction form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimateForm {
    pub area: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub year_built: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub currency: Option<String>,
}

impl EstimateForm {
    pub fn currency(&self) -> Currency {
        Currency::from_param(self.currency.as_deref())
    }

    /// Parses and validates the form into backend features.
    pub fn to_features(&self) -> Result<PropertyFeatures, String> {
        let area: u32 = required(&self.area, "Area")?;
        let bedrooms: u32 = required(&self.bedrooms, "Bedrooms")?;
        let bathrooms: u32 = required(&self.bathrooms, "Bathrooms")?;
        let year_built: i32 = required(&self.year_built, "Year built")?;
        let lat: f64 = required(&self.lat, "Latitude")?;
        let lon: f64 = required(&self.lon, "Longitude")?;

        if area == 0 {
            return Err("Area must be greater than zero".to_string());
        }
        let current_year = Utc::now().year();
        if year_built < 1800 || year_built > current_year {
            return Err(format!("Year built must be between 1800 and {}", current_year));
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err("Latitude/longitude are out of range".to_string());
        }

        Ok(PropertyFeatures {
            area,
            bedrooms,
            bathrooms,
            year_built,
            lat,
            lon,
        })
    }
}

fn required<T: std::str::FromStr>(raw: &Option<String>, name: &str) -> Result<T, String> {
    let raw = raw.as_deref().map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(format!("{} is required", name));
    }
    raw.parse::<T>()
        .map_err(|_| format!("{} must be a number, got {:?}", name, raw))
}

/// Reads a number the way a browser number field would: blank or garbage is `None`.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// ROI calculator form, read as leniently as a browser number field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoiForm {
    pub purchase_price: Option<String>,
    pub monthly_rent: Option<String>,
    pub expenses: Option<String>,
    pub down_payment: Option<String>,
    pub currency: Option<String>,
    pub prediction: Option<String>,
}

impl RoiForm {
    /// Blank or unreadable fields become 0, except the down payment which
    /// falls back to 20%.
    pub fn to_input(&self) -> RoiInput {
        RoiInput {
            purchase_price: parse_number(self.purchase_price.as_deref()).unwrap_or(0.0),
            monthly_rent: parse_number(self.monthly_rent.as_deref()).unwrap_or(0.0),
            expense_pct: parse_number(self.expenses.as_deref()).unwrap_or(0.0),
            down_payment_pct: parse_number(self.down_payment.as_deref())
                .unwrap_or(DEFAULT_DOWN_PAYMENT_PCT),
        }
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState::from(&DisplayQuery {
            currency: self.currency.clone(),
            prediction: self.prediction.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceRange {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInsights {
    pub luxury_premium: PriceAdjustment,
    pub location_premium: PriceAdjustment,
    pub age_discount: PriceAdjustment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub base_prediction: Option<f64>,
    pub price_per_sqft: f64,
    pub property_age: i32,
    pub market_score: String,
    pub roi_potential: String,
    pub confidence_range: ConfidenceRange,
    pub market_insights: MarketInsights,
}

impl AnalysisResponse {
    /// Half-width of the confidence range relative to the prediction, capped at 20%.
    pub fn variance_pct(&self, prediction: f64) -> Option<f64> {
        if prediction <= 0.0 {
            return None;
        }
        let spread = (self.confidence_range.upper - self.confidence_range.lower) / 2.0;
        let pct = crate::services::currency::js_round(spread / prediction * 100.0);
        Some(pct.min(20.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub price_growth: Option<String>,
    pub luxury_growth: Option<String>,
    pub central_premium: Option<String>,
    pub new_construction_premium: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub distance: String,
    pub impact: PriceAdjustment,
}

/// Payload of `/api/market-data`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub trends: Option<TrendSummary>,
    #[serde(default)]
    pub amenities: BTreeMap<String, Amenity>,
    #[serde(default)]
    pub transportation: BTreeMap<String, String>,
}

/// Display state carried from request to request instead of living in globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayState {
    pub prediction: Option<f64>,
    pub currency: Currency,
}

impl Default for DisplayState {
    fn default() -> Self {
        DisplayState {
            prediction: None,
            currency: Currency::Usd,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayQuery {
    pub currency: Option<String>,
    pub prediction: Option<String>,
}

impl From<&DisplayQuery> for DisplayState {
    fn from(query: &DisplayQuery) -> Self {
        DisplayState {
            prediction: parse_number(query.prediction.as_deref()).filter(|p| *p > 0.0),
            currency: Currency::from_param(query.currency.as_deref()),
        }
    }
}

impl DisplayState {
    /// Prediction for the hero panel, falling back to the sample price.
    pub fn live_prediction(&self) -> f64 {
        self.prediction.unwrap_or(DEFAULT_LIVE_PREDICTION)
    }

    pub fn with_currency(self, currency: Currency) -> Self {
        DisplayState { currency, ..self }
    }

    /// Query string that reproduces this state on another page.
    pub fn query_string(&self) -> String {
        match self.prediction {
            Some(p) => format!("currency={}&prediction={}", self.currency.code(), p),
            None => format!("currency={}", self.currency.code()),
        }
    }
}
