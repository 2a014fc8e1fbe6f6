// src/views/home.rs
use super::layout::{escape_html, page};
use super::notice::transient_error;
use crate::models::{AnalysisResponse, DisplayState, EstimateForm};
use crate::services::currency::{to_fixed, Currency, CurrencyConverter};

/// Model RMSE advertised in the hero panel, in USD.
pub const MODEL_RMSE_USD: f64 = 42000.0;

/// What the home page should show besides the hero and the form.
#[derive(Debug, Default)]
pub struct HomeView<'a> {
    pub form: Option<&'a EstimateForm>,
    pub error: Option<&'a str>,
    pub analysis: Option<&'a AnalysisResponse>,
}

pub fn rmse_label(currency: Currency, fx: &CurrencyConverter) -> String {
    match currency {
        Currency::Usd => "$42K".to_string(),
        Currency::Inr => format!("₹{}K", to_fixed(fx.to_inr(MODEL_RMSE_USD) / 1000.0, 0)),
    }
}

fn hero(state: &DisplayState, fx: &CurrencyConverter) -> String {
    format!(
        r#"<section class="hero">
        <div><div class="stat-number">{rmse}</div><div>Model RMSE</div></div>
        <div><div class="live-prediction-price">{live}</div><div>Live prediction</div></div>
        </section>"#,
        rmse = rmse_label(state.currency, fx),
        live = fx.display(state.live_prediction(), state.currency),
    )
}

fn field(form: Option<&EstimateForm>, pick: fn(&EstimateForm) -> &Option<String>, fallback: &str) -> String {
    let value = form
        .and_then(|f| pick(f).as_deref())
        .unwrap_or(fallback);
    escape_html(value)
}

fn prediction_form(state: &DisplayState, form: Option<&EstimateForm>, error: Option<&str>, dismiss_ms: u64) -> String {
    let notice = error
        .map(|message| transient_error(message, dismiss_ms))
        .unwrap_or_default();
    format!(
        r#"<section class="card" id="predict"><h2>Predict a price</h2>
        <form id="predictionForm" method="POST" action="/estimate">
        <input type="hidden" name="currency" value="{currency}">
        <div class="form-grid">
        <div class="input-group"><label>Area (sq ft)</label><input type="number" name="area" value="{area}" required></div>
        <div class="input-group"><label>Bedrooms</label><input type="number" name="bedrooms" value="{bedrooms}" required></div>
        <div class="input-group"><label>Bathrooms</label><input type="number" name="bathrooms" value="{bathrooms}" required></div>
        <div class="input-group"><label>Year built</label><input type="number" name="year_built" value="{year_built}" required></div>
        <div class="input-group"><label>Latitude</label><input type="number" step="any" name="lat" value="{lat}" required></div>
        <div class="input-group"><label>Longitude</label><input type="number" step="any" name="lon" value="{lon}" required></div>
        </div>
        <button type="submit" class="predict-button">Predict Price</button>
        {notice}
        </form></section>"#,
        currency = state.currency.code(),
        area = field(form, |f| &f.area, "1200"),
        bedrooms = field(form, |f| &f.bedrooms, "3"),
        bathrooms = field(form, |f| &f.bathrooms, "2"),
        year_built = field(form, |f| &f.year_built, "2015"),
        lat = field(form, |f| &f.lat, "12.9716"),
        lon = field(form, |f| &f.lon, "77.5946"),
        notice = notice,
    )
}

pub fn result_card(prediction: f64, state: &DisplayState, fx: &CurrencyConverter) -> String {
    format!(
        r#"<section class="card success-animation" id="resultCard"><h2>Estimated price</h2>
        <div class="price-amount" id="priceAmount">{price}</div>
        <div class="confidence-bar"><div class="confidence-fill" style="width:95%"></div></div>
        <div id="confidenceText">95% confidence</div></section>"#,
        price = fx.display(prediction, state.currency),
    )
}

fn score_class(score: &str) -> String {
    let slug: String = score
        .to_lowercase()
        .chars()
        .map(|c| if c == '+' { "-plus".to_string() } else { c.to_string() })
        .collect();
    format!("score-{}", slug)
}

pub fn analysis_card(analysis: &AnalysisResponse, state: &DisplayState, fx: &CurrencyConverter) -> String {
    let currency = state.currency;
    let variance = state
        .prediction
        .and_then(|p| analysis.variance_pct(p))
        .map(|v| format!("±{}%", to_fixed(v, 0)))
        .unwrap_or_else(|| "N/A".to_string());
    let insights = &analysis.market_insights;

    format!(
        r#"<section class="card success-animation" id="analysisCard"><h2>Market analysis</h2>
        <div class="analysis-grid">
        <div class="analysis-item"><div class="analysis-label">Price per Sq Ft</div><div class="analysis-value">{ppsf}</div></div>
        <div class="analysis-item"><div class="analysis-label">Property Age</div><div class="analysis-value">{age} years</div></div>
        <div class="analysis-item"><div class="analysis-label">Market Score</div><div class="analysis-value {score_class}">{score}</div></div>
        <div class="analysis-item"><div class="analysis-label">ROI Potential</div><div class="analysis-value">{roi}</div></div>
        </div>
        <div class="confidence-range"><h4>Price Range (95% Confidence)</h4><div class="range-display">
        <div class="range-item"><span class="range-label">Low:</span> <span class="range-value">{low}</span></div>
        <div class="range-item"><span class="range-label">High:</span> <span class="range-value">{high}</span></div>
        <div class="range-item"><span class="range-label">Variance:</span> <span class="range-value">{variance}</span></div>
        </div></div>
        <div class="market-insights"><h4>Market Insights</h4><div class="insights-list">
        <div class="insight-item">👑 <span>Luxury Premium: {luxury}</span></div>
        <div class="insight-item">📍 <span>Location Premium: {location}</span></div>
        <div class="insight-item">🕒 <span>Age Discount: {age_discount}</span></div>
        </div></div></section>"#,
        ppsf = fx.display(analysis.price_per_sqft, currency),
        age = analysis.property_age,
        score_class = escape_html(&score_class(&analysis.market_score)),
        score = escape_html(&analysis.market_score),
        roi = escape_html(&analysis.roi_potential),
        low = fx.display(analysis.confidence_range.lower, currency),
        high = fx.display(analysis.confidence_range.upper, currency),
        variance = variance,
        luxury = escape_html(&insights.luxury_premium.display(currency, fx)),
        location = escape_html(&insights.location_premium.display(currency, fx)),
        age_discount = escape_html(&insights.age_discount.display(currency, fx)),
    )
}

pub fn render_home(state: &DisplayState, fx: &CurrencyConverter, view: HomeView<'_>, dismiss_ms: u64) -> String {
    let mut body = hero(state, fx);
    body.push_str(&prediction_form(state, view.form, view.error, dismiss_ms));
    if let Some(prediction) = state.prediction {
        body.push_str(&result_card(prediction, state, fx));
    }
    if let Some(analysis) = view.analysis {
        body.push_str(&analysis_card(analysis, state, fx));
    }
    page("House Price Prediction", "/", state, &body)
}
