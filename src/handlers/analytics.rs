// src/handlers/analytics.rs
use crate::context::AppContext;
use crate::models::{DisplayQuery, DisplayState, RoiForm};
use crate::services::market::{
    amenities, comparables, key_insights, transportation, trend_chart_svg, TREND_CHART_HEIGHT,
    TREND_CHART_WIDTH,
};
use crate::services::roi::{compute_roi, RoiInput, DEFAULT_MONTHLY_RENT, DEFAULT_PURCHASE_PRICE};
use crate::views::modals::{
    comparison_content, location_content, modal_page, roi_content, trends_content, RoiFields,
};
use log::{info, warn};
use std::sync::Arc;
use warp::reply::{html, Html};
use warp::Rejection;

pub async fn trends(query: DisplayQuery, ctx: Arc<AppContext>) -> Result<Html<String>, Rejection> {
    let state = DisplayState::from(&query);
    info!("Opening Market Trends");
    let market = ctx.backend.market_data().await;
    let chart = trend_chart_svg(TREND_CHART_WIDTH, TREND_CHART_HEIGHT);
    let content = trends_content(&chart, &key_insights(market.as_ref()));
    Ok(html(modal_page("Market Trends", "/analytics/trends", &state, &content)))
}

pub async fn location(query: DisplayQuery, ctx: Arc<AppContext>) -> Result<Html<String>, Rejection> {
    let state = DisplayState::from(&query);
    info!("Opening Location Insights");
    let market = ctx.backend.market_data().await;
    let content = location_content(
        &amenities(market.as_ref()),
        &transportation(market.as_ref()),
        &state,
        &ctx.fx,
    );
    Ok(html(modal_page("Location Insights", "/analytics/location", &state, &content)))
}

/// Opens the calculator pre-filled in the display currency, using the current
/// prediction as the price.
pub async fn roi_page(query: DisplayQuery, ctx: Arc<AppContext>) -> Result<Html<String>, Rejection> {
    let state = DisplayState::from(&query);
    info!("Opening ROI Calculator");
    let price_usd = state.prediction.unwrap_or(DEFAULT_PURCHASE_PRICE);
    let input = RoiInput {
        purchase_price: ctx.fx.from_usd(price_usd, state.currency).round(),
        monthly_rent: ctx.fx.from_usd(DEFAULT_MONTHLY_RENT, state.currency).round(),
        ..RoiInput::default()
    };
    let content = roi_content(&RoiFields::from(&input), None, &state);
    Ok(html(modal_page("ROI Calculator", "/analytics/roi", &state, &content)))
}

pub async fn roi_submit(form: RoiForm) -> Result<Html<String>, Rejection> {
    let state = form.display_state();
    let input = form.to_input();
    info!("Calculating ROI for purchase price {}", input.purchase_price);
    let outcome = compute_roi(&input);
    if let Err(e) = &outcome {
        warn!("ROI calculation rejected: {}", e);
    }
    let fields = RoiFields {
        purchase_price: form.purchase_price.clone().unwrap_or_default(),
        monthly_rent: form.monthly_rent.clone().unwrap_or_default(),
        expenses: form.expenses.clone().unwrap_or_default(),
        down_payment: form.down_payment.clone().unwrap_or_default(),
    };
    let content = roi_content(&fields, Some(&outcome), &state);
    Ok(html(modal_page("ROI Calculator", "/analytics/roi", &state, &content)))
}

pub async fn comparison(query: DisplayQuery, ctx: Arc<AppContext>) -> Result<Html<String>, Rejection> {
    let state = DisplayState::from(&query);
    info!("Opening Property Comparison");
    let content = comparison_content(&comparables(state.live_prediction()), &state, &ctx.fx);
    Ok(html(modal_page("Property Comparison", "/analytics/comparison", &state, &content)))
}
