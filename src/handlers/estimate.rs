// src/handlers/estimate.rs
use crate::context::AppContext;
use crate::models::{DisplayState, EstimateForm};
use crate::views::home::{render_home, HomeView};
use log::{error, info, warn};
use std::sync::Arc;
use warp::reply::{html, Html};
use warp::Rejection;

pub const PREDICTION_FAILED: &str = "Failed to get prediction. Please try again.";

/// Handles the prediction form: `/predict` first, then `/analyze` for the
/// analysis card. Failures re-render the form with a self-dismissing notice.
pub async fn submit_estimate(form: EstimateForm, ctx: Arc<AppContext>) -> Result<Html<String>, Rejection> {
    info!("Handling estimate submission");
    let dismiss_ms = ctx.config.notice_dismiss_ms;
    let state = DisplayState {
        prediction: None,
        currency: form.currency(),
    };

    let features = match form.to_features() {
        Ok(features) => features,
        Err(message) => {
            warn!("Rejected estimate form: {}", message);
            let view = HomeView {
                form: Some(&form),
                error: Some(message.as_str()),
                analysis: None,
            };
            return Ok(html(render_home(&state, &ctx.fx, view, dismiss_ms)));
        }
    };

    let prediction = match ctx.backend.predict(&features).await {
        Ok(prediction) => prediction,
        Err(e) => {
            error!("Prediction request failed: {:#}", e);
            let view = HomeView {
                form: Some(&form),
                error: Some(PREDICTION_FAILED),
                analysis: None,
            };
            return Ok(html(render_home(&state, &ctx.fx, view, dismiss_ms)));
        }
    };

    let analysis = match ctx.backend.analyze(&features).await {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            error!("Analysis request failed, showing prediction only: {:#}", e);
            None
        }
    };

    let state = DisplayState {
        prediction: Some(prediction),
        ..state
    };
    let view = HomeView {
        form: Some(&form),
        error: None,
        analysis: analysis.as_ref(),
    };
    Ok(html(render_home(&state, &ctx.fx, view, dismiss_ms)))
}
