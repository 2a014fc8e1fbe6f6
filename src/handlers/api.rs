// src/handlers/api.rs
use super::error::ApiError;
use crate::services::market::{trend_chart_svg, TREND_CHART_HEIGHT, TREND_CHART_WIDTH};
use crate::services::roi::{compute_roi, RoiInput};
use log::{debug, info, warn};
use serde::Deserialize;
use warp::http::header::CONTENT_TYPE;
use warp::Rejection;

const MAX_CHART_SIDE: u32 = 4000;

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

pub async fn calculate_roi(input: RoiInput) -> Result<impl warp::Reply, Rejection> {
    info!("Handling ROI calculation request");
    match compute_roi(&input) {
        Ok(result) => {
            debug!("ROI result: {:?}", result);
            Ok(warp::reply::json(&result))
        }
        Err(e) => {
            warn!("Invalid ROI request: {}", e);
            Err(warp::reject::custom(ApiError::invalid_input(e.to_string())))
        }
    }
}

pub async fn trend_chart(query: ChartQuery) -> Result<impl warp::Reply, Rejection> {
    let width = query.width.unwrap_or(TREND_CHART_WIDTH);
    let height = query.height.unwrap_or(TREND_CHART_HEIGHT);
    if width > MAX_CHART_SIDE || height > MAX_CHART_SIDE {
        return Err(warp::reject::custom(ApiError::invalid_input(format!(
            "Chart dimensions must not exceed {}px",
            MAX_CHART_SIDE
        ))));
    }
    debug!("Rendering trend chart at {}x{}", width, height);
    Ok(warp::reply::with_header(
        trend_chart_svg(width, height),
        CONTENT_TYPE,
        "image/svg+xml",
    ))
}
