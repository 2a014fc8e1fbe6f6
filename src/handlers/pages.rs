// src/handlers/pages.rs
use crate::context::AppContext;
use crate::models::{DisplayQuery, DisplayState};
use crate::views::home::{render_home, HomeView};
use chrono::Utc;
use log::{debug, info};
use serde_json::json;
use std::sync::Arc;
use warp::reply::{html, Html};
use warp::Rejection;

pub async fn home(query: DisplayQuery, ctx: Arc<AppContext>) -> Result<Html<String>, Rejection> {
    let state = DisplayState::from(&query);
    info!("Rendering home page ({})", state.query_string());
    Ok(html(render_home(
        &state,
        &ctx.fx,
        HomeView::default(),
        ctx.config.notice_dismiss_ms,
    )))
}

pub async fn health(ctx: Arc<AppContext>) -> Result<impl warp::Reply, Rejection> {
    debug!("Health check");
    Ok(warp::reply::json(&json!({
        "status": "healthy",
        "backend_url": ctx.backend.base_url(),
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
