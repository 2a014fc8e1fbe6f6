// src/routes.rs
use crate::context::AppContext;
use crate::handlers::error::ApiError;
use crate::handlers::{analytics, api, estimate::submit_estimate, pages};
use crate::models::DisplayQuery;
use log::{error, info};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reject::Rejection;
use warp::{Filter, Reply};

const MAX_BODY_BYTES: u64 = 16 * 1024;

// Maps rejections to a JSON error body.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status();
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        code = StatusCode::BAD_REQUEST;
        message = format!("Invalid request body: {}", e);
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = e.to_string();
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        code = StatusCode::UNSUPPORTED_MEDIA_TYPE;
        message = "Unsupported Media Type".to_string();
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        code = StatusCode::PAYLOAD_TOO_LARGE;
        message = "Payload Too Large".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        error!("Unhandled rejection: {:?}", err);
        let fallback = ApiError::internal_error("Internal Server Error");
        code = fallback.status();
        message = fallback.message;
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(ctx: Arc<AppContext>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let ctx_filter = warp::any().map(move || ctx.clone());
    let display_query = warp::query::<DisplayQuery>();

    let home_route = warp::path::end()
        .and(warp::get())
        .and(display_query.clone())
        .and(ctx_filter.clone())
        .and_then(pages::home);

    let estimate_route = warp::path!("estimate")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::form())
        .and(ctx_filter.clone())
        .and_then(submit_estimate);

    let trends_route = warp::path!("analytics" / "trends")
        .and(warp::get())
        .and(display_query.clone())
        .and(ctx_filter.clone())
        .and_then(analytics::trends);

    let location_route = warp::path!("analytics" / "location")
        .and(warp::get())
        .and(display_query.clone())
        .and(ctx_filter.clone())
        .and_then(analytics::location);

    let roi_page_route = warp::path!("analytics" / "roi")
        .and(warp::get())
        .and(display_query.clone())
        .and(ctx_filter.clone())
        .and_then(analytics::roi_page);

    let roi_submit_route = warp::path!("analytics" / "roi")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::form())
        .and_then(analytics::roi_submit);

    let comparison_route = warp::path!("analytics" / "comparison")
        .and(warp::get())
        .and(display_query.clone())
        .and(ctx_filter.clone())
        .and_then(analytics::comparison);

    let roi_api_route = warp::path!("api" / "roi")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and_then(api::calculate_roi);

    let chart_route = warp::path!("api" / "chart" / "trends.svg")
        .and(warp::get())
        .and(warp::query::<api::ChartQuery>())
        .and_then(api::trend_chart);

    let health_route = warp::path!("health")
        .and(warp::get())
        .and(ctx_filter.clone())
        .and_then(pages::health);

    info!("All routes configured successfully.");

    home_route
        .or(estimate_route)
        .or(trends_route)
        .or(location_route)
        .or(roi_page_route)
        .or(roi_submit_route)
        .or(comparison_route)
        .or(roi_api_route)
        .or(chart_route)
        .or(health_route)
        .recover(handle_rejection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::handlers::estimate::PREDICTION_FAILED;
    use approx::assert_relative_eq;

    fn ctx_for(backend_url: &str) -> Arc<AppContext> {
        let config = AppConfig {
            backend_url: backend_url.to_string(),
            notice_dismiss_ms: 3000,
            ..AppConfig::default()
        };
        Arc::new(AppContext::new(config).unwrap())
    }

    // Nothing listens on the discard port, so backend calls fail fast.
    fn ctx() -> Arc<AppContext> {
        ctx_for("http://127.0.0.1:9")
    }

    fn analysis_json() -> serde_json::Value {
        serde_json::json!({
            "base_prediction": 125375.0,
            "price_per_sqft": 104.48,
            "property_age": 10,
            "market_score": "A+",
            "roi_potential": "6.2%",
            "confidence_range": { "lower": 106568.75, "upper": 144181.25 },
            "market_insights": {
                "luxury_premium": "Standard",
                "location_premium": "+$40k",
                "age_discount": "No discount"
            }
        })
    }

    // Serves `/predict` and, when `analyze_ok` is false, fails `/analyze` with a 500.
    fn spawn_backend(analyze_ok: bool) -> String {
        let predict = warp::path!("predict")
            .and(warp::post())
            .map(|| warp::reply::json(&serde_json::json!({ "prediction": 125375.0 })));
        let analyze = warp::path!("analyze").and(warp::post()).map(move || {
            if analyze_ok {
                warp::reply::with_status(warp::reply::json(&analysis_json()), StatusCode::OK)
            } else {
                warp::reply::with_status(
                    warp::reply::json(&serde_json::json!({ "error": "model offline" })),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
        });
        let (addr, server) = warp::serve(predict.or(analyze)).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        format!("http://{}", addr)
    }

    const VALID_ESTIMATE: &str =
        "area=1200&bedrooms=3&bathrooms=2&year_built=2015&lat=12.97&lon=77.59&currency=USD";

    fn body_text(body: &[u8]) -> String {
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn home_renders_in_requested_currency() {
        let res = warp::test::request()
            .method("GET")
            .path("/?currency=INR&prediction=125375")
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res.body());
        assert!(html.contains("₹1,04,68,813"));
        assert!(html.contains("₹3507K"));
    }

    #[tokio::test]
    async fn failed_prediction_renders_transient_notice() {
        let res = warp::test::request()
            .method("POST")
            .path("/estimate")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(VALID_ESTIMATE)
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res.body());
        assert!(html.contains(PREDICTION_FAILED));
        assert!(html.contains(r#"data-dismiss-after="3000""#));
        assert!(!html.contains("resultCard"));
    }

    #[tokio::test]
    async fn estimate_renders_prediction_and_analysis() {
        let backend = spawn_backend(true);
        let res = warp::test::request()
            .method("POST")
            .path("/estimate")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(VALID_ESTIMATE)
            .reply(&routes(ctx_for(&backend)))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res.body());
        assert!(html.contains(r#"<div class="price-amount" id="priceAmount">$125,375</div>"#));
        assert!(html.contains(r#"id="analysisCard""#));
        assert!(html.contains("Location Premium: +$40,000"));
        assert!(html.contains("±15%"));
        assert!(html.contains("/analytics/roi?currency=USD&amp;prediction=125375"));
        assert!(!html.contains(PREDICTION_FAILED));
    }

    #[tokio::test]
    async fn failed_analysis_still_shows_prediction() {
        let backend = spawn_backend(false);
        let res = warp::test::request()
            .method("POST")
            .path("/estimate")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(VALID_ESTIMATE)
            .reply(&routes(ctx_for(&backend)))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res.body());
        assert!(html.contains(r#"id="priceAmount">$125,375</div>"#));
        assert!(!html.contains(r#"id="analysisCard""#));
        assert!(!html.contains(PREDICTION_FAILED));
    }

    #[tokio::test]
    async fn invalid_estimate_form_never_reaches_backend() {
        let res = warp::test::request()
            .method("POST")
            .path("/estimate")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("area=0&bedrooms=3&bathrooms=2&year_built=2015&lat=12.97&lon=77.59")
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res.body());
        assert!(html.contains("Area must be greater than zero"));
        assert!(html.contains(r#"name="area" value="0""#));
        assert!(!html.contains(PREDICTION_FAILED));
    }

    #[tokio::test]
    async fn trends_modal_falls_back_to_reference_data() {
        let res = warp::test::request()
            .method("GET")
            .path("/analytics/trends")
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res.body());
        assert!(html.contains("<h3>Market Trends</h3>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("<strong>8.5%</strong>"));
    }

    #[tokio::test]
    async fn roi_page_uses_current_prediction() {
        let res = warp::test::request()
            .method("GET")
            .path("/analytics/roi?prediction=150000.4")
            .reply(&routes(ctx()))
            .await;
        let html = body_text(res.body());
        assert!(html.contains(r#"name="purchase_price" value="150000""#));
        assert!(html.contains(r#"name="monthly_rent" value="1200""#));
    }

    #[tokio::test]
    async fn roi_page_prefills_in_display_currency() {
        let res = warp::test::request()
            .method("GET")
            .path("/analytics/roi?currency=INR&prediction=125375")
            .reply(&routes(ctx()))
            .await;
        let html = body_text(res.body());
        assert!(html.contains(r#"name="purchase_price" value="10468813""#));
        assert!(html.contains(r#"name="monthly_rent" value="100200""#));
        assert!(html.contains(r#"name="expenses" value="25""#));
        assert!(html.contains(r#"name="down_payment" value="20""#));
    }

    #[tokio::test]
    async fn rupee_roi_submission_reports_rupee_cash_flow() {
        let res = warp::test::request()
            .method("POST")
            .path("/analytics/roi")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("purchase_price=10468813&monthly_rent=100200&expenses=25&down_payment=20&currency=INR")
            .reply(&routes(ctx()))
            .await;
        let html = body_text(res.body());
        assert!(html.contains(r#"id="cashFlow">₹75150.00"#));
        assert!(html.contains(r#"id="breakEven">11.6 years"#));
    }

    #[tokio::test]
    async fn roi_form_submission_shows_results() {
        let res = warp::test::request()
            .method("POST")
            .path("/analytics/roi")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("purchase_price=125375&monthly_rent=1200&expenses=25&down_payment=&currency=USD")
            .reply(&routes(ctx()))
            .await;
        let html = body_text(res.body());
        assert!(html.contains(r#"id="annualROI">8.61%"#));
        assert!(html.contains(r#"id="cashOnCash">43.07%"#));
    }

    #[tokio::test]
    async fn roi_form_with_blank_price_shows_alert() {
        let res = warp::test::request()
            .method("POST")
            .path("/analytics/roi")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("purchase_price=&monthly_rent=1200")
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res.body());
        assert!(html.contains("alertdialog"));
        assert!(!html.contains("roiResults"));
    }

    #[tokio::test]
    async fn roi_api_returns_metrics() {
        let res = warp::test::request()
            .method("POST")
            .path("/api/roi")
            .json(&serde_json::json!({
                "purchase_price": 125375.0,
                "monthly_rent": 1200.0,
                "expense_pct": 25.0
            }))
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_relative_eq!(body["monthly_cash_flow"].as_f64().unwrap(), 900.0);
        assert_relative_eq!(body["down_payment"].as_f64().unwrap(), 25075.0);
    }

    #[tokio::test]
    async fn roi_api_rejects_invalid_input() {
        let res = warp::test::request()
            .method("POST")
            .path("/api/roi")
            .json(&serde_json::json!({
                "purchase_price": 0.0,
                "monthly_rent": 1200.0,
                "expense_pct": 25.0
            }))
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("invalid input"));
    }

    #[tokio::test]
    async fn chart_is_served_as_svg() {
        let res = warp::test::request()
            .method("GET")
            .path("/api/chart/trends.svg?width=600")
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "image/svg+xml");
        assert!(body_text(res.body()).contains(r#"width="600" height="200""#));

        let res = warp::test::request()
            .method("GET")
            .path("/api/chart/trends.svg?height=99999")
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_chart_query_is_a_client_error() {
        for path in ["/api/chart/trends.svg?width=abc", "/api/chart/trends.svg?width=-5"] {
            let res = warp::test::request()
                .method("GET")
                .path(path)
                .reply(&routes(ctx()))
                .await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", path);
            let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
            assert!(body["error"].is_string());
        }
    }

    #[tokio::test]
    async fn roi_api_requires_json_body() {
        let res = warp::test::request()
            .method("POST")
            .path("/api/roi")
            .header("content-type", "text/plain")
            .body("purchase_price=125375")
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["error"], "Unsupported Media Type");
    }

    #[tokio::test]
    async fn tiny_chart_renders_without_out_of_bounds_points() {
        let res = warp::test::request()
            .method("GET")
            .path("/api/chart/trends.svg?width=20&height=20")
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let svg = body_text(res.body());
        assert!(svg.contains(r#"width="20" height="20""#));
        assert!(!svg.contains("<polyline"));
        assert!(!svg.contains("<circle"));
    }

    #[tokio::test]
    async fn health_reports_backend() {
        let res = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend_url"], "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn unknown_path_is_json_not_found() {
        let res = warp::test::request()
            .method("GET")
            .path("/nope")
            .reply(&routes(ctx()))
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["error"], "Not Found");
    }
}
