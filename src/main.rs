use dotenv::dotenv;
use estate_frontend::config::AppConfig;
use estate_frontend::context::AppContext;
use estate_frontend::routes;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = AppConfig::from_env()?;
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let ctx = Arc::new(AppContext::new(config)?);
    info!("Using prediction backend at {}", ctx.backend.base_url());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST"]);

    let app = routes::routes(ctx).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(app).run(addr).await;
    Ok(())
}
