use estate_frontend::services::market::{trend_chart_svg, TREND_CHART_HEIGHT, TREND_CHART_WIDTH};
use log::info;
use std::env;
use std::io::Write;

// Usage: render_trends [WIDTH] [HEIGHT] > trends.svg
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let width = match args.next() {
        Some(raw) => raw.parse::<u32>()?,
        None => TREND_CHART_WIDTH,
    };
    let height = match args.next() {
        Some(raw) => raw.parse::<u32>()?,
        None => TREND_CHART_HEIGHT,
    };

    info!("Rendering trend chart at {}x{}", width, height);
    let svg = trend_chart_svg(width, height);
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", svg)?;
    Ok(())
}
