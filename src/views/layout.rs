// src/views/layout.rs
use crate::models::DisplayState;
use crate::services::currency::Currency;

pub use crate::services::svg::escape_markup as escape_html;

const CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:Inter,system-ui,sans-serif;color:#333;background:#f5f7fb}
a{color:#667eea;text-decoration:none}
.navbar{background:rgba(255,255,255,.95);padding:1rem 2rem;display:flex;align-items:center;gap:1.5rem;border-bottom:1px solid #e1e5e9}
.navbar .brand{font-weight:700;font-size:1.2rem;color:#333;margin-right:auto}
.currency-btn{padding:4px 12px;border:2px solid #e1e5e9;border-radius:20px;color:#666}
.currency-btn.active{border-color:#667eea;color:#667eea;font-weight:600}
.container{max-width:960px;margin:0 auto;padding:2rem}
.hero{background:linear-gradient(45deg,#667eea,#764ba2);color:#fff;padding:2.5rem 2rem;border-radius:20px;display:flex;gap:2rem;flex-wrap:wrap}
.hero .stat-number{font-size:1.8rem;font-weight:700}
.hero .live-prediction-price{font-size:1.8rem;font-weight:700}
.card{background:#fff;border-radius:20px;padding:2rem;margin-top:2rem;box-shadow:0 10px 30px rgba(0,0,0,.05)}
.form-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(200px,1fr));gap:1rem}
.input-group{display:flex;flex-direction:column}
.input-group label{margin-bottom:.5rem;font-weight:600}
.input-group input,.input-group select{padding:12px;border:2px solid #e1e5e9;border-radius:10px;font-size:1rem}
.predict-button,.calculate-btn{background:linear-gradient(45deg,#667eea,#764ba2);color:#fff;border:none;padding:15px 30px;border-radius:10px;font-size:1.1rem;font-weight:600;cursor:pointer;width:100%;margin-top:1.5rem}
.price-amount{font-size:2.5rem;font-weight:700;color:#667eea}
.confidence-bar{background:#e1e5e9;border-radius:10px;height:10px;margin-top:1rem}
.confidence-fill{background:#4ecdc4;border-radius:10px;height:10px}
.analysis-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(150px,1fr));gap:1rem;margin-bottom:2rem}
.analysis-item{text-align:center;padding:1rem;background:#f8f9fa;border-radius:10px}
.analysis-label{font-size:.9rem;color:#666;margin-bottom:.5rem}
.analysis-value{font-size:1.2rem;font-weight:600}
.score-a-plus,.score-a{color:#4ecdc4}.score-b-plus,.score-b{color:#ffa726}
.range-display{display:flex;justify-content:center;gap:1rem;font-weight:600}
.insight-item{display:flex;align-items:center;gap:10px;margin-bottom:.5rem;padding:.5rem;background:#f8f9fa;border-radius:5px}
.error-message{background:#ff6b6b;color:#fff;padding:15px;border-radius:10px;margin-top:1rem;overflow:hidden;animation:slideIn .3s ease-out,dismiss 0s linear var(--dismiss-after) forwards}
.alert{background:#fff3cd;border:2px solid #ffa726;padding:1rem;border-radius:10px;margin-bottom:1rem}
.modal-overlay{position:fixed;inset:0;background:rgba(0,0,0,.5);display:flex;align-items:center;justify-content:center;z-index:10000}
.modal-content{background:#fff;border-radius:20px;max-width:600px;width:90%;max-height:80vh;overflow-y:auto}
.modal-header{display:flex;justify-content:space-between;align-items:center;padding:2rem 2rem 1rem;border-bottom:1px solid #e1e5e9}
.modal-close{font-size:1.5rem;color:#666}
.modal-body{padding:2rem}
.insight-grid,.amenities-grid,.transport-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(200px,1fr));gap:1rem}
.insight-card,.amenity-item,.transport-item{display:flex;align-items:center;gap:10px;padding:1rem;background:#f8f9fa;border-radius:10px}
.amenity-impact{margin-left:auto;font-weight:600;color:#4ecdc4}
.roi-inputs{display:grid;gap:1rem}
.roi-results{display:grid;gap:1rem}
.roi-metric{display:flex;justify-content:space-between;padding:1rem;background:#f8f9fa;border-radius:10px}
.metric-value{font-size:1.2rem;font-weight:700;color:#4ecdc4}
.comparison-table table{width:100%;border-collapse:collapse}
.comparison-table th,.comparison-table td{padding:12px;text-align:left;border-bottom:1px solid #e1e5e9}
.comparison-table tr.highlight{background:rgba(102,126,234,.1)}
@keyframes slideIn{from{opacity:0;transform:translateY(-10px)}to{opacity:1;transform:none}}
@keyframes dismiss{to{opacity:0;height:0;padding:0;margin:0}}
"#;

fn currency_switch(path: &str, state: &DisplayState) -> String {
    [Currency::Usd, Currency::Inr]
        .iter()
        .map(|&c| {
            let class = if c == state.currency {
                "currency-btn active"
            } else {
                "currency-btn"
            };
            format!(
                r#"<a class="{class}" data-currency="{code}" href="{path}?{query}">{code}</a>"#,
                class = class,
                code = c.code(),
                path = path,
                query = escape_html(&state.with_currency(c).query_string()),
            )
        })
        .collect()
}

fn nav(path: &str, state: &DisplayState) -> String {
    let query = escape_html(&state.query_string());
    format!(
        r#"<nav class="navbar"><a class="brand" href="/?{q}">🏠 EstatePredict</a>
        <a href="/analytics/trends?{q}" data-analytics="trends">Market Trends</a>
        <a href="/analytics/location?{q}" data-analytics="location">Location</a>
        <a href="/analytics/roi?{q}" data-analytics="roi">ROI</a>
        <a href="/analytics/comparison?{q}" data-analytics="comparison">Compare</a>
        {switch}</nav>"#,
        q = query,
        switch = currency_switch(path, state),
    )
}

/// Wraps `body` in the full page shell.
pub fn page(title: &str, path: &str, state: &DisplayState, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8">
        <meta name="viewport" content="width=device-width,initial-scale=1">
        <title>{title} | EstatePredict</title><style>{css}</style></head>
        <body>{nav}<main class="container">{body}</main></body></html>"#,
        title = escape_html(title),
        css = CSS,
        nav = nav(path, state),
        body = body,
    )
}
