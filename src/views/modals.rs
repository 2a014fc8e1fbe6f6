// src/views/modals.rs
use super::layout::{escape_html, page};
use super::notice::blocking_alert;
use crate::models::DisplayState;
use crate::services::currency::{group_digits, to_fixed, CurrencyConverter};
use crate::services::market::{AmenityRow, Comparable, KeyInsight, COMPARISON_INSIGHTS};
use crate::services::roi::{RoiError, RoiInput, RoiResult};

/// Overlay dialog rendered on top of the home page.
pub fn modal(title: &str, state: &DisplayState, content: &str) -> String {
    format!(
        r#"<div class="modal-overlay"><div class="modal-content">
        <div class="modal-header"><h3>{title}</h3><a class="modal-close" href="/?{query}" aria-label="Close">✕</a></div>
        <div class="modal-body">{content}</div></div></div>"#,
        title = escape_html(title),
        query = escape_html(&state.query_string()),
        content = content,
    )
}

pub fn modal_page(title: &str, path: &str, state: &DisplayState, content: &str) -> String {
    page(title, path, state, &modal(title, state, content))
}

pub fn trends_content(chart_svg: &str, insights: &[KeyInsight]) -> String {
    let cards: String = insights
        .iter()
        .map(|i| {
            format!(
                r#"<div class="insight-card"><div class="insight-icon">{icon}</div><div class="insight-text"><strong>{figure}</strong> {caption}</div></div>"#,
                icon = i.icon,
                figure = escape_html(&i.figure),
                caption = i.caption,
            )
        })
        .collect();
    format!(
        r#"<div class="trends-content"><div class="trend-chart" id="trendChart">{chart}</div>
        <div class="trend-insights"><h4>Key Insights</h4><div class="insight-grid">{cards}</div></div></div>"#,
        chart = chart_svg,
        cards = cards,
    )
}

pub fn location_content(
    amenities: &[AmenityRow],
    transportation: &[(String, String)],
    state: &DisplayState,
    fx: &CurrencyConverter,
) -> String {
    let amenity_items: String = amenities
        .iter()
        .map(|a| {
            format!(
                r#"<div class="amenity-item"><div class="amenity-info"><span class="amenity-name">{name}</span> <span class="amenity-distance">{distance}</span></div><div class="amenity-impact">{impact}</div></div>"#,
                name = escape_html(&a.name),
                distance = escape_html(&a.distance),
                impact = escape_html(&a.impact.display(state.currency, fx)),
            )
        })
        .collect();
    let transport_items: String = transportation
        .iter()
        .map(|(mode, time)| {
            format!(
                r#"<div class="transport-item"><span>{}: {}</span></div>"#,
                escape_html(mode),
                escape_html(time)
            )
        })
        .collect();
    format!(
        r#"<div class="location-content"><div class="amenities-grid">{amenity_items}</div>
        <div class="transportation-section"><h4>Transportation Access</h4><div class="transport-grid">{transport_items}</div></div></div>"#,
        amenity_items = amenity_items,
        transport_items = transport_items,
    )
}

/// Values shown in the ROI form fields, echoed back as entered.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiFields {
    pub purchase_price: String,
    pub monthly_rent: String,
    pub expenses: String,
    pub down_payment: String,
}

impl From<&RoiInput> for RoiFields {
    fn from(input: &RoiInput) -> Self {
        RoiFields {
            purchase_price: input.purchase_price.to_string(),
            monthly_rent: input.monthly_rent.to_string(),
            expenses: input.expense_pct.to_string(),
            down_payment: input.down_payment_pct.to_string(),
        }
    }
}

fn roi_results(result: &RoiResult, state: &DisplayState) -> String {
    let symbol = state.currency.symbol();
    let break_even = result
        .break_even_years
        .map(|y| format!("{} years", to_fixed(y, 1)))
        .unwrap_or_else(|| "N/A".to_string());
    let cash_on_cash = result
        .cash_on_cash_return
        .map(|c| format!("{}%", to_fixed(c, 2)))
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        r#"<div id="roiResults" class="roi-results">
        <div class="roi-metric"><span class="metric-label">Annual ROI</span><span class="metric-value" id="annualROI">{roi}%</span></div>
        <div class="roi-metric"><span class="metric-label">Monthly Cash Flow</span><span class="metric-value" id="cashFlow">{symbol}{cash_flow}</span></div>
        <div class="roi-metric"><span class="metric-label">Break-even Time</span><span class="metric-value" id="breakEven">{break_even}</span></div>
        <div class="roi-metric"><span class="metric-label">Cash-on-Cash Return</span><span class="metric-value" id="cashOnCash">{cash_on_cash}</span></div>
        </div>"#,
        roi = to_fixed(result.annual_roi, 2),
        symbol = symbol,
        cash_flow = to_fixed(result.monthly_cash_flow, 2),
        break_even = break_even,
        cash_on_cash = cash_on_cash,
    )
}

pub fn roi_content(
    fields: &RoiFields,
    outcome: Option<&Result<RoiResult, RoiError>>,
    state: &DisplayState,
) -> String {
    let (alert, results) = match outcome {
        None => (String::new(), String::new()),
        Some(Ok(result)) => (String::new(), roi_results(result, state)),
        Some(Err(_)) => (
            blocking_alert(
                "Please enter valid values for purchase price and monthly rent",
                &format!("/analytics/roi?{}", state.query_string()),
            ),
            String::new(),
        ),
    };
    format!(
        r#"<div class="roi-content">{alert}
        <form method="POST" action="/analytics/roi">
        <input type="hidden" name="currency" value="{currency}">
        <input type="hidden" name="prediction" value="{prediction}">
        <div class="roi-inputs">
        <div class="input-group"><label>Purchase Price</label><input type="number" step="any" name="purchase_price" value="{price}" placeholder="Enter purchase price"></div>
        <div class="input-group"><label>Monthly Rent</label><input type="number" step="any" name="monthly_rent" value="{rent}" placeholder="Expected monthly rent"></div>
        <div class="input-group"><label>Annual Expenses (%)</label><input type="number" step="any" name="expenses" value="{expenses}" placeholder="Maintenance, taxes, etc."></div>
        <div class="input-group"><label>Down Payment (%)</label><input type="number" step="any" name="down_payment" value="{down}" placeholder="Down payment percentage"></div>
        </div>
        <button type="submit" class="calculate-btn">Calculate ROI</button>
        </form>{results}</div>"#,
        alert = alert,
        currency = state.currency.code(),
        prediction = state.prediction.map(|p| p.to_string()).unwrap_or_default(),
        price = escape_html(&fields.purchase_price),
        rent = escape_html(&fields.monthly_rent),
        expenses = escape_html(&fields.expenses),
        down = escape_html(&fields.down_payment),
        results = results,
    )
}

pub fn comparison_content(rows: &[Comparable], state: &DisplayState, fx: &CurrencyConverter) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            let score_class = if row.score.starts_with('A') {
                "score-a"
            } else {
                "score-b"
            };
            format!(
                r#"<tr{highlight}><td>{name}</td><td>{price}</td><td>{area} sq ft</td><td>{beds}</td><td>{age} years</td><td>{ppsf}</td><td><span class="score-badge {score_class}">{score}</span></td></tr>"#,
                highlight = if row.highlight { r#" class="highlight""# } else { "" },
                name = row.name,
                price = fx.display(row.price.round(), state.currency),
                area = group_digits(row.area_sqft as u64, state.currency),
                beds = row.bedrooms,
                age = row.age_years,
                ppsf = format!(
                    "{}{}",
                    state.currency.symbol(),
                    to_fixed(fx.from_usd(row.price, state.currency) / row.area_sqft as f64, 2)
                ),
                score_class = score_class,
                score = row.score,
            )
        })
        .collect();
    let insights: String = COMPARISON_INSIGHTS
        .iter()
        .map(|text| format!(r#"<div class="insight-item">✅ <span>{}</span></div>"#, text))
        .collect();
    format!(
        r#"<div class="comparison-content"><div class="comparison-table"><table>
        <thead><tr><th>Property</th><th>Price</th><th>Area</th><th>Bedrooms</th><th>Age</th><th>Price/Sq Ft</th><th>Score</th></tr></thead>
        <tbody>{body}</tbody></table></div>
        <div class="comparison-insights"><h4>Comparison Insights</h4><div class="insight-list">{insights}</div></div></div>"#,
        body = body,
        insights = insights,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::currency::Currency;
    use crate::services::market::{amenities, comparables, key_insights, transportation};
    use crate::services::roi::compute_roi;

    fn fx() -> CurrencyConverter {
        CurrencyConverter::new(83.5)
    }

    #[test]
    fn modal_close_link_preserves_state() {
        let state = DisplayState {
            prediction: None,
            currency: Currency::Inr,
        };
        let html = modal("ROI Calculator", &state, "<p>x</p>");
        assert!(html.contains("<h3>ROI Calculator</h3>"));
        assert!(html.contains(r#"href="/?currency=INR""#));
    }

    #[test]
    fn trends_embed_chart_and_insights() {
        let html = trends_content("<svg></svg>", &key_insights(None));
        assert!(html.contains(r#"<div class="trend-chart" id="trendChart"><svg></svg></div>"#));
        assert!(html.contains("<strong>8.5%</strong> price growth in 6 months"));
    }

    #[test]
    fn location_impacts_follow_currency() {
        let state = DisplayState {
            prediction: None,
            currency: Currency::Inr,
        };
        let html = location_content(&amenities(None), &transportation(None), &state, &fx());
        assert!(html.contains("<span class=\"amenity-name\">Metro Station</span>"));
        assert!(html.contains("+₹12,52,500"));
        assert!(html.contains("Bus Stop: 2 min walk"));
    }

    #[test]
    fn roi_results_render_formatted_metrics() {
        let input = RoiInput::default();
        let outcome = compute_roi(&input);
        let html = roi_content(&RoiFields::from(&input), Some(&outcome), &DisplayState::default());
        assert!(html.contains(r#"id="annualROI">8.61%"#));
        assert!(html.contains(r#"id="cashFlow">$900.00"#));
        assert!(html.contains(r#"id="breakEven">11.6 years"#));
        assert!(html.contains(r#"id="cashOnCash">43.07%"#));
        assert!(!html.contains("alertdialog"));
    }

    #[test]
    fn invalid_roi_shows_alert_without_results() {
        let input = RoiInput {
            purchase_price: 0.0,
            ..RoiInput::default()
        };
        let outcome = compute_roi(&input);
        let html = roi_content(&RoiFields::from(&input), Some(&outcome), &DisplayState::default());
        assert!(html.contains("Please enter valid values for purchase price and monthly rent"));
        assert!(!html.contains("roiResults"));
    }

    #[test]
    fn undefined_metrics_render_as_na() {
        let input = RoiInput {
            down_payment_pct: 0.0,
            ..RoiInput::default()
        };
        let outcome = compute_roi(&input);
        let html = roi_content(&RoiFields::from(&input), Some(&outcome), &DisplayState::default());
        assert!(html.contains(r#"id="cashOnCash">N/A"#));
    }

    #[test]
    fn comparison_lists_all_rows() {
        let html = comparison_content(&comparables(125375.0), &DisplayState::default(), &fx());
        assert!(html.contains(r#"<tr class="highlight"><td>Your Property</td><td>$125,375</td><td>1,200 sq ft</td>"#));
        assert!(html.contains("<td>$104.48</td>"));
        assert!(html.contains("<td>Similar 3</td>"));
        assert!(html.contains("Good value for the location"));
    }
}
