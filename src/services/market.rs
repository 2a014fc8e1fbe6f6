// src/services/market.rs
//
// Reference market content used by the analytics modals. Live values from
// `/api/market-data` take precedence where the backend provides them.
use crate::models::{Amenity, MarketData, TrendSummary};
use crate::services::chart::{draw_line_chart, ChartError, ChartStyle, Series};
use crate::services::insights::PriceAdjustment;
use crate::services::svg::SvgSurface;
use log::error;

pub const TREND_CHART_WIDTH: u32 = 400;
pub const TREND_CHART_HEIGHT: u32 = 200;

pub fn price_index_series() -> Result<Series, ChartError> {
    Series::new(
        vec![100.0, 102.0, 105.0, 104.0, 107.0, 108.5],
        vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
    )
}

/// The price index chart as SVG markup.
pub fn trend_chart_svg(width: u32, height: u32) -> String {
    let mut surface = SvgSurface::new(width, height);
    match price_index_series() {
        Ok(series) => draw_line_chart(Some(&mut surface), &series, &ChartStyle::default()),
        Err(e) => error!("Price index series is invalid: {}", e),
    }
    surface.to_svg()
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyInsight {
    pub icon: &'static str,
    pub figure: String,
    pub caption: &'static str,
}

/// The four headline trend figures, preferring live market data.
pub fn key_insights(data: Option<&MarketData>) -> Vec<KeyInsight> {
    let live = data.and_then(|d| d.trends.clone()).unwrap_or_default();
    let pick = |value: Option<String>, fallback: &str| value.unwrap_or_else(|| fallback.to_string());
    let TrendSummary {
        price_growth,
        luxury_growth,
        central_premium,
        new_construction_premium,
    } = live;

    vec![
        KeyInsight {
            icon: "📈",
            figure: pick(price_growth, "8.5%"),
            caption: "price growth in 6 months",
        },
        KeyInsight {
            icon: "🏆",
            figure: pick(luxury_growth, "12%"),
            caption: "luxury property growth",
        },
        KeyInsight {
            icon: "📍",
            figure: pick(central_premium, "15%"),
            caption: "central location premium",
        },
        KeyInsight {
            icon: "🏗️",
            figure: pick(new_construction_premium, "15%"),
            caption: "new construction premium",
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmenityRow {
    pub name: String,
    pub distance: String,
    pub impact: PriceAdjustment,
}

const DEFAULT_AMENITIES: [(&str, &str, &str); 6] = [
    ("metro_station", "0.8 km", "+$15k"),
    ("shopping_mall", "1.2 km", "+$8k"),
    ("hospital", "2.1 km", "+$5k"),
    ("school", "0.5 km", "+$12k"),
    ("park", "0.3 km", "+$10k"),
    ("airport", "25 min", "+$20k"),
];

const DEFAULT_TRANSPORTATION: [(&str, &str); 4] = [
    ("metro", "5 min walk"),
    ("bus_stop", "2 min walk"),
    ("highway", "8 min drive"),
    ("airport", "25 min drive"),
];

pub fn amenities(data: Option<&MarketData>) -> Vec<AmenityRow> {
    match data.filter(|d| !d.amenities.is_empty()) {
        Some(d) => d
            .amenities
            .iter()
            .map(|(key, Amenity { distance, impact })| AmenityRow {
                name: title_case(key),
                distance: distance.clone(),
                impact: impact.clone(),
            })
            .collect(),
        None => DEFAULT_AMENITIES
            .iter()
            .map(|(key, distance, impact)| AmenityRow {
                name: title_case(key),
                distance: distance.to_string(),
                impact: PriceAdjustment::parse(impact),
            })
            .collect(),
    }
}

pub fn transportation(data: Option<&MarketData>) -> Vec<(String, String)> {
    match data.filter(|d| !d.transportation.is_empty()) {
        Some(d) => d
            .transportation
            .iter()
            .map(|(k, v)| (title_case(k), v.clone()))
            .collect(),
        None => DEFAULT_TRANSPORTATION
            .iter()
            .map(|(k, v)| (title_case(k), v.to_string()))
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparable {
    pub name: &'static str,
    pub price: f64,
    pub area_sqft: u32,
    pub bedrooms: u32,
    pub age_years: u32,
    pub score: &'static str,
    pub highlight: bool,
}

impl Comparable {
    pub fn price_per_sqft(&self) -> f64 {
        self.price / self.area_sqft as f64
    }
}

/// Your property (priced at `prediction`) followed by three nearby sales.
pub fn comparables(prediction: f64) -> Vec<Comparable> {
    vec![
        Comparable {
            name: "Your Property",
            price: prediction,
            area_sqft: 1200,
            bedrooms: 3,
            age_years: 10,
            score: "A+",
            highlight: true,
        },
        Comparable {
            name: "Similar 1",
            price: 118500.0,
            area_sqft: 1150,
            bedrooms: 3,
            age_years: 8,
            score: "B+",
            highlight: false,
        },
        Comparable {
            name: "Similar 2",
            price: 132200.0,
            area_sqft: 1250,
            bedrooms: 3,
            age_years: 12,
            score: "A",
            highlight: false,
        },
        Comparable {
            name: "Similar 3",
            price: 121800.0,
            area_sqft: 1180,
            bedrooms: 3,
            age_years: 9,
            score: "B+",
            highlight: false,
        },
    ]
}

pub const COMPARISON_INSIGHTS: [&str; 4] = [
    "Your property is competitively priced",
    "Price per sq ft is within market range",
    "Age factor is well-balanced",
    "Good value for the location",
];

/// "metro_station" -> "Metro Station"
pub fn title_case(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
