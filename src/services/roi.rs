// src/services/roi.rs
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RoiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RoiError>;

pub const DEFAULT_PURCHASE_PRICE: f64 = 125375.0;
pub const DEFAULT_MONTHLY_RENT: f64 = 1200.0;
pub const DEFAULT_EXPENSE_PCT: f64 = 25.0;
pub const DEFAULT_DOWN_PAYMENT_PCT: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiInput {
    pub purchase_price: f64,
    pub monthly_rent: f64,
    pub expense_pct: f64,
    #[serde(default = "default_down_payment_pct")]
    pub down_payment_pct: f64,
}

fn default_down_payment_pct() -> f64 {
    DEFAULT_DOWN_PAYMENT_PCT
}

impl Default for RoiInput {
    fn default() -> Self {
        RoiInput {
            purchase_price: DEFAULT_PURCHASE_PRICE,
            monthly_rent: DEFAULT_MONTHLY_RENT,
            expense_pct: DEFAULT_EXPENSE_PCT,
            down_payment_pct: DEFAULT_DOWN_PAYMENT_PCT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiResult {
    /// Percentage of the purchase price earned per year.
    pub annual_roi: f64,
    pub monthly_cash_flow: f64,
    /// `None` when net annual income is exactly zero. Negative when income is negative.
    pub break_even_years: Option<f64>,
    /// `None` when the down payment is zero.
    pub cash_on_cash_return: Option<f64>,
    pub net_annual_income: f64,
    pub down_payment: f64,
}

/// Derives the rental metrics for a property purchase.
///
/// Financing cost is not modelled: the down payment only feeds the
/// cash-on-cash return, and break-even is measured against the full price.
pub fn compute_roi(input: &RoiInput) -> Result<RoiResult> {
    let RoiInput {
        purchase_price,
        monthly_rent,
        expense_pct,
        down_payment_pct,
    } = *input;

    if !purchase_price.is_finite() || purchase_price <= 0.0 {
        warn!("Rejected ROI input, purchase price {}", purchase_price);
        return Err(RoiError::InvalidInput(
            "purchase price must be greater than zero".to_string(),
        ));
    }
    if !monthly_rent.is_finite() || monthly_rent <= 0.0 {
        warn!("Rejected ROI input, monthly rent {}", monthly_rent);
        return Err(RoiError::InvalidInput(
            "monthly rent must be greater than zero".to_string(),
        ));
    }
    if !expense_pct.is_finite() || !down_payment_pct.is_finite() {
        return Err(RoiError::InvalidInput(
            "percentages must be finite numbers".to_string(),
        ));
    }

    let down_payment = purchase_price * (down_payment_pct / 100.0);
    let annual_rent = monthly_rent * 12.0;
    let annual_expenses = annual_rent * (expense_pct / 100.0);
    let net_annual_income = annual_rent - annual_expenses;

    let annual_roi = (net_annual_income / purchase_price) * 100.0;
    let monthly_cash_flow = net_annual_income / 12.0;

    let cash_on_cash_return = if down_payment == 0.0 {
        None
    } else {
        Some((net_annual_income / down_payment) * 100.0)
    };

    let break_even_years = if net_annual_income == 0.0 {
        None
    } else {
        Some(purchase_price / net_annual_income)
    };

    debug!(
        "ROI computed: roi={} cash_flow={} break_even={:?} coc={:?}",
        annual_roi, monthly_cash_flow, break_even_years, cash_on_cash_return
    );

    Ok(RoiResult {
        annual_roi,
        monthly_cash_flow,
        break_even_years,
        cash_on_cash_return,
        net_annual_income,
        down_payment,
    })
}
