// src/services/currency.rs
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CurrencyError {
    #[error("unknown currency code: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "INR")]
    Inr,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }

    /// Lenient parse used for query strings and form fields.
    pub fn from_param(raw: Option<&str>) -> Currency {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Currency::default(),
            Some(code) => code.parse().unwrap_or_else(|e| {
                warn!("{}, falling back to USD", e);
                Currency::default()
            }),
        }
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "INR" => Ok(Currency::Inr),
            _ => Err(CurrencyError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Fixed-rate conversion between USD and INR.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyConverter {
    pub usd_to_inr_rate: f64,
}

impl CurrencyConverter {
    pub fn new(usd_to_inr_rate: f64) -> Self {
        CurrencyConverter { usd_to_inr_rate }
    }

    pub fn to_inr(&self, usd: f64) -> f64 {
        js_round(usd * self.usd_to_inr_rate)
    }

    pub fn to_usd(&self, inr: f64) -> f64 {
        js_round(inr / self.usd_to_inr_rate)
    }

    /// Expresses a USD amount in `currency`. USD amounts pass through unrounded.
    pub fn from_usd(&self, usd: f64, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => usd,
            Currency::Inr => self.to_inr(usd),
        }
    }

    /// Converts a USD amount and formats it with the currency's grouping.
    pub fn display(&self, usd: f64, currency: Currency) -> String {
        format_currency(self.from_usd(usd, currency), currency)
    }
}

/// Rounds to the nearest integer with halves going toward positive infinity.
pub fn js_round(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Fixed-point rendering where exact decimal ties round away from zero.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // Enough extra digits that only a true tie prints as "5000...".
    let wide = format!("{:.*}", digits + 25, value.abs());
    let cut = wide.len() - 25;
    let tail = &wide[cut..];
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    let body = if is_tie {
        let step = 10f64.powi(digits as i32);
        let bumped = (value.abs() * step).floor() + 1.0;
        format!("{:.*}", digits, bumped / step)
    } else {
        format!("{:.*}", digits, value.abs())
    };

    if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Formats an amount with the currency symbol and locale grouping.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let fixed = format!("{:.3}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let grouped = match currency {
        Currency::Usd => group_thousands(whole),
        Currency::Inr => group_indian(whole),
    };

    let sign = if amount < 0.0 && (whole != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };

    if fraction.is_empty() {
        format!("{}{}{}", sign, currency.symbol(), grouped)
    } else {
        format!("{}{}{}.{}", sign, currency.symbol(), grouped, fraction)
    }
}

/// Groups an integer the way `currency`'s locale does, without a symbol.
pub fn group_digits(value: u64, currency: Currency) -> String {
    let digits = value.to_string();
    match currency {
        Currency::Usd => group_thousands(&digits),
        Currency::Inr => group_indian(&digits),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Indian grouping: the last three digits, then pairs (12,34,567).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}
