// src/services/insights.rs
//
// Backend insight strings such as "+$50k" or "Standard" are parsed once into
// a number plus surrounding text, so they can be shown in any currency.
use crate::services::currency::{format_currency, Currency, CurrencyConverter};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money {
    pub amount: f64,
    pub currency: Currency,
}

impl Money {
    pub fn in_currency(&self, target: Currency, fx: &CurrencyConverter) -> f64 {
        match (self.currency, target) {
            (Currency::Usd, Currency::Inr) => fx.to_inr(self.amount),
            (Currency::Inr, Currency::Usd) => fx.to_usd(self.amount),
            _ => self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PriceAdjustment {
    pub prefix: String,
    pub amount: Option<Money>,
    pub explicit_plus: bool,
    pub suffix: String,
    source: String,
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([+-])?\s*([$₹])\s*([0-9][0-9,]*(?:\.[0-9]+)?)\s*([kKmM])?")
            .expect("amount pattern is valid")
    })
}

impl PriceAdjustment {
    pub fn parse(text: &str) -> Self {
        let Some(caps) = amount_pattern().captures(text) else {
            return PriceAdjustment::text_only(text);
        };
        let whole = caps.get(0).map_or(0..0, |m| m.range());

        let digits = caps[3].replace(',', "");
        let Ok(mut amount) = digits.parse::<f64>() else {
            debug!("Could not read amount from insight {:?}", text);
            return PriceAdjustment::text_only(text);
        };
        amount *= match caps.get(4).map(|m| m.as_str()) {
            Some("k") | Some("K") => 1_000.0,
            Some("m") | Some("M") => 1_000_000.0,
            _ => 1.0,
        };
        let sign = caps.get(1).map(|m| m.as_str());
        if sign == Some("-") {
            amount = -amount;
        }
        let currency = if &caps[2] == "₹" {
            Currency::Inr
        } else {
            Currency::Usd
        };

        PriceAdjustment {
            prefix: text[..whole.start].to_string(),
            amount: Some(Money { amount, currency }),
            explicit_plus: sign == Some("+"),
            suffix: text[whole.end..].to_string(),
            source: text.to_string(),
        }
    }

    fn text_only(text: &str) -> Self {
        PriceAdjustment {
            prefix: text.to_string(),
            amount: None,
            explicit_plus: false,
            suffix: String::new(),
            source: text.to_string(),
        }
    }

    /// Renders the insight with its amount expressed in `currency`.
    pub fn display(&self, currency: Currency, fx: &CurrencyConverter) -> String {
        match &self.amount {
            None => self.source.clone(),
            Some(money) => {
                let value = money.in_currency(currency, fx);
                let plus = if self.explicit_plus && value >= 0.0 { "+" } else { "" };
                format!(
                    "{}{}{}{}",
                    self.prefix,
                    plus,
                    format_currency(value, currency),
                    self.suffix
                )
            }
        }
    }
}

impl From<String> for PriceAdjustment {
    fn from(text: String) -> Self {
        PriceAdjustment::parse(&text)
    }
}

impl From<PriceAdjustment> for String {
    fn from(adjustment: PriceAdjustment) -> Self {
        adjustment.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fx() -> CurrencyConverter {
        CurrencyConverter::new(83.5)
    }

    #[test]
    fn parses_thousands_suffix() {
        let premium = PriceAdjustment::parse("+$50k");
        assert_eq!(
            premium.amount,
            Some(Money {
                amount: 50_000.0,
                currency: Currency::Usd
            })
        );
        assert!(premium.explicit_plus);
        assert_eq!(premium.display(Currency::Usd, &fx()), "+$50,000");
        assert_eq!(premium.display(Currency::Inr, &fx()), "+₹41,75,000");
    }

    #[test]
    fn parses_discounts() {
        let discount = PriceAdjustment::parse("-$20k");
        assert_eq!(discount.amount.unwrap().amount, -20_000.0);
        assert_eq!(discount.display(Currency::Inr, &fx()), "-₹16,70,000");
    }

    #[test]
    fn leaves_plain_text_alone() {
        for text in ["Standard", "No discount", "15%"] {
            let adjustment = PriceAdjustment::parse(text);
            assert_eq!(adjustment.amount, None);
            assert_eq!(adjustment.display(Currency::Inr, &fx()), text);
        }
    }

    #[test]
    fn keeps_surrounding_text() {
        let adjustment = PriceAdjustment::parse("about +$1.5M over comps");
        assert_eq!(adjustment.amount.unwrap().amount, 1_500_000.0);
        assert_eq!(
            adjustment.display(Currency::Usd, &fx()),
            "about +$1,500,000 over comps"
        );
    }

    #[test]
    fn rupee_amounts_convert_back_to_dollars() {
        let adjustment = PriceAdjustment::parse("₹8,350");
        assert_eq!(adjustment.display(Currency::Usd, &fx()), "$100");
        assert_eq!(adjustment.display(Currency::Inr, &fx()), "₹8,350");
    }

    #[test]
    fn deserialises_from_backend_json() {
        let parsed: PriceAdjustment = serde_json::from_str("\"+$40k\"").unwrap();
        assert_eq!(parsed.amount.unwrap().amount, 40_000.0);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"+$40k\"");
    }
}
