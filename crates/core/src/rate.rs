//! Currency exchange rates published by the bank.

use serde::{Deserialize, Serialize};

/// Currencies the bot reports rates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    USD,
    EUR,
}

impl Currency {
    /// Lowercase display label.
    pub fn label(self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "euro",
        }
    }
}

/// One row of the public currency table.
///
/// Major pairs carry buy/sell quotes; cross pairs only `rate_cross`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    pub currency_code_a: u16,
    pub currency_code_b: u16,
    /// Unix seconds of the quote.
    #[serde(default)]
    pub date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_buy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_sell: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_cross: Option<f64>,
}

impl CurrencyRate {
    /// `(buy, sell)` when both sides are quoted.
    pub fn buy_sell(&self) -> Option<(f64, f64)> {
        Some((self.rate_buy?, self.rate_sell?))
    }
}

/// Buy/sell quotes for the two currencies the bot reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MajorRates {
    pub usd: (f64, f64),
    pub eur: (f64, f64),
}

impl MajorRates {
    /// Pick USD and EUR from the table by position (0 = USD, 1 = EUR),
    /// the order the bank publishes them in.
    pub fn from_table(table: &[CurrencyRate]) -> Option<Self> {
        Some(Self {
            usd: table.first()?.buy_sell()?,
            eur: table.get(1)?.buy_sell()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_currency_labels() {
        assert_eq!(Currency::USD.label(), "usd");
        assert_eq!(Currency::EUR.label(), "euro");
    }

    #[test]
    fn test_decode_major_pair() {
        let json = r#"{"currencyCodeA":840,"currencyCodeB":980,"date":1552392228,"rateSell":27,"rateBuy":27.2}"#;
        let rate: CurrencyRate = serde_json::from_str(json).unwrap();
        assert_eq!(rate.currency_code_a, 840);
        assert_eq!(rate.buy_sell(), Some((27.2, 27.0)));
        assert!(rate.rate_cross.is_none());
    }

    #[test]
    fn test_cross_pair_has_no_buy_sell() {
        let json = r#"{"currencyCodeA":985,"currencyCodeB":980,"date":1552392228,"rateCross":7.1}"#;
        let rate: CurrencyRate = serde_json::from_str(json).unwrap();
        assert_eq!(rate.buy_sell(), None);
        assert_eq!(rate.rate_cross, Some(7.1));
    }

    #[test]
    fn test_major_rates_by_position() {
        let table: Vec<CurrencyRate> = serde_json::from_str(
            r#"[
                {"currencyCodeA":840,"currencyCodeB":980,"date":1,"rateBuy":41.1,"rateSell":41.6},
                {"currencyCodeA":978,"currencyCodeB":980,"date":1,"rateBuy":44.9,"rateSell":45.7},
                {"currencyCodeA":978,"currencyCodeB":840,"date":1,"rateBuy":1.08,"rateSell":1.1}
            ]"#,
        )
        .unwrap();
        let rates = MajorRates::from_table(&table).unwrap();
        assert_eq!(rates.usd, (41.1, 41.6));
        assert_eq!(rates.eur, (44.9, 45.7));
    }

    #[test]
    fn test_major_rates_short_table() {
        let table = vec![CurrencyRate {
            currency_code_a: 840,
            currency_code_b: 980,
            date: 0,
            rate_buy: Some(41.0),
            rate_sell: Some(41.5),
            rate_cross: None,
        }];
        assert_eq!(MajorRates::from_table(&table), None);
        assert_eq!(MajorRates::from_table(&[]), None);
    }
}
