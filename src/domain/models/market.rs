use crate::utils::time::steam_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Currency {
    pub symbol: String,
    pub rate: f64,
    pub precision: u32,
}

/// Exchange rates against `base`, sorted by ISO 4217 symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExchangeRates", into = "RawExchangeRates")]
pub struct ExchangeRates {
    pub rates: Vec<Currency>,
    pub base: String,
}

#[derive(Serialize, Deserialize)]
struct RawExchangeRates {
    base: String,
    rates: BTreeMap<String, f64>,
    precision: BTreeMap<String, u32>,
}

impl TryFrom<RawExchangeRates> for ExchangeRates {
    type Error = String;

    fn try_from(raw: RawExchangeRates) -> Result<Self, Self::Error> {
        let rates = raw
            .rates
            .into_iter()
            .map(|(symbol, rate)| -> Result<Currency, String> {
                let precision = *raw
                    .precision
                    .get(&symbol)
                    .ok_or_else(|| format!("no precision given for currency {symbol}"))?;
                Ok(Currency {
                    symbol,
                    rate,
                    precision,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(Self {
            rates,
            base: raw.base,
        })
    }
}

impl From<ExchangeRates> for RawExchangeRates {
    fn from(rates: ExchangeRates) -> Self {
        let mut raw = Self {
            base: rates.base,
            rates: BTreeMap::new(),
            precision: BTreeMap::new(),
        };
        for currency in rates.rates {
            raw.rates.insert(currency.symbol.clone(), currency.rate);
            raw.precision.insert(currency.symbol, currency.precision);
        }
        raw
    }
}

impl ExchangeRates {
    pub fn symbols(&self) -> Vec<&str> {
        self.rates.iter().map(|c| c.symbol.as_str()).collect()
    }

    pub fn get(&self, symbol: &str) -> Option<&Currency> {
        self.rates.iter().find(|c| c.symbol == symbol)
    }

    pub fn to_map(&self) -> BTreeMap<&str, &Currency> {
        self.rates.iter().map(|c| (c.symbol.as_str(), c)).collect()
    }
}

/// A price listing on a third-party market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub market: String,
    pub price: f64,
    pub url: String,
    pub currency: String,
    #[serde(with = "steam_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// One sale on the Steam community market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteamSale {
    pub price: f64,
    pub timestamp: f64,
    #[serde(with = "steam_timestamp")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAutocompleteResult {
    #[serde(rename = "markethashname")]
    pub market_hash_name: String,
    pub image: String,
}

/// A point in an item's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemHistoryEntry {
    pub id: i64,
    #[serde(rename = "createdat", with = "steam_timestamp")]
    pub created_at: DateTime<Utc>,
    pub price: f64,
    #[serde(default)]
    pub sold: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exchange_rates_from_payload() {
        let rates: ExchangeRates = serde_json::from_value(json!({
            "base": "USD",
            "rates": {"USD": 1.0, "EUR": 0.92, "JPY": 151.3},
            "precision": {"USD": 2, "EUR": 2, "JPY": 0}
        }))
        .unwrap();

        assert_eq!(rates.base, "USD");
        assert_eq!(rates.symbols(), vec!["EUR", "JPY", "USD"]);
        assert_eq!(rates.get("JPY").unwrap().precision, 0);
        assert!(rates.get("GBP").is_none());
        assert_eq!(rates.to_map()["EUR"].rate, 0.92);
    }

    #[test]
    fn test_exchange_rates_serialize_in_wire_shape() {
        let payload = json!({
            "base": "EUR",
            "rates": {"EUR": 1.0, "USD": 1.08},
            "precision": {"EUR": 2, "USD": 2}
        });
        let rates: ExchangeRates = serde_json::from_value(payload.clone()).unwrap();

        let value = serde_json::to_value(&rates).unwrap();
        assert_eq!(value, payload);
        let back: ExchangeRates = serde_json::from_value(value).unwrap();
        assert_eq!(back, rates);
    }

    #[test]
    fn test_exchange_rates_missing_precision_fails() {
        let result = serde_json::from_value::<ExchangeRates>(json!({
            "base": "USD",
            "rates": {"USD": 1.0, "EUR": 0.92},
            "precision": {"USD": 2}
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("EUR"), "{err}");
    }

    #[test]
    fn test_item_history_entry_optional_sold() {
        let entry: ItemHistoryEntry = serde_json::from_value(json!({
            "id": 7,
            "createdat": "2024-02-03 04:05:06.000000",
            "price": 12.5
        }))
        .unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.sold, None);
    }
}
