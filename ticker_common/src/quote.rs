//! Quote data model and decoding of Binance ticker payloads.
//!
//! A `Quote` is the normalized snapshot shown by the widget: last price, signed
//! 24-hour change in percent, and the 24-hour high/low. Both the REST ticker and the
//! push-stream ticker encode their numbers as JSON strings; this module decodes either
//! shape into a `Quote` and rejects payloads with missing or non-finite fields.
use std::fmt;

use serde::Deserialize;

use crate::error::FeedError;
use crate::result::Result;

/// Market snapshot for the tracked trading pair.
///
/// `low_24h <= price <= high_24h` usually holds but the exchange may transiently
/// violate it, so consumers clamp instead of asserting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    /// Last traded price.
    pub price: f64,
    /// Signed 24-hour change, in percent units.
    pub change_percent: f64,
    /// Highest price over the last 24 hours.
    pub high_24h: f64,
    /// Lowest price over the last 24 hours.
    pub low_24h: f64,
}

impl Quote {
    /// Decode the body of `GET /api/v3/ticker/24hr`.
    pub fn from_rest_json(body: &str) -> Result<Quote> {
        let ticker: RestTicker = serde_json::from_str(body)?;
        Ok(Quote {
            price: ticker.last_price.to_finite("lastPrice")?,
            change_percent: ticker.price_change_percent.to_finite("priceChangePercent")?,
            high_24h: ticker.high_price.to_finite("highPrice")?,
            low_24h: ticker.low_price.to_finite("lowPrice")?,
        })
    }

    /// Decode one text frame of the `<symbol>@ticker` stream.
    pub fn from_stream_json(frame: &str) -> Result<Quote> {
        let ticker: StreamTicker = serde_json::from_str(frame)?;
        Ok(Quote {
            price: ticker.last_price.to_finite("c")?,
            change_percent: ticker.change_percent.to_finite("P")?,
            high_24h: ticker.high_price.to_finite("h")?,
            low_24h: ticker.low_price.to_finite("l")?,
        })
    }
}

/// REST 24-hour ticker; only the fields the widget shows.
#[derive(Debug, Deserialize)]
struct RestTicker {
    #[serde(rename = "lastPrice")]
    last_price: RawNumber,
    #[serde(rename = "priceChangePercent")]
    price_change_percent: RawNumber,
    #[serde(rename = "highPrice")]
    high_price: RawNumber,
    #[serde(rename = "lowPrice")]
    low_price: RawNumber,
}

/// Push-stream 24-hour ticker event.
#[derive(Debug, Deserialize)]
struct StreamTicker {
    #[serde(rename = "c")]
    last_price: RawNumber,
    #[serde(rename = "P")]
    change_percent: RawNumber,
    #[serde(rename = "h")]
    high_price: RawNumber,
    #[serde(rename = "l")]
    low_price: RawNumber,
}

/// A numeric field as sent on the wire: usually a string, occasionally a bare number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Text(String),
    Number(f64),
}

impl RawNumber {
    fn to_finite(&self, field: &'static str) -> Result<f64> {
        let value = match self {
            RawNumber::Text(text) => text.trim().parse::<f64>().ok(),
            RawNumber::Number(number) => Some(*number),
        };
        match value {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(FeedError::InvalidNumber {
                field,
                value: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for RawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawNumber::Text(text) => f.write_str(text),
            RawNumber::Number(number) => write!(f, "{}", number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REST_BODY: &str = r#"{
        "symbol": "BTCUSDT",
        "priceChange": "-1234.56",
        "priceChangePercent": "-1.874",
        "lastPrice": "64612.01000000",
        "highPrice": "66250.00000000",
        "lowPrice": "64010.50000000",
        "volume": "18342.1"
    }"#;

    #[test]
    fn rest_body_decodes_all_four_fields() {
        let quote = Quote::from_rest_json(REST_BODY).unwrap();
        assert_eq!(quote.price, 64612.01);
        assert_eq!(quote.change_percent, -1.874);
        assert_eq!(quote.high_24h, 66250.0);
        assert_eq!(quote.low_24h, 64010.5);
    }

    #[test]
    fn rest_body_missing_field_is_rejected() {
        let body = r#"{"lastPrice":"1.0","priceChangePercent":"0.5","highPrice":"2.0"}"#;
        assert!(matches!(Quote::from_rest_json(body), Err(FeedError::Json(_))));
    }

    #[test]
    fn rest_body_non_numeric_field_is_rejected() {
        let body = r#"{"lastPrice":"abc","priceChangePercent":"0.5","highPrice":"2.0","lowPrice":"1.0"}"#;
        match Quote::from_rest_json(body) {
            Err(FeedError::InvalidNumber { field, value }) => {
                assert_eq!(field, "lastPrice");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let body = r#"{"lastPrice":"NaN","priceChangePercent":"0.5","highPrice":"2.0","lowPrice":"1.0"}"#;
        assert!(Quote::from_rest_json(body).is_err());
        let frame = r#"{"c":"1.0","P":"inf","h":"2.0","l":"1.0"}"#;
        assert!(Quote::from_stream_json(frame).is_err());
    }

    #[test]
    fn bare_json_numbers_are_accepted() {
        let body = r#"{"lastPrice":100.5,"priceChangePercent":-0.25,"highPrice":101,"lowPrice":99}"#;
        let quote = Quote::from_rest_json(body).unwrap();
        assert_eq!(quote.price, 100.5);
        assert_eq!(quote.change_percent, -0.25);
    }

    #[test]
    fn stream_frame_uses_short_field_names() {
        let frame = r#"{"e":"24hrTicker","E":1700000000000,"s":"BTCUSDT","p":"-10.00","P":"0.35","c":"50010.10","h":"51000.00","l":"49000.00"}"#;
        let quote = Quote::from_stream_json(frame).unwrap();
        assert_eq!(quote.price, 50010.10);
        assert_eq!(quote.change_percent, 0.35);
        assert_eq!(quote.high_24h, 51000.0);
        assert_eq!(quote.low_24h, 49000.0);
    }

    #[test]
    fn stream_control_frames_are_rejected() {
        assert!(Quote::from_stream_json(r#"{"result":null,"id":1}"#).is_err());
        assert!(Quote::from_stream_json("not json").is_err());
        assert!(Quote::from_stream_json(r#"{"c":null,"P":"1","h":"1","l":"1"}"#).is_err());
    }
}
