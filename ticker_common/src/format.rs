//! Display strings and colour choice for a `Quote`.
//!
//! Everything a display surface paints is derived here so that every surface
//! (console, GUI toolkit, tests) shows identical text:
//! - price as `$` + thousands-grouped value with 2 decimals (`$1,234.50`);
//! - change as an explicitly signed percent with 2 decimals (`+1.50%`, `-2.35%`);
//! - 24-hour low/high with 0 decimals;
//! - a `ChangeTone` and the price position inside the 24-hour range.
use strum_macros::Display;

use crate::quote::Quote;

/// Colour category of the 24-hour change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ChangeTone {
    /// Change above zero.
    Positive,
    /// Change below zero.
    Negative,
    /// Change exactly zero.
    Neutral,
}

impl ChangeTone {
    /// Classify a signed percent change.
    pub fn from_change(change_percent: f64) -> Self {
        if change_percent > 0.0 {
            ChangeTone::Positive
        } else if change_percent < 0.0 {
            ChangeTone::Negative
        } else {
            ChangeTone::Neutral
        }
    }

    /// RGB components of the tone's colour.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ChangeTone::Positive => (0x00, 0xFF, 0x00),
            ChangeTone::Negative => (0xFF, 0x44, 0x44),
            ChangeTone::Neutral => (0xFF, 0xFF, 0xFF),
        }
    }

    /// Colour as a `#RRGGBB` string.
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// All display fields computed for one quote.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuote {
    /// Formatted last price, e.g. `$50,000.00`.
    pub price: String,
    /// Formatted signed change, e.g. `+1.50%`.
    pub change: String,
    /// Formatted 24-hour range, e.g. `L: $49,000  —  H: $51,000`.
    pub range: String,
    /// Colour category for price and change.
    pub tone: ChangeTone,
    /// Price position inside the 24-hour range, `None` for an empty range.
    pub range_position: Option<f64>,
}

impl From<&Quote> for RenderedQuote {
    fn from(quote: &Quote) -> Self {
        RenderedQuote {
            price: format_price(quote.price),
            change: format_change(quote.change_percent),
            range: format_range(quote.low_24h, quote.high_24h),
            tone: ChangeTone::from_change(quote.change_percent),
            range_position: range_position(quote.price, quote.low_24h, quote.high_24h),
        }
    }
}

/// `$` followed by the thousands-grouped price with 2 decimals.
pub fn format_price(price: f64) -> String {
    format!("${}", group_thousands(price, 2))
}

/// Signed percent with 2 decimals; zero and positive values carry `+`.
pub fn format_change(change_percent: f64) -> String {
    // -0.0 would otherwise print as "+-0.00%"
    let change = if change_percent == 0.0 { 0.0 } else { change_percent };
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, change)
}

/// 24-hour low and high, thousands-grouped with 0 decimals.
pub fn format_range(low_24h: f64, high_24h: f64) -> String {
    format!(
        "L: ${}  —  H: ${}",
        group_thousands(low_24h, 0),
        group_thousands(high_24h, 0)
    )
}

/// Where `price` sits inside `[low, high]`, clamped to `[0, 1]`.
pub fn range_position(price: f64, low_24h: f64, high_24h: f64) -> Option<f64> {
    let span = high_24h - low_24h;
    if span > 0.0 {
        Some(((price - low_24h) / span).clamp(0.0, 1.0))
    } else {
        None
    }
}

fn group_thousands(value: f64, decimals: usize) -> String {
    let digits = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(digits.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}
