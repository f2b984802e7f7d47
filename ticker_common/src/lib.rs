//!
//! Common types and utilities shared by the ticker widget and its helpers.
//!
//! This crate aggregates:
//! - `error` — unified error type `FeedError` used across the workspace.
//! - `result` — handy `Result<T, FeedError>` alias.
//! - `quote` — the `Quote` snapshot and decoding of Binance ticker payloads.
//! - `format` — display strings, change tone and range position for a quote.
//! - `net` — market-data endpoints and timing constants.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod quote;
pub mod format;
pub mod net;

pub use error::FeedError;
pub use result::Result;
pub use quote::Quote;
pub use format::{ChangeTone, RenderedQuote};
