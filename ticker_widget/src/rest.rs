//! One-shot REST fetch of the 24-hour ticker.
//!
//! Used once at startup so the widget shows a price before the stream delivers its
//! first tick. Every failure is returned to the caller; nothing is retried here.
use std::time::Duration;

use log::debug;
use ticker_common::net::ticker_url;
use ticker_common::{FeedError, Quote, Result};

/// Blocking client for the 24-hour ticker endpoint of a single symbol.
pub struct RestQuoteClient {
    agent: ureq::Agent,
    url: String,
}

impl RestQuoteClient {
    /// Build a client for `base_url?symbol=<symbol>` with a whole-request `timeout`.
    pub fn new(base_url: &str, symbol: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        RestQuoteClient {
            agent,
            url: ticker_url(base_url, symbol),
        }
    }

    /// Fetch and decode the current snapshot.
    pub fn fetch(&self) -> Result<Quote> {
        debug!("Fetching ticker from {}", self.url);
        let response = self.agent.get(&self.url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => FeedError::Status(code),
            ureq::Error::Transport(transport) => FeedError::Http(transport.to_string()),
        })?;
        let body = response.into_string()?;
        Quote::from_rest_json(&body)
    }
}
