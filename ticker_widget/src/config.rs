//! Runtime configuration for the widget.
//!
//! The widget takes no command-line flags. Defaults come from `ticker_common::net`;
//! the two endpoints may be redirected through environment variables, which is how a
//! local mock feed is wired in during development.
use std::env;
use std::time::Duration;

use ticker_common::net::{
    HANDSHAKE_TIMEOUT, POLL_INTERVAL, RECONNECT_DELAY, REST_TIMEOUT, REST_URL, STREAM_URL, SYMBOL,
};

/// Environment variable overriding the REST ticker endpoint.
pub const REST_URL_VAR: &str = "BTC_WIDGET_REST_URL";
/// Environment variable overriding the push-stream endpoint.
pub const STREAM_URL_VAR: &str = "BTC_WIDGET_STREAM_URL";

/// Endpoints and timings used by the feed clients and the presentation loop.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub rest_url: String,
    pub stream_url: String,
    pub symbol: String,
    pub rest_timeout: Duration,
    pub handshake_timeout: Duration,
    pub reconnect_delay: Duration,
    pub poll_interval: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            rest_url: REST_URL.to_string(),
            stream_url: STREAM_URL.to_string(),
            symbol: SYMBOL.to_string(),
            rest_timeout: REST_TIMEOUT,
            handshake_timeout: HANDSHAKE_TIMEOUT,
            reconnect_delay: RECONNECT_DELAY,
            poll_interval: POLL_INTERVAL,
        }
    }
}

impl WidgetConfig {
    /// Defaults with endpoint overrides taken from the process environment.
    pub fn from_env() -> Self {
        Self::with_overrides(|name| env::var(name).ok())
    }

    fn with_overrides(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = WidgetConfig::default();
        if let Some(url) = non_empty(lookup(REST_URL_VAR)) {
            config.rest_url = url;
        }
        if let Some(url) = non_empty(lookup(STREAM_URL_VAR)) {
            config.stream_url = url;
        }
        config
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_binance_endpoints() {
        let config = WidgetConfig::default();
        assert_eq!(config.stream_url, "wss://stream.binance.com:9443/ws/btcusdt@ticker");
        assert_eq!(config.rest_timeout, Duration::from_secs(10));
        assert_eq!(config.handshake_timeout, Duration::from_secs(10));
        assert_eq!(config.reconnect_delay, Duration::from_secs(3));
        assert_eq!(config.poll_interval, Duration::from_millis(50));
    }

    #[test]
    fn endpoint_overrides_ignore_blank_values() {
        let config = WidgetConfig::with_overrides(|name| match name {
            REST_URL_VAR => Some(" http://127.0.0.1:9000/ticker ".to_string()),
            STREAM_URL_VAR => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.rest_url, "http://127.0.0.1:9000/ticker");
        assert_eq!(config.stream_url, STREAM_URL);
    }
}
