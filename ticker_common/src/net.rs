//! Market-data endpoints and timing constants used by the widget.

use std::time::Duration;

/// Binance 24-hour ticker REST endpoint (the symbol is passed as a query parameter).
pub const REST_URL: &str = "https://api.binance.com/api/v3/ticker/24hr";
/// Binance push-ticker stream for the tracked pair.
pub const STREAM_URL: &str = "wss://stream.binance.com:9443/ws/btcusdt@ticker";
/// Trading pair tracked by the widget, in REST symbol form.
pub const SYMBOL: &str = "BTCUSDT";

/// Upper bound for the one-shot REST request.
pub const REST_TIMEOUT: Duration = Duration::from_secs(10);
/// Upper bound for each stream TCP connect and for the TLS/upgrade handshake.
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
/// Fixed delay between a lost stream connection and the next attempt.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(3);
/// How often the presentation loop drains the bridge.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Helper to build the REST request URL for `symbol` like "base?symbol=BTCUSDT".
pub fn ticker_url(base: &str, symbol: &str) -> String {
    format!("{}?symbol={}", base, symbol)
}
