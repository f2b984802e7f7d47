//! BTC Ticker Widget — shows the live BTC/USDT price, its 24-hour change, and where
//! the price sits inside the 24-hour range, updated from the Binance market-data feed.
//!
//! Startup fetches one snapshot over REST and paints it straight away (a failure
//! only means the placeholder stays up). A background stream client then pushes each
//! ticker update into a single-slot `QuoteBridge`, and the presentation loop on the
//! main thread drains that slot every 50 ms and repaints.
//!
//! The widget takes no flags. `BTC_WIDGET_REST_URL` / `BTC_WIDGET_STREAM_URL` redirect
//! the endpoints and `RUST_LOG` controls log verbosity (logs go to stderr).
//!
//! ```bash
//! RUST_LOG=debug ticker_widget
//! ```
#![warn(missing_docs)]
mod bridge;
mod config;
mod display;
mod presentation;
mod rest;
mod stream;
#[cfg(test)]
mod test_support;

use crate::bridge::QuoteBridge;
use crate::config::WidgetConfig;
use crate::display::{ConsoleDisplay, Display};
use crate::presentation::PresentationLoop;
use crate::rest::RestQuoteClient;
use crate::stream::{StreamingQuoteClient, TungsteniteConnector};
use crossbeam_channel::bounded;
use log::{info, warn};
use ticker_common::FeedError;
use ticker_common::Result;

fn main() -> Result<(), FeedError> {
    init_logger();
    let config = WidgetConfig::from_env();

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Closing widget...");
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| FeedError::Io(std::io::Error::other(e)))?;

    let mut display = ConsoleDisplay::stdout();

    let rest = RestQuoteClient::new(&config.rest_url, &config.symbol, config.rest_timeout);
    match rest.fetch() {
        Ok(quote) => display.render(&quote),
        Err(e) => warn!("Initial price unavailable, waiting for stream: {}", e),
    }

    let bridge = QuoteBridge::new();
    let publisher = bridge.clone();
    let mut stream = StreamingQuoteClient::new(
        TungsteniteConnector::new(config.handshake_timeout),
        &config.stream_url,
        config.reconnect_delay,
    );
    stream.start(move |quote| publisher.publish(quote))?;

    info!("Widget is running. Press Ctrl+C to exit.");
    let mut presentation = PresentationLoop::new(bridge, display, config.poll_interval);
    presentation.run(&shutdown_rx);

    info!("Stopping stream client (state: {:?})", stream.state());
    stream.stop();
    presentation.into_display().exit();
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
