//! UI-thread loop that drains the bridge and renders.
//!
//! Every poll interval the loop takes whatever quote the stream published last and
//! paints it; intermediate ticks were already coalesced by the bridge. The loop never
//! performs network or file I/O itself and returns once a shutdown signal arrives.
use std::time::Duration;

use crossbeam_channel::{select, tick, Receiver};
use log::info;

use crate::bridge::QuoteBridge;
use crate::display::Display;

/// Periodic drain-and-render task bound to one display.
pub struct PresentationLoop<D: Display> {
    bridge: QuoteBridge,
    display: D,
    interval: Duration,
}

impl<D: Display> PresentationLoop<D> {
    pub fn new(bridge: QuoteBridge, display: D, interval: Duration) -> Self {
        PresentationLoop {
            bridge,
            display,
            interval,
        }
    }

    /// One drain/render step. Returns whether a quote was rendered.
    pub fn tick(&mut self) -> bool {
        match self.bridge.drain_latest() {
            Some(quote) => {
                self.display.render(&quote);
                true
            }
            None => false,
        }
    }

    /// Tick every interval until `shutdown` fires or its sender is dropped.
    pub fn run(&mut self, shutdown: &Receiver<()>) {
        let ticker = tick(self.interval);
        loop {
            select! {
                recv(shutdown) -> _ => break,
                recv(ticker) -> _ => {
                    self.tick();
                },
            }
        }
        info!("Presentation loop stopped");
    }

    pub fn into_display(self) -> D {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::RestQuoteClient;
    use crate::test_support::{serve_http_once, RecordingDisplay};
    use crossbeam_channel::bounded;
    use std::thread;
    use ticker_common::{ChangeTone, Quote};

    fn quote(price: f64) -> Quote {
        Quote {
            price,
            change_percent: -0.25,
            high_24h: 70000.0,
            low_24h: 60000.0,
        }
    }

    #[test]
    fn tick_renders_only_the_newest_quote() {
        let bridge = QuoteBridge::new();
        let mut presentation =
            PresentationLoop::new(bridge.clone(), RecordingDisplay::default(), Duration::from_millis(50));

        assert!(!presentation.tick());
        bridge.publish(quote(65000.0));
        bridge.publish(quote(65100.0));
        assert!(presentation.tick());
        assert!(!presentation.tick());

        let rendered = presentation.into_display().rendered;
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].price, "$65,100.00");
        assert_eq!(rendered[0].change, "-0.25%");
        assert_eq!(rendered[0].tone, ChangeTone::Negative);
    }

    #[test]
    fn run_renders_published_quotes_until_shutdown() {
        let bridge = QuoteBridge::new();
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
        let producer = bridge.clone();

        let ui = thread::spawn(move || {
            let mut presentation =
                PresentationLoop::new(bridge, RecordingDisplay::default(), Duration::from_millis(10));
            presentation.run(&shutdown_rx);
            presentation.into_display()
        });

        producer.publish(quote(61000.0));
        thread::sleep(Duration::from_millis(200));
        assert!(!ui.is_finished());
        shutdown_tx.send(()).unwrap();

        let display = ui.join().unwrap();
        assert_eq!(display.rendered.len(), 1);
        assert_eq!(display.rendered[0].price, "$61,000.00");
    }

    #[test]
    fn initial_rest_snapshot_renders_as_positive() {
        let body = r#"{"lastPrice":"50000.00","priceChangePercent":"1.50","highPrice":"51000","lowPrice":"49000"}"#;
        let (base, _server) = serve_http_once("200 OK", body);
        let rest = RestQuoteClient::new(&base, "BTCUSDT", Duration::from_secs(5));

        let mut display = RecordingDisplay::default();
        display.render(&rest.fetch().unwrap());
        let mut presentation =
            PresentationLoop::new(QuoteBridge::new(), display, Duration::from_millis(50));
        presentation.tick();

        let display = presentation.into_display();
        assert_eq!(display.rendered.len(), 1);
        assert_eq!(display.rendered[0].price, "$50,000.00");
        assert_eq!(display.rendered[0].change, "+1.50%");
        assert_eq!(display.rendered[0].tone, ChangeTone::Positive);
        assert_eq!(display.rendered[0].tone.to_string(), "positive");
    }
}
