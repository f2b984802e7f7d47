//! Display surface the presentation loop renders into.
//!
//! `Display` is the whole contract between the feed and a UI toolkit: paint a quote,
//! and release the surface on exit. Both must be called from the UI thread only.
//!
//! `ConsoleDisplay` is the terminal rendition: a single status line, redrawn in
//! place, with the price and change in the tone colour, the 24-hour low/high, and a
//! text range bar marking where the price sits inside that range.
use std::io::{self, IsTerminal, Stdout, Write};

use log::warn;
use ticker_common::{ChangeTone, Quote, RenderedQuote};

/// Width of the range bar, in characters.
const RANGE_BAR_WIDTH: usize = 21;
/// Shown until the first quote arrives.
const PLACEHOLDER: &str = "Loading...";

/// UI-thread-only rendering capability.
pub trait Display {
    /// Paint `quote`.
    fn render(&mut self, quote: &Quote);

    /// Release the surface. Nothing is painted afterwards.
    fn exit(&mut self);
}

/// Terminal display writing one in-place status line to `W`.
pub struct ConsoleDisplay<W: Write> {
    out: W,
    colored: bool,
    closed: bool,
}

impl ConsoleDisplay<Stdout> {
    /// Display on stdout; colours are used only when stdout is a terminal.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let colored = out.is_terminal();
        Self::open(out, colored)
    }
}

impl<W: Write> ConsoleDisplay<W> {
    /// Open the display on `out` and paint the placeholder.
    pub fn open(out: W, colored: bool) -> Self {
        let mut display = ConsoleDisplay {
            out,
            colored,
            closed: false,
        };
        display.paint(PLACEHOLDER);
        display
    }

    /// Consume the display and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&mut self, line: &str) {
        let result = write!(self.out, "\r\x1b[2K{}", line).and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("Failed to paint display: {}", e);
        }
    }

    fn line(&self, rendered: &RenderedQuote) -> String {
        let price_and_change = format!("{}  {}", rendered.price, rendered.change);
        let mut line = if self.colored {
            paint_tone(&price_and_change, rendered.tone)
        } else {
            price_and_change
        };
        line.push_str("   ");
        line.push_str(&rendered.range);
        if let Some(bar) = rendered.range_position.map(|p| range_bar(p, RANGE_BAR_WIDTH)) {
            line.push_str("   ");
            line.push_str(&bar);
        }
        line
    }
}

impl<W: Write> Display for ConsoleDisplay<W> {
    fn render(&mut self, quote: &Quote) {
        if self.closed {
            return;
        }
        let line = self.line(&RenderedQuote::from(quote));
        self.paint(&line);
    }

    fn exit(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = writeln!(self.out).and_then(|_| self.out.flush()) {
            warn!("Failed to close display: {}", e);
        }
    }
}

fn paint_tone(text: &str, tone: ChangeTone) -> String {
    let (r, g, b) = tone.rgb();
    format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text)
}

/// Text bar `[low ... high]` with `●` at `position` (0.0 = low, 1.0 = high).
fn range_bar(position: f64, width: usize) -> String {
    let slots = width.max(2);
    let marker = (position.clamp(0.0, 1.0) * (slots - 1) as f64).round() as usize;
    let track: String = (0..slots)
        .map(|i| if i == marker { '●' } else { '─' })
        .collect();
    format!("[{}]", track)
}
