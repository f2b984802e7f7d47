//! Autostart helper — registers or deregisters the BTC widget to launch at user login.
//!
//! Usage example (CLI):
//! ```bash
//! ticker_autostart --add      # register
//! ticker_autostart --remove   # deregister
//! ticker_autostart --status   # report
//! ticker_autostart            # toggle
//! ```
//!
//! The helper expects the `ticker_widget` executable in its own directory and only
//! prints the outcome; see `entry` for where the registration lives on each platform.
#![warn(missing_docs)]
mod args;
mod entry;

use crate::args::Args;
use crate::entry::{apply, widget_executable, AutostartEntry};
use clap::Parser;
use log::{debug, warn};
use ticker_common::FeedError;
use ticker_common::Result;

fn main() -> Result<(), FeedError> {
    init_logger();
    let args = Args::parse();

    let widget = widget_executable()?;
    if !widget.is_file() {
        warn!("Widget executable not found at {}", widget.display());
    }

    let entry = AutostartEntry::for_current_user(&widget)?;
    debug!("Autostart entry: {}", entry.path().display());

    let message = apply(args.action(), &entry)?;
    println!("{}", message);
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}
