//! Command-line arguments for the autostart helper.
//!
//! At most one of `--add`, `--remove`, `--status` may be given; with none the
//! registration is toggled.
use clap::{ArgGroup, Parser};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Register the BTC widget to start at login", long_about = None)]
#[command(group(ArgGroup::new("action").args(["add", "remove", "status"])))]
pub struct Args {
    /// Register the widget to start at login.
    #[arg(long)]
    pub add: bool,

    /// Remove the widget from login startup.
    #[arg(long)]
    pub remove: bool,

    /// Report whether the widget starts at login.
    #[arg(long)]
    pub status: bool,
}

/// What the helper was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
    Status,
    Toggle,
}

impl Args {
    /// Resolve the flags into a single action.
    pub fn action(&self) -> Action {
        if self.add {
            Action::Add
        } else if self.remove {
            Action::Remove
        } else if self.status {
            Action::Status
        } else {
            Action::Toggle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("ticker_autostart").chain(argv.iter().copied()))
    }

    #[test]
    fn flags_map_to_actions() {
        assert_eq!(parse(&["--add"]).unwrap().action(), Action::Add);
        assert_eq!(parse(&["--remove"]).unwrap().action(), Action::Remove);
        assert_eq!(parse(&["--status"]).unwrap().action(), Action::Status);
        assert_eq!(parse(&[]).unwrap().action(), Action::Toggle);
    }

    #[test]
    fn conflicting_flags_are_rejected() {
        assert!(parse(&["--add", "--remove"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }
}
