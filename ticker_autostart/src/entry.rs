//! Per-user login autostart entry for the widget.
//!
//! The entry is a single file in the platform's per-user autostart location:
//! - XDG desktops: `$XDG_CONFIG_HOME/autostart/btc-widget.desktop`
//!   (or `$HOME/.config/autostart`).
//! - Windows: a `BTCWidget.cmd` launcher in the user's Startup folder.
//!
//! Registering writes the file, deregistering deletes it, and the status check is
//! whether the file exists.
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use ticker_common::{FeedError, Result};

use crate::args::Action;

/// Name under which the widget is registered.
pub const APP_NAME: &str = "BTCWidget";
/// File name of the widget executable next to this helper.
pub const WIDGET_BIN: &str = "ticker_widget";

/// Autostart file and the contents that register the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutostartEntry {
    path: PathBuf,
    contents: String,
}

impl AutostartEntry {
    pub fn new(path: PathBuf, contents: String) -> Self {
        AutostartEntry { path, contents }
    }

    /// Entry in the current user's XDG autostart directory.
    #[cfg(not(windows))]
    pub fn for_current_user(widget: &Path) -> Result<Self> {
        let dir = xdg_autostart_dir(|name| env::var(name).ok())?;
        Ok(Self::new(dir.join("btc-widget.desktop"), desktop_entry(widget)))
    }

    /// Launcher in the current user's Startup folder.
    #[cfg(windows)]
    pub fn for_current_user(widget: &Path) -> Result<Self> {
        let dir = startup_folder(|name| env::var(name).ok())?;
        Ok(Self::new(dir.join(format!("{}.cmd", APP_NAME)), startup_script(widget)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_registered(&self) -> bool {
        self.path.is_file()
    }

    /// Write the entry, creating the autostart directory if needed.
    pub fn add(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, &self.contents)?;
        debug!("Wrote {}", self.path.display());
        Ok(())
    }

    /// Delete the entry. Returns `false` if it was not registered.
    pub fn remove(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FeedError::Io(e)),
        }
    }
}

/// Carry out `action` and return the line to print.
pub fn apply(action: Action, entry: &AutostartEntry) -> Result<String> {
    match action {
        Action::Add => {
            entry.add()?;
            Ok(format!("Added {} to startup.", APP_NAME))
        }
        Action::Remove => {
            if entry.remove()? {
                Ok(format!("Removed {} from startup.", APP_NAME))
            } else {
                Ok(format!("{} is not in startup.", APP_NAME))
            }
        }
        Action::Status => {
            let status = if entry.is_registered() { "enabled" } else { "disabled" };
            Ok(format!("Auto-start is {}.", status))
        }
        Action::Toggle => {
            let next = if entry.is_registered() {
                Action::Remove
            } else {
                Action::Add
            };
            apply(next, entry)
        }
    }
}

/// Path of the widget executable installed next to the running helper.
pub fn widget_executable() -> Result<PathBuf> {
    let helper = env::current_exe()?;
    let dir = helper
        .parent()
        .ok_or_else(|| FeedError::Autostart(format!("{} has no parent directory", helper.display())))?;
    Ok(dir.join(format!("{}{}", WIDGET_BIN, env::consts::EXE_SUFFIX)))
}

#[cfg(not(windows))]
fn xdg_autostart_dir(lookup: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    let config_home = match lookup("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => lookup("HOME")
            .filter(|v| !v.is_empty())
            .map(|home| Path::new(&home).join(".config"))
            .ok_or_else(|| FeedError::Autostart("neither XDG_CONFIG_HOME nor HOME is set".to_string()))?,
    };
    Ok(config_home.join("autostart"))
}

#[cfg(not(windows))]
fn desktop_entry(widget: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={}\n\
         Comment=Live BTC/USDT price overlay\n\
         Exec=\"{}\"\n\
         Terminal=false\n\
         X-GNOME-Autostart-enabled=true\n",
        APP_NAME,
        widget.display()
    )
}

#[cfg(windows)]
fn startup_folder(lookup: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    let appdata = lookup("APPDATA")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| FeedError::Autostart("APPDATA is not set".to_string()))?;
    Ok(Path::new(&appdata).join(r"Microsoft\Windows\Start Menu\Programs\Startup"))
}

#[cfg(windows)]
fn startup_script(widget: &Path) -> String {
    format!("@echo off\r\nstart \"\" \"{}\"\r\n", widget.display())
}
