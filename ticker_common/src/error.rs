//! Error types shared by the widget and the autostart helper.
//!
//! The `FeedError` enum unifies transport, decoding, and local I/O failures so
//! that every crate in the workspace can propagate a single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by the widget and the autostart helper.
#[derive(Error, Debug)]
pub enum FeedError {
    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP request could not be completed (DNS, connect, TLS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The REST endpoint answered with a non-success status code.
    #[error("HTTP error status: {0}")]
    Status(u16),

    /// Failure while decoding JSON via serde_json (including missing fields).
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A ticker field was present but did not hold a finite number.
    #[error("Invalid number in field `{field}`: {value:?}")]
    InvalidNumber {
        /// Wire name of the offending field.
        field: &'static str,
        /// Raw value as received.
        value: String,
    },

    /// WebSocket handshake or transport failure; contains a short context string.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// The per-user autostart location could not be resolved or updated.
    #[error("Autostart error: {0}")]
    Autostart(String),
}
