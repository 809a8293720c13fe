//! Error types for the parliament-ages pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type for all pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions that abort the current phase.
///
/// Skippable data conditions (missing birth date, unregistered party,
/// out-of-band age) are not errors and never appear here.
#[derive(Error, Debug)]
pub enum Error {
    /// Network failure talking to the members API
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Non-2xx response from the members API
    #[error("Members API returned HTTP {status} for {url}")]
    FetchStatus { status: u16, url: String },

    /// API payload or member record missing an expected field
    #[error("Parse error: {0}")]
    Parse(String),

    /// A Commons member's membership history has no open constituency
    #[error("No current constituency found for member {member_id}")]
    Resolution { member_id: i64 },

    /// An input file a phase depends on is absent
    #[error("Missing file {path} (required by the {phase} phase)")]
    MissingFile { path: PathBuf, phase: &'static str },

    /// Invalid configuration (bands, registry, or TOML contents)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
