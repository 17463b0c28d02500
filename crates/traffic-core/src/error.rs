// File: crates/traffic-core/src/error.rs
// Summary: Crate error type and Result alias for fallible, non-rendering operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Counts are produced by a detector and can never be below zero.
    #[error("cannot record a negative amount of cars ({count}) for '{location}'")]
    NegativeCount { location: String, count: i64 },

    #[error("card config needs at least one camera")]
    MissingCameras,

    #[error("unknown window '{0}' (expected hour, day, week, month or year)")]
    UnknownWindow(String),

    #[error("image size {width}x{height} has a zero dimension")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
