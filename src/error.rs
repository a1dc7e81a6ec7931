//! Crate error type

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown level {0}")]
    UnknownLevel(u32),

    #[error("level {level}: {reason}")]
    InvalidLevel { level: u32, reason: String },

    #[error("level {level}, plate {plate}: {reason}")]
    InvalidShape {
        level: u32,
        plate: usize,
        reason: String,
    },

    /// SDL reports its failures as plain strings
    #[error("display error: {0}")]
    Display(String),
}

pub type Result<T> = std::result::Result<T, Error>;
