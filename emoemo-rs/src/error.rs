//! Error types for emoji rendering and export.

use emoemo_canvas2d::Canvas2dError;
use thiserror::Error;

/// Errors that can occur while rendering or exporting an emoji.
#[derive(Debug, Error)]
pub enum EmojiError {
    #[error("Canvas error: {0}")]
    Canvas(#[from] Canvas2dError),

    #[error("Invalid color `{0}`: expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("Invalid fit mode `{0}`: expected one of per-line, block, height-first, fit-both")]
    InvalidFitMode(String),

    #[error("Invalid render config: {0}")]
    InvalidConfig(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for emoji operations.
pub type EmojiResult<T> = Result<T, EmojiError>;
