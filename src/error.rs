//! Error types for commerce-view.
//!
//! The view pipeline itself is total. Only the edges can fail: decoding a
//! feed payload, binding a feed under the wrong type, loading config, and
//! laying out columns in the reference renderer.

use crate::feed::FeedKey;

/// All errors surfaced by commerce-view.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// Feed payload or config was not valid JSON for the target type.
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// No live value is bound under this key.
    #[error("unknown feed {0}")]
    UnknownFeed(FeedKey),

    /// The key is already bound to a value of another type.
    #[error("feed {key} is bound as {bound}, not {requested}")]
    FeedTypeMismatch {
        key: FeedKey,
        bound: &'static str,
        requested: &'static str,
    },

    /// Column layout failed inside taffy.
    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),

    /// Terminal output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ViewError>;
