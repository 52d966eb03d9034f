//! Crate error type
//!
//! Only construction and configuration can fail. Once a `SimState` exists,
//! stepping it is infallible.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A parameter failed validation (non-positive radius, bad arena size, ...).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A body set must contain at least one body.
    #[error("body set is empty")]
    EmptyBodySet,

    /// Two bodies were given the same id.
    #[error("duplicate body id {0}")]
    DuplicateBody(u32),

    /// A scene preset cannot be laid out inside the configured arena.
    #[error("scene does not fit arena: {0}")]
    SceneDoesNotFit(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A renderer backend failed to draw a frame.
    #[error("render failed: {0}")]
    Render(String),
}
