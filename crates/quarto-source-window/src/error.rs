/*
 * error.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Error types for source window operations.
//!
//! "No view" (a padding constraint that cannot be met) is not an error: it is
//! reported as `None` by the functions that can produce it.

use thiserror::Error;

/// A push into a full [`BoundedStack`](crate::BoundedStack).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("line buffer is full (capacity {capacity})")]
pub struct CapacityError {
    pub capacity: usize,
}

/// Errors that can occur while collecting or rendering a source window.
#[derive(Debug, Error)]
pub enum WindowError {
    /// More lines were requested than the line buffer can hold.
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Render options failed validation.
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// A TOML options document could not be parsed.
    #[error("Invalid options file: {0}")]
    Config(#[from] toml::de::Error),

    /// A view mode string could not be parsed.
    #[error("Invalid view mode '{input}': {reason}")]
    InvalidViewMode { input: String, reason: String },
}

/// Result type for source window operations.
pub type WindowResult<T> = Result<T, WindowError>;
