#![forbid(unsafe_code)]

//! Error taxonomy.
//!
//! Only construction can fail. Rendering never returns an error: a request
//! that cannot be satisfied at render time degrades to smaller or empty
//! output instead.

use thiserror::Error;

/// Errors raised while building colors, styles, themes, or widgets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A constructor parameter was outside its documented range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A table request that cannot be laid out.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

impl Error {
    /// Build an [`Error::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Build an [`Error::InvalidLayout`].
    pub fn invalid_layout(message: impl Into<String>) -> Self {
        Self::InvalidLayout(message.into())
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;
