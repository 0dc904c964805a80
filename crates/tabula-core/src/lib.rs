#![forbid(unsafe_code)]

//! Core primitives shared by every tabula crate.
//!
//! - [`Padding`] - per-side spacing around widget content
//! - [`AnsiLevel`] and [`TerminalInfo`] - the terminal profile a render targets
//! - [`Error`] - construction-time failures

pub mod error;
pub mod geometry;
pub mod terminal;

pub use error::{Error, Result};
pub use geometry::Padding;
pub use terminal::{AnsiLevel, TerminalInfo};
