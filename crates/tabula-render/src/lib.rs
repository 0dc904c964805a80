#![forbid(unsafe_code)]

//! Output side of tabula.
//!
//! - [`Canvas`] is a cell grid that composite widgets draw borders and
//!   child content into before converting back to [`Lines`](tabula_text::Lines).
//! - [`drawing`] holds the box-drawing glyph sets used for borders.
//! - [`ansi`] serializes lines to text with minimal escape sequences.

pub mod ansi;
pub mod canvas;
pub mod drawing;

pub use ansi::{render_for_terminal, render_lines_ansi};
pub use canvas::{Canvas, Draw};
pub use drawing::{Arms, BorderStyle, GlyphSet, LineKind};
