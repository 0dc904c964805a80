#![forbid(unsafe_code)]

//! Styled text for tabula.
//!
//! - [`Span`], [`Line`], and [`Lines`] are the output model every widget
//!   renders into.
//! - [`layout`] wraps and aligns spans to a width; [`measure`] reports the
//!   narrowest and widest useful widths.
//! - [`parse_ansi`] decodes SGR and OSC 8 sequences embedded in strings.
//!
//! # Example
//! ```
//! use tabula_text::{layout, LayoutOptions, Span, TextAlign};
//!
//! let options = LayoutOptions::default().align(TextAlign::Center);
//! let lines = layout(&[Span::raw("hello world")], 7, &options);
//! assert_eq!(lines.plain_text(), " hello \n world ");
//! ```

pub mod layout;
pub mod parse;
pub mod span;
pub mod width;

pub use layout::{
    DEFAULT_TAB_WIDTH, LayoutOptions, OverflowWrap, TextAlign, VerticalAlign, Whitespace, layout,
    measure,
};
pub use parse::{parse_ansi, parse_spans};
pub use span::{Line, Lines, Span};
pub use width::{display_width, grapheme_width};
