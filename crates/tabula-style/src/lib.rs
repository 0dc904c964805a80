#![forbid(unsafe_code)]

//! Color model, style composition, and themes.
//!
//! - [`Color`] holds any supported representation and converts through
//!   [`Rgb`]; [`Color::downsample`] adapts it to an [`AnsiLevel`].
//! - [`TextStyle`] combines colors, [`Attributes`], and a hyperlink.
//! - [`TextColors`] and [`TextStyles`] name common styles.
//! - [`Theme`] maps keys to styles and dimensions used by widgets.

pub mod color;
pub mod named;
pub mod sgr;
pub mod style;
pub mod theme;

pub use color::{Ansi16, Color, Rgb, ansi256_to_rgb};
pub use named::{TextColors, TextStyles};
pub use style::{Attributes, TextStyle};
pub use tabula_core::AnsiLevel;
pub use theme::{Theme, ThemeBuilder};
