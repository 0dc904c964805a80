#![forbid(unsafe_code)]

//! Named colors and styles.
//!
//! [`TextColors`] covers the 16 terminal colors and also hosts constructors
//! that turn any color representation into a foreground style for a given
//! [`AnsiLevel`].

use tabula_core::{AnsiLevel, Result};

use crate::color::{Ansi16, Color};
use crate::style::{Attributes, TextStyle};

/// The 16 terminal colors by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColors {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// Bright black.
    Gray,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl TextColors {
    pub const fn ansi16(self) -> Ansi16 {
        match self {
            TextColors::Black => Ansi16::Black,
            TextColors::Red => Ansi16::Red,
            TextColors::Green => Ansi16::Green,
            TextColors::Yellow => Ansi16::Yellow,
            TextColors::Blue => Ansi16::Blue,
            TextColors::Magenta => Ansi16::Magenta,
            TextColors::Cyan => Ansi16::Cyan,
            TextColors::White => Ansi16::White,
            TextColors::Gray => Ansi16::BrightBlack,
            TextColors::BrightRed => Ansi16::BrightRed,
            TextColors::BrightGreen => Ansi16::BrightGreen,
            TextColors::BrightYellow => Ansi16::BrightYellow,
            TextColors::BrightBlue => Ansi16::BrightBlue,
            TextColors::BrightMagenta => Ansi16::BrightMagenta,
            TextColors::BrightCyan => Ansi16::BrightCyan,
            TextColors::BrightWhite => Ansi16::BrightWhite,
        }
    }

    pub const fn color(self) -> Color {
        Color::Ansi16(self.ansi16())
    }

    /// Foreground style.
    pub fn style(self) -> TextStyle {
        TextStyle::new().fg(self.color())
    }

    /// Background style.
    pub fn bg(self) -> TextStyle {
        TextStyle::new().bg(self.color())
    }

    /// Foreground style with `background`'s foreground as background.
    pub fn on(self, background: TextColors) -> TextStyle {
        self.style().on(&background.style())
    }

    /// Foreground style for `color` downsampled to `level`.
    pub fn of(color: Color, level: AnsiLevel) -> TextStyle {
        TextStyle {
            fg: color.downsample(level),
            ..TextStyle::new()
        }
    }

    pub fn rgb(r: u8, g: u8, b: u8, level: AnsiLevel) -> TextStyle {
        Self::of(Color::rgb(r, g, b), level)
    }

    pub fn hex(hex: &str, level: AnsiLevel) -> Result<TextStyle> {
        Ok(Self::of(Color::hex(hex)?, level))
    }

    pub fn hsl(h: f64, s: f64, l: f64, level: AnsiLevel) -> Result<TextStyle> {
        Ok(Self::of(Color::hsl(h, s, l)?, level))
    }

    pub fn hsv(h: f64, s: f64, v: f64, level: AnsiLevel) -> Result<TextStyle> {
        Ok(Self::of(Color::hsv(h, s, v)?, level))
    }

    pub fn cmyk(c: f64, m: f64, y: f64, k: f64, level: AnsiLevel) -> Result<TextStyle> {
        Ok(Self::of(Color::cmyk(c, m, y, k)?, level))
    }

    pub fn xyz(x: f64, y: f64, z: f64, level: AnsiLevel) -> Result<TextStyle> {
        Ok(Self::of(Color::xyz(x, y, z)?, level))
    }

    pub fn lab(l: f64, a: f64, b: f64, level: AnsiLevel) -> Result<TextStyle> {
        Ok(Self::of(Color::lab(l, a, b)?, level))
    }

    /// Gray at `fraction` of white. Fails unless `fraction` is in `[0, 1]`.
    pub fn gray(fraction: f64, level: AnsiLevel) -> Result<TextStyle> {
        Ok(Self::of(Color::gray(fraction)?, level))
    }
}

impl From<TextColors> for TextStyle {
    fn from(value: TextColors) -> Self {
        value.style()
    }
}

impl From<TextColors> for Color {
    fn from(value: TextColors) -> Self {
        value.color()
    }
}

/// Named attribute styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyles {
    Bold,
    Dim,
    Italic,
    Underline,
    Inverse,
    Strikethrough,
}

impl TextStyles {
    pub const fn attributes(self) -> Attributes {
        match self {
            TextStyles::Bold => Attributes::BOLD,
            TextStyles::Dim => Attributes::DIM,
            TextStyles::Italic => Attributes::ITALIC,
            TextStyles::Underline => Attributes::UNDERLINE,
            TextStyles::Inverse => Attributes::INVERSE,
            TextStyles::Strikethrough => Attributes::STRIKETHROUGH,
        }
    }

    pub fn style(self) -> TextStyle {
        TextStyle::new().attributes(self.attributes())
    }

    /// A style that links its text to `destination`.
    pub fn hyperlink(destination: impl Into<String>) -> TextStyle {
        TextStyle::new().hyperlink(destination)
    }
}

impl From<TextStyles> for TextStyle {
    fn from(value: TextStyles) -> Self {
        value.style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::Error;

    #[test]
    fn named_colors() {
        assert_eq!(TextColors::Gray.ansi16().fg_code(), 90);
        assert_eq!(TextColors::Red.style().fg, Some(Color::Ansi16(Ansi16::Red)));
        assert_eq!(TextColors::Blue.bg().bg, Some(Color::Ansi16(Ansi16::Blue)));
    }

    #[test]
    fn on_combines_colors() {
        let s = TextColors::Red.on(TextColors::White);
        assert_eq!(s.fg, Some(Color::Ansi16(Ansi16::Red)));
        assert_eq!(s.bg, Some(Color::Ansi16(Ansi16::White)));
    }

    #[test]
    fn constructors_downsample() {
        let s = TextColors::rgb(255, 0, 0, AnsiLevel::Ansi256);
        assert_eq!(s.fg, Some(Color::Ansi256(196)));
        let s = TextColors::hex("#ff0000", AnsiLevel::Ansi16).unwrap();
        assert_eq!(s.fg, Some(Color::Ansi16(Ansi16::BrightRed)));
        let s = TextColors::hsl(0.0, 0.0, 0.0, AnsiLevel::None).unwrap();
        assert!(s.is_plain());
    }

    #[test]
    fn gray_rejects_out_of_range() {
        assert!(matches!(
            TextColors::gray(2.0, AnsiLevel::TrueColor),
            Err(Error::InvalidArgument(_))
        ));
        let s = TextColors::gray(0.0, AnsiLevel::TrueColor).unwrap();
        assert_eq!(s.fg, Some(Color::rgb(0, 0, 0)));
    }

    #[test]
    fn named_styles() {
        assert_eq!(TextStyles::Bold.style().attributes, Attributes::BOLD);
        let bold_italic = TextStyles::Bold.style().plus(&TextStyles::Italic.style());
        assert_eq!(bold_italic.attributes, Attributes::BOLD | Attributes::ITALIC);
        assert_eq!(
            TextStyles::hyperlink("https://x").hyperlink.as_deref(),
            Some("https://x")
        );
    }
}
