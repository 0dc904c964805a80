#![forbid(unsafe_code)]

//! Text styles: colors, attributes, and hyperlinks.

use bitflags::bitflags;
use tabula_core::AnsiLevel;

use crate::color::Color;
use crate::sgr;

bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Attributes: u8 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const INVERSE       = 0b0001_0000;
        const STRIKETHROUGH = 0b0010_0000;
    }
}

/// An immutable text style.
///
/// Composition with [`TextStyle::plus`] lets the right-hand side override
/// colors and hyperlink while attribute sets are unioned.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attributes: Attributes,
    pub hyperlink: Option<String>,
}

impl TextStyle {
    /// The empty style.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attributes: Attributes::empty(),
            hyperlink: None,
        }
    }

    #[must_use]
    pub fn fg(mut self, color: impl Into<Color>) -> Self {
        self.fg = Some(color.into());
        self
    }

    #[must_use]
    pub fn bg(mut self, color: impl Into<Color>) -> Self {
        self.bg = Some(color.into());
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes |= attributes;
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.attributes(Attributes::BOLD)
    }

    #[must_use]
    pub fn dim(self) -> Self {
        self.attributes(Attributes::DIM)
    }

    #[must_use]
    pub fn italic(self) -> Self {
        self.attributes(Attributes::ITALIC)
    }

    #[must_use]
    pub fn underline(self) -> Self {
        self.attributes(Attributes::UNDERLINE)
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        self.attributes(Attributes::INVERSE)
    }

    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.attributes(Attributes::STRIKETHROUGH)
    }

    #[must_use]
    pub fn hyperlink(mut self, destination: impl Into<String>) -> Self {
        self.hyperlink = Some(destination.into());
        self
    }

    /// Compose `other` on top of `self`.
    #[must_use]
    pub fn plus(&self, other: &TextStyle) -> TextStyle {
        TextStyle {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attributes: self.attributes | other.attributes,
            hyperlink: other.hyperlink.clone().or_else(|| self.hyperlink.clone()),
        }
    }

    /// Use the foreground color of `background` as this style's background.
    ///
    /// Returns an unchanged copy when `background` has no foreground color.
    #[must_use]
    pub fn on(&self, background: &TextStyle) -> TextStyle {
        match background.fg {
            Some(color) => TextStyle {
                bg: Some(color),
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    /// A style whose background is this style's foreground.
    #[must_use]
    pub fn as_bg(&self) -> TextStyle {
        TextStyle {
            fg: None,
            bg: self.fg,
            ..TextStyle::new()
        }
    }

    /// True when the style carries no colors, attributes, or hyperlink.
    pub fn is_plain(&self) -> bool {
        self.fg.is_none()
            && self.bg.is_none()
            && self.attributes.is_empty()
            && self.hyperlink.is_none()
    }

    /// Downsample both colors for a terminal of the given capability.
    ///
    /// Attributes and hyperlink are kept; callers decide whether to emit them.
    #[must_use]
    pub fn downsample(&self, level: AnsiLevel) -> TextStyle {
        TextStyle {
            fg: self.fg.and_then(|c| c.downsample(level)),
            bg: self.bg.and_then(|c| c.downsample(level)),
            attributes: self.attributes,
            hyperlink: self.hyperlink.clone(),
        }
    }

    /// Wrap `text` in escape sequences for this style at truecolor.
    ///
    /// The result can be embedded in other text and is decoded back into a
    /// styled span when rendered.
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_owned();
        }
        let mut out = String::with_capacity(text.len() + 32);
        let mut open = sgr::Params::new();
        sgr::push_attributes_on(&mut open, self.attributes);
        if let Some(fg) = self.fg {
            sgr::push_color(&mut open, &fg, false);
        }
        if let Some(bg) = self.bg {
            sgr::push_color(&mut open, &bg, true);
        }
        sgr::write_csi(&mut out, &open);
        if let Some(link) = &self.hyperlink {
            sgr::write_link_open(&mut out, link);
        }
        out.push_str(text);
        if self.hyperlink.is_some() {
            sgr::write_link_close(&mut out);
        }
        let mut close = sgr::Params::new();
        sgr::push_attributes_off(&mut close, self.attributes);
        if self.fg.is_some() {
            close.push(sgr::FG_DEFAULT);
        }
        if self.bg.is_some() {
            close.push(sgr::BG_DEFAULT);
        }
        sgr::write_csi(&mut out, &close);
        out
    }
}

impl From<Color> for TextStyle {
    fn from(color: Color) -> Self {
        TextStyle::new().fg(color)
    }
}
