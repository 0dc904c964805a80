#![forbid(unsafe_code)]

//! The terminal profile a render targets.
//!
//! Detecting these values from the environment is the caller's job; the
//! renderer only reads them.

/// Color capability tier of a terminal, in increasing order of fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AnsiLevel {
    /// No styling at all.
    None,
    /// The 16 base and bright colors.
    Ansi16,
    /// The xterm 256-color palette.
    Ansi256,
    /// 24-bit color.
    #[default]
    TrueColor,
}

impl AnsiLevel {
    /// Whether any SGR styling may be emitted at this level.
    #[inline]
    pub const fn supports_styling(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Read-only description of the output terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerminalInfo {
    pub ansi_level: AnsiLevel,
    /// Width in cells; the default render width.
    pub width: usize,
    /// Height in cells.
    pub height: usize,
    pub interactive: bool,
    /// Whether OSC 8 hyperlinks may be emitted.
    pub hyperlinks: bool,
}

impl TerminalInfo {
    /// Default width used when the caller knows nothing about the terminal.
    pub const DEFAULT_WIDTH: usize = 79;
    /// Default height used when the caller knows nothing about the terminal.
    pub const DEFAULT_HEIGHT: usize = 24;

    /// A profile with the given level and default geometry.
    pub const fn new(ansi_level: AnsiLevel) -> Self {
        Self {
            ansi_level,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            interactive: false,
            hyperlinks: false,
        }
    }

    /// A profile that emits plain text only.
    pub const fn plain() -> Self {
        Self::new(AnsiLevel::None)
    }

    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub const fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub const fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    #[must_use]
    pub const fn hyperlinks(mut self, hyperlinks: bool) -> Self {
        self.hyperlinks = hyperlinks;
        self
    }
}

impl Default for TerminalInfo {
    fn default() -> Self {
        Self::new(AnsiLevel::TrueColor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_fidelity() {
        assert!(AnsiLevel::None < AnsiLevel::Ansi16);
        assert!(AnsiLevel::Ansi16 < AnsiLevel::Ansi256);
        assert!(AnsiLevel::Ansi256 < AnsiLevel::TrueColor);
        assert!(!AnsiLevel::None.supports_styling());
        assert!(AnsiLevel::Ansi16.supports_styling());
    }

    #[test]
    fn builder_methods_set_fields() {
        let info = TerminalInfo::new(AnsiLevel::Ansi256)
            .width(120)
            .height(40)
            .interactive(true)
            .hyperlinks(true);
        assert_eq!(info.ansi_level, AnsiLevel::Ansi256);
        assert_eq!(info.width, 120);
        assert_eq!(info.height, 40);
        assert!(info.interactive);
        assert!(info.hyperlinks);
    }

    #[test]
    fn default_profile() {
        let info = TerminalInfo::default();
        assert_eq!(info.ansi_level, AnsiLevel::TrueColor);
        assert_eq!(info.width, 79);
        assert!(!info.hyperlinks);
        assert_eq!(TerminalInfo::plain().ansi_level, AnsiLevel::None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_uses_lowercase_levels() {
        let info = TerminalInfo::new(AnsiLevel::Ansi16);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"ansi16\""), "{json}");
        let back: TerminalInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
