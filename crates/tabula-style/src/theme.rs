#![forbid(unsafe_code)]

//! Themes: named styles and dimensions looked up while rendering.
//!
//! A [`Theme`] maps string keys to [`TextStyle`]s and integer dimensions.
//! [`Theme::default`] carries the built-in entries in [`keys`]; a
//! [`ThemeBuilder`] overlays entries on top of a base theme.
//!
//! # Example
//! ```
//! use tabula_style::{Theme, TextStyle, Ansi16, theme::keys};
//!
//! let theme = Theme::builder()
//!     .style(keys::PANEL_BORDER, TextStyle::new().fg(Ansi16::Red))
//!     .dimension(keys::PANEL_TITLE_PADDING, 0)
//!     .build();
//! assert_eq!(theme.dimension(keys::PANEL_TITLE_PADDING), Some(0));
//! assert!(theme.style(keys::SUCCESS).is_some());
//! ```

use std::collections::BTreeMap;

use crate::color::Ansi16;
use crate::style::TextStyle;

/// Built-in theme keys.
pub mod keys {
    pub const SUCCESS: &str = "success";
    pub const DANGER: &str = "danger";
    pub const WARNING: &str = "warning";
    pub const INFO: &str = "info";
    pub const MUTED: &str = "muted";

    pub const PANEL_BORDER: &str = "panel.border";
    pub const PANEL_TITLE: &str = "panel.title";
    pub const TABLE_BORDER: &str = "table.border";
    pub const HR_RULE: &str = "hr.rule";

    pub const PANEL_TITLE_PADDING: &str = "panel.title.padding";
    pub const HR_TITLE_PADDING: &str = "hr.title.padding";
}

/// Named styles and dimensions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Theme {
    styles: BTreeMap<String, TextStyle>,
    dimensions: BTreeMap<String, i64>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut styles = BTreeMap::new();
        styles.insert(keys::SUCCESS.to_owned(), TextStyle::new().fg(Ansi16::Green));
        styles.insert(keys::DANGER.to_owned(), TextStyle::new().fg(Ansi16::Red));
        styles.insert(keys::WARNING.to_owned(), TextStyle::new().fg(Ansi16::Yellow));
        styles.insert(keys::INFO.to_owned(), TextStyle::new().fg(Ansi16::Cyan));
        styles.insert(keys::MUTED.to_owned(), TextStyle::new().dim());
        for key in [
            keys::PANEL_BORDER,
            keys::PANEL_TITLE,
            keys::TABLE_BORDER,
            keys::HR_RULE,
        ] {
            styles.insert(key.to_owned(), TextStyle::new());
        }

        let mut dimensions = BTreeMap::new();
        dimensions.insert(keys::PANEL_TITLE_PADDING.to_owned(), 1);
        dimensions.insert(keys::HR_TITLE_PADDING.to_owned(), 1);

        Self { styles, dimensions }
    }
}

impl Theme {
    /// A theme with no entries. Every lookup falls back.
    pub fn empty() -> Self {
        Self {
            styles: BTreeMap::new(),
            dimensions: BTreeMap::new(),
        }
    }

    /// A builder starting from the built-in entries.
    pub fn builder() -> ThemeBuilder {
        ThemeBuilder::from_theme(Theme::default())
    }

    /// A builder starting from this theme's entries.
    pub fn to_builder(&self) -> ThemeBuilder {
        ThemeBuilder::from_theme(self.clone())
    }

    pub fn style(&self, key: &str) -> Option<&TextStyle> {
        self.styles.get(key)
    }

    /// The style for `key`, or the empty style.
    pub fn style_or_default(&self, key: &str) -> TextStyle {
        match self.styles.get(key) {
            Some(style) => style.clone(),
            None => {
                tracing::trace!(key, "theme style missing, using empty style");
                TextStyle::new()
            }
        }
    }

    pub fn dimension(&self, key: &str) -> Option<i64> {
        self.dimensions.get(key).copied()
    }

    /// The dimension for `key`, or `default`.
    pub fn dimension_or(&self, key: &str, default: i64) -> i64 {
        match self.dimensions.get(key) {
            Some(&value) => value,
            None => {
                tracing::trace!(key, default, "theme dimension missing, using default");
                default
            }
        }
    }

    pub fn style_keys(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}

/// Overlays entries on a base theme.
#[derive(Debug, Clone)]
#[must_use]
pub struct ThemeBuilder {
    theme: Theme,
}

impl ThemeBuilder {
    pub fn from_theme(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn style(mut self, key: impl Into<String>, style: TextStyle) -> Self {
        self.theme.styles.insert(key.into(), style);
        self
    }

    pub fn dimension(mut self, key: impl Into<String>, value: i64) -> Self {
        self.theme.dimensions.insert(key.into(), value);
        self
    }

    /// Copy every entry of `other` over this builder's entries.
    pub fn merge(mut self, other: &Theme) -> Self {
        self.theme
            .styles
            .extend(other.styles.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.theme
            .dimensions
            .extend(other.dimensions.iter().map(|(k, v)| (k.clone(), *v)));
        self
    }

    pub fn build(self) -> Theme {
        self.theme
    }
}
