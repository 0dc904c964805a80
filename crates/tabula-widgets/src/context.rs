#![forbid(unsafe_code)]

//! Read-only inputs shared by every widget in one render pass.

use tabula_core::TerminalInfo;
use tabula_style::Theme;
use tabula_text::DEFAULT_TAB_WIDTH;

#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub terminal: &'a TerminalInfo,
    /// Columns a tab expands to in text without its own setting.
    pub tab_width: usize,
}

impl<'a> RenderContext<'a> {
    pub const fn new(theme: &'a Theme, terminal: &'a TerminalInfo) -> Self {
        Self {
            theme,
            terminal,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    #[must_use]
    pub const fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }
}
