#![forbid(unsafe_code)]

//! Render widget trees to strings for a terminal.
//!
//! A [`Renderer`] pairs a [`TerminalInfo`] with a [`Theme`]. Rendering lays a
//! widget out at the terminal width and serializes the result with the
//! fewest escape sequences the terminal's color level allows.
//!
//! ```
//! use tabula::prelude::*;
//!
//! let renderer = Renderer::new(TerminalInfo::plain().width(20));
//! let panel = Panel::new("text content").title("title");
//! assert_eq!(
//!     renderer.render(&panel.into()),
//!     "╭── title ───╮\n│text content│\n╰────────────╯"
//! );
//! ```

pub use tabula_render as render;
pub use tabula_style as style;
pub use tabula_text as text;
pub use tabula_widgets as widgets;

use tabula_core::TerminalInfo;
use tabula_render::render_for_terminal;
use tabula_style::Theme;
use tabula_text::{DEFAULT_TAB_WIDTH, Lines};
use tabula_widgets::{Render, RenderContext, Widget};

/// Everything most callers need.
pub mod prelude {
    pub use crate::Renderer;
    pub use tabula_core::{AnsiLevel, Error, Padding, Result, TerminalInfo};
    pub use tabula_render::BorderStyle;
    pub use tabula_style::{Color, TextColors, TextStyle, TextStyles, Theme};
    pub use tabula_text::{OverflowWrap, TextAlign, VerticalAlign, Whitespace};
    pub use tabula_widgets::{
        Borders, CellStyleBuilder, ColumnWidth, HorizontalRule, Panel, Render, Table, Text,
        VerticalLayout, Widget, WidgetBuilder, build_widget, table,
    };
}

/// Renders widgets for one terminal with one theme.
#[derive(Debug, Clone)]
pub struct Renderer {
    terminal: TerminalInfo,
    theme: Theme,
    tab_width: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(TerminalInfo::default())
    }
}

impl Renderer {
    /// A renderer with the built-in theme.
    pub fn new(terminal: TerminalInfo) -> Self {
        Self {
            terminal,
            theme: Theme::default(),
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Columns a tab expands to.
    #[must_use]
    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn terminal(&self) -> &TerminalInfo {
        &self.terminal
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.theme, &self.terminal).with_tab_width(self.tab_width)
    }

    /// Lay `widget` out at the terminal width.
    pub fn render_lines(&self, widget: &Widget) -> Lines {
        self.render_lines_at(widget, self.terminal.width)
    }

    /// Lay `widget` out at `width` columns.
    pub fn render_lines_at(&self, widget: &Widget, width: usize) -> Lines {
        let _span = tracing::debug_span!("render", width, level = ?self.terminal.ansi_level).entered();
        widget.render(&self.context(), width)
    }

    /// Render `widget` to a string at the terminal width.
    pub fn render(&self, widget: &Widget) -> String {
        render_for_terminal(&self.render_lines(widget), &self.terminal)
    }

    /// Render `widget` to a string at `width` columns.
    pub fn render_at(&self, widget: &Widget, width: usize) -> String {
        render_for_terminal(&self.render_lines_at(widget, width), &self.terminal)
    }
}
