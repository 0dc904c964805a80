#![forbid(unsafe_code)]

//! Wrapped, aligned text.
//!
//! Text may contain SGR and OSC 8 escape sequences (for example strings
//! produced by [`TextStyle::paint`]); they are decoded into span styles
//! before layout. The widget's own style sits underneath every span.

use tabula_style::TextStyle;
use tabula_text::{
    LayoutOptions, Lines, OverflowWrap, Span, TextAlign, Whitespace, layout, measure, parse_ansi,
};

use crate::context::RenderContext;
use crate::measurable::{Render, WidthRange};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    spans: Vec<Span>,
    style: TextStyle,
    whitespace: Whitespace,
    align: TextAlign,
    overflow_wrap: OverflowWrap,
    tab_width: Option<usize>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_spans([Span::raw(text)])
    }

    /// Text drawn in `style`.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self::new(text).style(style)
    }

    pub fn from_spans(spans: impl IntoIterator<Item = Span>) -> Self {
        Self {
            spans: spans.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Style composed under every span.
    #[must_use]
    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn whitespace(mut self, whitespace: Whitespace) -> Self {
        self.whitespace = whitespace;
        self
    }

    #[must_use]
    pub const fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub const fn overflow_wrap(mut self, overflow_wrap: OverflowWrap) -> Self {
        self.overflow_wrap = overflow_wrap;
        self
    }

    /// Override the context's tab width for this text.
    #[must_use]
    pub const fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = Some(tab_width);
        self
    }

    /// The unparsed source spans.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    fn options(&self, ctx: &RenderContext<'_>) -> LayoutOptions {
        LayoutOptions::default()
            .whitespace(self.whitespace)
            .align(self.align)
            .overflow_wrap(self.overflow_wrap)
            .tab_width(self.tab_width.unwrap_or(ctx.tab_width))
    }

    fn parsed(&self) -> Vec<Span> {
        self.spans
            .iter()
            .flat_map(|s| parse_ansi(&s.text, &self.style.plus(&s.style)))
            .collect()
    }
}

impl Render for Text {
    fn measure(&self, ctx: &RenderContext<'_>, _width: usize) -> WidthRange {
        let (min, max) = measure(&self.parsed(), &self.options(ctx));
        WidthRange::new(min, max)
    }

    fn render(&self, ctx: &RenderContext<'_>, width: usize) -> Lines {
        let _span = tracing::debug_span!("widget_render", widget = "Text", width).entered();
        layout(&self.parsed(), width, &self.options(ctx))
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::new(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::new(value)
    }
}
