#![forbid(unsafe_code)]

//! Widgets stacked top to bottom, and a builder that mixes running text with
//! block widgets.

use tabula_style::TextStyle;
use tabula_text::{Line, Lines, Span, Whitespace};

use crate::context::RenderContext;
use crate::measurable::{Render, WidthRange};
use crate::text::Text;
use crate::widget::Widget;

/// Children rendered at the same width, one below the other.
#[derive(Debug, Clone, Default)]
pub struct VerticalLayout {
    children: Vec<Widget>,
    spacing: usize,
}

impl VerticalLayout {
    pub fn new(children: impl IntoIterator<Item = Widget>) -> Self {
        Self {
            children: children.into_iter().collect(),
            spacing: 0,
        }
    }

    /// Blank lines between adjacent children.
    #[must_use]
    pub fn spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn children(&self) -> &[Widget] {
        &self.children
    }
}

impl Render for VerticalLayout {
    fn measure(&self, ctx: &RenderContext<'_>, width: usize) -> WidthRange {
        self.children
            .iter()
            .map(|c| c.measure(ctx, width))
            .fold(WidthRange::ZERO, WidthRange::union)
    }

    fn render(&self, ctx: &RenderContext<'_>, width: usize) -> Lines {
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "VerticalLayout",
            width,
            children = self.children.len()
        )
        .entered();
        let mut lines = Lines::new();
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                for _ in 0..self.spacing {
                    lines.push(Line::new());
                }
            }
            lines.extend(child.render(ctx, width));
        }
        lines
    }
}

/// Accumulates text and widgets into a [`VerticalLayout`].
///
/// Text passed to [`append`](Self::append) collects on a pending line until
/// [`line`](Self::line), [`blank_line`](Self::blank_line), a widget, or
/// [`build`](Self::build) finishes it.
#[derive(Debug, Clone)]
pub struct WidgetBuilder {
    children: Vec<Widget>,
    pending: Vec<Span>,
    whitespace: Whitespace,
}

impl Default for WidgetBuilder {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            pending: Vec::new(),
            whitespace: Whitespace::PreWrap,
        }
    }
}

impl WidgetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whitespace mode of text created from appended strings.
    pub fn whitespace(&mut self, whitespace: Whitespace) -> &mut Self {
        self.whitespace = whitespace;
        self
    }

    /// Add text to the pending line.
    pub fn append(&mut self, text: impl Into<String>) -> &mut Self {
        self.pending.push(Span::raw(text));
        self
    }

    pub fn append_styled(&mut self, text: impl Into<String>, style: TextStyle) -> &mut Self {
        self.pending.push(Span::new(text, style));
        self
    }

    /// Add text and finish the pending line.
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.append(text);
        let spans = std::mem::take(&mut self.pending);
        self.push_text(spans);
        self
    }

    /// Finish the pending line, if any, and add an empty line.
    pub fn blank_line(&mut self) -> &mut Self {
        self.flush();
        self.push_text(Vec::new());
        self
    }

    pub fn widget(&mut self, widget: impl Into<Widget>) -> &mut Self {
        self.flush();
        self.children.push(widget.into());
        self
    }

    pub fn extend<W: Into<Widget>>(&mut self, widgets: impl IntoIterator<Item = W>) -> &mut Self {
        self.flush();
        self.children.extend(widgets.into_iter().map(Into::into));
        self
    }

    pub fn build(mut self) -> Widget {
        self.flush();
        Widget::VerticalLayout(VerticalLayout::new(self.children))
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let spans = std::mem::take(&mut self.pending);
            self.push_text(spans);
        }
    }

    fn push_text(&mut self, spans: Vec<Span>) {
        let text = Text::from_spans(spans).whitespace(self.whitespace);
        self.children.push(Widget::Text(text));
    }
}

/// Run `f` on a fresh [`WidgetBuilder`] and build the result.
pub fn build_widget(f: impl FnOnce(&mut WidgetBuilder)) -> Widget {
    let mut builder = WidgetBuilder::new();
    f(&mut builder);
    builder.build()
}
