#![forbid(unsafe_code)]

//! A horizontal rule across the full width, with an optional title.

use tabula_style::{TextStyle, theme::keys};
use tabula_text::{Line, Lines, Span, TextAlign};

use crate::context::RenderContext;
use crate::measurable::{Render, WidthRange};
use crate::widget::Widget;

const TITLE_INSET: usize = 1;

#[derive(Debug, Clone)]
pub struct HorizontalRule {
    title: Option<Box<Widget>>,
    title_align: TextAlign,
    glyph: char,
    style: Option<TextStyle>,
    title_padding: Option<usize>,
}

impl Default for HorizontalRule {
    fn default() -> Self {
        Self {
            title: None,
            title_align: TextAlign::Center,
            glyph: '─',
            style: None,
            title_padding: None,
        }
    }
}

impl HorizontalRule {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<Widget>) -> Self {
        self.title = Some(Box::new(title.into()));
        self
    }

    #[must_use]
    pub fn title_align(mut self, align: TextAlign) -> Self {
        self.title_align = align;
        self
    }

    #[must_use]
    pub fn glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    /// Style of the rule glyphs, replacing the theme's `hr.rule`.
    #[must_use]
    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn title_padding(mut self, padding: usize) -> Self {
        self.title_padding = Some(padding);
        self
    }

    fn resolved_title_padding(&self, ctx: &RenderContext<'_>) -> usize {
        self.title_padding.unwrap_or_else(|| {
            usize::try_from(ctx.theme.dimension_or(keys::HR_TITLE_PADDING, 1)).unwrap_or(0)
        })
    }
}

impl Render for HorizontalRule {
    fn measure(&self, ctx: &RenderContext<'_>, width: usize) -> WidthRange {
        let title = match &self.title {
            Some(t) => t.measure(ctx, width).max + 2 * self.resolved_title_padding(ctx),
            None => 0,
        };
        WidthRange::new(title, width.max(title))
    }

    fn render(&self, ctx: &RenderContext<'_>, width: usize) -> Lines {
        let _span = tracing::debug_span!("widget_render", widget = "Rule", width).entered();
        let style = self
            .style
            .clone()
            .unwrap_or_else(|| ctx.theme.style_or_default(keys::HR_RULE));
        let rule = self.glyph.to_string();
        let padding = self.resolved_title_padding(ctx);

        let title = self.title.as_ref().and_then(|t| {
            let available = width.checked_sub(2 * padding)?;
            let line = t.render(ctx, available).lines.into_iter().next()?;
            Some(line.truncated(available))
        });
        let mut line = Line::new();
        match title {
            Some(title) if !title.is_empty() => {
                let title_width = title.width() + 2 * padding;
                let rest = width - title_width;
                let left = match self.title_align {
                    TextAlign::Left => TITLE_INSET.min(rest),
                    TextAlign::Right => rest - TITLE_INSET.min(rest),
                    _ => rest / 2,
                };
                line.push(Span::new(rule.repeat(left), style.clone()));
                line.push(Span::spaces(padding, style.clone()));
                for span in title.spans {
                    line.push(span);
                }
                line.push(Span::spaces(padding, style.clone()));
                line.push(Span::new(rule.repeat(rest - left), style));
            }
            _ => line.push(Span::new(rule.repeat(width), style)),
        }
        Lines::from_lines([line])
    }
}
