#![forbid(unsafe_code)]

//! A widget drawn inside a box, with optional titles on the top and bottom
//! edges.
//!
//! Without `expand` the panel is as wide as its content needs (or as wide as
//! its title needs, whichever is more); with `expand` it fills the width it
//! is given. Titles are drawn on one line between the corner glyphs, framed
//! by the title padding. Left and right aligned titles keep one rule glyph
//! between themselves and the corner.

use tabula_core::Padding;
use tabula_render::{Arms, BorderStyle, LineKind};
use tabula_style::{TextStyle, theme::keys};
use tabula_text::{Line, Lines, Span, TextAlign};

use crate::context::RenderContext;
use crate::measurable::{Render, WidthRange};
use crate::widget::Widget;

const TITLE_INSET: usize = 1;

#[derive(Debug, Clone)]
pub struct Panel {
    content: Widget,
    title: Option<Widget>,
    bottom_title: Option<Widget>,
    title_align: TextAlign,
    expand: bool,
    border_style: Option<BorderStyle>,
    border_text_style: Option<TextStyle>,
    title_padding: Option<usize>,
    padding: Padding,
}

impl Panel {
    pub fn new(content: impl Into<Widget>) -> Self {
        Self {
            content: content.into(),
            title: None,
            bottom_title: None,
            title_align: TextAlign::Center,
            expand: false,
            border_style: Some(BorderStyle::ROUNDED),
            border_text_style: None,
            title_padding: None,
            padding: Padding::none(),
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<Widget>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn bottom_title(mut self, title: impl Into<Widget>) -> Self {
        self.bottom_title = Some(title.into());
        self
    }

    /// Alignment of both titles. `Left` and `Right` are honored; every other
    /// value centers.
    #[must_use]
    pub fn title_align(mut self, align: TextAlign) -> Self {
        self.title_align = align;
        self
    }

    /// Fill the whole available width.
    #[must_use]
    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Glyphs for the frame; `None` draws no frame and no titles.
    #[must_use]
    pub fn border_style(mut self, style: Option<BorderStyle>) -> Self {
        self.border_style = style;
        self
    }

    /// Style of the frame glyphs, replacing the theme's `panel.border`.
    #[must_use]
    pub fn border_text_style(mut self, style: TextStyle) -> Self {
        self.border_text_style = Some(style);
        self
    }

    /// Spaces on each side of a title, replacing the theme's
    /// `panel.title.padding`.
    #[must_use]
    pub fn title_padding(mut self, padding: usize) -> Self {
        self.title_padding = Some(padding);
        self
    }

    /// Space between the frame and the content.
    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    fn frame_width(&self) -> usize {
        if self.border_style.is_some() { 2 } else { 0 }
    }

    fn chrome_width(&self) -> usize {
        self.frame_width() + self.padding.horizontal_total()
    }

    fn resolved_title_padding(&self, ctx: &RenderContext<'_>) -> usize {
        self.title_padding.unwrap_or_else(|| {
            let value = ctx.theme.dimension_or(keys::PANEL_TITLE_PADDING, 1);
            usize::try_from(value).unwrap_or(0)
        })
    }

    /// Width the widest title needs on the top or bottom edge, corners
    /// included.
    fn title_width(&self, ctx: &RenderContext<'_>, width: usize) -> usize {
        if self.border_style.is_none() {
            return 0;
        }
        let padding = self.resolved_title_padding(ctx);
        [&self.title, &self.bottom_title]
            .into_iter()
            .flatten()
            .map(|t| t.measure(ctx, width).max + 2 * padding + 2)
            .max()
            .unwrap_or(0)
    }

    fn border_line(
        &self,
        ctx: &RenderContext<'_>,
        border: &BorderStyle,
        kind: LineKind,
        title: Option<&Widget>,
        interior: usize,
        style: &TextStyle,
    ) -> Line {
        let (left_arms, right_arms) = match kind {
            LineKind::Head => (Arms::DOWN | Arms::RIGHT, Arms::DOWN | Arms::LEFT),
            _ => (Arms::UP | Arms::RIGHT, Arms::UP | Arms::LEFT),
        };
        let rule = border.glyph(kind, Arms::HORIZONTAL).to_string();
        let mut line = Line::new();
        line.push(Span::new(border.glyph(kind, left_arms).to_string(), style.clone()));
        match title.and_then(|t| self.title_line(ctx, t, interior)) {
            Some((title_line, title_width)) => {
                let left = match self.title_align {
                    TextAlign::Left => TITLE_INSET.min(interior - title_width),
                    TextAlign::Right => {
                        let rest = interior - title_width;
                        rest - TITLE_INSET.min(rest)
                    }
                    _ => (interior - title_width) / 2,
                };
                let right = interior - title_width - left;
                let padding = self.resolved_title_padding(ctx);
                line.push(Span::new(rule.repeat(left), style.clone()));
                line.push(Span::spaces(padding, style.clone()));
                for span in title_line.spans {
                    line.push(span);
                }
                line.push(Span::spaces(padding, style.clone()));
                line.push(Span::new(rule.repeat(right), style.clone()));
            }
            None => line.push(Span::new(rule.repeat(interior), style.clone())),
        }
        line.push(Span::new(border.glyph(kind, right_arms).to_string(), style.clone()));
        line
    }

    /// The first rendered line of `title`, styled and cut to fit between the
    /// title padding, with its total width including padding.
    fn title_line(&self, ctx: &RenderContext<'_>, title: &Widget, interior: usize) -> Option<(Line, usize)> {
        let padding = self.resolved_title_padding(ctx);
        let available = interior.checked_sub(2 * padding)?;
        let title_style = ctx.theme.style_or_default(keys::PANEL_TITLE);
        let line = title
            .render(ctx, available)
            .lines
            .into_iter()
            .next()?
            .truncated(available)
            .with_base_style(&title_style);
        let width = line.width() + 2 * padding;
        Some((line, width))
    }
}

impl Render for Panel {
    fn measure(&self, ctx: &RenderContext<'_>, width: usize) -> WidthRange {
        let chrome = self.chrome_width();
        let content = self.content.measure(ctx, width.saturating_sub(chrome)).plus(chrome);
        let title = self.title_width(ctx, width);
        WidthRange::new(content.min.max(title), content.max.max(title))
    }

    fn render(&self, ctx: &RenderContext<'_>, width: usize) -> Lines {
        let _span = tracing::debug_span!("widget_render", widget = "Panel", width).entered();
        let panel_width = if self.expand {
            width
        } else {
            self.measure(ctx, width).max.min(width)
        };
        let frame = self.frame_width();
        let interior = panel_width.saturating_sub(frame);
        let content_width = interior.saturating_sub(self.padding.horizontal_total());

        let mut body = self.content.render(ctx, content_width);
        for line in &mut body.lines {
            *line = std::mem::take(line).truncated(content_width);
        }
        body.pad_to(content_width);

        let mut inner = Lines::new();
        for _ in 0..self.padding.top {
            inner.push(Line::from(Span::raw(" ".repeat(interior))));
        }
        for line in body {
            let mut padded = Line::new();
            padded.push(Span::raw(" ".repeat(self.padding.left)));
            for span in line.spans {
                padded.push(span);
            }
            padded.pad_to(interior);
            inner.push(padded);
        }
        for _ in 0..self.padding.bottom {
            inner.push(Line::from(Span::raw(" ".repeat(interior))));
        }

        let Some(border) = &self.border_style else {
            return inner;
        };
        let style = self
            .border_text_style
            .clone()
            .unwrap_or_else(|| ctx.theme.style_or_default(keys::PANEL_BORDER));
        let side = border.glyph(LineKind::Body, Arms::VERTICAL).to_string();

        let mut lines = Lines::new();
        lines.push(self.border_line(ctx, border, LineKind::Head, self.title.as_ref(), interior, &style));
        for line in inner {
            let mut framed = Line::new();
            framed.push(Span::new(side.clone(), style.clone()));
            for span in line.spans {
                framed.push(span);
            }
            framed.push(Span::new(side.clone(), style.clone()));
            lines.push(framed);
        }
        lines.push(self.border_line(
            ctx,
            border,
            LineKind::Foot,
            self.bottom_title.as_ref(),
            interior,
            &style,
        ));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Text;
    use tabula_core::TerminalInfo;
    use tabula_style::{Ansi16, Theme};
    use tabula_text::Whitespace;

    fn render(panel: &Panel, width: usize) -> String {
        let theme = Theme::default();
        let terminal = TerminalInfo::default();
        panel
            .render(&RenderContext::new(&theme, &terminal), width)
            .plain_text()
    }

    #[test]
    fn shrinks_to_content() {
        assert_eq!(render(&Panel::new("text"), 20), "╭────╮\n│text│\n╰────╯");
    }

    #[test]
    fn expand_fills_width() {
        let panel = Panel::new(Text::new("text").align(TextAlign::Center)).expand(true);
        assert_eq!(
            render(&panel, 20),
            "╭──────────────────╮\n│       text       │\n╰──────────────────╯"
        );
    }

    #[test]
    fn borderless_pads_lines() {
        let panel = Panel::new(Text::new("text\nline 2").whitespace(Whitespace::Pre)).border_style(None);
        assert_eq!(render(&panel, 20), "text  \nline 2");
    }

    #[test]
    fn titles() {
        let panel = Panel::new("text content").title("title");
        assert_eq!(render(&panel, 20), "╭── title ───╮\n│text content│\n╰────────────╯");

        let left = Panel::new("text content").title("title").title_align(TextAlign::Left);
        assert_eq!(render(&left, 20).lines().next(), Some("╭─ title ────╮"));

        let right = Panel::new("text content").title("title").title_align(TextAlign::Right);
        assert_eq!(render(&right, 20).lines().next(), Some("╭──── title ─╮"));
    }

    #[test]
    fn long_title_widens_panel() {
        let panel = Panel::new("content").title("title title");
        assert_eq!(render(&panel, 20), "╭ title title ╮\n│content      │\n╰─────────────╯");
    }

    #[test]
    fn bottom_title() {
        let panel = Panel::new("text content").bottom_title("end");
        assert_eq!(render(&panel, 20), "╭────────────╮\n│text content│\n╰─── end ────╯");
    }

    #[test]
    fn inner_padding() {
        let panel = Panel::new("x").padding(Padding::new(1, 2, 0, 1));
        assert_eq!(render(&panel, 20), "╭────╮\n│    │\n│ x  │\n╰────╯");
    }

    #[test]
    fn content_wraps_in_narrow_width() {
        let panel = Panel::new("aa bb");
        assert_eq!(render(&panel, 4), "╭──╮\n│aa│\n│bb│\n╰──╯");
    }

    #[test]
    fn zero_width_does_not_panic() {
        let panel = Panel::new("text").title("t");
        let out = render(&panel, 0);
        assert!(out.lines().count() >= 2);
    }

    #[test]
    fn border_style_applies_to_frame_only() {
        let red = TextStyle::new().fg(Ansi16::Red);
        let panel = Panel::new("a").border_text_style(red.clone());
        let theme = Theme::default();
        let terminal = TerminalInfo::default();
        let lines = panel.render(&RenderContext::new(&theme, &terminal), 10);
        assert_eq!(
            lines.lines[1].spans,
            vec![Span::new("│", red.clone()), Span::raw("a"), Span::new("│", red)]
        );
    }
}
