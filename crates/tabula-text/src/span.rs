#![forbid(unsafe_code)]

//! Styled text runs and the line model widgets render into.

use tabula_style::TextStyle;

use crate::layout::{TextAlign, VerticalAlign};
use crate::width::{display_width, split_at_width};

/// A contiguous run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Span {
    pub text: String,
    pub style: TextStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(text, TextStyle::new())
    }

    /// `count` spaces in `style`.
    pub fn spaces(count: usize, style: TextStyle) -> Self {
        Self::new(" ".repeat(count), style)
    }

    #[inline]
    pub fn width(&self) -> usize {
        display_width(&self.text)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for Span {
    fn from(value: &str) -> Self {
        Span::raw(value)
    }
}

impl From<String> for Span {
    fn from(value: String) -> Self {
        Span::raw(value)
    }
}

/// One printed terminal row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub const fn new() -> Self {
        Self { spans: Vec::new() }
    }

    pub fn from_spans(spans: impl IntoIterator<Item = Span>) -> Self {
        Self {
            spans: spans.into_iter().collect(),
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::raw(text)],
        }
    }

    /// Append a span, merging it into the last one when styles match.
    pub fn push(&mut self, span: Span) {
        if span.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == span.style => last.text.push_str(&span.text),
            _ => self.spans.push(span),
        }
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(Span::is_empty)
    }

    /// Concatenated text without styles.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Pad with unstyled spaces on the right up to `width`.
    pub fn pad_to(&mut self, width: usize) {
        let w = self.width();
        if w < width {
            self.push(Span::spaces(width - w, TextStyle::new()));
        }
    }

    /// Place this line in `width` columns according to `align`.
    ///
    /// [`TextAlign::None`] leaves the line unpadded. Justified lines are
    /// padded like left-aligned ones here; gap stretching happens during
    /// wrapping.
    #[must_use]
    pub fn aligned(self, width: usize, align: TextAlign) -> Line {
        let w = self.width();
        if w >= width || align == TextAlign::None {
            return self;
        }
        let extra = width - w;
        let (left, right) = match align {
            TextAlign::Center => (extra / 2, extra - extra / 2),
            TextAlign::Right => (extra, 0),
            _ => (0, extra),
        };
        let mut line = Line::new();
        if left > 0 {
            line.push(Span::spaces(left, TextStyle::new()));
        }
        for span in self.spans {
            line.push(span);
        }
        if right > 0 {
            line.push(Span::spaces(right, TextStyle::new()));
        }
        line
    }

    /// Cut the line to at most `width` columns.
    #[must_use]
    pub fn truncated(self, width: usize) -> Line {
        let mut remaining = width;
        let mut line = Line::new();
        for span in self.spans {
            if remaining == 0 {
                break;
            }
            let w = span.width();
            if w <= remaining {
                remaining -= w;
                line.push(span);
            } else {
                let (head, _, used) = split_at_width(&span.text, remaining);
                remaining -= used;
                line.push(Span::new(head, span.style));
                break;
            }
        }
        line
    }

    /// Compose `base` under every span's style.
    #[must_use]
    pub fn with_base_style(self, base: &TextStyle) -> Line {
        Line {
            spans: self
                .spans
                .into_iter()
                .map(|s| Span::new(s.text, base.plus(&s.style)))
                .collect(),
        }
    }
}

impl From<Span> for Line {
    fn from(value: Span) -> Self {
        Line { spans: vec![value] }
    }
}

impl From<&str> for Line {
    fn from(value: &str) -> Self {
        Line::raw(value)
    }
}

/// A block of lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lines {
    pub lines: Vec<Line>,
}

impl Lines {
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn from_lines(lines: impl IntoIterator<Item = Line>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }

    /// Split plain text on `\n` into unstyled lines.
    pub fn raw(text: &str) -> Self {
        Self::from_lines(text.split('\n').map(Line::raw))
    }

    /// Width of the widest line.
    pub fn width(&self) -> usize {
        self.lines.iter().map(Line::width).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn extend(&mut self, other: Lines) {
        self.lines.extend(other.lines);
    }

    /// Pad every line on the right up to `width`.
    pub fn pad_to(&mut self, width: usize) {
        for line in &mut self.lines {
            line.pad_to(width);
        }
    }

    /// Fit the block to `height` lines, adding blank lines per `align` or
    /// dropping lines from the bottom.
    pub fn set_height(&mut self, height: usize, align: VerticalAlign) {
        let h = self.lines.len();
        if h >= height {
            self.lines.truncate(height);
            return;
        }
        let extra = height - h;
        let top = match align {
            VerticalAlign::Top => 0,
            VerticalAlign::Middle => extra / 2,
            VerticalAlign::Bottom => extra,
        };
        let mut lines = Vec::with_capacity(height);
        lines.resize_with(top, Line::new);
        lines.append(&mut self.lines);
        lines.resize_with(height, Line::new);
        self.lines = lines;
    }

    /// Fit to exactly `width` x `height`, aligning lines horizontally and
    /// the block vertically.
    pub fn set_size(&mut self, width: usize, height: usize, valign: VerticalAlign, align: TextAlign) {
        self.set_height(height, valign);
        let align = if align == TextAlign::None { TextAlign::Left } else { align };
        self.lines = std::mem::take(&mut self.lines)
            .into_iter()
            .map(|line| line.truncated(width).aligned(width, align))
            .collect();
    }

    /// Compose `base` under every span's style.
    #[must_use]
    pub fn with_base_style(self, base: &TextStyle) -> Lines {
        if base.is_plain() {
            return self;
        }
        Lines::from_lines(self.lines.into_iter().map(|l| l.with_base_style(base)))
    }

    /// Plain text of all lines joined with `\n`.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl IntoIterator for Lines {
    type Item = Line;
    type IntoIter = std::vec::IntoIter<Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a Lines {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl FromIterator<Line> for Lines {
    fn from_iter<T: IntoIterator<Item = Line>>(iter: T) -> Self {
        Lines::from_lines(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_style::Ansi16;

    #[test]
    fn push_merges_equal_styles() {
        let mut line = Line::new();
        line.push(Span::raw("ab"));
        line.push(Span::raw("cd"));
        line.push(Span::new("e", TextStyle::new().bold()));
        line.push(Span::raw(""));
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.plain_text(), "abcde");
        assert_eq!(line.width(), 5);
    }

    #[test]
    fn align_pads() {
        let l = Line::raw("ab");
        assert_eq!(l.clone().aligned(6, TextAlign::Center).plain_text(), "  ab  ");
        assert_eq!(l.clone().aligned(5, TextAlign::Center).plain_text(), " ab  ");
        assert_eq!(l.clone().aligned(4, TextAlign::Right).plain_text(), "  ab");
        assert_eq!(l.clone().aligned(4, TextAlign::Left).plain_text(), "ab  ");
        assert_eq!(l.aligned(4, TextAlign::None).plain_text(), "ab");
    }

    #[test]
    fn truncate_keeps_styles() {
        let line = Line::from_spans([
            Span::new("ab", TextStyle::new().fg(Ansi16::Red)),
            Span::raw("媒人"),
        ]);
        let cut = line.truncated(5);
        assert_eq!(cut.plain_text(), "ab媒");
        assert_eq!(cut.spans[0].style.fg, Some(Ansi16::Red.into()));
    }

    #[test]
    fn set_height_aligns_vertically() {
        let mut lines = Lines::raw("x");
        lines.set_height(4, VerticalAlign::Middle);
        assert_eq!(lines.plain_text(), "\nx\n\n");
        let mut lines = Lines::raw("x");
        lines.set_height(3, VerticalAlign::Bottom);
        assert_eq!(lines.plain_text(), "\n\nx");
        let mut lines = Lines::raw("a\nb\nc");
        lines.set_height(2, VerticalAlign::Top);
        assert_eq!(lines.plain_text(), "a\nb");
    }

    #[test]
    fn set_size_fills_block() {
        let mut lines = Lines::raw("abc\nd");
        lines.set_size(4, 3, VerticalAlign::Top, TextAlign::Right);
        assert_eq!(lines.plain_text(), " abc\n   d\n    ");
    }

    #[test]
    fn base_style_goes_under() {
        let lines = Lines::from_lines([Line::from(Span::new("x", TextStyle::new().fg(Ansi16::Blue)))]);
        let styled = lines.with_base_style(&TextStyle::new().fg(Ansi16::Red).bold());
        let style = &styled.lines[0].spans[0].style;
        assert_eq!(style.fg, Some(Ansi16::Blue.into()));
        assert!(style.attributes.contains(tabula_style::Attributes::BOLD));
    }

    #[test]
    fn width_of_block() {
        assert_eq!(Lines::raw("a\nbbb\n").width(), 3);
        assert_eq!(Lines::raw("a\nbbb\n").height(), 3);
        assert_eq!(Lines::new().width(), 0);
    }
}
