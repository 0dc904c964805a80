#![forbid(unsafe_code)]

//! Wrapping, overflow handling, and alignment of styled text.
//!
//! Text is broken into grapheme clusters, grouped into paragraphs (at
//! preserved newlines), and then into word and space tokens. Wrapping is
//! greedy: a word moves to the next line when it does not fit after the
//! pending space. Words wider than the whole line are handled by the
//! [`OverflowWrap`] policy.

use tabula_style::TextStyle;
use unicode_segmentation::UnicodeSegmentation;

use crate::span::{Line, Lines, Span};
use crate::width::grapheme_width;

/// How whitespace and newlines in the source are treated.
///
/// | mode      | collapse spaces | keep newlines | wrap |
/// |-----------|-----------------|---------------|------|
/// | `Normal`  | yes             | no            | yes  |
/// | `NoWrap`  | yes             | no            | no   |
/// | `Pre`     | no              | yes           | no   |
/// | `PreWrap` | no              | yes           | yes  |
/// | `PreLine` | yes             | yes           | yes  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Whitespace {
    #[default]
    Normal,
    NoWrap,
    Pre,
    PreWrap,
    PreLine,
}

impl Whitespace {
    pub const fn collapses_spaces(self) -> bool {
        matches!(self, Self::Normal | Self::NoWrap | Self::PreLine)
    }

    pub const fn keeps_newlines(self) -> bool {
        matches!(self, Self::Pre | Self::PreWrap | Self::PreLine)
    }

    pub const fn wraps(self) -> bool {
        matches!(self, Self::Normal | Self::PreWrap | Self::PreLine)
    }
}

/// Horizontal alignment.
///
/// `None` leaves lines at their natural width; every other variant pads
/// lines to the full layout width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    #[default]
    None,
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// What to do with a word (or, when not wrapping, a line) wider than the
/// available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverflowWrap {
    /// Split the word across lines.
    #[default]
    BreakWord,
    Truncate,
    /// Truncate and end with `…`.
    Ellipses,
}

pub const DEFAULT_TAB_WIDTH: usize = 8;

const ELLIPSIS: &str = "…";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutOptions {
    pub whitespace: Whitespace,
    pub align: TextAlign,
    pub overflow_wrap: OverflowWrap,
    pub tab_width: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            whitespace: Whitespace::Normal,
            align: TextAlign::None,
            overflow_wrap: OverflowWrap::BreakWord,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl LayoutOptions {
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

    #[must_use]
    pub const fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Char,
    Space,
    Newline,
}

#[derive(Debug, Clone, Copy)]
struct Glyph<'a> {
    text: &'a str,
    width: usize,
    style: usize,
    kind: Kind,
}

impl<'a> Glyph<'a> {
    const fn space(style: usize) -> Self {
        Self {
            text: " ",
            width: 1,
            style,
            kind: Kind::Space,
        }
    }
}

#[derive(Debug, Clone)]
struct Token<'a> {
    glyphs: Vec<Glyph<'a>>,
    width: usize,
    space: bool,
}

impl<'a> Token<'a> {
    fn new(space: bool) -> Self {
        Self {
            glyphs: Vec::new(),
            width: 0,
            space,
        }
    }

    fn push(&mut self, glyph: Glyph<'a>) {
        self.width += glyph.width;
        self.glyphs.push(glyph);
    }
}

fn glyphs<'a>(spans: &'a [Span], options: &LayoutOptions) -> Vec<Glyph<'a>> {
    let collapse = options.whitespace.collapses_spaces();
    let mut out = Vec::new();
    for (style, span) in spans.iter().enumerate() {
        for g in span.text.graphemes(true) {
            match g {
                "\n" | "\r\n" => out.push(Glyph {
                    text: "\n",
                    width: 0,
                    style,
                    kind: Kind::Newline,
                }),
                "\t" if collapse => out.push(Glyph::space(style)),
                "\t" => out.extend(std::iter::repeat_n(Glyph::space(style), options.tab_width)),
                " " => out.push(Glyph::space(style)),
                _ if g.len() == 1 && g.as_bytes()[0].is_ascii_control() => {}
                _ => out.push(Glyph {
                    text: g,
                    width: grapheme_width(g),
                    style,
                    kind: Kind::Char,
                }),
            }
        }
    }
    out
}

/// Group glyphs into paragraphs of word and space tokens.
fn paragraphs<'a>(glyphs: Vec<Glyph<'a>>, whitespace: Whitespace) -> Vec<Vec<Token<'a>>> {
    let keep_newlines = whitespace.keeps_newlines();
    let collapse = whitespace.collapses_spaces();

    let mut paragraphs = Vec::new();
    let mut tokens: Vec<Token<'a>> = Vec::new();
    for mut glyph in glyphs {
        if glyph.kind == Kind::Newline {
            if keep_newlines {
                paragraphs.push(std::mem::take(&mut tokens));
                continue;
            }
            glyph = Glyph::space(glyph.style);
        }
        let space = glyph.kind == Kind::Space;
        match tokens.last_mut() {
            Some(last) if last.space == space => {
                if !(space && collapse) {
                    last.push(glyph);
                }
            }
            _ => {
                let mut token = Token::new(space);
                token.push(glyph);
                tokens.push(token);
            }
        }
    }
    paragraphs.push(tokens);

    if collapse {
        for tokens in &mut paragraphs {
            if tokens.last().is_some_and(|t| t.space) {
                tokens.pop();
            }
            if tokens.first().is_some_and(|t| t.space) {
                tokens.remove(0);
            }
        }
    }
    paragraphs
}

/// Minimum and maximum useful widths of `spans` laid out with `options`.
///
/// The maximum is the widest paragraph without wrapping. When the mode
/// wraps, the minimum is the widest single word; otherwise it equals the
/// maximum.
pub fn measure(spans: &[Span], options: &LayoutOptions) -> (usize, usize) {
    let whitespace = options.whitespace;
    let paragraphs = paragraphs(glyphs(spans, options), whitespace);
    let max = paragraphs
        .iter()
        .map(|p| p.iter().map(|t| t.width).sum::<usize>())
        .max()
        .unwrap_or(0);
    if !whitespace.wraps() {
        return (max, max);
    }
    let min = paragraphs
        .iter()
        .flat_map(|p| {
            p.iter()
                .enumerate()
                .filter(|(i, t)| !t.space || (*i == 0 && !whitespace.collapses_spaces()))
                .map(|(_, t)| t.width)
        })
        .max()
        .unwrap_or(0);
    (min, max)
}

/// Lay out `spans` into lines no wider than `width`.
///
/// Every paragraph produces at least one line, so empty input yields a
/// single empty line. With an explicit alignment every line is exactly
/// `width` columns wide.
pub fn layout(spans: &[Span], width: usize, options: &LayoutOptions) -> Lines {
    let paragraphs = paragraphs(glyphs(spans, options), options.whitespace);
    if width == 0 {
        return Lines::from_lines(paragraphs.iter().map(|_| Line::new()));
    }

    let mut lines = Lines::new();
    for tokens in paragraphs {
        let wrapped = if options.whitespace.wraps() {
            wrap(tokens, width, options)
        } else {
            vec![cut_line(tokens, width, options.overflow_wrap)]
        };
        let last = wrapped.len().saturating_sub(1);
        for (i, tokens) in wrapped.into_iter().enumerate() {
            lines.push(finish_line(spans, tokens, width, options.align, i == last));
        }
    }
    lines
}

fn wrap<'a>(tokens: Vec<Token<'a>>, width: usize, options: &LayoutOptions) -> Vec<Vec<Token<'a>>> {
    let collapse = options.whitespace.collapses_spaces();
    let mut out = Vec::new();
    let mut current: Vec<Token<'a>> = Vec::new();
    let mut current_width = 0;
    let mut pending: Option<Token<'a>> = None;

    for (i, token) in tokens.into_iter().enumerate() {
        let leading_space = i == 0 && !collapse;
        if token.space && !leading_space {
            pending = Some(token);
            continue;
        }
        let space_width = match &pending {
            Some(p) if !current.is_empty() => p.width,
            _ => 0,
        };
        if current_width + space_width + token.width <= width {
            if let Some(p) = pending.take() {
                if space_width > 0 {
                    current.push(p);
                }
            }
            current_width += space_width + token.width;
            current.push(token);
            continue;
        }

        pending = None;
        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if token.width <= width {
            current_width = token.width;
            current.push(token);
            continue;
        }
        match options.overflow_wrap {
            OverflowWrap::BreakWord => {
                let mut chunks = split_token(token, width);
                if let Some(last) = chunks.pop() {
                    out.extend(chunks.into_iter().map(|c| vec![c]));
                    current_width = last.width;
                    current.push(last);
                }
            }
            OverflowWrap::Truncate | OverflowWrap::Ellipses => {
                let cut = truncate_token(token, width, options.overflow_wrap == OverflowWrap::Ellipses);
                current_width = cut.width;
                current.push(cut);
            }
        }
    }

    if !collapse && !current.is_empty() {
        if let Some(p) = pending {
            let room = width.saturating_sub(current_width);
            if room > 0 {
                current.push(truncate_token(p, room, false));
            }
        }
    }
    out.push(current);
    out
}

/// Split a token into chunks no wider than `width`. Glyphs wider than
/// `width` are dropped.
fn split_token(token: Token<'_>, width: usize) -> Vec<Token<'_>> {
    let mut chunks = Vec::new();
    let mut chunk = Token::new(token.space);
    for glyph in token.glyphs {
        if glyph.width > width {
            continue;
        }
        if chunk.width + glyph.width > width {
            chunks.push(std::mem::replace(&mut chunk, Token::new(token.space)));
        }
        chunk.push(glyph);
    }
    if !chunk.glyphs.is_empty() || chunks.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

fn truncate_token(token: Token<'_>, width: usize, ellipsis: bool) -> Token<'_> {
    if token.width <= width {
        return token;
    }
    let budget = if ellipsis { width.saturating_sub(1) } else { width };
    let mut out = Token::new(token.space);
    let mut cut_style = None;
    for glyph in token.glyphs {
        if out.width + glyph.width > budget {
            cut_style = Some(glyph.style);
            break;
        }
        out.push(glyph);
    }
    if ellipsis && width > 0 {
        if let Some(style) = cut_style {
            out.push(Glyph {
                text: ELLIPSIS,
                width: 1,
                style,
                kind: Kind::Char,
            });
        }
    }
    out
}

/// A non-wrapping paragraph, cut to `width` if needed.
fn cut_line(tokens: Vec<Token<'_>>, width: usize, overflow: OverflowWrap) -> Vec<Token<'_>> {
    let total: usize = tokens.iter().map(|t| t.width).sum();
    if total <= width {
        return tokens;
    }
    let mut merged = Token::new(false);
    for glyph in tokens.into_iter().flat_map(|t| t.glyphs) {
        merged.push(glyph);
    }
    vec![truncate_token(merged, width, overflow == OverflowWrap::Ellipses)]
}

fn finish_line(
    spans: &[Span],
    mut tokens: Vec<Token<'_>>,
    width: usize,
    align: TextAlign,
    last_in_paragraph: bool,
) -> Line {
    if align == TextAlign::Justify && !last_in_paragraph {
        justify(&mut tokens, width);
    }
    let mut line = Line::new();
    let mut run = String::new();
    let mut run_style: Option<usize> = None;
    for glyph in tokens.iter().flat_map(|t| t.glyphs.iter()) {
        if run_style != Some(glyph.style) {
            if let Some(style) = run_style {
                line.push(Span::new(std::mem::take(&mut run), style_at(spans, style)));
            }
            run_style = Some(glyph.style);
        }
        run.push_str(glyph.text);
    }
    if let Some(style) = run_style {
        line.push(Span::new(run, style_at(spans, style)));
    }
    let align = if align == TextAlign::Justify { TextAlign::Left } else { align };
    line.aligned(width, align)
}

fn style_at(spans: &[Span], index: usize) -> TextStyle {
    spans.get(index).map(|s| s.style.clone()).unwrap_or_default()
}

/// Widen inter-word gaps so the line fills `width`. Extra columns go to the
/// leftmost gaps first.
fn justify(tokens: &mut [Token<'_>], width: usize) {
    let used: usize = tokens.iter().map(|t| t.width).sum();
    let gaps: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(i, t)| t.space && *i > 0)
        .map(|(i, _)| i)
        .collect();
    if gaps.is_empty() || used >= width {
        return;
    }
    let extra = width - used;
    let each = extra / gaps.len();
    let remainder = extra % gaps.len();
    for (n, &i) in gaps.iter().enumerate() {
        let add = each + usize::from(n < remainder);
        let style = tokens[i].glyphs.first().map_or(0, |g| g.style);
        for _ in 0..add {
            tokens[i].push(Glyph::space(style));
        }
    }
}
