#![forbid(unsafe_code)]

//! Box-drawing glyph sets.
//!
//! A junction glyph depends only on which of its four arms are present.
//! [`Arms`] packs the arms into four bits (up = 1, right = 2, down = 4,
//! left = 8) and each [`GlyphSet`] is a 16-entry table indexed by them.
//! Index 0 (no arms) is always a space.
//!
//! A [`BorderStyle`] holds one glyph set per kind of horizontal grid line, so
//! a table can draw its header separator and footer separator differently
//! from its body lines.

use bitflags::bitflags;

bitflags! {
    /// Arms of a junction glyph.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Arms: u8 {
        const UP    = 0b0001;
        const RIGHT = 0b0010;
        const DOWN  = 0b0100;
        const LEFT  = 0b1000;
    }
}

impl Arms {
    pub const HORIZONTAL: Arms = Arms::LEFT.union(Arms::RIGHT);
    pub const VERTICAL: Arms = Arms::UP.union(Arms::DOWN);
}

/// 16 junction glyphs indexed by [`Arms`] bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphSet {
    glyphs: [char; 16],
}

impl GlyphSet {
    pub const fn new(glyphs: [char; 16]) -> Self {
        Self { glyphs }
    }

    #[inline]
    pub const fn glyph(&self, arms: Arms) -> char {
        self.glyphs[arms.bits() as usize]
    }

    pub const LIGHT: GlyphSet = GlyphSet::new([
        ' ', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
    ]);

    pub const ROUNDED: GlyphSet = GlyphSet::new([
        ' ', '╵', '╶', '╰', '╷', '│', '╭', '├', '╴', '╯', '─', '┴', '╮', '┤', '┬', '┼',
    ]);

    pub const HEAVY: GlyphSet = GlyphSet::new([
        ' ', '╹', '╺', '┗', '╻', '┃', '┏', '┣', '╸', '┛', '━', '┻', '┓', '┫', '┳', '╋',
    ]);

    /// Heavy horizontal line with heavy arms above and light arms below.
    pub const HEAVY_OVER_LIGHT: GlyphSet = GlyphSet::new([
        ' ', '╹', '╺', '┗', '╷', '╿', '┍', '┡', '╸', '┛', '━', '┻', '┑', '┩', '┯', '╇',
    ]);

    /// Heavy horizontal line with light arms above and heavy arms below.
    pub const LIGHT_OVER_HEAVY: GlyphSet = GlyphSet::new([
        ' ', '╵', '╺', '┕', '╻', '╽', '┏', '┢', '╸', '┙', '━', '┷', '┓', '┪', '┳', '╈',
    ]);

    pub const DOUBLE: GlyphSet = GlyphSet::new([
        ' ', '║', '═', '╚', '║', '║', '╔', '╠', '═', '╝', '═', '╩', '╗', '╣', '╦', '╬',
    ]);

    /// Double horizontal line crossing light verticals.
    pub const DOUBLE_OVER_LIGHT: GlyphSet = GlyphSet::new([
        ' ', '╵', '═', '╘', '╷', '│', '╒', '╞', '═', '╛', '═', '╧', '╕', '╡', '╤', '╪',
    ]);

    pub const ASCII: GlyphSet = GlyphSet::new([
        ' ', '|', '-', '+', '|', '|', '+', '+', '-', '+', '-', '+', '+', '+', '+', '+',
    ]);

    pub const BLANK: GlyphSet = GlyphSet::new([' '; 16]);
}

/// Which kind of horizontal grid line a glyph sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Head,
    /// Between the header and the section below it.
    HeadBottom,
    Body,
    /// Between the footer and the section above it.
    FootTop,
    Foot,
}

/// Glyph sets for every kind of grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderStyle {
    pub head: GlyphSet,
    pub head_bottom: GlyphSet,
    pub body: GlyphSet,
    pub foot_top: GlyphSet,
    pub foot: GlyphSet,
}

impl BorderStyle {
    /// The same glyph set everywhere.
    pub const fn uniform(set: GlyphSet) -> Self {
        Self {
            head: set,
            head_bottom: set,
            body: set,
            foot_top: set,
            foot: set,
        }
    }

    pub const ASCII: BorderStyle = BorderStyle::uniform(GlyphSet::ASCII);
    pub const BLANK: BorderStyle = BorderStyle::uniform(GlyphSet::BLANK);
    pub const ROUNDED: BorderStyle = BorderStyle::uniform(GlyphSet::ROUNDED);
    pub const SQUARE: BorderStyle = BorderStyle::uniform(GlyphSet::LIGHT);
    pub const HEAVY: BorderStyle = BorderStyle::uniform(GlyphSet::HEAVY);
    pub const DOUBLE: BorderStyle = BorderStyle::uniform(GlyphSet::DOUBLE);

    /// Heavy header and footer around a light body.
    pub const HEAVY_HEAD_FOOT: BorderStyle = BorderStyle {
        head: GlyphSet::HEAVY,
        head_bottom: GlyphSet::HEAVY_OVER_LIGHT,
        body: GlyphSet::LIGHT,
        foot_top: GlyphSet::LIGHT_OVER_HEAVY,
        foot: GlyphSet::HEAVY,
    };

    /// Light lines with double section separators.
    pub const SQUARE_DOUBLE_SECTION_SEPARATOR: BorderStyle = BorderStyle {
        head: GlyphSet::LIGHT,
        head_bottom: GlyphSet::DOUBLE_OVER_LIGHT,
        body: GlyphSet::LIGHT,
        foot_top: GlyphSet::DOUBLE_OVER_LIGHT,
        foot: GlyphSet::LIGHT,
    };

    pub const fn set(&self, kind: LineKind) -> &GlyphSet {
        match kind {
            LineKind::Head => &self.head,
            LineKind::HeadBottom => &self.head_bottom,
            LineKind::Body => &self.body,
            LineKind::FootTop => &self.foot_top,
            LineKind::Foot => &self.foot,
        }
    }

    /// Glyph for `arms` on a line of `kind`.
    #[inline]
    pub const fn glyph(&self, kind: LineKind, arms: Arms) -> char {
        self.set(kind).glyph(arms)
    }
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self::SQUARE
    }
}
