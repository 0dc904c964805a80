#![forbid(unsafe_code)]

//! A fixed-size grid of styled cells that composite widgets draw into.
//!
//! Wide graphemes occupy their head cell plus one continuation cell.
//! Overwriting either half of a wide grapheme blanks the other half, and a
//! wide grapheme that would cross the right edge is drawn as a space.

use std::borrow::Cow;

use tabula_style::TextStyle;
use tabula_text::{Line, Lines, Span, grapheme_width};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Glyph {
        symbol: Cow<'static, str>,
        style: TextStyle,
    },
    /// Second column of a wide glyph.
    Continuation,
}

impl Cell {
    fn blank(style: TextStyle) -> Self {
        Cell::Glyph {
            symbol: Cow::Borrowed(" "),
            style,
        }
    }
}

/// Drawing operations on a cell grid.
pub trait Draw {
    /// Draw `glyph` repeated `width` times starting at `(x, y)`.
    fn draw_horizontal_line(&mut self, x: usize, y: usize, width: usize, glyph: char, style: &TextStyle);

    /// Draw `glyph` repeated `height` times downward from `(x, y)`.
    fn draw_vertical_line(&mut self, x: usize, y: usize, height: usize, glyph: char, style: &TextStyle);

    /// Fill a rectangle with spaces in `style`.
    fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, style: &TextStyle);

    /// Print a line starting at `(x, y)`, clipped to `max_width` columns.
    /// Returns the number of columns written.
    fn print_line(&mut self, x: usize, y: usize, line: &Line, max_width: usize) -> usize;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    /// A canvas of unstyled spaces.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::blank(TextStyle::new()); width * height],
        }
    }

    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Put a single-column glyph at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, glyph: char, style: &TextStyle) {
        let symbol = if glyph == ' ' {
            Cow::Borrowed(" ")
        } else {
            Cow::Owned(glyph.to_string())
        };
        self.put(x, y, symbol, 1, style);
    }

    /// The symbol at `(x, y)`; empty for the second column of a wide glyph.
    pub fn symbol(&self, x: usize, y: usize) -> Option<&str> {
        self.index(x, y).map(|i| match &self.cells[i] {
            Cell::Glyph { symbol, .. } => symbol.as_ref(),
            Cell::Continuation => "",
        })
    }

    fn put(&mut self, x: usize, y: usize, symbol: Cow<'static, str>, width: usize, style: &TextStyle) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        self.clear_wide_partner(x, y);
        if width == 2 {
            if x + 1 >= self.width {
                self.cells[i] = Cell::blank(style.clone());
                return;
            }
            self.clear_wide_partner(x + 1, y);
            self.cells[i + 1] = Cell::Continuation;
        }
        self.cells[i] = Cell::Glyph {
            symbol,
            style: style.clone(),
        };
    }

    /// Blank the other half of a wide glyph that covers `(x, y)`.
    fn clear_wide_partner(&mut self, x: usize, y: usize) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        match self.cells[i] {
            Cell::Continuation => {
                if x > 0 {
                    let style = self.style_at(i - 1);
                    self.cells[i - 1] = Cell::blank(style.clone());
                    self.cells[i] = Cell::blank(style);
                }
            }
            Cell::Glyph { .. } => {
                if x + 1 < self.width && self.cells[i + 1] == Cell::Continuation {
                    let style = self.style_at(i);
                    self.cells[i + 1] = Cell::blank(style);
                }
            }
        }
    }

    fn style_at(&self, i: usize) -> TextStyle {
        match &self.cells[i] {
            Cell::Glyph { style, .. } => style.clone(),
            Cell::Continuation => TextStyle::new(),
        }
    }

    /// Copy `lines` onto the canvas with their top-left corner at `(x, y)`,
    /// clipping each to `width` columns and the block to `height` rows.
    pub fn blit(&mut self, x: usize, y: usize, width: usize, height: usize, lines: &Lines) {
        for (dy, line) in lines.iter().take(height).enumerate() {
            self.print_line(x, y + dy, line, width);
        }
    }

    /// Convert rows to lines, merging runs of equal style into one span.
    pub fn into_lines(self) -> Lines {
        let mut lines = Lines::new();
        if self.width == 0 {
            lines.lines.resize_with(self.height, Line::new);
            return lines;
        }
        for row in self.cells.chunks(self.width) {
            let mut line = Line::new();
            let mut run = String::new();
            let mut run_style: Option<&TextStyle> = None;
            for cell in row {
                let Cell::Glyph { symbol, style } = cell else {
                    continue;
                };
                if run_style != Some(style) {
                    if let Some(prev) = run_style {
                        line.push(Span::new(std::mem::take(&mut run), prev.clone()));
                    }
                    run_style = Some(style);
                }
                run.push_str(symbol);
            }
            if let Some(prev) = run_style {
                line.push(Span::new(run, prev.clone()));
            }
            lines.push(line);
        }
        lines
    }
}

impl Draw for Canvas {
    fn draw_horizontal_line(&mut self, x: usize, y: usize, width: usize, glyph: char, style: &TextStyle) {
        for i in 0..width {
            self.set(x + i, y, glyph, style);
        }
    }

    fn draw_vertical_line(&mut self, x: usize, y: usize, height: usize, glyph: char, style: &TextStyle) {
        for i in 0..height {
            self.set(x, y + i, glyph, style);
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, style: &TextStyle) {
        for dy in 0..height {
            for dx in 0..width {
                self.put(x + dx, y + dy, Cow::Borrowed(" "), 1, style);
            }
        }
    }

    fn print_line(&mut self, x: usize, y: usize, line: &Line, max_width: usize) -> usize {
        let limit = (x + max_width).min(self.width);
        let mut col = x;
        for span in &line.spans {
            for g in span.text.graphemes(true) {
                let w = grapheme_width(g).min(2);
                if w == 0 {
                    if col > x {
                        self.append_to_previous(col - 1, y, g);
                    }
                    continue;
                }
                if col + w > limit {
                    if col < limit {
                        self.put(col, y, Cow::Borrowed(" "), 1, &span.style);
                        col += 1;
                    }
                    return col - x;
                }
                self.put(col, y, Cow::Owned(g.to_owned()), w, &span.style);
                col += w;
            }
        }
        col - x
    }
}

impl Canvas {
    /// Attach a zero-width grapheme to the glyph ending at column `x`.
    fn append_to_previous(&mut self, x: usize, y: usize, g: &str) {
        let Some(mut i) = self.index(x, y) else {
            return;
        };
        if self.cells[i] == Cell::Continuation && x > 0 {
            i -= 1;
        }
        if let Cell::Glyph { symbol, .. } = &mut self.cells[i] {
            symbol.to_mut().push_str(g);
        }
    }
}
