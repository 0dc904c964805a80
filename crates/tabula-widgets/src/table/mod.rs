#![forbid(unsafe_code)]

//! Tables with header, body, and footer sections, spanning cells, and
//! per-edge borders.
//!
//! A table is laid out in phases:
//!
//! 1. **Span resolution** (at build time). Cells are placed left to right at
//!    the first free slot of their row, and each reserves its
//!    `row_span × column_span` footprint. The first cell to claim a slot
//!    keeps it; a later cell that would overlap is dropped with a warning.
//!    Row spans that run past their section are clamped. Short rows are
//!    filled with borderless blank cells.
//! 2. **Border map** (at build time). An edge between two slots exists if
//!    either neighbor asks for it. Edges inside a span's footprint never
//!    exist. With `outer_border(false)` the outer ring is cleared. A grid
//!    line takes up space only if some edge lies on it.
//! 3. **Column widths**. Each column gets the widest min and max of its
//!    single-column cells; spanning cells then widen their narrowest
//!    columns. The natural widths are shrunk one cell at a time (widest
//!    column first) when the table does not fit, and grown when it expands.
//! 4. **Row heights** from the rendered cells, spanning cells growing their
//!    shortest rows.
//! 5. **Drawing** of cell backgrounds, content, and grid lines on a
//!    [`Canvas`](tabula_render::Canvas).

mod builder;
mod layout;
mod render;

pub use builder::{
    CellBuilder, CellProps, CellStyleBuilder, ColumnBuilder, RowBuilder, SectionBuilder,
    MAX_COLUMNS, TableBuilder, table,
};

use tabula_core::Padding;
use tabula_render::{BorderStyle, LineKind};
use tabula_style::TextStyle;
use tabula_text::{Lines, TextAlign, VerticalAlign};

use crate::borders::Borders;
use crate::context::RenderContext;
use crate::measurable::{Render, WidthRange};
use crate::panel::Panel;
use crate::rule::HorizontalRule;
use crate::text::Text;
use crate::widget::Widget;
use layout::{BorderMap, Grid};

/// How a column's width is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColumnWidth {
    /// Sized from the cells.
    #[default]
    Auto,
    /// Exactly this many cells wide.
    Fixed(usize),
    /// Sized from the cells, then given a share of leftover width
    /// proportional to the weight.
    Expand(f32),
}

/// What a cell shows.
#[derive(Debug, Clone)]
pub enum CellContent {
    /// Text laid out with the cell's whitespace, alignment, and overflow
    /// settings.
    Text(String),
    Widget(Widget),
}

impl From<&str> for CellContent {
    fn from(value: &str) -> Self {
        CellContent::Text(value.to_owned())
    }
}

impl From<String> for CellContent {
    fn from(value: String) -> Self {
        CellContent::Text(value)
    }
}

impl From<Widget> for CellContent {
    fn from(value: Widget) -> Self {
        CellContent::Widget(value)
    }
}

macro_rules! widget_content {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellContent {
                fn from(value: $ty) -> Self {
                    CellContent::Widget(value.into())
                }
            }
        )*
    };
}

widget_content!(Text, Panel, Table, HorizontalRule);

macro_rules! display_content {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellContent {
                fn from(value: $ty) -> Self {
                    CellContent::Text(value.to_string())
                }
            }
        )*
    };
}

display_content!(char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// The section a grid row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Section {
    Header,
    Body,
    Footer,
}

impl Section {
    const fn line_kind(self) -> LineKind {
        match self {
            Section::Header => LineKind::Head,
            Section::Body => LineKind::Body,
            Section::Footer => LineKind::Foot,
        }
    }
}

/// A cell at its resolved position with its cascaded properties.
#[derive(Debug, Clone)]
struct PlacedCell {
    content: Widget,
    row: usize,
    column: usize,
    row_span: usize,
    column_span: usize,
    style: TextStyle,
    padding: Padding,
    align: TextAlign,
    vertical_align: VerticalAlign,
    borders: Borders,
}

impl PlacedCell {
    fn last_column(&self) -> usize {
        self.column + self.column_span - 1
    }

    fn last_row(&self) -> usize {
        self.row + self.row_span - 1
    }

    #[cfg(test)]
    fn content_text(&self) -> Option<&str> {
        match &self.content {
            Widget::Text(text) => text.spans().first().map(|s| s.text.as_str()),
            _ => None,
        }
    }
}

/// A table whose cells are placed and whose borders are resolved. Column
/// widths and row heights are computed on every render.
#[derive(Debug, Clone)]
pub struct Table {
    cells: Vec<PlacedCell>,
    grid: Grid,
    row_sections: Vec<Section>,
    column_widths: Vec<ColumnWidth>,
    borders: BorderMap,
    border_style: BorderStyle,
    border_text_style: Option<TextStyle>,
    expand: bool,
}

impl Table {
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Number of grid rows across all sections.
    pub fn row_count(&self) -> usize {
        self.grid.rows()
    }

    /// Number of grid columns.
    pub fn column_count(&self) -> usize {
        self.grid.columns()
    }

    /// Glyph set for the horizontal grid line above row `line`.
    ///
    /// A line between two sections uses the separator set of the boundary;
    /// any other line uses the set of its section.
    fn line_kind(&self, line: usize) -> LineKind {
        let above = line.checked_sub(1).and_then(|r| self.row_sections.get(r).copied());
        let below = self.row_sections.get(line).copied();
        match (above, below) {
            (Some(Section::Header), Some(b)) if b != Section::Header => LineKind::HeadBottom,
            (Some(a), Some(Section::Footer)) if a != Section::Footer => LineKind::FootTop,
            (_, Some(s)) | (Some(s), None) => s.line_kind(),
            (None, None) => LineKind::Body,
        }
    }

    fn row_kind(&self, row: usize) -> LineKind {
        self.row_sections
            .get(row)
            .map_or(LineKind::Body, |s| s.line_kind())
    }
}

impl Render for Table {
    fn measure(&self, ctx: &RenderContext<'_>, width: usize) -> WidthRange {
        let ranges = self.column_ranges(ctx, width);
        let chrome = self.borders.column_line_count();
        let min: usize = ranges.iter().map(|r| r.min).sum();
        let max: usize = ranges.iter().map(|r| r.max).sum();
        WidthRange::new(min + chrome, max + chrome)
    }

    fn render(&self, ctx: &RenderContext<'_>, width: usize) -> Lines {
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Table",
            width,
            rows = self.row_count(),
            columns = self.column_count()
        )
        .entered();
        self.draw(ctx, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::TerminalInfo;
    use tabula_style::Theme;

    fn sections(t: &mut TableBuilder) {
        t.header(|s| {
            s.row(["h"]);
        });
        t.body(|s| {
            s.row(["b"]).row(["b"]);
        });
        t.footer(|s| {
            s.row(["f"]);
        });
    }

    #[test]
    fn line_kinds_follow_sections() {
        let t = table(sections).unwrap();
        assert_eq!(t.row_count(), 4);
        assert_eq!(t.line_kind(0), LineKind::Head);
        assert_eq!(t.line_kind(1), LineKind::HeadBottom);
        assert_eq!(t.line_kind(2), LineKind::Body);
        assert_eq!(t.line_kind(3), LineKind::FootTop);
        assert_eq!(t.line_kind(4), LineKind::Foot);
        assert_eq!(t.row_kind(0), LineKind::Head);
        assert_eq!(t.row_kind(3), LineKind::Foot);
    }

    #[test]
    fn header_directly_above_footer() {
        let t = table(|t| {
            t.header(|s| {
                s.row(["h"]);
            });
            t.footer(|s| {
                s.row(["f"]);
            });
        })
        .unwrap();
        assert_eq!(t.line_kind(1), LineKind::HeadBottom);
    }

    #[test]
    fn heavy_head_foot_glyphs() {
        let t = table(|t| {
            t.border_style(BorderStyle::HEAVY_HEAD_FOOT);
            sections(t);
        })
        .unwrap();
        let theme = Theme::default();
        let terminal = TerminalInfo::default();
        let out = t.render(&RenderContext::new(&theme, &terminal), 79).plain_text();
        assert_eq!(
            out,
            "┏━━━┓\n┃ h ┃\n┡━━━┩\n│ b │\n├───┤\n│ b │\n┢━━━┪\n┃ f ┃\n┗━━━┛"
        );
    }

    #[test]
    fn numbers_become_text() {
        assert!(matches!(CellContent::from(42), CellContent::Text(ref s) if s == "42"));
        assert!(matches!(CellContent::from(Text::new("x")), CellContent::Widget(_)));
    }
}
