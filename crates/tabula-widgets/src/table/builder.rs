#![forbid(unsafe_code)]

//! Builders for [`Table`] and the property cascade between them.
//!
//! Every builder level (table, section, column, row, cell) holds a
//! [`CellProps`] with optional entries. When a cell is placed, its
//! effective properties are the levels layered in that order with later
//! levels winning; styles are composed with [`TextStyle::plus`] instead of
//! replaced. A section's striped row style sits between the column and the
//! row.

use std::collections::BTreeMap;

use tabula_core::{Error, Padding, Result};
use tabula_render::BorderStyle;
use tabula_style::TextStyle;
use tabula_text::{OverflowWrap, TextAlign, VerticalAlign, Whitespace};

use super::layout::{BorderMap, Occupancy};
use super::{CellContent, ColumnWidth, PlacedCell, Section, Table};
use crate::borders::Borders;
use crate::text::Text;
use crate::widget::Widget;

/// Upper bound on the number of grid columns.
pub const MAX_COLUMNS: usize = u16::MAX as usize;

/// Optional cell properties set at one cascade level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellProps {
    borders: Option<Borders>,
    padding: Option<Padding>,
    style: Option<TextStyle>,
    align: Option<TextAlign>,
    vertical_align: Option<VerticalAlign>,
    whitespace: Option<Whitespace>,
    overflow_wrap: Option<OverflowWrap>,
}

impl CellProps {
    fn table_defaults() -> Self {
        Self {
            borders: Some(Borders::ALL),
            padding: Some(Padding::horizontal(1)),
            style: None,
            align: Some(TextAlign::Left),
            vertical_align: Some(VerticalAlign::Top),
            whitespace: Some(Whitespace::Normal),
            overflow_wrap: Some(OverflowWrap::BreakWord),
        }
    }

    fn styled(style: TextStyle) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    /// `self` overlaid with the entries set in `over`.
    fn then(&self, over: &CellProps) -> CellProps {
        let style = match (&self.style, &over.style) {
            (Some(under), Some(top)) => Some(under.plus(top)),
            (under, top) => top.clone().or_else(|| under.clone()),
        };
        CellProps {
            borders: over.borders.or(self.borders),
            padding: over.padding.or(self.padding),
            style,
            align: over.align.or(self.align),
            vertical_align: over.vertical_align.or(self.vertical_align),
            whitespace: over.whitespace.or(self.whitespace),
            overflow_wrap: over.overflow_wrap.or(self.overflow_wrap),
        }
    }
}

/// Setters shared by every level of the table builder.
pub trait CellStyleBuilder {
    fn cell_props_mut(&mut self) -> &mut CellProps;

    /// Edges on which cells request a border.
    fn borders(&mut self, borders: Borders) -> &mut Self {
        self.cell_props_mut().borders = Some(borders);
        self
    }

    fn padding(&mut self, padding: Padding) -> &mut Self {
        self.cell_props_mut().padding = Some(padding);
        self
    }

    /// Style of the whole cell area, padding included.
    fn style(&mut self, style: TextStyle) -> &mut Self {
        self.cell_props_mut().style = Some(style);
        self
    }

    fn align(&mut self, align: TextAlign) -> &mut Self {
        self.cell_props_mut().align = Some(align);
        self
    }

    fn vertical_align(&mut self, align: VerticalAlign) -> &mut Self {
        self.cell_props_mut().vertical_align = Some(align);
        self
    }

    fn whitespace(&mut self, whitespace: Whitespace) -> &mut Self {
        self.cell_props_mut().whitespace = Some(whitespace);
        self
    }

    fn overflow_wrap(&mut self, overflow_wrap: OverflowWrap) -> &mut Self {
        self.cell_props_mut().overflow_wrap = Some(overflow_wrap);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CellBuilder {
    props: CellProps,
    content: CellContent,
    row_span: usize,
    column_span: usize,
}

impl CellBuilder {
    fn new(content: CellContent) -> Self {
        Self {
            props: CellProps::default(),
            content,
            row_span: 1,
            column_span: 1,
        }
    }

    /// Number of rows the cell covers. Zero is rejected by
    /// [`TableBuilder::build`].
    pub fn row_span(&mut self, span: usize) -> &mut Self {
        self.row_span = span;
        self
    }

    /// Number of columns the cell covers. Zero is rejected by
    /// [`TableBuilder::build`].
    pub fn column_span(&mut self, span: usize) -> &mut Self {
        self.column_span = span;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct RowBuilder {
    props: CellProps,
    cells: Vec<CellBuilder>,
}

impl RowBuilder {
    pub fn cell(&mut self, content: impl Into<CellContent>) -> &mut Self {
        self.cells.push(CellBuilder::new(content.into()));
        self
    }

    pub fn cell_with(&mut self, content: impl Into<CellContent>, f: impl FnOnce(&mut CellBuilder)) -> &mut Self {
        let mut cell = CellBuilder::new(content.into());
        f(&mut cell);
        self.cells.push(cell);
        self
    }

    pub fn cells<I>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<CellContent>,
    {
        self.cells
            .extend(cells.into_iter().map(|c| CellBuilder::new(c.into())));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectionBuilder {
    props: CellProps,
    rows: Vec<RowBuilder>,
    row_styles: Vec<TextStyle>,
}

impl SectionBuilder {
    pub fn row<I>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<CellContent>,
    {
        let mut row = RowBuilder::default();
        row.cells(cells);
        self.rows.push(row);
        self
    }

    pub fn row_with(&mut self, f: impl FnOnce(&mut RowBuilder)) -> &mut Self {
        let mut row = RowBuilder::default();
        f(&mut row);
        self.rows.push(row);
        self
    }

    /// A row with no cells; it is filled with borderless blank cells.
    pub fn empty_row(&mut self) -> &mut Self {
        self.rows.push(RowBuilder::default());
        self
    }

    /// Styles applied to rows in turn, cycling by row index.
    pub fn row_styles(&mut self, styles: impl IntoIterator<Item = TextStyle>) -> &mut Self {
        self.row_styles = styles.into_iter().collect();
        self
    }
}

fn stripe(styles: &[TextStyle], row: usize) -> Option<&TextStyle> {
    if styles.is_empty() {
        None
    } else {
        styles.get(row % styles.len())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColumnBuilder {
    props: CellProps,
    width: ColumnWidth,
}

impl ColumnBuilder {
    pub fn width(&mut self, width: ColumnWidth) -> &mut Self {
        self.width = width;
        self
    }
}

#[derive(Debug, Clone)]
pub struct TableBuilder {
    props: CellProps,
    border_style: BorderStyle,
    border_text_style: Option<TextStyle>,
    outer_border: bool,
    expand: bool,
    columns: BTreeMap<usize, ColumnBuilder>,
    header: Option<SectionBuilder>,
    body: SectionBuilder,
    footer: Option<SectionBuilder>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self {
            props: CellProps::default(),
            border_style: BorderStyle::SQUARE,
            border_text_style: None,
            outer_border: true,
            expand: false,
            columns: BTreeMap::new(),
            header: None,
            body: SectionBuilder::default(),
            footer: None,
        }
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Glyphs used for grid lines.
    pub fn border_style(&mut self, style: BorderStyle) -> &mut Self {
        self.border_style = style;
        self
    }

    /// Style of the grid lines, replacing the theme's `table.border`.
    pub fn border_text_style(&mut self, style: TextStyle) -> &mut Self {
        self.border_text_style = Some(style);
        self
    }

    /// Whether edges on the outside of the grid are drawn.
    pub fn outer_border(&mut self, outer_border: bool) -> &mut Self {
        self.outer_border = outer_border;
        self
    }

    /// Grow columns to fill the whole width.
    pub fn expand(&mut self, expand: bool) -> &mut Self {
        self.expand = expand;
        self
    }

    /// Striped row styles for the body.
    pub fn row_styles(&mut self, styles: impl IntoIterator<Item = TextStyle>) -> &mut Self {
        self.body.row_styles(styles);
        self
    }

    /// Configure column `index` (zero based).
    pub fn column(&mut self, index: usize, f: impl FnOnce(&mut ColumnBuilder)) -> &mut Self {
        f(self.columns.entry(index).or_default());
        self
    }

    pub fn header(&mut self, f: impl FnOnce(&mut SectionBuilder)) -> &mut Self {
        f(self.header.get_or_insert_with(SectionBuilder::default));
        self
    }

    pub fn body(&mut self, f: impl FnOnce(&mut SectionBuilder)) -> &mut Self {
        f(&mut self.body);
        self
    }

    pub fn footer(&mut self, f: impl FnOnce(&mut SectionBuilder)) -> &mut Self {
        f(self.footer.get_or_insert_with(SectionBuilder::default));
        self
    }

    /// Place every cell and build the border map.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLayout`] if a cell has a zero row or column span, a
    /// cell reaches past [`MAX_COLUMNS`], a column has a non-positive expand
    /// weight, or the table has no cells.
    pub fn build(self) -> Result<Table> {
        let _span = tracing::debug_span!("table_build").entered();
        for (index, column) in &self.columns {
            if let ColumnWidth::Expand(weight) = column.width {
                if !(weight.is_finite() && weight > 0.0) {
                    return Err(Error::invalid_layout(format!(
                        "column {index} has expand weight {weight}; weights must be positive"
                    )));
                }
            }
        }

        let base = CellProps::table_defaults().then(&self.props);
        let sections = [
            (Section::Header, self.header),
            (Section::Body, Some(self.body)),
            (Section::Footer, self.footer),
        ];

        let mut occupancy = Occupancy::default();
        let mut cells = Vec::new();
        let mut row_sections = Vec::new();
        for (kind, section) in sections {
            let Some(SectionBuilder {
                props: section_props,
                rows,
                row_styles,
            }) = section
            else {
                continue;
            };
            let start = row_sections.len();
            let end = start + rows.len();
            row_sections.resize(end, kind);
            occupancy.ensure_rows(end);
            let section_props = base.then(&section_props);

            for (index, row) in rows.into_iter().enumerate() {
                let r = start + index;
                let stripe_props = stripe(&row_styles, index).cloned().map(CellProps::styled);
                let mut cursor = 0;
                for cell in row.cells {
                    if cell.row_span == 0 || cell.column_span == 0 {
                        return Err(Error::invalid_layout(format!(
                            "cell in row {r} has a zero span ({}x{})",
                            cell.row_span, cell.column_span
                        )));
                    }
                    let column = occupancy.first_free(r, cursor);
                    let fits = column
                        .checked_add(cell.column_span)
                        .is_some_and(|last| last <= MAX_COLUMNS);
                    if !fits {
                        return Err(Error::invalid_layout(format!(
                            "cell in row {r} at column {column} spans {} columns; tables are limited to {MAX_COLUMNS}",
                            cell.column_span
                        )));
                    }
                    let row_span = if cell.row_span > end - r {
                        let clamped = end - r;
                        tracing::warn!(
                            row = r,
                            column,
                            requested = cell.row_span,
                            clamped,
                            "row span runs past its section, clamping"
                        );
                        clamped
                    } else {
                        cell.row_span
                    };
                    if !occupancy.is_free(r, column, row_span, cell.column_span) {
                        tracing::warn!(
                            row = r,
                            column,
                            row_span,
                            column_span = cell.column_span,
                            "cell collides with a spanning cell, skipping"
                        );
                        continue;
                    }
                    occupancy.reserve(r, column, row_span, cell.column_span, cells.len());

                    let mut props = section_props.clone();
                    if let Some(col) = self.columns.get(&column) {
                        props = props.then(&col.props);
                    }
                    if let Some(stripe_props) = &stripe_props {
                        props = props.then(stripe_props);
                    }
                    let props = props.then(&row.props).then(&cell.props);
                    cells.push(place(cell.content, r, column, row_span, cell.column_span, &props));
                    cursor = column + cell.column_span;
                }
            }
        }

        let columns = occupancy.columns();
        if columns == 0 {
            return Err(Error::invalid_layout("table has no cells"));
        }
        let filler = CellProps {
            borders: Some(Borders::NONE),
            padding: Some(Padding::none()),
            ..CellProps::table_defaults()
        };
        for r in 0..row_sections.len() {
            for c in 0..columns {
                if occupancy.is_free(r, c, 1, 1) {
                    occupancy.reserve(r, c, 1, 1, cells.len());
                    cells.push(place(CellContent::Text(String::new()), r, c, 1, 1, &filler));
                }
            }
        }

        let column_widths = (0..columns)
            .map(|c| self.columns.get(&c).map(|col| col.width).unwrap_or_default())
            .collect();
        let rows = row_sections.len();
        let borders = BorderMap::new(&cells, rows, columns, self.outer_border);
        tracing::debug!(rows, columns, cells = cells.len(), "table built");
        Ok(Table {
            cells,
            grid: occupancy.into_grid(columns),
            row_sections,
            column_widths,
            borders,
            border_style: self.border_style,
            border_text_style: self.border_text_style,
            expand: self.expand,
        })
    }
}

fn place(
    content: CellContent,
    row: usize,
    column: usize,
    row_span: usize,
    column_span: usize,
    props: &CellProps,
) -> PlacedCell {
    let align = props.align.unwrap_or(TextAlign::Left);
    let content = match content {
        CellContent::Text(text) => Widget::Text(
            Text::new(text)
                .whitespace(props.whitespace.unwrap_or_default())
                .align(align)
                .overflow_wrap(props.overflow_wrap.unwrap_or_default()),
        ),
        CellContent::Widget(widget) => widget,
    };
    PlacedCell {
        content,
        row,
        column,
        row_span,
        column_span,
        style: props.style.clone().unwrap_or_default(),
        padding: props.padding.unwrap_or_default(),
        align,
        vertical_align: props.vertical_align.unwrap_or_default(),
        borders: props.borders.unwrap_or(Borders::ALL),
    }
}

macro_rules! impl_cell_style_builder {
    ($($ty:ty),*) => {
        $(
            impl CellStyleBuilder for $ty {
                fn cell_props_mut(&mut self) -> &mut CellProps {
                    &mut self.props
                }
            }
        )*
    };
}

impl_cell_style_builder!(TableBuilder, SectionBuilder, ColumnBuilder, RowBuilder, CellBuilder);

/// Build a table by configuring a fresh [`TableBuilder`].
///
/// # Errors
///
/// See [`TableBuilder::build`].
pub fn table(f: impl FnOnce(&mut TableBuilder)) -> Result<Table> {
    let mut builder = TableBuilder::new();
    f(&mut builder);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_style::Ansi16;

    #[test]
    fn later_levels_win_and_styles_compose() {
        let under = CellProps {
            align: Some(TextAlign::Left),
            style: Some(TextStyle::new().fg(Ansi16::Red).bold()),
            ..CellProps::default()
        };
        let over = CellProps {
            align: Some(TextAlign::Right),
            style: Some(TextStyle::new().fg(Ansi16::Blue)),
            ..CellProps::default()
        };
        let merged = under.then(&over);
        assert_eq!(merged.align, Some(TextAlign::Right));
        assert_eq!(merged.style, Some(TextStyle::new().fg(Ansi16::Blue).bold()));
        assert_eq!(under.then(&CellProps::default()), under);
    }

    #[test]
    fn zero_span_is_rejected() {
        let err = table(|t| {
            t.body(|b| {
                b.row_with(|r| {
                    r.cell_with("x", |c| {
                        c.column_span(0);
                    });
                });
            });
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidLayout(_)));
    }

    #[test]
    fn oversized_spans_are_rejected_or_clamped() {
        let wide = table(|t| {
            t.body(|b| {
                b.row_with(|r| {
                    r.cell("a").cell_with("b", |c| {
                        c.column_span(usize::MAX);
                    });
                });
            });
        });
        assert!(matches!(wide, Err(Error::InvalidLayout(_))));

        let too_many = table(|t| {
            t.body(|b| {
                b.row_with(|r| {
                    r.cell_with("a", |c| {
                        c.column_span(MAX_COLUMNS + 1);
                    });
                });
            });
        });
        assert!(matches!(too_many, Err(Error::InvalidLayout(_))));

        let tall = table(|t| {
            t.body(|b| {
                b.row(["a"]);
                b.row_with(|r| {
                    r.cell_with("b", |c| {
                        c.row_span(usize::MAX);
                    });
                });
            });
        })
        .unwrap();
        assert_eq!(tall.row_count(), 2);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(table(|_| {}), Err(Error::InvalidLayout(_))));
        let only_empty_rows = table(|t| {
            t.body(|b| {
                b.empty_row();
            });
        });
        assert!(only_empty_rows.is_err());
    }

    #[test]
    fn non_positive_weight_is_rejected() {
        for weight in [0.0, -1.0, f32::NAN] {
            let result = table(|t| {
                t.column(0, |c| {
                    c.width(ColumnWidth::Expand(weight));
                });
                t.body(|b| {
                    b.row(["a"]);
                });
            });
            assert!(matches!(result, Err(Error::InvalidLayout(_))), "{weight}");
        }
    }

    #[test]
    #[tracing_test::traced_test]
    fn collisions_and_clamps_are_logged() {
        let t = table(|t| {
            t.body(|b| {
                b.row_with(|r| {
                    r.cell("a").cell_with("tall", |c| {
                        c.row_span(3);
                    });
                });
                b.row_with(|r| {
                    r.cell_with("wide", |c| {
                        c.column_span(2);
                    });
                });
            });
        });
        assert!(t.is_ok());
        assert!(logs_contain("row span runs past its section"));
        assert!(logs_contain("cell collides with a spanning cell"));
    }

    #[test]
    fn stripes_cycle() {
        let red = TextStyle::new().fg(Ansi16::Red);
        let blue = TextStyle::new().fg(Ansi16::Blue);
        let styles = [red.clone(), blue.clone()];
        assert_eq!(stripe(&styles, 0), Some(&red));
        assert_eq!(stripe(&styles, 3), Some(&blue));
        assert_eq!(stripe(&[], 0), None);
    }
}
