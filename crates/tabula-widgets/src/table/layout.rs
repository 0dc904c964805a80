#![forbid(unsafe_code)]

//! Slot occupancy, the border map, and width/height negotiation.

use std::ops::Range;

use tabula_render::Arms;

use super::{ColumnWidth, PlacedCell, Table};
use crate::borders::Borders;
use crate::context::RenderContext;
use crate::measurable::{Render, WidthRange};

/// Which cell claimed each slot while rows are being placed. Rows grow to
/// the right as cells are added.
#[derive(Debug, Default)]
pub(super) struct Occupancy {
    rows: Vec<Vec<Option<usize>>>,
}

impl Occupancy {
    pub(super) fn ensure_rows(&mut self, rows: usize) {
        if self.rows.len() < rows {
            self.rows.resize_with(rows, Vec::new);
        }
    }

    fn slot(&self, row: usize, column: usize) -> Option<usize> {
        self.rows.get(row).and_then(|r| r.get(column).copied().flatten())
    }

    /// First unclaimed column in `row` at or after `from`.
    pub(super) fn first_free(&self, row: usize, from: usize) -> usize {
        (from..)
            .find(|&c| self.slot(row, c).is_none())
            .unwrap_or(from)
    }

    pub(super) fn is_free(&self, row: usize, column: usize, row_span: usize, column_span: usize) -> bool {
        (row..row + row_span)
            .all(|r| (column..column + column_span).all(|c| self.slot(r, c).is_none()))
    }

    pub(super) fn reserve(&mut self, row: usize, column: usize, row_span: usize, column_span: usize, cell: usize) {
        self.ensure_rows(row + row_span);
        for r in &mut self.rows[row..row + row_span] {
            if r.len() < column + column_span {
                r.resize(column + column_span, None);
            }
            for slot in &mut r[column..column + column_span] {
                *slot = Some(cell);
            }
        }
    }

    /// Width of the widest row.
    pub(super) fn columns(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|r| r.iter().rposition(Option::is_some).map(|i| i + 1))
            .max()
            .unwrap_or(0)
    }

    /// Dimensions of the finished grid.
    pub(super) fn into_grid(self, columns: usize) -> Grid {
        Grid {
            rows: self.rows.len(),
            columns,
        }
    }
}

/// Row and column counts of a placed table.
#[derive(Debug, Clone, Copy)]
pub(super) struct Grid {
    rows: usize,
    columns: usize,
}

impl Grid {
    pub(super) fn rows(&self) -> usize {
        self.rows
    }

    pub(super) fn columns(&self) -> usize {
        self.columns
    }
}

/// Presence of every edge segment in the grid.
///
/// Horizontal segments sit on grid lines `0..=rows` (line `i` is above row
/// `i`) and span one column; vertical segments sit on grid lines
/// `0..=columns` and span one row.
#[derive(Debug, Clone)]
pub(super) struct BorderMap {
    rows: usize,
    columns: usize,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
}

impl BorderMap {
    pub(super) fn new(cells: &[PlacedCell], rows: usize, columns: usize, outer_border: bool) -> Self {
        let mut map = Self {
            rows,
            columns,
            horizontal: vec![false; (rows + 1) * columns],
            vertical: vec![false; rows * (columns + 1)],
        };
        for cell in cells {
            for c in cell.column..=cell.last_column() {
                if cell.borders.contains(Borders::TOP) {
                    map.horizontal[cell.row * columns + c] = true;
                }
                if cell.borders.contains(Borders::BOTTOM) {
                    map.horizontal[(cell.last_row() + 1) * columns + c] = true;
                }
            }
            for r in cell.row..=cell.last_row() {
                if cell.borders.contains(Borders::LEFT) {
                    map.vertical[r * (columns + 1) + cell.column] = true;
                }
                if cell.borders.contains(Borders::RIGHT) {
                    map.vertical[r * (columns + 1) + cell.last_column() + 1] = true;
                }
            }
        }
        if !outer_border {
            for c in 0..columns {
                map.horizontal[c] = false;
                map.horizontal[rows * columns + c] = false;
            }
            for r in 0..rows {
                map.vertical[r * (columns + 1)] = false;
                map.vertical[r * (columns + 1) + columns] = false;
            }
        }
        map
    }

    /// Edge on horizontal grid line `line` above or below `column`.
    pub(super) fn horizontal(&self, line: usize, column: usize) -> bool {
        line <= self.rows && column < self.columns && self.horizontal[line * self.columns + column]
    }

    /// Edge on vertical grid line `line` beside `row`.
    pub(super) fn vertical(&self, row: usize, line: usize) -> bool {
        row < self.rows && line <= self.columns && self.vertical[row * (self.columns + 1) + line]
    }

    pub(super) fn has_row_line(&self, line: usize) -> bool {
        (0..self.columns).any(|c| self.horizontal(line, c))
    }

    pub(super) fn has_column_line(&self, line: usize) -> bool {
        (0..self.rows).any(|r| self.vertical(r, line))
    }

    /// Number of vertical grid lines that take up a column.
    pub(super) fn column_line_count(&self) -> usize {
        (0..=self.columns).filter(|&j| self.has_column_line(j)).count()
    }

    /// Edges meeting at the crossing of horizontal line `row_line` and
    /// vertical line `column_line`.
    pub(super) fn arms(&self, row_line: usize, column_line: usize) -> Arms {
        let mut arms = Arms::empty();
        if row_line > 0 && self.vertical(row_line - 1, column_line) {
            arms |= Arms::UP;
        }
        if self.vertical(row_line, column_line) {
            arms |= Arms::DOWN;
        }
        if column_line > 0 && self.horizontal(row_line, column_line - 1) {
            arms |= Arms::LEFT;
        }
        if self.horizontal(row_line, column_line) {
            arms |= Arms::RIGHT;
        }
        arms
    }
}

/// Resolved sizes and positions of grid rows, columns, and lines.
#[derive(Debug, Clone, Default)]
pub(super) struct Geometry {
    pub(super) column_widths: Vec<usize>,
    pub(super) row_heights: Vec<usize>,
    pub(super) column_x: Vec<usize>,
    pub(super) row_y: Vec<usize>,
    pub(super) column_line_x: Vec<Option<usize>>,
    pub(super) row_line_y: Vec<Option<usize>>,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl Geometry {
    pub(super) fn new(table: &Table, column_widths: Vec<usize>, row_heights: Vec<usize>) -> Self {
        let (column_x, column_line_x, width) =
            positions(&column_widths, |j| table.borders.has_column_line(j));
        let (row_y, row_line_y, height) = positions(&row_heights, |i| table.borders.has_row_line(i));
        Self {
            column_widths,
            row_heights,
            column_x,
            row_y,
            column_line_x,
            row_line_y,
            width,
            height,
        }
    }

    /// Left edge and width of the area covered by `columns`.
    pub(super) fn horizontal_extent(&self, columns: Range<usize>) -> (usize, usize) {
        extent(&self.column_x, &self.column_widths, columns)
    }

    /// Top edge and height of the area covered by `rows`.
    pub(super) fn vertical_extent(&self, rows: Range<usize>) -> (usize, usize) {
        extent(&self.row_y, &self.row_heights, rows)
    }
}

/// Offsets of tracks and of the grid lines between them.
fn positions(sizes: &[usize], has_line: impl Fn(usize) -> bool) -> (Vec<usize>, Vec<Option<usize>>, usize) {
    let mut offset = 0;
    let mut starts = Vec::with_capacity(sizes.len());
    let mut lines = Vec::with_capacity(sizes.len() + 1);
    for i in 0..=sizes.len() {
        if has_line(i) {
            lines.push(Some(offset));
            offset += 1;
        } else {
            lines.push(None);
        }
        if let Some(&size) = sizes.get(i) {
            starts.push(offset);
            offset += size;
        }
    }
    (starts, lines, offset)
}

fn extent(starts: &[usize], sizes: &[usize], range: Range<usize>) -> (usize, usize) {
    let first = range.start;
    let last = range.end - 1;
    let start = starts[first];
    (start, starts[last] + sizes[last] - start)
}

/// Add one cell at a time to the smallest growable track in `tracks`
/// (leftmost on ties) until their sum reaches `needed`.
fn grow_smallest(sizes: &mut [usize], tracks: Range<usize>, needed: usize, growable: impl Fn(usize) -> bool) {
    let mut total: usize = sizes[tracks.clone()].iter().sum();
    while total < needed {
        let Some(i) = tracks.clone().filter(|&i| growable(i)).min_by_key(|&i| sizes[i]) else {
            return;
        };
        sizes[i] += 1;
        total += 1;
    }
}

/// Split `extra` by `weights`, handing the rounding remainder out one cell
/// at a time from the left.
fn distribute(sizes: &mut [usize], extra: usize, weights: &[f32]) {
    let total: f32 = weights.iter().sum();
    if extra == 0 || total <= 0.0 {
        return;
    }
    let mut given = 0;
    for (size, &weight) in sizes.iter_mut().zip(weights) {
        let share = (extra as f32 * weight / total).floor() as usize;
        let share = share.min(extra - given);
        *size += share;
        given += share;
    }
    let mut remainder = extra - given;
    while remainder > 0 {
        for (size, &weight) in sizes.iter_mut().zip(weights) {
            if remainder == 0 {
                break;
            }
            if weight > 0.0 {
                *size += 1;
                remainder -= 1;
            }
        }
    }
}

impl Table {
    fn interior_column_lines(&self, cell: &PlacedCell) -> usize {
        (cell.column + 1..=cell.last_column())
            .filter(|&j| self.borders.has_column_line(j))
            .count()
    }

    fn interior_row_lines(&self, cell: &PlacedCell) -> usize {
        (cell.row + 1..=cell.last_row())
            .filter(|&i| self.borders.has_row_line(i))
            .count()
    }

    fn is_fixed(&self, column: usize) -> bool {
        matches!(self.column_widths.get(column), Some(ColumnWidth::Fixed(_)))
    }

    /// Min and max width of every column.
    pub(super) fn column_ranges(&self, ctx: &RenderContext<'_>, width: usize) -> Vec<WidthRange> {
        let columns = self.grid.columns();
        let mut min = vec![0; columns];
        let mut max = vec![0; columns];
        let mut spanning = Vec::new();
        for cell in &self.cells {
            let padding = cell.padding.horizontal_total();
            let range = cell
                .content
                .measure(ctx, width.saturating_sub(padding))
                .plus(padding);
            if cell.column_span == 1 {
                min[cell.column] = min[cell.column].max(range.min);
                max[cell.column] = max[cell.column].max(range.max);
            } else {
                spanning.push((cell, range));
            }
        }
        for (c, policy) in self.column_widths.iter().enumerate() {
            if let ColumnWidth::Fixed(n) = *policy {
                min[c] = n;
                max[c] = n;
            }
        }
        for c in 0..columns {
            max[c] = max[c].max(min[c]);
        }

        spanning.sort_by_key(|(cell, _)| cell.column_span);
        for (cell, range) in spanning {
            let tracks = cell.column..cell.column + cell.column_span;
            let lines = self.interior_column_lines(cell);
            let growable = |c: usize| !self.is_fixed(c);
            grow_smallest(&mut min, tracks.clone(), range.min.saturating_sub(lines), growable);
            grow_smallest(&mut max, tracks.clone(), range.max.saturating_sub(lines), growable);
            for c in tracks {
                max[c] = max[c].max(min[c]);
            }
        }
        min.into_iter()
            .zip(max)
            .map(|(min, max)| WidthRange::new(min, max))
            .collect()
    }

    /// Final column widths for a render at `width`.
    pub(super) fn resolve_column_widths(&self, ctx: &RenderContext<'_>, width: usize) -> Vec<usize> {
        let ranges = self.column_ranges(ctx, width);
        let available = width.saturating_sub(self.borders.column_line_count());
        let mut widths: Vec<usize> = ranges.iter().map(|r| r.max).collect();
        let mut total: usize = widths.iter().sum();

        while total > available {
            let widest = (0..widths.len())
                .rev()
                .filter(|&c| widths[c] > ranges[c].min)
                .max_by_key(|&c| widths[c]);
            let Some(c) = widest else {
                tracing::debug!(total, available, "table cannot shrink further");
                break;
            };
            widths[c] -= 1;
            total -= 1;
        }

        let mut weights: Vec<f32> = self
            .column_widths
            .iter()
            .map(|w| match *w {
                ColumnWidth::Expand(weight) => weight,
                _ => 0.0,
            })
            .collect();
        let has_expand_columns = weights.iter().any(|&w| w > 0.0);
        if (self.expand || has_expand_columns) && total < available {
            if !has_expand_columns {
                weights = (0..widths.len())
                    .map(|c| if self.is_fixed(c) { 0.0 } else { 1.0 })
                    .collect();
            }
            distribute(&mut widths, available - total, &weights);
        }
        widths
    }

    /// Row heights given the rendered height of each cell.
    pub(super) fn resolve_row_heights(&self, cell_heights: &[usize]) -> Vec<usize> {
        let mut heights = vec![0; self.grid.rows()];
        let mut spanning = Vec::new();
        for (cell, &height) in self.cells.iter().zip(cell_heights) {
            if cell.row_span == 1 {
                heights[cell.row] = heights[cell.row].max(height);
            } else {
                spanning.push((cell, height));
            }
        }
        spanning.sort_by_key(|(cell, _)| cell.row_span);
        for (cell, height) in spanning {
            let lines = self.interior_row_lines(cell);
            grow_smallest(
                &mut heights,
                cell.row..cell.row + cell.row_span,
                height.saturating_sub(lines),
                |_| true,
            );
        }
        heights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CellStyleBuilder, table};

    #[test]
    fn occupancy_skips_reserved_slots() {
        let mut o = Occupancy::default();
        o.ensure_rows(2);
        o.reserve(0, 0, 2, 2, 0);
        assert_eq!(o.first_free(0, 0), 2);
        assert_eq!(o.first_free(1, 0), 2);
        assert!(!o.is_free(1, 1, 1, 1));
        assert!(o.is_free(1, 2, 1, 3));
        assert_eq!(o.columns(), 2);
    }

    #[test]
    fn spans_are_placed_after_reserved_slots() {
        let t = table(|t| {
            t.body(|b| {
                b.row_with(|r| {
                    r.cell_with("a", |c| {
                        c.row_span(2);
                    })
                    .cell("b");
                });
                b.row(["c"]);
            });
        })
        .unwrap();
        assert_eq!((t.cells[0].row, t.cells[0].column, t.cells[0].row_span), (0, 0, 2));
        assert_eq!(t.cells[2].content_text(), Some("c"));
        assert_eq!((t.cells[2].row, t.cells[2].column), (1, 1));
    }

    #[test]
    fn colliding_cell_is_skipped() {
        let t = table(|t| {
            t.body(|b| {
                b.row_with(|r| {
                    r.cell("a").cell_with("tall", |c| {
                        c.row_span(2);
                    });
                });
                b.row_with(|r| {
                    r.cell_with("wide", |c| {
                        c.column_span(2);
                    })
                    .cell("z");
                });
            });
        })
        .unwrap();
        // "wide" would cover the slot under "tall"; it is dropped and "z"
        // takes its place.
        assert!(t.cells.iter().all(|c| c.content_text() != Some("wide")));
        assert_eq!(t.cells[2].content_text(), Some("z"));
        assert_eq!((t.cells[2].row, t.cells[2].column), (1, 0));
    }

    #[test]
    fn row_span_is_clamped_to_section() {
        let t = table(|t| {
            t.body(|b| {
                b.row(["b"]);
                b.row_with(|r| {
                    r.cell_with("a", |c| {
                        c.row_span(5);
                    });
                });
            });
            t.footer(|f| {
                f.row(["f"]);
            });
        })
        .unwrap();
        assert_eq!(t.cells[1].content_text(), Some("a"));
        assert_eq!(t.cells[1].row_span, 1);
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn edges_exist_if_either_side_asks() {
        let t = table(|t| {
            t.borders(Borders::NONE);
            t.body(|b| {
                b.row_with(|r| {
                    r.cell_with("1", |c| {
                        c.borders(Borders::RIGHT);
                    })
                    .cell("2");
                });
            });
        })
        .unwrap();
        assert!(t.borders.vertical(0, 1));
        assert!(!t.borders.vertical(0, 0));
        assert!(!t.borders.has_column_line(2));
        assert_eq!(t.borders.column_line_count(), 1);
        assert_eq!(t.borders.arms(0, 1), Arms::DOWN);
    }

    #[test]
    fn outer_ring_can_be_removed() {
        let t = table(|t| {
            t.outer_border(false);
            t.body(|b| {
                b.row(["1", "2"]).row(["3", "4"]);
            });
        })
        .unwrap();
        assert!(!t.borders.has_row_line(0));
        assert!(t.borders.has_row_line(1));
        assert!(!t.borders.has_row_line(2));
        assert!(!t.borders.has_column_line(0));
        assert!(t.borders.has_column_line(1));
        assert_eq!(t.borders.arms(1, 1), Arms::all());
    }

    #[test]
    fn grow_and_distribute() {
        let mut sizes = vec![1, 3, 1];
        grow_smallest(&mut sizes, 0..3, 8, |_| true);
        assert_eq!(sizes, vec![3, 3, 2]);

        let mut sizes = vec![0, 0, 0];
        distribute(&mut sizes, 7, &[1.0, 2.0, 1.0]);
        assert_eq!(sizes, vec![2, 4, 1]);

        let mut sizes = vec![0, 0];
        distribute(&mut sizes, 3, &[0.0, 1.0]);
        assert_eq!(sizes, vec![0, 3]);
    }

    #[test]
    fn positions_skip_absent_lines() {
        let (starts, lines, total) = positions(&[3, 2], |i| i != 1);
        assert_eq!(starts, vec![1, 4]);
        assert_eq!(lines, vec![Some(0), None, Some(6)]);
        assert_eq!(total, 7);
    }
}
