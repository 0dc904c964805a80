#![forbid(unsafe_code)]

//! Drawing a sized table onto a canvas.

use tabula_render::{Arms, Canvas, Draw};
use tabula_style::theme::keys;
use tabula_text::Lines;

use super::Table;
use super::layout::Geometry;
use crate::context::RenderContext;
use crate::measurable::Render;

impl Table {
    pub(super) fn draw(&self, ctx: &RenderContext<'_>, width: usize) -> Lines {
        let column_widths = {
            let _span = tracing::debug_span!("table_layout", phase = "columns").entered();
            self.resolve_column_widths(ctx, width)
        };
        let probe = Geometry::new(self, column_widths, Vec::new());

        let mut contents = Vec::with_capacity(self.cells.len());
        let mut heights = Vec::with_capacity(self.cells.len());
        {
            let _span = tracing::debug_span!("table_layout", phase = "rows").entered();
            for cell in &self.cells {
                let (_, area_width) =
                    probe.horizontal_extent(cell.column..cell.column + cell.column_span);
                let content_width = area_width.saturating_sub(cell.padding.horizontal_total());
                let lines = cell.content.render(ctx, content_width);
                heights.push(lines.height() + cell.padding.vertical_total());
                contents.push(lines);
            }
        }
        let row_heights = self.resolve_row_heights(&heights);
        let geometry = Geometry::new(self, probe.column_widths, row_heights);

        let mut canvas = Canvas::new(geometry.width, geometry.height);
        for (cell, mut lines) in self.cells.iter().zip(contents) {
            let (x, w) = geometry.horizontal_extent(cell.column..cell.column + cell.column_span);
            let (y, h) = geometry.vertical_extent(cell.row..cell.row + cell.row_span);
            if !cell.style.is_plain() {
                canvas.fill_rect(x, y, w, h, &cell.style);
            }
            let content_width = w.saturating_sub(cell.padding.horizontal_total());
            let content_height = h.saturating_sub(cell.padding.vertical_total());
            lines.set_size(content_width, content_height, cell.vertical_align, cell.align);
            let lines = lines.with_base_style(&cell.style);
            canvas.blit(
                x + cell.padding.left,
                y + cell.padding.top,
                content_width,
                content_height,
                &lines,
            );
        }
        self.draw_borders(ctx, &geometry, &mut canvas);
        canvas.into_lines()
    }

    fn draw_borders(&self, ctx: &RenderContext<'_>, geometry: &Geometry, canvas: &mut Canvas) {
        let style = self
            .border_text_style
            .clone()
            .unwrap_or_else(|| ctx.theme.style_or_default(keys::TABLE_BORDER));
        let rows = geometry.row_heights.len();
        let columns = geometry.column_widths.len();

        for (line, y) in geometry.row_line_y.iter().enumerate() {
            let Some(y) = *y else { continue };
            let glyph = self.border_style.glyph(self.line_kind(line), Arms::HORIZONTAL);
            for c in 0..columns {
                if self.borders.horizontal(line, c) {
                    canvas.draw_horizontal_line(
                        geometry.column_x[c],
                        y,
                        geometry.column_widths[c],
                        glyph,
                        &style,
                    );
                }
            }
        }

        for (line, x) in geometry.column_line_x.iter().enumerate() {
            let Some(x) = *x else { continue };
            for r in 0..rows {
                if self.borders.vertical(r, line) {
                    let glyph = self.border_style.glyph(self.row_kind(r), Arms::VERTICAL);
                    canvas.draw_vertical_line(x, geometry.row_y[r], geometry.row_heights[r], glyph, &style);
                }
            }
        }

        for (row_line, y) in geometry.row_line_y.iter().enumerate() {
            let Some(y) = *y else { continue };
            let kind = self.line_kind(row_line);
            for (column_line, x) in geometry.column_line_x.iter().enumerate() {
                let Some(x) = *x else { continue };
                let arms = self.borders.arms(row_line, column_line);
                if !arms.is_empty() {
                    canvas.set(x, y, self.border_style.glyph(kind, arms), &style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::borders::Borders;
    use crate::context::RenderContext;
    use crate::measurable::Render;
    use crate::table::{CellStyleBuilder, ColumnWidth, TableBuilder, table};
    use tabula_core::{Padding, TerminalInfo};
    use tabula_style::Theme;
    use tabula_text::TextAlign;

    fn render(f: impl FnOnce(&mut TableBuilder), width: usize) -> String {
        let theme = Theme::default();
        let terminal = TerminalInfo::default();
        table(f)
            .unwrap()
            .render(&RenderContext::new(&theme, &terminal), width)
            .plain_text()
    }

    #[test]
    fn simple_grid() {
        let out = render(
            |t| {
                t.body(|b| {
                    b.row(["a", "bb"]).row(["ccc", "d"]);
                });
            },
            79,
        );
        assert_eq!(out, "┌─────┬────┐\n│ a   │ bb │\n├─────┼────┤\n│ ccc │ d  │\n└─────┴────┘");
    }

    #[test]
    fn fixed_column_wraps_content() {
        let out = render(
            |t| {
                t.column(0, |c| {
                    c.width(ColumnWidth::Fixed(4));
                });
                t.padding(Padding::none());
                t.body(|b| {
                    b.row(["aa bb"]);
                });
            },
            79,
        );
        assert_eq!(out, "┌────┐\n│aa  │\n│bb  │\n└────┘");
    }

    #[test]
    fn shrinks_widest_column_first() {
        let out = render(
            |t| {
                t.padding(Padding::none());
                t.body(|b| {
                    b.row(["aaa bbb", "cc"]);
                });
            },
            8,
        );
        assert_eq!(out, "┌───┬──┐\n│aaa│cc│\n│bbb│  │\n└───┴──┘");
    }

    #[test]
    fn expand_fills_width_by_weight() {
        let out = render(
            |t| {
                t.padding(Padding::none());
                t.column(1, |c| {
                    c.width(ColumnWidth::Expand(1.0));
                });
                t.body(|b| {
                    b.row(["a", "b"]);
                });
            },
            10,
        );
        assert_eq!(out, "┌─┬──────┐\n│a│b     │\n└─┴──────┘");

        let out = render(
            |t| {
                t.padding(Padding::none());
                t.expand(true);
                t.body(|b| {
                    b.row(["a", "b"]);
                });
            },
            9,
        );
        assert_eq!(out, "┌───┬───┐\n│a  │b  │\n└───┴───┘");
    }

    #[test]
    fn cell_alignment_and_vertical_alignment() {
        let out = render(
            |t| {
                t.borders(Borders::NONE);
                t.padding(Padding::none());
                t.body(|b| {
                    b.row_with(|r| {
                        r.cell_with("x", |c| {
                            c.align(TextAlign::Right).vertical_align(tabula_text::VerticalAlign::Bottom);
                        })
                        .cell("long\nword")
                        .whitespace(tabula_text::Whitespace::Pre);
                    });
                });
            },
            79,
        );
        assert_eq!(out, " long\nxword");
    }

    #[test]
    fn zero_width_does_not_panic() {
        let out = render(
            |t| {
                t.body(|b| {
                    b.row(["abc", "def"]);
                });
            },
            0,
        );
        assert!(!out.is_empty());
    }
}
