#![forbid(unsafe_code)]

//! Widgets for tabula.
//!
//! Every widget implements [`Render`]: it reports the range of widths it can
//! use and renders itself to [`Lines`](tabula_text::Lines) at a given width.
//! Composite widgets ([`Panel`], [`VerticalLayout`], [`Table`]) render their
//! children and combine the results.
//!
//! ```
//! use tabula_style::Theme;
//! use tabula_core::TerminalInfo;
//! use tabula_widgets::{Render, RenderContext, table};
//!
//! let t = table(|t| {
//!     t.body(|b| {
//!         b.row(["1", "2"]);
//!     });
//! })
//! .unwrap();
//! let theme = Theme::default();
//! let terminal = TerminalInfo::default();
//! let ctx = RenderContext::new(&theme, &terminal);
//! assert_eq!(
//!     t.render(&ctx, 79).plain_text(),
//!     "┌───┬───┐\n│ 1 │ 2 │\n└───┴───┘"
//! );
//! ```

pub mod borders;
pub mod context;
pub mod measurable;
pub mod panel;
pub mod rule;
pub mod stack;
pub mod table;
pub mod text;
pub mod widget;

pub use borders::Borders;
pub use context::RenderContext;
pub use measurable::{Render, WidthRange};
pub use panel::Panel;
pub use rule::HorizontalRule;
pub use stack::{VerticalLayout, WidgetBuilder, build_widget};
pub use table::{
    CellBuilder, CellContent, CellStyleBuilder, ColumnBuilder, ColumnWidth, RowBuilder,
    MAX_COLUMNS, SectionBuilder, Table, TableBuilder, table,
};
pub use text::Text;
pub use widget::Widget;
