#![forbid(unsafe_code)]

//! The closed set of built-in widgets plus an extension point.

use std::fmt;
use std::sync::Arc;

use tabula_text::Lines;

use crate::context::RenderContext;
use crate::measurable::{Render, WidthRange};
use crate::panel::Panel;
use crate::rule::HorizontalRule;
use crate::stack::VerticalLayout;
use crate::table::Table;
use crate::text::Text;

/// Any renderable widget.
///
/// Built-in widgets are variants; anything else implements [`Render`] and is
/// wrapped in [`Widget::Custom`]. Cloning a custom widget shares it.
#[derive(Clone)]
pub enum Widget {
    Text(Text),
    Panel(Box<Panel>),
    Table(Box<Table>),
    Rule(HorizontalRule),
    VerticalLayout(VerticalLayout),
    Custom(Arc<dyn Render + Send + Sync>),
}

impl Widget {
    /// Wrap a user-defined renderable.
    pub fn custom(widget: impl Render + Send + Sync + 'static) -> Self {
        Widget::Custom(Arc::new(widget))
    }

    fn as_render(&self) -> &dyn Render {
        match self {
            Widget::Text(w) => w,
            Widget::Panel(w) => w.as_ref(),
            Widget::Table(w) => w.as_ref(),
            Widget::Rule(w) => w,
            Widget::VerticalLayout(w) => w,
            Widget::Custom(w) => w.as_ref(),
        }
    }
}

impl Render for Widget {
    fn measure(&self, ctx: &RenderContext<'_>, width: usize) -> WidthRange {
        self.as_render().measure(ctx, width)
    }

    fn render(&self, ctx: &RenderContext<'_>, width: usize) -> Lines {
        self.as_render().render(ctx, width)
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Widget::Text(w) => f.debug_tuple("Text").field(w).finish(),
            Widget::Panel(w) => f.debug_tuple("Panel").field(w).finish(),
            Widget::Table(w) => f.debug_tuple("Table").field(w).finish(),
            Widget::Rule(w) => f.debug_tuple("Rule").field(w).finish(),
            Widget::VerticalLayout(w) => f.debug_tuple("VerticalLayout").field(w).finish(),
            Widget::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<Text> for Widget {
    fn from(value: Text) -> Self {
        Widget::Text(value)
    }
}

impl From<Panel> for Widget {
    fn from(value: Panel) -> Self {
        Widget::Panel(Box::new(value))
    }
}

impl From<Table> for Widget {
    fn from(value: Table) -> Self {
        Widget::Table(Box::new(value))
    }
}

impl From<HorizontalRule> for Widget {
    fn from(value: HorizontalRule) -> Self {
        Widget::Rule(value)
    }
}

impl From<VerticalLayout> for Widget {
    fn from(value: VerticalLayout) -> Self {
        Widget::VerticalLayout(value)
    }
}

impl From<&str> for Widget {
    fn from(value: &str) -> Self {
        Widget::Text(Text::new(value))
    }
}

impl From<String> for Widget {
    fn from(value: String) -> Self {
        Widget::Text(Text::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::TerminalInfo;
    use tabula_style::Theme;
    use tabula_text::Line;

    struct Dots;

    impl Render for Dots {
        fn measure(&self, _ctx: &RenderContext<'_>, _width: usize) -> WidthRange {
            WidthRange::new(1, 3)
        }

        fn render(&self, _ctx: &RenderContext<'_>, width: usize) -> Lines {
            Lines::from_lines([Line::raw(".".repeat(width.min(3)))])
        }
    }

    #[test]
    fn custom_widgets_delegate() {
        let theme = Theme::default();
        let terminal = TerminalInfo::default();
        let ctx = RenderContext::new(&theme, &terminal);
        let w = Widget::custom(Dots);
        assert_eq!(w.measure(&ctx, 10), WidthRange::new(1, 3));
        assert_eq!(w.render(&ctx, 2).plain_text(), "..");
        assert_eq!(format!("{w:?}"), "Custom(..)");
        let copy = w.clone();
        assert_eq!(copy.render(&ctx, 10).plain_text(), "...");
    }

    #[test]
    fn strings_become_text() {
        let theme = Theme::default();
        let terminal = TerminalInfo::default();
        let ctx = RenderContext::new(&theme, &terminal);
        let w = Widget::from("a b");
        assert!(matches!(w, Widget::Text(_)));
        assert_eq!(w.render(&ctx, 1).plain_text(), "a\nb");
    }

    #[test]
    fn widgets_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Widget>();
    }
}
