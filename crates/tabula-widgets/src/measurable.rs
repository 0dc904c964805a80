#![forbid(unsafe_code)]

//! The rendering contract shared by all widgets.
//!
//! Layout is two-phase. A container first asks each child for its
//! [`WidthRange`], decides how many columns to give it, and then asks it to
//! render at exactly that width. Widgets never see more than the width they
//! are handed, so the result of a render depends only on the widget, the
//! [`RenderContext`], and the width.
//!
//! # Invariants
//!
//! 1. `min <= max` for every range returned by [`Render::measure`].
//! 2. No rendered line is wider than the requested width, except when the
//!    widget cannot shrink below its own minimum (tables with wide fixed
//!    columns, for example). Such overflow is clipped by the parent.
//! 3. A width of zero never panics; widgets degrade to empty or blank lines.
//! 4. Rendering is deterministic: equal inputs produce equal lines.

use tabula_text::Lines;

use crate::context::RenderContext;

/// The narrowest and widest useful widths of a widget, in cells.
///
/// `min` is the width below which content must be clipped (typically the
/// longest unbreakable word plus chrome); `max` is the width at which
/// nothing needs to wrap. Widths above `max` add only padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WidthRange {
    pub min: usize,
    pub max: usize,
}

impl WidthRange {
    pub const ZERO: Self = Self { min: 0, max: 0 };

    /// A range with `min` raised to at most `max`.
    #[inline]
    pub const fn new(min: usize, max: usize) -> Self {
        if min > max {
            Self { min: max, max }
        } else {
            Self { min, max }
        }
    }

    /// A range where both ends are `width`.
    #[inline]
    pub const fn exact(width: usize) -> Self {
        Self {
            min: width,
            max: width,
        }
    }

    /// Add `amount` to both ends, for borders and padding around content.
    #[inline]
    #[must_use]
    pub const fn plus(self, amount: usize) -> Self {
        Self {
            min: self.min + amount,
            max: self.max + amount,
        }
    }

    /// The range that satisfies both `self` and `other` side by side in a
    /// vertical stack: each end is the larger of the two.
    #[inline]
    #[must_use]
    pub fn union(self, other: WidthRange) -> Self {
        Self {
            min: self.min.max(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Something that can be measured and rendered to lines.
pub trait Render {
    /// Report the range of widths this widget can use when at most `width`
    /// columns are available.
    fn measure(&self, ctx: &RenderContext<'_>, width: usize) -> WidthRange;

    /// Render at `width` columns.
    fn render(&self, ctx: &RenderContext<'_>, width: usize) -> Lines;
}
