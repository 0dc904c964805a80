#![forbid(unsafe_code)]

//! Geometric primitives.

/// Spacing on each side of a block of content, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

impl Padding {
    /// Create padding with specific values, clockwise from the top.
    pub const fn new(top: usize, right: usize, bottom: usize, left: usize) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Equal padding on all four sides.
    pub const fn all(val: usize) -> Self {
        Self::new(val, val, val, val)
    }

    /// No padding.
    pub const fn none() -> Self {
        Self::all(0)
    }

    /// Padding on the left and right only.
    pub const fn horizontal(val: usize) -> Self {
        Self::new(0, val, 0, val)
    }

    /// Padding on the top and bottom only.
    pub const fn vertical(val: usize) -> Self {
        Self::new(val, 0, val, 0)
    }

    /// Combined left and right padding.
    #[inline]
    pub const fn horizontal_total(&self) -> usize {
        self.left + self.right
    }

    /// Combined top and bottom padding.
    #[inline]
    pub const fn vertical_total(&self) -> usize {
        self.top + self.bottom
    }

    /// True when every side is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.top == 0 && self.right == 0 && self.bottom == 0 && self.left == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals() {
        let p = Padding::new(1, 2, 3, 4);
        assert_eq!(p.horizontal_total(), 6);
        assert_eq!(p.vertical_total(), 4);
        assert!(!p.is_empty());
        assert!(Padding::none().is_empty());
    }

    #[test]
    fn shorthand_constructors() {
        assert_eq!(Padding::horizontal(1), Padding::new(0, 1, 0, 1));
        assert_eq!(Padding::vertical(2), Padding::new(2, 0, 2, 0));
        assert_eq!(Padding::all(3), Padding::new(3, 3, 3, 3));
        assert_eq!(Padding::default(), Padding::none());
    }
}
