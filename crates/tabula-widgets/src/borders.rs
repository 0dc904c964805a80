#![forbid(unsafe_code)]

//! Which edges of a table cell request a border.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Borders: u8 {
        const TOP    = 0b0001;
        const RIGHT  = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT   = 0b1000;
    }
}

impl Borders {
    pub const NONE: Borders = Borders::empty();
    pub const ALL: Borders = Borders::all();
    pub const LEFT_RIGHT: Borders = Borders::LEFT.union(Borders::RIGHT);
    pub const TOP_BOTTOM: Borders = Borders::TOP.union(Borders::BOTTOM);
}
