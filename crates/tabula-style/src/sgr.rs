#![forbid(unsafe_code)]

//! SGR parameter encoding shared by [`TextStyle::paint`](crate::TextStyle::paint)
//! and the line serializer.

use std::fmt::Write as _;

use smallvec::SmallVec;

use crate::color::Color;
use crate::style::Attributes;

/// Parameter buffer for one CSI group.
pub type Params = SmallVec<[u16; 8]>;

pub const RESET_INTENSITY: u16 = 22;
pub const FG_DEFAULT: u16 = 39;
pub const BG_DEFAULT: u16 = 49;

/// Attribute flags paired with their enable and disable codes.
///
/// Bold and dim both disable with 22.
pub const ATTRIBUTE_CODES: [(Attributes, u16, u16); 6] = [
    (Attributes::BOLD, 1, RESET_INTENSITY),
    (Attributes::DIM, 2, RESET_INTENSITY),
    (Attributes::ITALIC, 3, 23),
    (Attributes::UNDERLINE, 4, 24),
    (Attributes::INVERSE, 7, 27),
    (Attributes::STRIKETHROUGH, 9, 29),
];

/// Push the enable codes for every flag in `attributes`.
pub fn push_attributes_on(params: &mut Params, attributes: Attributes) {
    for (flag, on, _) in ATTRIBUTE_CODES {
        if attributes.contains(flag) {
            params.push(on);
        }
    }
}

/// Push the disable codes for every flag in `attributes`, emitting 22 once.
pub fn push_attributes_off(params: &mut Params, attributes: Attributes) {
    if attributes.intersects(Attributes::BOLD | Attributes::DIM) {
        params.push(RESET_INTENSITY);
    }
    for (flag, _, off) in &ATTRIBUTE_CODES[2..] {
        if attributes.contains(*flag) {
            params.push(*off);
        }
    }
}

/// Push the codes selecting `color` as foreground or background.
///
/// Colors outside the 16/256 palettes are written as 24-bit RGB.
pub fn push_color(params: &mut Params, color: &Color, background: bool) {
    let extended = if background { 48 } else { 38 };
    match *color {
        Color::Ansi16(c) => params.push(u16::from(if background { c.bg_code() } else { c.fg_code() })),
        Color::Ansi256(i) => params.extend_from_slice(&[extended, 5, u16::from(i)]),
        _ => {
            let rgb = color.to_rgb();
            params.extend_from_slice(&[
                extended,
                2,
                u16::from(rgb.r),
                u16::from(rgb.g),
                u16::from(rgb.b),
            ]);
        }
    }
}

/// Write `ESC [ p1 ; p2 … m`. Writes nothing for an empty buffer.
pub fn write_csi(out: &mut String, params: &[u16]) {
    if params.is_empty() {
        return;
    }
    out.push_str("\x1b[");
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        let _ = write!(out, "{p}");
    }
    out.push('m');
}

/// Write an OSC 8 hyperlink opener.
pub fn write_link_open(out: &mut String, destination: &str) {
    out.push_str("\x1b]8;;");
    out.push_str(destination);
    out.push_str("\x1b\\");
}

/// Write an OSC 8 hyperlink terminator.
pub fn write_link_close(out: &mut String) {
    out.push_str("\x1b]8;;\x1b\\");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Ansi16;

    fn csi(params: &Params) -> String {
        let mut s = String::new();
        write_csi(&mut s, params);
        s
    }

    #[test]
    fn color_codes() {
        let mut p = Params::new();
        push_color(&mut p, &Color::Ansi16(Ansi16::BrightCyan), false);
        push_color(&mut p, &Color::Ansi16(Ansi16::Red), true);
        push_color(&mut p, &Color::Ansi256(200), false);
        push_color(&mut p, &Color::rgb(1, 2, 3), true);
        assert_eq!(csi(&p), "\x1b[96;41;38;5;200;48;2;1;2;3m");
    }

    #[test]
    fn intensity_reset_is_shared() {
        let mut p = Params::new();
        push_attributes_off(&mut p, Attributes::BOLD | Attributes::DIM | Attributes::ITALIC);
        assert_eq!(p.as_slice(), &[22, 23]);
    }

    #[test]
    fn empty_params_write_nothing() {
        assert_eq!(csi(&Params::new()), "");
    }
}
