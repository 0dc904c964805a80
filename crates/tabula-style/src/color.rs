#![forbid(unsafe_code)]

//! Color representations, conversions, and downsampling.
//!
//! Every representation converts to [`Rgb`], which is the hub for all other
//! conversions. Downsampling to a palette picks the entry with the smallest
//! sum of squared channel differences.

use tabula_core::{AnsiLevel, Error, Result};

/// The 16 base and bright terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ansi16 {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Ansi16 {
    /// All colors in palette index order.
    pub const ALL: [Ansi16; 16] = [
        Ansi16::Black,
        Ansi16::Red,
        Ansi16::Green,
        Ansi16::Yellow,
        Ansi16::Blue,
        Ansi16::Magenta,
        Ansi16::Cyan,
        Ansi16::White,
        Ansi16::BrightBlack,
        Ansi16::BrightRed,
        Ansi16::BrightGreen,
        Ansi16::BrightYellow,
        Ansi16::BrightBlue,
        Ansi16::BrightMagenta,
        Ansi16::BrightCyan,
        Ansi16::BrightWhite,
    ];

    /// Palette index in `0..16`.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Look up a color by palette index.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 16 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// SGR foreground code (`30..=37` or `90..=97`).
    #[inline]
    pub const fn fg_code(self) -> u8 {
        let i = self.index();
        if i < 8 { 30 + i } else { 90 + i - 8 }
    }

    /// SGR background code (`40..=47` or `100..=107`).
    #[inline]
    pub const fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }

    /// Look up a color by its SGR foreground code.
    pub const fn from_fg_code(code: u8) -> Option<Self> {
        match code {
            30..=37 => Self::from_index(code - 30),
            90..=97 => Self::from_index(code - 90 + 8),
            _ => None,
        }
    }

    /// Reference RGB value of this palette entry.
    pub const fn to_rgb(self) -> Rgb {
        let i = self.index();
        match i {
            0 => Rgb::new(0, 0, 0),
            7 => Rgb::new(192, 192, 192),
            8 => Rgb::new(128, 128, 128),
            15 => Rgb::new(255, 255, 255),
            _ => {
                let level = if i < 8 { 128 } else { 255 };
                let bits = i % 8;
                Rgb::new(
                    (bits & 1) * level,
                    ((bits >> 1) & 1) * level,
                    ((bits >> 2) & 1) * level,
                )
            }
        }
    }
}

/// A 24-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `"#rrggbb"` or `"rrggbb"`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::invalid_argument(format!(
                "expected a color in the form \"#rrggbb\", got {hex:?}"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| Error::invalid_argument(format!("invalid hex color {hex:?}")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Sum of squared channel differences.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let d = |a: u8, b: u8| {
            let d = i32::from(a) - i32::from(b);
            (d * d) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }

    fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Channel steps of the 6x6x6 color cube in the 256-color palette.
pub const CUBE_STEPS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// RGB value of an entry in the xterm 256-color palette.
pub const fn ansi256_to_rgb(index: u8) -> Rgb {
    match index {
        0..=15 => match Ansi16::from_index(index) {
            Some(c) => c.to_rgb(),
            None => Rgb::new(0, 0, 0),
        },
        16..=231 => {
            let i = index - 16;
            Rgb::new(
                CUBE_STEPS[(i / 36) as usize],
                CUBE_STEPS[((i / 6) % 6) as usize],
                CUBE_STEPS[(i % 6) as usize],
            )
        }
        _ => {
            let v = 8 + (index - 232) * 10;
            Rgb::new(v, v, v)
        }
    }
}

/// A color in any supported representation.
///
/// Component ranges: HSL/HSV hue in degrees `[0, 360]`, other HSL/HSV/CMYK
/// components in `[0, 100]`. XYZ components are nominally `[0, 100]`; LAB
/// lightness is `[0, 100]` with unbounded `a`/`b`. Both use a D65 white point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    Ansi16(Ansi16),
    Ansi256(u8),
    Rgb(Rgb),
    Hsl { h: f64, s: f64, l: f64 },
    Hsv { h: f64, s: f64, v: f64 },
    Cmyk { c: f64, m: f64, y: f64, k: f64 },
    Xyz { x: f64, y: f64, z: f64 },
    Lab { l: f64, a: f64, b: f64 },
}

impl Color {
    /// An RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// An RGB color from `"#rrggbb"`.
    pub fn hex(hex: &str) -> Result<Self> {
        Rgb::from_hex(hex).map(Self::Rgb)
    }

    /// An HSL color; fails if a component is out of range.
    pub fn hsl(h: f64, s: f64, l: f64) -> Result<Self> {
        check_range("hue", h, 360.0)?;
        check_range("saturation", s, 100.0)?;
        check_range("lightness", l, 100.0)?;
        Ok(Self::Hsl { h, s, l })
    }

    /// An HSV color; fails if a component is out of range.
    pub fn hsv(h: f64, s: f64, v: f64) -> Result<Self> {
        check_range("hue", h, 360.0)?;
        check_range("saturation", s, 100.0)?;
        check_range("value", v, 100.0)?;
        Ok(Self::Hsv { h, s, v })
    }

    /// A CMYK color; fails if a component is out of range.
    pub fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Result<Self> {
        check_range("cyan", c, 100.0)?;
        check_range("magenta", m, 100.0)?;
        check_range("yellow", y, 100.0)?;
        check_range("black", k, 100.0)?;
        Ok(Self::Cmyk { c, m, y, k })
    }

    /// A CIE XYZ color. Components must be finite.
    pub fn xyz(x: f64, y: f64, z: f64) -> Result<Self> {
        check_finite(&[x, y, z])?;
        Ok(Self::Xyz { x, y, z })
    }

    /// A CIE LAB color. Components must be finite.
    pub fn lab(l: f64, a: f64, b: f64) -> Result<Self> {
        check_finite(&[l, a, b])?;
        Ok(Self::Lab { l, a, b })
    }

    /// A gray of the given fraction of white, `0.0` black to `1.0` white.
    pub fn gray(fraction: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::invalid_argument(format!(
                "fraction must be in the range [0, 1], got {fraction}"
            )));
        }
        let v = (255.0 * fraction).round() as u8;
        Ok(Self::rgb(v, v, v))
    }

    /// Convert to sRGB.
    pub fn to_rgb(&self) -> Rgb {
        match *self {
            Color::Ansi16(c) => c.to_rgb(),
            Color::Ansi256(i) => ansi256_to_rgb(i),
            Color::Rgb(rgb) => rgb,
            Color::Hsl { h, s, l } => hsl_to_rgb(h, s / 100.0, l / 100.0),
            Color::Hsv { h, s, v } => hsv_to_rgb(h, s / 100.0, v / 100.0),
            Color::Cmyk { c, m, y, k } => {
                let (c, m, y, k) = (c / 100.0, m / 100.0, y / 100.0, k / 100.0);
                Rgb::from_unit((1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k))
            }
            Color::Xyz { x, y, z } => xyz_to_rgb(x, y, z),
            Color::Lab { l, a, b } => {
                let (x, y, z) = lab_to_xyz(l, a, b);
                xyz_to_rgb(x, y, z)
            }
        }
    }

    /// Nearest of the 16 base colors.
    pub fn to_ansi16(&self) -> Ansi16 {
        if let Color::Ansi16(c) = *self {
            return c;
        }
        let rgb = self.to_rgb();
        let mut best = Ansi16::Black;
        let mut best_distance = u32::MAX;
        for candidate in Ansi16::ALL {
            let d = rgb.distance_squared(candidate.to_rgb());
            if d < best_distance {
                best = candidate;
                best_distance = d;
            }
        }
        best
    }

    /// Nearest entry of the 256-color palette.
    ///
    /// The cube and gray ramp are searched before the 16 base colors, so an
    /// exact cube match wins a tie with a base color.
    pub fn to_ansi256(&self) -> u8 {
        match *self {
            Color::Ansi256(i) => i,
            Color::Ansi16(c) => c.index(),
            _ => {
                let rgb = self.to_rgb();
                let mut best = 16u8;
                let mut best_distance = u32::MAX;
                for index in (16..=255u8).chain(0..16u8) {
                    let d = rgb.distance_squared(ansi256_to_rgb(index));
                    if d < best_distance {
                        best = index;
                        best_distance = d;
                        if d == 0 {
                            break;
                        }
                    }
                }
                best
            }
        }
    }

    /// Convert this color for a terminal of the given capability.
    ///
    /// Returns `None` at [`AnsiLevel::None`].
    pub fn downsample(&self, level: AnsiLevel) -> Option<Color> {
        match level {
            AnsiLevel::None => None,
            AnsiLevel::Ansi16 => Some(Color::Ansi16(self.to_ansi16())),
            AnsiLevel::Ansi256 => match *self {
                Color::Ansi16(_) | Color::Ansi256(_) => Some(*self),
                _ => Some(Color::Ansi256(self.to_ansi256())),
            },
            AnsiLevel::TrueColor => Some(*self),
        }
    }
}

impl From<Ansi16> for Color {
    fn from(value: Ansi16) -> Self {
        Color::Ansi16(value)
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Self {
        Color::Rgb(value)
    }
}

fn check_range(name: &str, value: f64, max: f64) -> Result<()> {
    if (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!(
            "{name} must be in the range [0, {max}], got {value}"
        )))
    }
}

fn check_finite(values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(Error::invalid_argument("color components must be finite"))
    }
}

#[inline]
fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn hue_sector(h: f64, c: f64) -> (f64, f64, f64) {
    let h = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    match h as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let (r, g, b) = hue_sector(h, c);
    let m = l - c / 2.0;
    Rgb::from_unit(r + m, g + m, b + m)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let c = v * s;
    let (r, g, b) = hue_sector(h, c);
    let m = v - c;
    Rgb::from_unit(r + m, g + m, b + m)
}

/// D65 reference white.
const WHITE_X: f64 = 95.047;
const WHITE_Y: f64 = 100.0;
const WHITE_Z: f64 = 108.883;

fn srgb_companding(linear: f64) -> f64 {
    if linear <= 0.003_130_8 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

fn xyz_to_rgb(x: f64, y: f64, z: f64) -> Rgb {
    let (x, y, z) = (x / 100.0, y / 100.0, z / 100.0);
    let r = 3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z;
    let g = -0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z;
    let b = 0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z;
    Rgb::from_unit(srgb_companding(r), srgb_companding(g), srgb_companding(b))
}

fn lab_to_xyz(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
    const EPSILON: f64 = 216.0 / 24389.0;
    const KAPPA: f64 = 24389.0 / 27.0;

    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    let fx3 = fx * fx * fx;
    let fz3 = fz * fz * fz;
    let xr = if fx3 > EPSILON { fx3 } else { (116.0 * fx - 16.0) / KAPPA };
    let yr = if l > KAPPA * EPSILON { fy * fy * fy } else { l / KAPPA };
    let zr = if fz3 > EPSILON { fz3 } else { (116.0 * fz - 16.0) / KAPPA };

    (xr * WHITE_X, yr * WHITE_Y, zr * WHITE_Z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi16_codes_round_trip() {
        for c in Ansi16::ALL {
            assert_eq!(Ansi16::from_fg_code(c.fg_code()), Some(c));
            assert_eq!(c.bg_code(), c.fg_code() + 10);
        }
        assert_eq!(Ansi16::Red.fg_code(), 31);
        assert_eq!(Ansi16::BrightBlack.fg_code(), 90);
        assert_eq!(Ansi16::from_fg_code(38), None);
    }

    #[test]
    fn ansi16_reference_palette() {
        assert_eq!(Ansi16::Red.to_rgb(), Rgb::new(128, 0, 0));
        assert_eq!(Ansi16::Cyan.to_rgb(), Rgb::new(0, 128, 128));
        assert_eq!(Ansi16::White.to_rgb(), Rgb::new(192, 192, 192));
        assert_eq!(Ansi16::BrightBlack.to_rgb(), Rgb::new(128, 128, 128));
        assert_eq!(Ansi16::BrightYellow.to_rgb(), Rgb::new(255, 255, 0));
    }

    #[test]
    fn palette_256_layout() {
        assert_eq!(ansi256_to_rgb(16), Rgb::new(0, 0, 0));
        assert_eq!(ansi256_to_rgb(196), Rgb::new(255, 0, 0));
        assert_eq!(ansi256_to_rgb(21), Rgb::new(0, 0, 255));
        assert_eq!(ansi256_to_rgb(232), Rgb::new(8, 8, 8));
        assert_eq!(ansi256_to_rgb(255), Rgb::new(238, 238, 238));
        assert_eq!(ansi256_to_rgb(9), Rgb::new(255, 0, 0));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_hex("00ff00").unwrap(), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::new(1, 2, 255).to_hex(), "#0102ff");
        assert!(matches!(Rgb::from_hex("#fff"), Err(Error::InvalidArgument(_))));
        assert!(matches!(Rgb::from_hex("#gg0000"), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn hsl_and_hsv_primaries() {
        assert_eq!(Color::hsl(0.0, 100.0, 50.0).unwrap().to_rgb(), Rgb::new(255, 0, 0));
        assert_eq!(Color::hsl(120.0, 100.0, 50.0).unwrap().to_rgb(), Rgb::new(0, 255, 0));
        assert_eq!(Color::hsl(240.0, 100.0, 25.0).unwrap().to_rgb(), Rgb::new(0, 0, 128));
        assert_eq!(Color::hsv(60.0, 100.0, 100.0).unwrap().to_rgb(), Rgb::new(255, 255, 0));
        assert_eq!(Color::hsv(0.0, 0.0, 50.0).unwrap().to_rgb(), Rgb::new(128, 128, 128));
    }

    #[test]
    fn cmyk_conversion() {
        assert_eq!(Color::cmyk(0.0, 100.0, 100.0, 0.0).unwrap().to_rgb(), Rgb::new(255, 0, 0));
        assert_eq!(Color::cmyk(0.0, 0.0, 0.0, 100.0).unwrap().to_rgb(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn xyz_and_lab_white_and_black() {
        let white = Color::xyz(WHITE_X, WHITE_Y, WHITE_Z).unwrap().to_rgb();
        assert_eq!(white, Rgb::new(255, 255, 255));
        assert_eq!(Color::lab(100.0, 0.0, 0.0).unwrap().to_rgb(), Rgb::new(255, 255, 255));
        assert_eq!(Color::lab(0.0, 0.0, 0.0).unwrap().to_rgb(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn lab_red_is_close_to_srgb_red() {
        let rgb = Color::lab(53.24, 80.09, 67.20).unwrap().to_rgb();
        assert!(rgb.distance_squared(Rgb::new(255, 0, 0)) <= 12, "{rgb:?}");
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        assert!(Color::hsl(361.0, 0.0, 0.0).is_err());
        assert!(Color::hsv(0.0, -1.0, 0.0).is_err());
        assert!(Color::cmyk(0.0, 0.0, 0.0, 101.0).is_err());
        assert!(Color::lab(f64::NAN, 0.0, 0.0).is_err());
        assert!(Color::xyz(0.0, f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn gray_fraction() {
        assert_eq!(Color::gray(0.0).unwrap(), Color::rgb(0, 0, 0));
        assert_eq!(Color::gray(1.0).unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(Color::gray(0.5).unwrap(), Color::rgb(128, 128, 128));
        assert!(matches!(Color::gray(1.5), Err(Error::InvalidArgument(_))));
        assert!(matches!(Color::gray(-0.1), Err(Error::InvalidArgument(_))));
        assert!(Color::gray(f64::NAN).is_err());
    }

    #[test]
    fn nearest_ansi16() {
        assert_eq!(Color::rgb(255, 0, 0).to_ansi16(), Ansi16::BrightRed);
        assert_eq!(Color::rgb(120, 10, 10).to_ansi16(), Ansi16::Red);
        assert_eq!(Color::rgb(250, 250, 250).to_ansi16(), Ansi16::BrightWhite);
        assert_eq!(Color::Ansi256(21).to_ansi16(), Ansi16::BrightBlue);
    }

    #[test]
    fn nearest_ansi256_prefers_cube_and_ramp() {
        assert_eq!(Color::rgb(255, 0, 0).to_ansi256(), 196);
        assert_eq!(Color::rgb(0, 0, 0).to_ansi256(), 16);
        assert_eq!(Color::rgb(100, 100, 100).to_ansi256(), 241);
        assert_eq!(Color::rgb(96, 134, 176).to_ansi256(), 67);
        assert_eq!(Color::Ansi16(Ansi16::Green).to_ansi256(), 2);
    }

    #[test]
    fn downsample_levels() {
        let c = Color::hsl(200.0, 50.0, 50.0).unwrap();
        assert_eq!(c.downsample(AnsiLevel::TrueColor), Some(c));
        assert_eq!(c.downsample(AnsiLevel::None), None);
        assert!(matches!(c.downsample(AnsiLevel::Ansi256), Some(Color::Ansi256(_))));
        assert!(matches!(c.downsample(AnsiLevel::Ansi16), Some(Color::Ansi16(_))));

        let named = Color::Ansi16(Ansi16::Magenta);
        assert_eq!(named.downsample(AnsiLevel::Ansi256), Some(named));
        let indexed = Color::Ansi256(200);
        assert_eq!(indexed.downsample(AnsiLevel::Ansi256), Some(indexed));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn truecolor_downsample_is_identity(r: u8, g: u8, b: u8) {
                let c = Color::rgb(r, g, b);
                prop_assert_eq!(c.downsample(AnsiLevel::TrueColor), Some(c));
            }

            #[test]
            fn ansi256_match_is_no_worse_than_ansi16(r: u8, g: u8, b: u8) {
                let rgb = Rgb::new(r, g, b);
                let c = Color::Rgb(rgb);
                let d256 = rgb.distance_squared(ansi256_to_rgb(c.to_ansi256()));
                let d16 = rgb.distance_squared(c.to_ansi16().to_rgb());
                prop_assert!(d256 <= d16);
            }

            #[test]
            fn palette_entries_map_to_themselves(index in 16u8..=255) {
                let c = Color::Rgb(ansi256_to_rgb(index));
                prop_assert_eq!(ansi256_to_rgb(c.to_ansi256()), ansi256_to_rgb(index));
            }
        }
    }
}
