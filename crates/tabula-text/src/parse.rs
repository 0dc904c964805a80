#![forbid(unsafe_code)]

//! Decoding of escape sequences embedded in text.
//!
//! Strings produced by [`TextStyle::paint`] (or any other source of SGR and
//! OSC 8 sequences) are turned back into styled [`Span`]s. Every other
//! escape sequence and forbidden C0 control is dropped, so the resulting
//! spans contain only printable text, tabs, and newlines.
//!
//! The common case of text without any escape or control byte is detected
//! with a `memchr` scan and returned as a single span.

use memchr::memchr;
use tabula_style::{Ansi16, Color, TextStyle, sgr};

use crate::span::Span;

const ESC: u8 = 0x1B;
const BEL: u8 = 0x07;

/// Parse `text` into spans, starting from `base`.
///
/// SGR resets return to `base` rather than to the terminal default.
pub fn parse_ansi(text: &str, base: &TextStyle) -> Vec<Span> {
    if text.is_empty() {
        return Vec::new();
    }
    if is_plain(text) {
        return vec![Span::new(text, base.clone())];
    }
    parse_slow(text, base)
}

/// Parse each span's text with the span's own style as base.
pub fn parse_spans(spans: &[Span]) -> Vec<Span> {
    spans
        .iter()
        .flat_map(|s| parse_ansi(&s.text, &s.style))
        .collect()
}

/// True if `text` contains no escape sequence or forbidden control.
pub fn is_plain(text: &str) -> bool {
    let bytes = text.as_bytes();
    memchr(ESC, bytes).is_none() && memchr(0x7F, bytes).is_none() && !has_forbidden_c0(bytes)
}

#[inline]
fn has_forbidden_c0(bytes: &[u8]) -> bool {
    bytes.iter().any(|&b| is_forbidden_c0(b))
}

/// C0 controls other than TAB, LF, and CR.
#[inline]
const fn is_forbidden_c0(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1A | 0x1C..=0x1F)
}

fn parse_slow(text: &str, base: &TextStyle) -> Vec<Span> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut style = base.clone();
    let mut run = String::new();
    let mut i = 0;
    let mut plain_start = 0;

    let flush = |run: &mut String, spans: &mut Vec<Span>, style: &TextStyle| {
        if !run.is_empty() {
            spans.push(Span::new(std::mem::take(run), style.clone()));
        }
    };

    while i < bytes.len() {
        let b = bytes[i];
        if b != ESC && b != 0x7F && !is_forbidden_c0(b) {
            i += 1;
            continue;
        }
        run.push_str(&text[plain_start..i]);
        match b {
            ESC => {
                let (next, sequence) = read_escape(bytes, i);
                match sequence {
                    Sequence::Sgr(params) => {
                        let updated = apply_sgr(&style, base, params);
                        if updated != style {
                            flush(&mut run, &mut spans, &style);
                            style = updated;
                        }
                    }
                    Sequence::Hyperlink(uri) => {
                        let link = (!uri.is_empty()).then(|| uri.to_owned());
                        let link = link.or_else(|| base.hyperlink.clone());
                        if link != style.hyperlink {
                            flush(&mut run, &mut spans, &style);
                            style.hyperlink = link;
                        }
                    }
                    Sequence::Other => {
                        tracing::trace!(offset = i, "dropping escape sequence");
                    }
                }
                i = next;
            }
            _ => i += 1,
        }
        plain_start = i;
    }
    run.push_str(&text[plain_start..]);
    flush(&mut run, &mut spans, &style);
    spans
}

enum Sequence<'a> {
    Sgr(&'a [u8]),
    Hyperlink(&'a str),
    Other,
}

/// Read the escape sequence starting at `start`; returns the index after it.
fn read_escape(bytes: &[u8], start: usize) -> (usize, Sequence<'_>) {
    let mut i = start + 1;
    if i >= bytes.len() {
        return (i, Sequence::Other);
    }
    match bytes[i] {
        b'[' => {
            i += 1;
            let params_start = i;
            while i < bytes.len() {
                if let 0x40..=0x7E = bytes[i] {
                    let params = &bytes[params_start..i];
                    let sequence = if bytes[i] == b'm' {
                        Sequence::Sgr(params)
                    } else {
                        Sequence::Other
                    };
                    return (i + 1, sequence);
                }
                i += 1;
            }
            (i, Sequence::Other)
        }
        b']' => {
            i += 1;
            let payload_start = i;
            while i < bytes.len() {
                let (end, next) = if bytes[i] == BEL {
                    (i, i + 1)
                } else if bytes[i] == ESC && bytes.get(i + 1) == Some(&b'\\') {
                    (i, i + 2)
                } else {
                    i += 1;
                    continue;
                };
                let payload = std::str::from_utf8(&bytes[payload_start..end]).unwrap_or("");
                return (next, osc_hyperlink(payload));
            }
            (i, Sequence::Other)
        }
        b'P' | b'^' | b'_' => {
            i += 1;
            while i < bytes.len() {
                if bytes[i] == ESC && bytes.get(i + 1) == Some(&b'\\') {
                    return (i + 2, Sequence::Other);
                }
                i += 1;
            }
            (i, Sequence::Other)
        }
        0x20..=0x7E => (i + 1, Sequence::Other),
        _ => (i, Sequence::Other),
    }
}

/// `8;params;uri` is a hyperlink; everything else is ignored.
fn osc_hyperlink(payload: &str) -> Sequence<'_> {
    let Some(rest) = payload.strip_prefix("8;") else {
        return Sequence::Other;
    };
    match rest.split_once(';') {
        Some((_, uri)) => Sequence::Hyperlink(uri),
        None => Sequence::Other,
    }
}

fn apply_sgr(current: &TextStyle, base: &TextStyle, params: &[u8]) -> TextStyle {
    let codes: Vec<Option<u16>> = if params.is_empty() {
        vec![Some(0)]
    } else {
        params
            .split(|&b| b == b';' || b == b':')
            .map(|p| {
                if p.is_empty() {
                    Some(0)
                } else {
                    std::str::from_utf8(p).ok().and_then(|s| s.parse().ok())
                }
            })
            .collect()
    };

    let mut style = current.clone();
    let mut i = 0;
    while i < codes.len() {
        let Some(code) = codes[i] else {
            i += 1;
            continue;
        };
        match code {
            0 => {
                style = TextStyle {
                    hyperlink: style.hyperlink.take(),
                    ..base.clone()
                };
            }
            30..=37 | 90..=97 => {
                style.fg = Ansi16::from_fg_code(code as u8).map(Color::Ansi16);
            }
            40..=47 | 100..=107 => {
                style.bg = Ansi16::from_fg_code((code - 10) as u8).map(Color::Ansi16);
            }
            sgr::FG_DEFAULT => style.fg = base.fg,
            sgr::BG_DEFAULT => style.bg = base.bg,
            38 | 48 => {
                let (color, used) = extended_color(&codes[i + 1..]);
                if let Some(color) = color {
                    if code == 38 {
                        style.fg = Some(color);
                    } else {
                        style.bg = Some(color);
                    }
                }
                i += used;
            }
            _ => {
                for (flag, on, off) in sgr::ATTRIBUTE_CODES {
                    if code == on {
                        style.attributes |= flag;
                    } else if code == off {
                        style.attributes.remove(flag);
                        style.attributes |= base.attributes & flag;
                    }
                }
            }
        }
        i += 1;
    }
    style
}

/// Decode `5;n` or `2;r;g;b`; returns the color and parameters consumed.
fn extended_color(rest: &[Option<u16>]) -> (Option<Color>, usize) {
    let byte = |i: usize| rest.get(i).copied().flatten().and_then(|v| u8::try_from(v).ok());
    match rest.first().copied().flatten() {
        Some(5) => (byte(1).map(Color::Ansi256), 2),
        Some(2) => match (byte(1), byte(2), byte(3)) {
            (Some(r), Some(g), Some(b)) => (Some(Color::rgb(r, g, b)), 4),
            _ => (None, rest.len().min(4)),
        },
        _ => (None, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_style::Attributes;

    fn plain(spans: &[Span]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn fast_path_returns_one_span() {
        let spans = parse_ansi("hello\tworld\n", &TextStyle::new());
        assert_eq!(spans, vec![Span::raw("hello\tworld\n")]);
        assert!(parse_ansi("", &TextStyle::new()).is_empty());
    }

    #[test]
    fn sgr_colors_become_spans() {
        let spans = parse_ansi("a\x1b[31mb\x1b[39mc", &TextStyle::new());
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].text, "b");
        assert_eq!(spans[1].style.fg, Some(Color::Ansi16(Ansi16::Red)));
        assert_eq!(spans[2].style, TextStyle::new());
    }

    #[test]
    fn extended_colors() {
        let spans = parse_ansi("\x1b[38;5;200;48;2;1;2;3mx", &TextStyle::new());
        assert_eq!(spans[0].style.fg, Some(Color::Ansi256(200)));
        assert_eq!(spans[0].style.bg, Some(Color::rgb(1, 2, 3)));
    }

    #[test]
    fn attributes_and_shared_intensity_reset() {
        let spans = parse_ansi("\x1b[1;2;3mx\x1b[22my", &TextStyle::new());
        assert_eq!(
            spans[0].style.attributes,
            Attributes::BOLD | Attributes::DIM | Attributes::ITALIC
        );
        assert_eq!(spans[1].style.attributes, Attributes::ITALIC);
    }

    #[test]
    fn reset_returns_to_base() {
        let base = TextStyle::new().bold();
        let spans = parse_ansi("\x1b[31mx\x1b[0my\x1b[22mz", &base);
        assert_eq!(spans[0].style, base.clone().fg(Ansi16::Red));
        assert_eq!(spans[1].text, "yz");
        assert_eq!(spans[1].style, base);
    }

    #[test]
    fn hyperlinks() {
        let spans = parse_ansi("\x1b]8;;https://a.b\x1b\\link\x1b]8;;\x1b\\ after", &TextStyle::new());
        assert_eq!(spans[0].text, "link");
        assert_eq!(spans[0].style.hyperlink.as_deref(), Some("https://a.b"));
        assert_eq!(spans[1].style.hyperlink, None);

        let bel = parse_ansi("\x1b]8;id=1;x\x07y", &TextStyle::new());
        assert_eq!(bel[0].style.hyperlink.as_deref(), Some("x"));
    }

    #[test]
    fn other_sequences_are_stripped() {
        let spans = parse_ansi("a\x1b[2Jb\x1b]0;title\x07c\x1bPdata\x1b\\d\x08e\x7f", &TextStyle::new());
        assert_eq!(plain(&spans), "abcde");
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn paint_round_trips() {
        let style = TextStyle::new()
            .fg(Color::rgb(10, 20, 30))
            .bg(Ansi16::Blue)
            .underline()
            .hyperlink("https://x.y");
        let spans = parse_ansi(&style.paint("word"), &TextStyle::new());
        assert_eq!(spans, vec![Span::new("word", style)]);
    }

    #[test]
    #[tracing_test::traced_test]
    fn dropped_sequences_are_traced() {
        let spans = parse_ansi("a\x1b[5Ab", &TextStyle::new());
        assert_eq!(plain(&spans), "ab");
        assert!(logs_contain("dropping escape sequence"));
    }

    #[test]
    fn truncated_sequence_is_dropped() {
        assert_eq!(plain(&parse_ansi("ab\x1b[31", &TextStyle::new())), "ab");
        assert_eq!(plain(&parse_ansi("ab\x1b", &TextStyle::new())), "ab");
    }
}
