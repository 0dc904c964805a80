#![forbid(unsafe_code)]

//! Serialization of [`Lines`] to text with minimal escape sequences.
//!
//! Each line starts and ends in the terminal's default state. Between
//! adjacent spans only the parameters that differ are emitted, all in one
//! SGR group. Bold and dim share the `22` reset, so turning one of them off
//! re-enables the other if it is still wanted.

use tabula_core::{AnsiLevel, TerminalInfo};
use tabula_style::sgr::{self, Params};
use tabula_style::{Attributes, Color, TextStyle};
use tabula_text::{Line, Lines};

/// Render `lines` for a terminal with color level `level`.
///
/// Hyperlinks are emitted as OSC 8 sequences only when `hyperlinks` is set
/// and the level supports styling at all; at [`AnsiLevel::None`] the output
/// is the plain text.
pub fn render_lines_ansi(lines: &Lines, level: AnsiLevel, hyperlinks: bool) -> String {
    let _span = tracing::trace_span!("render_lines_ansi", lines = lines.height(), ?level).entered();
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_line(&mut out, line, level, hyperlinks);
    }
    out
}

/// Render `lines` for the terminal described by `info`.
pub fn render_for_terminal(lines: &Lines, info: &TerminalInfo) -> String {
    render_lines_ansi(lines, info.ansi_level, info.hyperlinks)
}

/// Append one line to `out`.
pub fn write_line(out: &mut String, line: &Line, level: AnsiLevel, hyperlinks: bool) {
    if !level.supports_styling() {
        for span in &line.spans {
            out.push_str(&span.text);
        }
        return;
    }
    let plain = TextStyle::new();
    let mut current = TextStyle::new();
    for span in &line.spans {
        if span.text.is_empty() {
            continue;
        }
        let target = effective_style(&span.style, level, hyperlinks);
        transition(out, &current, &target);
        out.push_str(&span.text);
        current = target;
    }
    transition(out, &current, &plain);
}

/// The style as the terminal will see it. Colors outside the palettes are
/// reduced to RGB so that representations with the same output compare equal.
fn effective_style(style: &TextStyle, level: AnsiLevel, hyperlinks: bool) -> TextStyle {
    let mut style = style.downsample(level);
    style.fg = style.fg.map(emitted_color);
    style.bg = style.bg.map(emitted_color);
    if !hyperlinks {
        style.hyperlink = None;
    }
    style
}

fn emitted_color(color: Color) -> Color {
    match color {
        Color::Ansi16(_) | Color::Ansi256(_) | Color::Rgb(_) => color,
        other => Color::Rgb(other.to_rgb()),
    }
}

/// Emit the sequences that turn `from` into `to`.
fn transition(out: &mut String, from: &TextStyle, to: &TextStyle) {
    let link_changed = from.hyperlink != to.hyperlink;
    if link_changed && from.hyperlink.is_some() {
        sgr::write_link_close(out);
    }

    let mut params = Params::new();
    let removed = from.attributes - to.attributes;
    let mut added = to.attributes - from.attributes;
    let intensity = Attributes::BOLD | Attributes::DIM;
    if removed.intersects(intensity) {
        added |= to.attributes & intensity;
    }
    sgr::push_attributes_off(&mut params, removed);
    sgr::push_attributes_on(&mut params, added);
    if from.fg != to.fg {
        match &to.fg {
            Some(color) => sgr::push_color(&mut params, color, false),
            None => params.push(sgr::FG_DEFAULT),
        }
    }
    if from.bg != to.bg {
        match &to.bg {
            Some(color) => sgr::push_color(&mut params, color, true),
            None => params.push(sgr::BG_DEFAULT),
        }
    }
    sgr::write_csi(out, &params);

    if link_changed {
        if let Some(link) = &to.hyperlink {
            sgr::write_link_open(out, link);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_style::Ansi16;
    use tabula_text::Span;

    fn line(spans: Vec<Span>) -> Lines {
        Lines::from_lines([Line::from_spans(spans)])
    }

    fn red() -> TextStyle {
        TextStyle::new().fg(Ansi16::Red)
    }

    #[test]
    fn plain_text_has_no_escapes() {
        let lines = Lines::raw("a\nb");
        assert_eq!(render_lines_ansi(&lines, AnsiLevel::TrueColor, true), "a\nb");
    }

    #[test]
    fn single_styled_span() {
        let lines = line(vec![Span::new("4", red())]);
        assert_eq!(
            render_lines_ansi(&lines, AnsiLevel::TrueColor, false),
            "\x1b[31m4\x1b[39m"
        );
    }

    #[test]
    fn only_changed_parameters_are_emitted() {
        let lines = line(vec![
            Span::new("a", red().bold()),
            Span::new("b", red().bold().underline()),
            Span::new("c", TextStyle::new().fg(Ansi16::Blue).underline()),
        ]);
        assert_eq!(
            render_lines_ansi(&lines, AnsiLevel::TrueColor, false),
            "\x1b[1;31ma\x1b[4mb\x1b[22;34mc\x1b[24;39m"
        );
    }

    #[test]
    fn dropping_bold_keeps_dim() {
        let lines = line(vec![
            Span::new("a", TextStyle::new().bold().dim()),
            Span::new("b", TextStyle::new().dim()),
        ]);
        assert_eq!(
            render_lines_ansi(&lines, AnsiLevel::TrueColor, false),
            "\x1b[1;2ma\x1b[22;2mb\x1b[22m"
        );
    }

    #[test]
    fn colors_are_downsampled() {
        let lines = line(vec![Span::new("x", TextStyle::new().fg(Color::rgb(255, 0, 0)))]);
        assert_eq!(
            render_lines_ansi(&lines, AnsiLevel::TrueColor, false),
            "\x1b[38;2;255;0;0mx\x1b[39m"
        );
        assert_eq!(
            render_lines_ansi(&lines, AnsiLevel::Ansi256, false),
            "\x1b[38;5;196mx\x1b[39m"
        );
        assert_eq!(
            render_lines_ansi(&lines, AnsiLevel::Ansi16, false),
            "\x1b[91mx\x1b[39m"
        );
        assert_eq!(render_lines_ansi(&lines, AnsiLevel::None, true), "x");
    }

    #[test]
    fn equal_colors_in_other_models_emit_nothing() {
        let hsl = Color::hsl(0.0, 100.0, 50.0).unwrap();
        let lines = line(vec![
            Span::new("a", TextStyle::new().fg(Color::rgb(255, 0, 0))),
            Span::new("b", TextStyle::new().fg(hsl).bg(hsl)),
            Span::new("c", TextStyle::new().fg(hsl).bg(Color::rgb(255, 0, 0))),
        ]);
        assert_eq!(
            render_lines_ansi(&lines, AnsiLevel::TrueColor, false),
            "\x1b[38;2;255;0;0ma\x1b[48;2;255;0;0mbc\x1b[39;49m"
        );
    }

    #[test]
    fn background_and_inverse() {
        let lines = line(vec![Span::new(
            "x",
            TextStyle::new().bg(Ansi16::Green).inverse().strikethrough(),
        )]);
        assert_eq!(
            render_lines_ansi(&lines, AnsiLevel::Ansi16, false),
            "\x1b[7;9;42mx\x1b[27;29;49m"
        );
    }

    #[test]
    fn hyperlinks_only_when_supported() {
        let lines = line(vec![
            Span::raw("see "),
            Span::new("docs", TextStyle::new().hyperlink("https://x.y")),
        ]);
        assert_eq!(
            render_lines_ansi(&lines, AnsiLevel::TrueColor, true),
            "see \x1b]8;;https://x.y\x1b\\docs\x1b]8;;\x1b\\"
        );
        assert_eq!(render_lines_ansi(&lines, AnsiLevel::TrueColor, false), "see docs");
        assert_eq!(render_lines_ansi(&lines, AnsiLevel::None, true), "see docs");
    }

    #[test]
    fn style_is_closed_at_every_line_end() {
        let lines = Lines::from_lines([
            Line::from(Span::new("a", red())),
            Line::from(Span::new("b", red())),
        ]);
        assert_eq!(
            render_lines_ansi(&lines, AnsiLevel::TrueColor, false),
            "\x1b[31ma\x1b[39m\n\x1b[31mb\x1b[39m"
        );
    }

    #[test]
    fn empty_spans_are_skipped() {
        let lines = line(vec![Span::new("", red()), Span::raw("x")]);
        assert_eq!(render_lines_ansi(&lines, AnsiLevel::TrueColor, false), "x");
    }

    #[test]
    fn output_matches_paint() {
        let style = TextStyle::new().italic().fg(Ansi16::Cyan).bg(Color::Ansi256(17));
        let lines = line(vec![Span::new("z", style.clone())]);
        assert_eq!(render_lines_ansi(&lines, AnsiLevel::TrueColor, false), style.paint("z"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn none_level_is_plain_text(text in "[a-z ]{0,20}", r: u8, g: u8, b: u8) {
                let lines = line(vec![Span::new(text.clone(), TextStyle::new().fg(Color::rgb(r, g, b)).bold())]);
                prop_assert_eq!(render_lines_ansi(&lines, AnsiLevel::None, true), text);
            }
        }
    }
}
