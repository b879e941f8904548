//! Terminal colorization for ASCII diagram output
//!
//! Paints rendered diagrams in the selected theme's palette using crossterm.

use crossterm::style::{Color, Stylize};
use umlcanvas::Theme;

/// Parse a `#rrggbb` palette entry
fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

fn is_structure(c: char) -> bool {
    matches!(
        c,
        '┌' | '┐' | '└' | '┘' | '├' | '┤' | '┬' | '┴' | '┼' | '─' | '│' | '╌' | '┆'
    )
}

fn is_marker(c: char) -> bool {
    matches!(c, '◁' | '▷' | '△' | '▽' | '◆' | '◇')
}

/// Colorize ASCII diagram output using ANSI escape codes
///
/// Lines and box borders take the palette's line color, markers the line
/// color in bold, and everything else the text color, all on the theme
/// background.
pub fn colorize_output(input: &str, theme: Theme) -> String {
    let palette = theme.palette();
    let fallback = Color::Reset;
    let background = hex_color(palette.background).unwrap_or(fallback);
    let line = hex_color(palette.line).unwrap_or(fallback);
    let text = hex_color(palette.text).unwrap_or(fallback);

    let mut result = String::with_capacity(input.len() * 4);
    for row in input.lines() {
        for c in row.chars() {
            let styled = if is_marker(c) {
                c.with(line).on(background).bold()
            } else if is_structure(c) {
                c.with(line).on(background)
            } else {
                c.with(text).on(background)
            };
            result.push_str(&styled.to_string());
        }
        result.push('\n');
    }

    // Match the input's trailing newline
    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }
    result
}
