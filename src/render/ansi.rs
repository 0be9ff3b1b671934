//! Convenience helper for producing coloured terminal output.
//!
//! This applies terminal styles (bold, italic, underline and so on, plus
//! 24-bit colours) using ANSI SGR escape sequences.  Plain runs are written
//! without any escapes.

use crate::style::TextStyle;
use crate::Fragment;

const RESET: &str = "\x1b[0m";

/// Return the escape sequence which switches the terminal to `style`, or
/// an empty string for a plain style.
pub fn style_prefix(style: &TextStyle) -> String {
    let mut codes: Vec<String> = Vec::new();
    if style.bold {
        codes.push("1".into());
    }
    if style.smaller {
        codes.push("2".into());
    }
    if style.italic {
        codes.push("3".into());
    }
    if style.waved {
        codes.push("4:3".into());
    } else if style.underline {
        codes.push("4".into());
    }
    if style.strikeout {
        codes.push("9".into());
    }
    if let Some(c) = style.fg {
        codes.push(format!("38;2;{};{};{}", c.r, c.g, c.b));
    }
    if let Some(c) = style.bg {
        codes.push(format!("48;2;{};{};{}", c.r, c.g, c.b));
    }
    if let Some(c) = style.effect {
        if style.underline || style.waved {
            codes.push(format!("58;2;{};{};{}", c.r, c.g, c.b));
        }
    }
    if codes.is_empty() {
        String::new()
    } else {
        format!("\x1b[{}m", codes.join(";"))
    }
}

/// Render a single run with the escapes for its style around it.
pub fn styled(text: &str, style: &TextStyle) -> String {
    let prefix = style_prefix(style);
    if prefix.is_empty() {
        text.to_string()
    } else {
        format!("{prefix}{text}{RESET}")
    }
}

/// Render a sequence of fragments as one string with ANSI escapes.
pub fn to_ansi(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(|frag| styled(frag.text(), frag.style()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{style_prefix, styled, to_ansi};
    use crate::style::{Colour, TextStyle};
    use crate::Fragment;

    #[test]
    fn plain_has_no_escapes() {
        assert_eq!(style_prefix(&TextStyle::PLAIN), "");
        assert_eq!(styled("hi", &TextStyle::PLAIN), "hi");
    }

    #[test]
    fn flags_and_colours() {
        let style = TextStyle::BOLD
            .with_underline(true)
            .with_fg(Colour::rgb(255, 0, 0));
        assert_eq!(style_prefix(&style), "\x1b[1;4;38;2;255;0;0m");
        assert_eq!(
            style_prefix(&TextStyle::STRIKEOUT.with_waved(true)),
            "\x1b[4:3;9m"
        );
    }

    #[test]
    fn fragments_render_in_order() {
        let frags = vec![
            Fragment::new("a", TextStyle::PLAIN),
            Fragment::new("b", TextStyle::ITALIC),
        ];
        assert_eq!(to_ansi(&frags), "a\x1b[3mb\x1b[0m");
    }
}
