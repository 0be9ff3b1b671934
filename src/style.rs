//! Text styles attached to converted fragments.
//!
//! A [`TextStyle`] is a small immutable value: a set of rendering flags and
//! up to three optional colours.  A style returned by a resolver is a
//! *delta*: it only describes what a tag changes, and is combined with the
//! style already in effect using [`TextStyle::merge`].

/// A 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour {
    /// Red value
    pub r: u8,
    /// Green value
    pub g: u8,
    /// Blue value
    pub b: u8,
}

impl Colour {
    /// Create a colour from its components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The rendering intent for a run of text.
///
/// The `Default` value is [`TextStyle::PLAIN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle {
    /// Heavier font weight.
    pub bold: bool,
    /// Slanted font.
    pub italic: bool,
    /// Underlined text.
    pub underline: bool,
    /// Struck-through text.
    pub strikeout: bool,
    /// Wavy underline, as used for error highlighting.
    pub waved: bool,
    /// Reduced font size.
    pub smaller: bool,
    /// Foreground (text) colour; `None` means "inherit".
    pub fg: Option<Colour>,
    /// Background colour; `None` means "inherit".
    pub bg: Option<Colour>,
    /// Colour of the underline, strikeout or wave effect.
    pub effect: Option<Colour>,
}

impl TextStyle {
    /// No styling at all.
    pub const PLAIN: TextStyle = TextStyle {
        bold: false,
        italic: false,
        underline: false,
        strikeout: false,
        waved: false,
        smaller: false,
        fg: None,
        bg: None,
        effect: None,
    };

    /// Bold only.
    pub const BOLD: TextStyle = TextStyle {
        bold: true,
        ..TextStyle::PLAIN
    };

    /// Italic only.
    pub const ITALIC: TextStyle = TextStyle {
        italic: true,
        ..TextStyle::PLAIN
    };

    /// Underline only.
    pub const UNDERLINE: TextStyle = TextStyle {
        underline: true,
        ..TextStyle::PLAIN
    };

    /// Strikeout only.
    pub const STRIKEOUT: TextStyle = TextStyle {
        strikeout: true,
        ..TextStyle::PLAIN
    };

    /// Return a copy with the bold flag set to `on`.
    pub const fn with_bold(mut self, on: bool) -> TextStyle {
        self.bold = on;
        self
    }

    /// Return a copy with the italic flag set to `on`.
    pub const fn with_italic(mut self, on: bool) -> TextStyle {
        self.italic = on;
        self
    }

    /// Return a copy with the underline flag set to `on`.
    pub const fn with_underline(mut self, on: bool) -> TextStyle {
        self.underline = on;
        self
    }

    /// Return a copy with the strikeout flag set to `on`.
    pub const fn with_strikeout(mut self, on: bool) -> TextStyle {
        self.strikeout = on;
        self
    }

    /// Return a copy with the wave flag set to `on`.
    pub const fn with_waved(mut self, on: bool) -> TextStyle {
        self.waved = on;
        self
    }

    /// Return a copy with the smaller flag set to `on`.
    pub const fn with_smaller(mut self, on: bool) -> TextStyle {
        self.smaller = on;
        self
    }

    /// Return a copy with the given foreground colour.
    pub const fn with_fg(mut self, colour: Colour) -> TextStyle {
        self.fg = Some(colour);
        self
    }

    /// Return a copy with the given background colour.
    pub const fn with_bg(mut self, colour: Colour) -> TextStyle {
        self.bg = Some(colour);
        self
    }

    /// Return a copy with the given effect colour.
    pub const fn with_effect(mut self, colour: Colour) -> TextStyle {
        self.effect = Some(colour);
        self
    }

    /// Combine this style (the inner delta) with `outer`, the style already
    /// in effect.
    ///
    /// Flags are cumulative.  Each colour is taken from `self` if set and
    /// from `outer` otherwise, so the innermost tag decides the colour.
    pub fn merge(&self, outer: &TextStyle) -> TextStyle {
        TextStyle {
            bold: self.bold || outer.bold,
            italic: self.italic || outer.italic,
            underline: self.underline || outer.underline,
            strikeout: self.strikeout || outer.strikeout,
            waved: self.waved || outer.waved,
            smaller: self.smaller || outer.smaller,
            fg: self.fg.or(outer.fg),
            bg: self.bg.or(outer.bg),
            effect: self.effect.or(outer.effect),
        }
    }

    /// Returns true if this style has no flags or colours set.
    pub fn is_plain(&self) -> bool {
        *self == TextStyle::PLAIN
    }
}

#[cfg(test)]
mod tests {
    use super::{Colour, TextStyle};

    const RED: Colour = Colour::rgb(0xff, 0, 0);
    const BLUE: Colour = Colour::rgb(0, 0, 0xff);

    #[test]
    fn merge_accumulates_flags() {
        let merged = TextStyle::ITALIC.merge(&TextStyle::BOLD);
        assert!(merged.bold);
        assert!(merged.italic);
        assert!(!merged.underline);
    }

    #[test]
    fn merge_inner_colour_wins() {
        let outer = TextStyle::PLAIN.with_fg(RED).with_bg(BLUE);
        let inner = TextStyle::BOLD.with_fg(BLUE);
        let merged = inner.merge(&outer);
        assert_eq!(merged.fg, Some(BLUE));
        assert_eq!(merged.bg, Some(BLUE));
        assert!(merged.bold);

        let merged = TextStyle::UNDERLINE.merge(&outer);
        assert_eq!(merged.fg, Some(RED));
    }

    #[test]
    fn merge_with_self_is_identity() {
        let styles = [
            TextStyle::PLAIN,
            TextStyle::BOLD,
            TextStyle::ITALIC.with_fg(RED),
            TextStyle::STRIKEOUT.with_waved(true).with_effect(BLUE).with_bg(RED),
        ];
        for s in styles {
            assert_eq!(s.merge(&s), s);
        }
    }

    #[test]
    fn merge_with_plain_is_identity() {
        let s = TextStyle::BOLD.with_smaller(true).with_fg(RED);
        assert_eq!(s.merge(&TextStyle::PLAIN), s);
        assert_eq!(TextStyle::PLAIN.merge(&s), s);
    }

    #[test]
    fn colour_display() {
        assert_eq!(Colour::rgb(0x12, 0xab, 0).to_string(), "#12ab00");
    }
}
