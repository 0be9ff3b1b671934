//! A single line of styled text built from fragments.

use unicode_width::UnicodeWidthStr;

use super::StyledTextSink;
use crate::style::TextStyle;

/// A wrapper around a String with its style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledString {
    /// The text
    pub s: String,
    /// The style it is drawn with
    pub style: TextStyle,
}

/// A line of styled text (composed of a set of `StyledString`s).
///
/// Adjacent pieces with the same style are merged as they are added, so
/// the line holds the minimal number of runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    v: Vec<StyledString>,
}

impl StyledLine {
    /// Create an empty `StyledLine`.
    pub fn new() -> StyledLine {
        StyledLine { v: Vec::new() }
    }

    /// Create a new StyledLine from a string and style.
    pub fn from_string(s: String, style: &TextStyle) -> StyledLine {
        let mut line = StyledLine::new();
        line.push(StyledString { s, style: *style });
        line
    }

    /// Join the line into a String ignoring the styles.
    pub fn into_string(self) -> String {
        let mut s = String::new();
        for ts in self.v {
            s.push_str(&ts.s);
        }
        s
    }

    /// Return true if the line has no text.
    pub fn is_empty(&self) -> bool {
        self.v.is_empty()
    }

    /// The number of distinct runs.
    pub fn len(&self) -> usize {
        self.v.len()
    }

    /// Add a new piece to the line
    pub fn push(&mut self, ts: StyledString) {
        if ts.s.is_empty() {
            return;
        }
        match self.v.last_mut() {
            Some(last) if last.style == ts.style => last.s.push_str(&ts.s),
            _ => self.v.push(ts),
        }
    }

    /// Iterator over (string, style) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TextStyle)> + '_ {
        self.v.iter().map(|ts| (ts.s.as_str(), &ts.style))
    }

    /// Return the width of the line in cells
    pub fn width(&self) -> usize {
        self.v
            .iter()
            .map(|ts| UnicodeWidthStr::width(ts.s.as_str()))
            .sum()
    }
}

impl StyledTextSink for StyledLine {
    fn append(&mut self, text: &str, style: &TextStyle) {
        self.push(StyledString {
            s: text.to_string(),
            style: *style,
        });
    }
}
