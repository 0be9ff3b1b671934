//! Module containing the `StyledTextSink` interface for surfaces which
//! display converted fragments.

pub mod ansi;
pub mod styled_line;

use crate::style::TextStyle;
use crate::Fragment;

pub use styled_line::{StyledLine, StyledString};

/// A surface which displays flat runs of styled text.
///
/// Runs are appended in rendering order; an implementation never sees
/// nested markup.
pub trait StyledTextSink {
    /// Append `text` drawn with `style`.
    fn append(&mut self, text: &str, style: &TextStyle);
}

impl StyledTextSink for Vec<Fragment> {
    fn append(&mut self, text: &str, style: &TextStyle) {
        self.push(Fragment::new(text, *style));
    }
}

impl<S: StyledTextSink + ?Sized> StyledTextSink for &mut S {
    fn append(&mut self, text: &str, style: &TextStyle) {
        (**self).append(text, style);
    }
}
