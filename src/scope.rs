//! The stack of open styled tags.

use html5ever::LocalName;

use crate::style::TextStyle;

/// One open tag and the cumulative style it put in effect.
#[derive(Debug, Clone)]
struct ScopeEntry {
    // `None` only for the bottom entry, which no end tag can close.
    tag: Option<LocalName>,
    style: TextStyle,
}

/// A stack of [`ScopeEntry`]s which always holds at least the base entry.
#[derive(Debug)]
pub(crate) struct StyleStack {
    entries: Vec<ScopeEntry>,
}

impl StyleStack {
    pub(crate) fn new(base: TextStyle) -> StyleStack {
        let mut entries = Vec::with_capacity(8);
        entries.push(ScopeEntry { tag: None, style: base });
        StyleStack { entries }
    }

    /// The style in effect at the current nesting level.
    pub(crate) fn current(&self) -> TextStyle {
        self.top().style
    }

    /// Open a scope for `tag`: `delta` is merged over the current style.
    pub(crate) fn push(&mut self, tag: LocalName, delta: TextStyle) {
        let style = delta.merge(&self.current());
        html_trace_quiet!("push <{}> depth={}", &*tag, self.entries.len() + 1);
        self.entries.push(ScopeEntry {
            tag: Some(tag),
            style,
        });
    }

    /// Close the innermost scope if it was opened by `tag`.
    ///
    /// Returns whether anything was popped.  An end tag which does not match
    /// the top of the stack leaves the stack untouched.
    pub(crate) fn close(&mut self, tag: &str) -> bool {
        let matches = match &self.top().tag {
            Some(open) => (**open).eq_ignore_ascii_case(tag),
            None => false,
        };
        if matches {
            self.entries.pop();
        } else {
            html_trace_quiet!("ignoring </{}> at depth {}", tag, self.entries.len());
        }
        matches
    }

    /// Number of entries, including the base entry.
    pub(crate) fn depth(&self) -> usize {
        self.entries.len()
    }

    fn top(&self) -> &ScopeEntry {
        // The base entry is never popped: `close` refuses to match it.
        &self.entries[self.entries.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::StyleStack;
    use crate::style::TextStyle;
    use html5ever::LocalName;

    #[test]
    fn base_entry_is_never_popped() {
        let base = TextStyle::PLAIN.with_smaller(true);
        let mut stack = StyleStack::new(base);
        assert_eq!(stack.depth(), 1);
        assert!(!stack.close("b"));
        assert!(!stack.close(""));
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), base);
    }

    #[test]
    fn push_merges_with_current() {
        let mut stack = StyleStack::new(TextStyle::PLAIN);
        stack.push(LocalName::from("b"), TextStyle::BOLD);
        stack.push(LocalName::from("i"), TextStyle::ITALIC);
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.current(), TextStyle::BOLD.with_italic(true));
        assert!(stack.close("I"));
        assert_eq!(stack.current(), TextStyle::BOLD);
    }

    #[test]
    fn mismatched_close_is_ignored() {
        let mut stack = StyleStack::new(TextStyle::PLAIN);
        stack.push(LocalName::from("b"), TextStyle::BOLD);
        assert!(!stack.close("i"));
        assert_eq!(stack.current(), TextStyle::BOLD);
        assert!(stack.close("b"));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn same_name_nesting() {
        let mut stack = StyleStack::new(TextStyle::PLAIN);
        stack.push(LocalName::from("b"), TextStyle::BOLD);
        stack.push(LocalName::from("b"), TextStyle::UNDERLINE);
        assert!(stack.close("b"));
        assert_eq!(stack.current(), TextStyle::BOLD);
        assert!(stack.close("b"));
        assert_eq!(stack.current(), TextStyle::PLAIN);
    }
}
