//! Mapping from start tags to style deltas.
//!
//! A resolver is any function taking a [`TagInfo`] and returning the style
//! the tag introduces, or `None` if the tag carries no styling.  Resolvers
//! are combined into a [`ResolverChain`], which tries them in order and
//! uses the first answer.

use std::fmt;
use std::sync::Arc;

use html5ever::Attribute;

use crate::style::TextStyle;

/// A read-only view of a start tag as reported by the tokenizer.
#[derive(Clone, Copy)]
pub struct TagInfo<'a> {
    name: &'a str,
    attrs: &'a [Attribute],
    self_closing: bool,
}

impl<'a> TagInfo<'a> {
    pub(crate) fn new(name: &'a str, attrs: &'a [Attribute], self_closing: bool) -> TagInfo<'a> {
        TagInfo {
            name,
            attrs,
            self_closing,
        }
    }

    /// The tag's local name.  The tokenizer reports names in lower case.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Look up an attribute value by name (ASCII case-insensitive).
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attrs
            .iter()
            .find(|attr| (*attr.name.local).eq_ignore_ascii_case(name))
            .map(|attr| &*attr.value)
    }

    /// Iterate over `(name, value)` pairs in document order.
    pub fn attrs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.attrs
            .iter()
            .map(|attr| (&*attr.name.local, &*attr.value))
    }

    /// Whether the tag was written as `<tag/>`.
    pub fn self_closing(&self) -> bool {
        self.self_closing
    }
}

impl fmt::Debug for TagInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagInfo")
            .field("name", &self.name)
            .field("attrs", &self.attrs().collect::<Vec<_>>())
            .field("self_closing", &self.self_closing)
            .finish()
    }
}

/// The signature of a single resolver function.
pub type ResolveFn = dyn Fn(&TagInfo<'_>) -> Option<TextStyle> + Send + Sync;

/// The built-in policy: the inline emphasis tags.
///
/// | Tags                  | Style     |
/// |-----------------------|-----------|
/// | `b`, `strong`         | bold      |
/// | `i`, `em`             | italic    |
/// | `u`, `ins`            | underline |
/// | `s`, `strike`, `del`  | strikeout |
///
/// Every other tag resolves to `None`.
pub fn default_policy(tag: &TagInfo<'_>) -> Option<TextStyle> {
    let name = tag.name();
    if name.eq_ignore_ascii_case("b") || name.eq_ignore_ascii_case("strong") {
        Some(TextStyle::BOLD)
    } else if name.eq_ignore_ascii_case("i") || name.eq_ignore_ascii_case("em") {
        Some(TextStyle::ITALIC)
    } else if name.eq_ignore_ascii_case("u") || name.eq_ignore_ascii_case("ins") {
        Some(TextStyle::UNDERLINE)
    } else if ["s", "strike", "del"]
        .iter()
        .any(|s| name.eq_ignore_ascii_case(s))
    {
        Some(TextStyle::STRIKEOUT)
    } else {
        None
    }
}

/// An ordered list of resolvers.
///
/// [`resolve`](ResolverChain::resolve) asks each resolver in turn, starting
/// from the front, and returns the first `Some`.  Cloning a chain is cheap;
/// the resolvers themselves are shared.
#[derive(Clone)]
pub struct ResolverChain {
    resolvers: Vec<Arc<ResolveFn>>,
}

impl ResolverChain {
    /// A chain with no resolvers; every tag is transparent.
    pub fn empty() -> ResolverChain {
        ResolverChain {
            resolvers: Vec::new(),
        }
    }

    /// A chain containing a single resolver.
    pub fn from_fn<F>(f: F) -> ResolverChain
    where
        F: Fn(&TagInfo<'_>) -> Option<TextStyle> + Send + Sync + 'static,
    {
        ResolverChain {
            resolvers: vec![Arc::new(f)],
        }
    }

    /// Add a resolver at the back of the chain (tried last).
    pub fn push<F>(mut self, f: F) -> ResolverChain
    where
        F: Fn(&TagInfo<'_>) -> Option<TextStyle> + Send + Sync + 'static,
    {
        self.resolvers.push(Arc::new(f));
        self
    }

    /// Add a resolver at the front of the chain (tried first).
    pub fn prepend<F>(mut self, f: F) -> ResolverChain
    where
        F: Fn(&TagInfo<'_>) -> Option<TextStyle> + Send + Sync + 'static,
    {
        self.resolvers.insert(0, Arc::new(f));
        self
    }

    /// Combine with another chain.  The resolvers of `other` are tried
    /// before the ones already in `self`, so `other` overrides `self` for
    /// any tag both recognise.
    pub fn extend_with(self, other: ResolverChain) -> ResolverChain {
        let mut resolvers = other.resolvers;
        resolvers.extend(self.resolvers);
        ResolverChain { resolvers }
    }

    /// Resolve `tag` to a style delta, if any resolver recognises it.
    pub fn resolve(&self, tag: &TagInfo<'_>) -> Option<TextStyle> {
        self.resolvers.iter().find_map(|resolver| resolver(tag))
    }

    /// The number of resolvers in the chain.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Returns true if there are no resolvers in the chain.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for ResolverChain {
    /// A chain holding only [`default_policy`].
    fn default() -> ResolverChain {
        ResolverChain::from_fn(default_policy)
    }
}

impl fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverChain")
            .field("len", &self.resolvers.len())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{default_policy, ResolverChain, TagInfo};
    use crate::style::{Colour, TextStyle};
    use html5ever::{Attribute, LocalName, Namespace, QualName};

    pub(crate) fn attr(name: &str, value: &str) -> Attribute {
        Attribute {
            name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
            value: value.into(),
        }
    }

    fn tag<'a>(name: &'a str, attrs: &'a [Attribute]) -> TagInfo<'a> {
        TagInfo::new(name, attrs, false)
    }

    #[test]
    fn default_policy_tags() {
        for (name, expected) in [
            ("b", Some(TextStyle::BOLD)),
            ("strong", Some(TextStyle::BOLD)),
            ("i", Some(TextStyle::ITALIC)),
            ("em", Some(TextStyle::ITALIC)),
            ("u", Some(TextStyle::UNDERLINE)),
            ("s", Some(TextStyle::STRIKEOUT)),
            ("del", Some(TextStyle::STRIKEOUT)),
            ("span", None),
            ("foo", None),
            ("font", None),
        ] {
            assert_eq!(default_policy(&tag(name, &[])), expected, "tag {name}");
        }
    }

    #[test]
    fn attr_lookup_ignores_case() {
        let attrs = [attr("color", "red"), attr("size", "2")];
        let t = tag("font", &attrs);
        assert_eq!(t.attr("COLOR"), Some("red"));
        assert_eq!(t.attr("size"), Some("2"));
        assert_eq!(t.attr("face"), None);
        assert_eq!(
            t.attrs().collect::<Vec<_>>(),
            vec![("color", "red"), ("size", "2")]
        );
    }

    #[test]
    fn chain_first_match_wins() {
        let red = TextStyle::PLAIN.with_fg(Colour::rgb(255, 0, 0));
        let chain = ResolverChain::default().prepend(move |t: &TagInfo<'_>| {
            if t.name() == "b" {
                Some(red)
            } else {
                None
            }
        });
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.resolve(&tag("b", &[])), Some(red));
        // Falls back to the default policy.
        assert_eq!(chain.resolve(&tag("i", &[])), Some(TextStyle::ITALIC));
        assert_eq!(chain.resolve(&tag("q", &[])), None);
    }

    #[test]
    fn push_is_tried_last() {
        let chain = ResolverChain::default().push(|_: &TagInfo<'_>| Some(TextStyle::UNDERLINE));
        assert_eq!(chain.resolve(&tag("b", &[])), Some(TextStyle::BOLD));
        assert_eq!(chain.resolve(&tag("q", &[])), Some(TextStyle::UNDERLINE));
    }

    #[test]
    fn extend_with_prefers_other() {
        let custom = ResolverChain::from_fn(|t: &TagInfo<'_>| {
            (t.name() == "b").then_some(TextStyle::ITALIC)
        });
        let chain = ResolverChain::default().extend_with(custom);
        assert_eq!(chain.resolve(&tag("b", &[])), Some(TextStyle::ITALIC));
        assert_eq!(chain.resolve(&tag("u", &[])), Some(TextStyle::UNDERLINE));
    }

    #[test]
    fn empty_chain_is_transparent() {
        let chain = ResolverChain::empty();
        assert!(chain.is_empty());
        assert_eq!(chain.resolve(&tag("b", &[])), None);
    }

    #[test]
    fn chain_is_send_and_sync() {
        fn check<T: Send + Sync>() {}
        check::<ResolverChain>();
    }
}
