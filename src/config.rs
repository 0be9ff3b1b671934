//! Configure the HTML to styled-text conversion using the `Config` type,
//! which can be constructed using one of the functions in this module.

use std::io;

use crate::resolve::{ResolverChain, TagInfo};
use crate::style::TextStyle;
use crate::{Conversion, Converter, Fragment};

/// Configure the HTML processing.
#[derive(Debug, Clone)]
pub struct Config {
    resolvers: ResolverChain,
    collapse_whitespace: bool,
}

impl Config {
    /// Add a resolver which is tried before every resolver already in the
    /// chain.  Tags it does not recognise fall back to the existing ones.
    pub fn add_resolver<F>(mut self, f: F) -> Self
    where
        F: Fn(&TagInfo<'_>) -> Option<TextStyle> + Send + Sync + 'static,
    {
        self.resolvers = self.resolvers.prepend(f);
        self
    }

    /// Also style tags from their inline `style` attribute and from
    /// `<font color>`.  What these say is merged over the style the
    /// configured resolvers give the tag.
    #[cfg(feature = "css")]
    pub fn use_inline_css(mut self) -> Self {
        self.resolvers = crate::css::with_inline_css(self.resolvers);
        self
    }

    /// Collapse each run of ASCII whitespace in text to a single space.
    /// By default text is passed through as written.
    pub fn collapse_whitespace(mut self, collapse: bool) -> Self {
        self.collapse_whitespace = collapse;
        self
    }

    /// Build the configured `Converter`.
    pub fn build(self) -> Converter {
        Converter::with_options(self.resolvers, self.collapse_whitespace)
    }

    /// Convert `html` with this configuration.
    pub fn convert(self, html: &str, base: TextStyle) -> Vec<Fragment> {
        self.build().convert(html, base)
    }

    /// Read HTML from `input` and convert it with this configuration.
    pub fn convert_read<R: io::Read>(self, input: R, base: TextStyle) -> Conversion {
        self.build().convert_read(input, base)
    }
}

/// Return a Config using the default resolver chain.
pub fn default() -> Config {
    with_resolvers(ResolverChain::default())
}

/// Return a Config using a custom resolver chain.
pub fn with_resolvers(resolvers: ResolverChain) -> Config {
    Config {
        resolvers,
        collapse_whitespace: false,
    }
}
