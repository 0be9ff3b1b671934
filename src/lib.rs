//! Flatten inline HTML into runs of styled text.
//!
//! This crate converts a small fragment of inline HTML markup (such as a UI
//! label like `"Found <b>3</b> <i>new</i> items"`) into a flat, ordered list
//! of [`Fragment`]s, each holding some text and the [`TextStyle`] it should
//! be drawn with.  The result suits any surface which can only append runs
//! of styled text and knows nothing of nested markup.
//!
//! # Examples
//!
//! ```rust
//! use html2runs::{convert, TextStyle};
//!
//! let fragments = convert("Found <b>3</b> items", TextStyle::PLAIN);
//! let runs: Vec<(&str, bool)> = fragments
//!     .iter()
//!     .map(|f| (f.text(), f.style().bold))
//!     .collect();
//! assert_eq!(runs, vec![("Found ", false), ("3", true), (" items", false)]);
//! ```
//!
//! Which tags carry which style is decided by a chain of resolver
//! functions (see [`resolve`]).  The default chain knows the inline
//! emphasis tags; any other tag is transparent, and its text is emitted in
//! the enclosing style.
//!
//! Conversion never fails.  Malformed markup is handled the way the HTML
//! tokenizer handles it and reported as [`Diagnostic`]s.  If the input
//! cannot be read at all, the result is a single fragment holding the text
//! with all tags removed, in the base style.

#![deny(missing_docs)]

#[macro_use]
mod macros;

pub mod config;
#[cfg(feature = "css")]
pub mod css;
pub mod render;
pub mod resolve;
mod scope;
pub mod style;

use std::cell::RefCell;
use std::fmt;
use std::io;

use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use tendril::StrTendril;

pub use render::StyledTextSink;
pub use resolve::{default_policy, ResolverChain, TagInfo};
pub use style::{Colour, TextStyle};

use scope::StyleStack;

/// Errors which stop the styled conversion of an input.
///
/// These never escape from [`Converter::convert`]; they are reported in
/// [`Outcome::Degraded`] alongside the plain-text result.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Reading the HTML input failed.
    #[error("I/O error reading HTML input")]
    IoError(#[from] io::Error),
    /// An inline style declaration could not be parsed.
    #[cfg(feature = "css")]
    #[error("CSS parse error")]
    CssParseError,
}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        use Error::*;
        match (self, other) {
            (IoError(a), IoError(b)) => a.kind() == b.kind(),
            #[cfg(feature = "css")]
            (CssParseError, CssParseError) => true,
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }
}

/// A convenience alias for results within this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// One contiguous run of text drawn in a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    style: TextStyle,
}

impl Fragment {
    /// Create a fragment.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Fragment {
        Fragment {
            text: text.into(),
            style,
        }
    }

    /// The text of this fragment.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The fully resolved style of this fragment.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Split into text and style.
    pub fn into_parts(self) -> (String, TextStyle) {
        (self.text, self.style)
    }
}

/// A recoverable problem found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The tokenizer's (or reader's) description of the problem.
    pub message: String,
    /// 1-based line number in the input, or 0 if unknown.
    pub line: u64,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: {}", self.line, self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

/// How a conversion finished.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The whole input was tokenized; fragments carry their styles.
    Complete,
    /// The input could not be processed; the result is one fragment of
    /// tag-stripped text in the base style.
    Degraded(Error),
}

/// The full result of a conversion.
#[derive(Debug)]
pub struct Conversion {
    /// The fragments, in rendering order.
    pub fragments: Vec<Fragment>,
    /// Recoverable problems seen along the way.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the styled conversion completed.
    pub outcome: Outcome,
}

impl Conversion {
    fn degraded(input: &str, base: TextStyle, cause: Error) -> Self {
        html_trace!("degraded conversion: {}", cause);
        Conversion {
            fragments: vec![Fragment::new(strip_tags(input), base)],
            diagnostics: Vec::new(),
            outcome: Outcome::Degraded(cause),
        }
    }

    /// Returns true if the fallback plain-text result was produced.
    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, Outcome::Degraded(_))
    }
}

/// Converts HTML fragments to styled runs using a fixed resolver chain.
///
/// A `Converter` holds no per-call state and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    resolvers: ResolverChain,
    collapse_whitespace: bool,
}

impl Converter {
    /// A converter using the given resolver chain.
    pub fn new(resolvers: ResolverChain) -> Converter {
        Converter {
            resolvers,
            collapse_whitespace: false,
        }
    }

    pub(crate) fn with_options(resolvers: ResolverChain, collapse_whitespace: bool) -> Converter {
        Converter {
            resolvers,
            collapse_whitespace,
        }
    }

    /// The resolver chain in use.
    pub fn resolvers(&self) -> &ResolverChain {
        &self.resolvers
    }

    /// Convert `html` into fragments, with `base` as the style outside any
    /// tag.
    pub fn convert(&self, html: &str, base: TextStyle) -> Vec<Fragment> {
        self.convert_with_report(html, base).fragments
    }

    /// Convert `html`, also returning diagnostics and how the conversion
    /// ended.
    pub fn convert_with_report(&self, html: &str, base: TextStyle) -> Conversion {
        self.run(html, base, Vec::new())
    }

    /// Read HTML from `input` and convert it.
    ///
    /// Invalid UTF-8 is replaced and reported as a diagnostic.  A read
    /// error gives a degraded result built from whatever was read before
    /// the failure.
    pub fn convert_read<R: io::Read>(&self, mut input: R, base: TextStyle) -> Conversion {
        let mut bytes = Vec::new();
        if let Err(err) = input.read_to_end(&mut bytes) {
            let text = String::from_utf8_lossy(&bytes);
            return Conversion::degraded(&text, base, Error::IoError(err));
        }
        let mut diagnostics = Vec::new();
        let html = match String::from_utf8(bytes) {
            Ok(html) => html,
            Err(err) => {
                diagnostics.push(Diagnostic {
                    message: format!("invalid UTF-8 in input: {}", err.utf8_error()),
                    line: 0,
                });
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        self.run(&html, base, diagnostics)
    }

    /// Convert `html` and append each fragment, in order, to `sink`.
    pub fn append_html<S: StyledTextSink + ?Sized>(&self, sink: &mut S, html: &str, base: TextStyle) {
        for frag in self.convert(html, base) {
            sink.append(&frag.text, &frag.style);
        }
    }

    fn run(&self, html: &str, base: TextStyle, diagnostics: Vec<Diagnostic>) -> Conversion {
        let sink = FragmentSink {
            resolvers: &self.resolvers,
            collapse_whitespace: self.collapse_whitespace,
            state: RefCell::new(SinkState {
                stack: StyleStack::new(base),
                text: String::new(),
                fragments: Vec::new(),
                diagnostics,
            }),
        };
        let input = BufferQueue::default();
        input.push_back(StrTendril::from_slice(html));

        let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
        // The sink never pauses the tokenizer, so one feed drains the queue.
        let _ = tokenizer.feed(&input);
        tokenizer.end();

        let (fragments, diagnostics) = tokenizer.sink.finish();
        Conversion {
            fragments,
            diagnostics,
            outcome: Outcome::Complete,
        }
    }
}

struct SinkState {
    stack: StyleStack,
    // Text seen since the last tag, not yet emitted.
    text: String,
    fragments: Vec<Fragment>,
    diagnostics: Vec<Diagnostic>,
}

impl SinkState {
    fn flush_text(&mut self, collapse_whitespace: bool) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        let text = if collapse_whitespace {
            collapse_ascii_whitespace(&text)
        } else {
            text
        };
        html_trace_quiet!("text {:?} depth={}", &text, self.stack.depth());
        self.fragments.push(Fragment::new(text, self.stack.current()));
    }
}

/// Receives tokens from the html5ever tokenizer and builds fragments.
struct FragmentSink<'r> {
    resolvers: &'r ResolverChain,
    collapse_whitespace: bool,
    state: RefCell<SinkState>,
}

impl FragmentSink<'_> {
    fn finish(&self) -> (Vec<Fragment>, Vec<Diagnostic>) {
        let mut state = self.state.borrow_mut();
        state.flush_text(self.collapse_whitespace);
        (
            std::mem::take(&mut state.fragments),
            std::mem::take(&mut state.diagnostics),
        )
    }
}

impl TokenSink for FragmentSink<'_> {
    type Handle = ();

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        let mut state = self.state.borrow_mut();
        match token {
            Token::CharacterTokens(text) => state.text.push_str(&text),
            // The tokenizer reports a parse error alongside the NUL itself.
            Token::NullCharacterToken => {}
            Token::TagToken(tag) => {
                state.flush_text(self.collapse_whitespace);
                match tag.kind {
                    TagKind::StartTag => {
                        let info = TagInfo::new(&tag.name, &tag.attrs, tag.self_closing);
                        let delta = self.resolvers.resolve(&info);
                        match delta {
                            Some(delta) => state.stack.push(tag.name, delta),
                            None => {
                                html_trace_quiet!("transparent <{}>", &*tag.name);
                            }
                        }
                    }
                    TagKind::EndTag => {
                        state.stack.close(&tag.name);
                    }
                }
            }
            Token::CommentToken(_) | Token::DoctypeToken(_) => {
                state.flush_text(self.collapse_whitespace);
            }
            Token::ParseError(message) => {
                html_trace!("parse error at line {}: {}", line_number, message);
                state.diagnostics.push(Diagnostic {
                    message: message.into_owned(),
                    line: line_number,
                });
            }
            Token::EOFToken => state.flush_text(self.collapse_whitespace),
        }
        TokenSinkResult::Continue
    }
}

fn collapse_ascii_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                result.push(' ');
            }
            in_space = true;
        } else {
            result.push(c);
            in_space = false;
        }
    }
    result
}

/// Remove markup from `html`, keeping only the text between tags.
///
/// A `<` starts markup when followed by an ASCII letter, `/`, `!` or `?`;
/// any other `<` is kept as text.  Comments run to the next `-->`, and a
/// tag ends at the first `>` outside a quoted attribute value.  Markup with
/// no end runs to the end of the input.  Character references are left as
/// written.
pub fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(lt) = rest.find('<') {
        result.push_str(&rest[..lt]);
        let after = &rest[lt + 1..];
        let starts_markup = after
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));
        if starts_markup {
            match markup_len(after) {
                Some(len) => rest = &after[len..],
                None => return result,
            }
        } else {
            result.push('<');
            rest = after;
        }
    }
    result.push_str(rest);
    result
}

/// The length of the markup starting at `after` (just past its `<`),
/// including the closing `>`.
fn markup_len(after: &str) -> Option<usize> {
    if let Some(body) = after.strip_prefix("!--") {
        return body.find("-->").map(|end| "!--".len() + end + "-->".len());
    }
    let mut quote = None;
    let mut after_eq = false;
    for (idx, c) in after.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => (),
            None => match c {
                '>' => return Some(idx + 1),
                '"' | '\'' if after_eq => quote = Some(c),
                '=' => after_eq = true,
                c if c.is_ascii_whitespace() => (),
                _ => after_eq = false,
            },
        }
    }
    None
}

/// Convert `html` using the default resolver chain.
pub fn convert(html: &str, base: TextStyle) -> Vec<Fragment> {
    Converter::default().convert(html, base)
}

/// Read HTML from `input` and convert it using the default resolver chain.
pub fn convert_read<R: io::Read>(input: R, base: TextStyle) -> Conversion {
    Converter::default().convert_read(input, base)
}
