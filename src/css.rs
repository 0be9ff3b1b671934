//! Some basic CSS support: styles taken from inline `style` attributes and
//! the legacy `<font color>` tag.
//!
//! Only the properties which map onto a [`TextStyle`] are understood:
//! `color`, `background-color`, `font-weight`, `font-style` and
//! `text-decoration`.  Other declarations are ignored.

pub(crate) mod parser;

use crate::resolve::{ResolverChain, TagInfo};
use crate::style::{Colour, TextStyle};
use crate::{Error, Result};

use nom::{combinator::all_consuming, Parser};
use parser::Decl;

/// Parse a colour value such as `#f00`, `#ff0000`, `rgb(255, 0, 0)` or
/// `red`.
pub fn parse_colour(text: &str) -> Result<Colour> {
    all_consuming(parser::parse_color)
        .parse(text)
        .map(|(_, colour)| colour)
        .map_err(|_| Error::CssParseError)
}

/// Parse the contents of a `style` attribute into a style delta.
pub fn parse_inline_style(text: &str) -> Result<TextStyle> {
    html_trace_quiet!("Parsing inline style: {}", text);
    let (_, decls) = parser::parse_declaration_list(text).map_err(|_| Error::CssParseError)?;
    html_trace_quiet!("Parsed inline style: {:?}", decls);
    Ok(styles_from_declarations(&decls))
}

fn styles_from_declarations(decls: &[Decl]) -> TextStyle {
    let mut style = TextStyle::PLAIN;
    for decl in decls {
        match decl {
            Decl::Color { value } => style.fg = Some(*value),
            Decl::BackgroundColor { value } => style.bg = Some(*value),
            Decl::FontWeight { bold } => style.bold = *bold,
            Decl::FontStyle { italic } => style.italic = *italic,
            Decl::TextDecoration { value } => {
                style.underline = value.underline;
                style.strikeout = value.strikeout;
                style.waved = value.waved;
                if value.colour.is_some() {
                    style.effect = value.colour;
                }
            }
            Decl::Unknown { .. } => (),
        }
    }
    style
}

/// Resolve any tag with a non-empty, parseable `style` attribute.
pub fn inline_style_resolver(tag: &TagInfo<'_>) -> Option<TextStyle> {
    let text = tag.attr("style")?;
    match parse_inline_style(text) {
        Ok(style) if !style.is_plain() => Some(style),
        _ => None,
    }
}

/// Resolve `<font color="...">` to a foreground colour.
pub fn font_colour_resolver(tag: &TagInfo<'_>) -> Option<TextStyle> {
    if !tag.name().eq_ignore_ascii_case("font") {
        return None;
    }
    let colour = parse_colour(tag.attr("color")?).ok()?;
    Some(TextStyle::PLAIN.with_fg(colour))
}

/// Layer inline CSS over `chain`.
///
/// The result resolves a tag with `chain` as before, then merges whatever
/// the tag's own `style` attribute or `<font color>` says over it.  So
/// `<b style="color: red">` is both bold and red, and an otherwise unknown
/// tag with a style attribute still gets that style.
pub fn with_inline_css(chain: ResolverChain) -> ResolverChain {
    ResolverChain::from_fn(move |tag: &TagInfo<'_>| {
        let css = inline_style_resolver(tag).or_else(|| font_colour_resolver(tag));
        match (css, chain.resolve(tag)) {
            (Some(css), Some(base)) => Some(css.merge(&base)),
            (css, base) => css.or(base),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_colour, parse_inline_style, with_inline_css};
    use crate::resolve::tests::attr;
    use crate::resolve::{ResolverChain, TagInfo};
    use crate::style::{Colour, TextStyle};
    use crate::Error;

    const RED: Colour = Colour::rgb(0xff, 0, 0);

    #[test]
    fn test_parse_colour() {
        assert_eq!(parse_colour("#f00"), Ok(RED));
        assert_eq!(parse_colour("red"), Ok(RED));
        assert_eq!(parse_colour("red blue"), Err(Error::CssParseError));
    }

    #[test]
    fn test_inline_style() {
        assert_eq!(
            parse_inline_style("color: red; font-weight: bold; text-decoration: line-through"),
            Ok(TextStyle::BOLD.with_strikeout(true).with_fg(RED))
        );
        assert_eq!(parse_inline_style("margin: 0"), Ok(TextStyle::PLAIN));
        assert_eq!(parse_inline_style("color"), Err(Error::CssParseError));
    }

    #[test]
    fn test_layered_resolver() {
        let chain = with_inline_css(ResolverChain::default());
        let attrs = [attr("style", "color: #f00")];
        let b = TagInfo::new("b", &attrs, false);
        assert_eq!(chain.resolve(&b), Some(TextStyle::BOLD.with_fg(RED)));

        let span = TagInfo::new("span", &attrs, false);
        assert_eq!(chain.resolve(&span), Some(TextStyle::PLAIN.with_fg(RED)));

        let font_attrs = [attr("color", "red")];
        let font = TagInfo::new("font", &font_attrs, false);
        assert_eq!(chain.resolve(&font), Some(TextStyle::PLAIN.with_fg(RED)));

        assert_eq!(chain.resolve(&TagInfo::new("span", &[], false)), None);
        assert_eq!(
            chain.resolve(&TagInfo::new("i", &[], false)),
            Some(TextStyle::ITALIC)
        );
    }
}
