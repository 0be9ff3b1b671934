//! Parsing for the subset of CSS used in inline `style` attributes.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while, take_while1},
    character::complete::{self, alpha1, digit1, u8 as dec_u8},
    combinator::{all_consuming, map, opt},
    error::ErrorKind,
    multi::{many0, separated_list0, separated_list1},
    sequence::delimited,
    IResult, Parser,
};

use crate::style::Colour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Decoration {
    pub underline: bool,
    pub strikeout: bool,
    pub waved: bool,
    pub colour: Option<Colour>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Decl {
    Color { value: Colour },
    BackgroundColor { value: Colour },
    FontWeight { bold: bool },
    FontStyle { italic: bool },
    TextDecoration { value: Decoration },
    Unknown { name: String, value: String },
}

fn fail<T>(text: &str) -> IResult<&str, T> {
    Err(nom::Err::Error(nom::error::Error::new(text, ErrorKind::Fail)))
}

fn match_comment(text: &str) -> IResult<&str, ()> {
    let (rest, _) = tag("/*").parse(text)?;
    match rest.find("*/") {
        Some(end) => Ok((&rest[end + 2..], ())),
        None => Ok(("", ())),
    }
}

fn match_whitespace_item(text: &str) -> IResult<&str, ()> {
    alt((map(complete::one_of(" \t\r\n\x0c"), |_c| ()), match_comment)).parse(text)
}

fn skip_optional_whitespace(text: &str) -> IResult<&str, ()> {
    map(many0(match_whitespace_item), |_res| ()).parse(text)
}

fn parse_ident(text: &str) -> IResult<&str, String> {
    let (rest, name) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_').parse(text)?;
    Ok((rest, name.to_ascii_lowercase()))
}

fn parse_value(text: &str) -> IResult<&str, &str> {
    take_while(|c: char| c != ';').parse(text)
}

fn hex_colour(text: &str) -> IResult<&str, Colour> {
    let (rest, _) = tag("#").parse(text)?;
    let (rest, digits) = take_while1(|c: char| c.is_ascii_hexdigit()).parse(rest)?;
    let value = match u32::from_str_radix(digits, 16) {
        Ok(value) => value,
        Err(_) => return fail(text),
    };
    let colour = match digits.len() {
        3 => {
            let nibble = |shift: u32| ((value >> shift) & 0xf) as u8 * 0x11;
            Colour::rgb(nibble(8), nibble(4), nibble(0))
        }
        6 => Colour::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8),
        _ => return fail(text),
    };
    Ok((rest, colour))
}

fn rgb_func_colour(text: &str) -> IResult<&str, Colour> {
    let (rest, _) = (tag_no_case("rgb"), skip_optional_whitespace, tag("(")).parse(text)?;
    let (rest, values) = delimited(
        skip_optional_whitespace,
        separated_list1(
            (skip_optional_whitespace, tag(","), skip_optional_whitespace),
            dec_u8,
        ),
        (skip_optional_whitespace, tag(")")),
    )
    .parse(rest)?;
    match values.as_slice() {
        &[r, g, b] => Ok((rest, Colour::rgb(r, g, b))),
        _ => fail(text),
    }
}

fn named_colour(text: &str) -> IResult<&str, Colour> {
    let (rest, name) = alpha1(text)?;
    let colour = match name.to_ascii_lowercase().as_str() {
        "aqua" | "cyan" => Colour::rgb(0, 0xff, 0xff),
        "black" => Colour::rgb(0, 0, 0),
        "blue" => Colour::rgb(0, 0, 0xff),
        "fuchsia" | "magenta" => Colour::rgb(0xff, 0, 0xff),
        "gray" | "grey" => Colour::rgb(0x80, 0x80, 0x80),
        "green" => Colour::rgb(0, 0x80, 0),
        "lime" => Colour::rgb(0, 0xff, 0),
        "maroon" => Colour::rgb(0x80, 0, 0),
        "navy" => Colour::rgb(0, 0, 0x80),
        "olive" => Colour::rgb(0x80, 0x80, 0),
        "orange" => Colour::rgb(0xff, 0xa5, 0),
        "purple" => Colour::rgb(0x80, 0, 0x80),
        "red" => Colour::rgb(0xff, 0, 0),
        "silver" => Colour::rgb(0xc0, 0xc0, 0xc0),
        "teal" => Colour::rgb(0, 0x80, 0x80),
        "white" => Colour::rgb(0xff, 0xff, 0xff),
        "yellow" => Colour::rgb(0xff, 0xff, 0),
        _ => {
            return fail(text);
        }
    };
    Ok((rest, colour))
}

pub(crate) fn parse_color(text: &str) -> IResult<&str, Colour> {
    let (rest, _) = skip_optional_whitespace(text)?;
    let (rest, colour) = alt((hex_colour, rgb_func_colour, named_colour)).parse(rest)?;
    let (rest, _) = skip_optional_whitespace(rest)?;
    Ok((rest, colour))
}

fn parse_font_weight(text: &str) -> IResult<&str, bool> {
    let (rest, _) = skip_optional_whitespace(text)?;
    if let Ok((rest, digits)) = digit1::<_, nom::error::Error<&str>>(rest) {
        let weight: u32 = digits.parse().unwrap_or(400);
        return Ok((rest, weight >= 600));
    }
    let (rest, word) = alpha1(rest)?;
    match word.to_ascii_lowercase().as_str() {
        "bold" | "bolder" => Ok((rest, true)),
        "normal" | "lighter" => Ok((rest, false)),
        _ => fail(text),
    }
}

fn parse_font_style(text: &str) -> IResult<&str, bool> {
    let (rest, _) = skip_optional_whitespace(text)?;
    let (rest, word) = alpha1(rest)?;
    match word.to_ascii_lowercase().as_str() {
        "italic" | "oblique" => Ok((rest, true)),
        "normal" => Ok((rest, false)),
        _ => fail(text),
    }
}

fn parse_decoration(text: &str) -> IResult<&str, Decoration> {
    let mut decoration = Decoration {
        underline: false,
        strikeout: false,
        waved: false,
        colour: None,
    };
    for word in text.split_whitespace() {
        match word.to_ascii_lowercase().as_str() {
            "underline" => decoration.underline = true,
            "line-through" => decoration.strikeout = true,
            "wavy" => decoration.waved = true,
            "none" | "solid" | "overline" | "dotted" | "dashed" | "double" => (),
            _ => match all_consuming(parse_color).parse(word) {
                Ok((_, colour)) => decoration.colour = Some(colour),
                Err(_) => return fail(text),
            },
        }
    }
    Ok(("", decoration))
}

fn interpret(name: String, value: &str) -> Decl {
    fn full<'a, T>(
        parser: fn(&'a str) -> IResult<&'a str, T>,
        value: &'a str,
    ) -> Option<T> {
        all_consuming((parser, skip_optional_whitespace))
            .parse(value)
            .ok()
            .map(|(_, (v, _))| v)
    }
    let parsed = match name.as_str() {
        "color" => full(parse_color, value).map(|value| Decl::Color { value }),
        "background-color" | "background" => {
            full(parse_color, value).map(|value| Decl::BackgroundColor { value })
        }
        "font-weight" => full(parse_font_weight, value).map(|bold| Decl::FontWeight { bold }),
        "font-style" => full(parse_font_style, value).map(|italic| Decl::FontStyle { italic }),
        "text-decoration" | "text-decoration-line" => {
            full(parse_decoration, value).map(|value| Decl::TextDecoration { value })
        }
        _ => None,
    };
    parsed.unwrap_or_else(|| Decl::Unknown {
        name,
        value: value.trim().to_string(),
    })
}

fn parse_important(text: &str) -> IResult<&str, ()> {
    let (rest, (_, _ws1, id, _ws2)) = (
        tag("!"),
        skip_optional_whitespace,
        parse_ident,
        skip_optional_whitespace,
    )
        .parse(text)?;
    if id != "important" {
        return fail(text);
    }
    Ok((rest, ()))
}

pub(crate) fn parse_declaration(text: &str) -> IResult<&str, Decl> {
    let (rest, (_ws0, prop, _ws1, _colon, _ws2, value)) = (
        skip_optional_whitespace,
        parse_ident,
        skip_optional_whitespace,
        tag(":"),
        skip_optional_whitespace,
        parse_value,
    )
        .parse(text)?;
    // `!important` has no meaning for a single inline declaration list.
    let value = match value.rfind('!') {
        Some(idx) if all_consuming(parse_important).parse(&value[idx..]).is_ok() => &value[..idx],
        _ => value,
    };
    Ok((rest, interpret(prop, value)))
}

/// Parse the contents of a `style` attribute: declarations separated by
/// semicolons, any of which may be empty.
pub(crate) fn parse_declaration_list(text: &str) -> IResult<&str, Vec<Decl>> {
    let (rest, decls) = all_consuming((
        separated_list0((skip_optional_whitespace, tag(";")), opt(parse_declaration)),
        skip_optional_whitespace,
    ))
    .parse(text)
    .map(|(rest, (decls, _))| (rest, decls))?;
    Ok((rest, decls.into_iter().flatten().collect()))
}

#[cfg(test)]
mod tests {
    use super::{parse_color, parse_declaration, parse_declaration_list, Decl, Decoration};
    use crate::style::Colour;

    #[test]
    fn test_colours() {
        assert_eq!(parse_color("#123").unwrap().1, Colour::rgb(0x11, 0x22, 0x33));
        assert_eq!(parse_color("#a0b1c2").unwrap().1, Colour::rgb(0xa0, 0xb1, 0xc2));
        assert_eq!(parse_color(" Red ").unwrap().1, Colour::rgb(0xff, 0, 0));
        assert_eq!(
            parse_color("rgb(1, 2 ,3)").unwrap().1,
            Colour::rgb(1, 2, 3)
        );
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("rgb(1,2)").is_err());
        assert!(parse_color("notacolour").is_err());
    }

    #[test]
    fn test_css_declaration() {
        assert_eq!(
            parse_declaration("color: #123").unwrap().1,
            Decl::Color {
                value: Colour::rgb(0x11, 0x22, 0x33)
            }
        );
        assert_eq!(
            parse_declaration("font-weight: 700 !important").unwrap().1,
            Decl::FontWeight { bold: true }
        );
        assert_eq!(
            parse_declaration("Font-Style:italic").unwrap().1,
            Decl::FontStyle { italic: true }
        );
        assert_eq!(
            parse_declaration("margin: 0 auto").unwrap().1,
            Decl::Unknown {
                name: "margin".into(),
                value: "0 auto".into()
            }
        );
    }

    #[test]
    fn test_decoration() {
        assert_eq!(
            parse_declaration("text-decoration: underline wavy #f00")
                .unwrap()
                .1,
            Decl::TextDecoration {
                value: Decoration {
                    underline: true,
                    strikeout: false,
                    waved: true,
                    colour: Some(Colour::rgb(0xff, 0, 0)),
                }
            }
        );
    }

    #[test]
    fn test_declaration_list() {
        let (_, decls) =
            parse_declaration_list(" color: red; ; background-color: blue; /* note */ ").unwrap();
        assert_eq!(
            decls,
            vec![
                Decl::Color {
                    value: Colour::rgb(0xff, 0, 0)
                },
                Decl::BackgroundColor {
                    value: Colour::rgb(0, 0, 0xff)
                },
            ]
        );
        assert_eq!(parse_declaration_list("").unwrap().1, vec![]);
        assert!(parse_declaration_list("color red").is_err());
    }
}
