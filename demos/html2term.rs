extern crate html2runs;
extern crate termion;
use html2runs::TextStyle;
use std::io::{self, Read, Write};

fn to_style(style: &TextStyle) -> String {
    let mut s = String::new();
    if style.bold {
        s.push_str(&termion::style::Bold.to_string());
    }
    if style.italic {
        s.push_str(&termion::style::Italic.to_string());
    }
    if style.underline || style.waved {
        s.push_str(&termion::style::Underline.to_string());
    }
    if style.strikeout {
        s.push_str(&termion::style::CrossedOut.to_string());
    }
    if let Some(c) = style.fg {
        s.push_str(&termion::color::Fg(termion::color::Rgb(c.r, c.g, c.b)).to_string());
    }
    if let Some(c) = style.bg {
        s.push_str(&termion::color::Bg(termion::color::Rgb(c.r, c.g, c.b)).to_string());
    }
    s
}

fn main() {
    let mut html = String::new();
    io::stdin().read_to_string(&mut html).unwrap();

    let mut line = html2runs::render::StyledLine::new();
    html2runs::Converter::default().append_html(&mut line, &html, TextStyle::PLAIN);
    let mut stdout = io::stdout();
    for (s, style) in line.iter() {
        write!(stdout, "{}{}{}", to_style(style), s, termion::style::Reset).unwrap();
    }
    writeln!(stdout).unwrap();
}
