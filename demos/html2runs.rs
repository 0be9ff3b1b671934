extern crate argparse;
extern crate html2runs;
use argparse::{ArgumentParser, Store, StoreOption, StoreTrue};
use html2runs::render::ansi;
use html2runs::{config, Conversion, TextStyle};
use std::io;
use std::io::Write;

fn translate<R>(input: R, collapse: bool, _use_css: bool) -> Conversion
where
    R: io::Read,
{
    #[allow(unused_mut)]
    let mut conf = config::default().collapse_whitespace(collapse);
    #[cfg(feature = "css")]
    {
        if _use_css {
            conf = conf.use_inline_css();
        }
    }
    conf.convert_read(input, TextStyle::PLAIN)
}

fn describe(style: &TextStyle) -> String {
    let mut parts = Vec::new();
    for (on, name) in [
        (style.bold, "bold"),
        (style.italic, "italic"),
        (style.underline, "underline"),
        (style.strikeout, "strikeout"),
        (style.waved, "waved"),
        (style.smaller, "smaller"),
    ] {
        if on {
            parts.push(name.to_string());
        }
    }
    if let Some(c) = style.fg {
        parts.push(format!("fg={}", c));
    }
    if let Some(c) = style.bg {
        parts.push(format!("bg={}", c));
    }
    if let Some(c) = style.effect {
        parts.push(format!("effect={}", c));
    }
    if parts.is_empty() {
        "plain".to_string()
    } else {
        parts.join(",")
    }
}

fn main() {
    env_logger::init();

    let mut infile: Option<String> = None;
    let mut outfile: Option<String> = None;
    let mut collapse: bool = false;
    let mut use_colour: bool = false;
    #[allow(unused)]
    let mut use_css = false;

    {
        let mut ap = ArgumentParser::new();
        ap.refer(&mut infile).add_argument(
            "infile",
            StoreOption,
            "Input HTML file (default is standard input)",
        );
        ap.refer(&mut outfile).add_option(
            &["-o", "--output"],
            StoreOption,
            "Output file (default is standard output)",
        );
        ap.refer(&mut collapse).add_option(
            &["-c", "--collapse"],
            StoreTrue,
            "Collapse runs of whitespace",
        );
        ap.refer(&mut use_colour)
            .add_option(&["--colour"], StoreTrue, "Use ANSI terminal styles");
        #[cfg(feature = "css")]
        ap.refer(&mut use_css)
            .add_option(&["--css"], StoreTrue, "Use inline style attributes");
        ap.parse_args_or_exit();
    }

    let conversion = match infile {
        None => translate(&mut io::stdin().lock(), collapse, use_css),
        Some(name) => {
            let mut file = std::fs::File::open(name).expect("Tried to open file");
            translate(&mut file, collapse, use_css)
        }
    };

    for diag in &conversion.diagnostics {
        log::warn!("{}", diag);
    }
    if let html2runs::Outcome::Degraded(err) = &conversion.outcome {
        log::error!("Cannot parse HTML: {}", err);
    }

    let data = if use_colour {
        ansi::to_ansi(&conversion.fragments)
    } else {
        let mut data = String::new();
        for frag in &conversion.fragments {
            data.push_str(&format!("{:?}\t{}\n", frag.text(), describe(frag.style())));
        }
        data
    };

    match outfile {
        None => {
            println!("{}", data);
        }
        Some(name) => {
            let mut file = std::fs::File::create(name).expect("Tried to create file");
            write!(file, "{}", data).unwrap();
        }
    };
}
