use clap::{Args, Parser, Subcommand};
use shtml_parser::{Document, Element, Node, OptionOverride, Options};
use std::path::Path;
use tracing::debug;

#[derive(Parser)]
#[command(name = "shtml")]
#[command(about = "shtml: parser for a strict HTML dialect")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a document for errors
    Check(Input),

    /// Print the parsed tree as an indented outline
    Tree(Input),

    /// Print the parsed tree as JSON
    Json(Input),

    /// Print the parsed tree back as HTML
    Fmt(Input),
}

#[derive(Args)]
struct Input {
    /// Input .html file
    path: String,

    /// Parser option as key or key=true|false (xml_perversion, single_quotes, missing_quotes)
    #[arg(short = 'O', long = "option")]
    options: Vec<OptionOverride>,

    /// Reject documents nested deeper than this
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Check(input) => cmd_check(&input),
        Command::Tree(input) => cmd_tree(&input),
        Command::Json(input) => cmd_json(&input),
        Command::Fmt(input) => cmd_fmt(&input),
    }
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_input(input: &Input) -> Document {
    let options = match Options::from_pairs(input.options.iter().map(|o| (&o.key, o.value))) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    debug!(path = %input.path, ?options, "reading document");

    let source = read_source(&input.path);
    let mut parser = shtml_parser::Parser::new(&source).with_options(options);
    if let Some(limit) = input.max_depth {
        parser = parser.max_depth(limit);
    }

    match parser.parse() {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{}: {e}", input.path);
            std::process::exit(1);
        }
    }
}

fn cmd_check(input: &Input) {
    parse_input(input);
    eprintln!("OK: {}", input.path);
}

fn cmd_tree(input: &Input) {
    let doc = parse_input(input);
    print!("{}", outline(&doc));
}

fn cmd_json(input: &Input) {
    let doc = parse_input(input);
    match serde_json::to_string_pretty(&doc) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error encoding JSON: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_fmt(input: &Input) {
    let doc = parse_input(input);
    println!("{doc}");
}

// --- Outline ---

fn outline(doc: &Document) -> String {
    let mut out = format!("#document ({})\n", doc.doctype);
    for child in &doc.children {
        outline_node(child, 1, &mut out);
    }
    out
}

fn outline_node(node: &Node, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Element(el) => {
            out.push_str(&format!("{indent}<{}{}>\n", el.tag, outline_attributes(el)));
            for child in &el.children {
                outline_node(child, depth + 1, out);
            }
        }
        Node::Text(text) => out.push_str(&format!("{indent}{text:?}\n")),
        Node::Comment(text) => out.push_str(&format!("{indent}#comment {text:?}\n")),
    }
}

fn outline_attributes(el: &Element) -> String {
    el.attributes
        .iter()
        .map(|(name, value)| match value.as_str() {
            Some(v) => format!(" {name}={v:?}"),
            None => format!(" {name}"),
        })
        .collect()
}
