//! Argument parsing and command execution. Every command produces the
//! text written to stdout.

use std::io::Read;

use annotext_config::Config;
use annotext_engine::dom::Node;
use annotext_engine::{AnnotatedText, ExtractOptions};
use anyhow::{Context, Result, bail};
use regex::Regex;

pub const USAGE: &str = "\
Usage: annotext <command> [args]

Commands:
  extract <html-file> [--subtractive]          HTML element to JSON
  render <json-file>                           JSON to HTML
  replace <json-file> <regex> <template> [--limit N]
  slice <json-file> <start> [end]
  append <json-file> (<json-file> | --text STRING)

Use - as a file name to read stdin.";

#[derive(Debug, PartialEq, Eq)]
pub enum Tail {
    Json(String),
    Text(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Extract {
        input: String,
        subtractive: bool,
    },
    Render {
        input: String,
    },
    Replace {
        input: String,
        pattern: String,
        template: String,
        limit: usize,
    },
    Slice {
        input: String,
        start: isize,
        end: Option<isize>,
    },
    Append {
        input: String,
        tail: Tail,
    },
}

fn number<T: std::str::FromStr>(arg: &str, what: &str) -> Result<T> {
    arg.parse()
        .map_err(|_| anyhow::anyhow!("{what} must be an integer, got '{arg}'"))
}

/// Parses the arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Command> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let command = match args.as_slice() {
        ["extract", input] => Command::Extract {
            input: input.to_string(),
            subtractive: false,
        },
        ["extract", input, "--subtractive"] | ["extract", "--subtractive", input] => {
            Command::Extract {
                input: input.to_string(),
                subtractive: true,
            }
        }
        ["render", input] => Command::Render {
            input: input.to_string(),
        },
        ["replace", input, pattern, template, rest @ ..] => {
            let limit = match rest {
                [] => 0,
                ["--limit", n] => number(n, "--limit")?,
                _ => bail!("unexpected arguments after replace template: {rest:?}"),
            };
            Command::Replace {
                input: input.to_string(),
                pattern: pattern.to_string(),
                template: template.to_string(),
                limit,
            }
        }
        ["slice", input, start] => Command::Slice {
            input: input.to_string(),
            start: number(start, "start")?,
            end: None,
        },
        ["slice", input, start, end] => Command::Slice {
            input: input.to_string(),
            start: number(start, "start")?,
            end: Some(number(end, "end")?),
        },
        ["append", input, "--text", text] => Command::Append {
            input: input.to_string(),
            tail: Tail::Text(text.to_string()),
        },
        ["append", input, other] => Command::Append {
            input: input.to_string(),
            tail: Tail::Json(other.to_string()),
        },
        [] => bail!("missing command"),
        [name, ..] => bail!("unknown command or wrong arguments for '{name}'"),
    };
    Ok(command)
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read '{path}'"))
}

fn read_json(path: &str) -> Result<AnnotatedText> {
    let content = read_input(path)?;
    AnnotatedText::from_json(&content).with_context(|| format!("Invalid annotated text in '{path}'"))
}

fn write_json(text: &AnnotatedText, config: &Config) -> Result<String> {
    let json = if config.pretty {
        text.to_json_pretty()?
    } else {
        text.to_json()?
    };
    Ok(json)
}

/// Extracts `html`, wrapped in the configured default tag unless it is a
/// single element.
pub fn extract(html: &str, options: &ExtractOptions, config: &Config) -> Result<AnnotatedText> {
    let root = Node::from(annotext_html::parse_root(&config.default_tag, html));
    Ok(AnnotatedText::from_tree(&root, options)?)
}

/// Runs `command` and returns what should be printed.
pub fn run(command: Command, config: &Config) -> Result<String> {
    match command {
        Command::Extract { input, subtractive } => {
            let options = if subtractive || config.style_subtraction {
                ExtractOptions::subtractive()
            } else {
                ExtractOptions::default()
            };
            let text = extract(&read_input(&input)?, &options, config)?;
            write_json(&text, config)
        }
        Command::Render { input } => Ok(read_json(&input)?.to_string()),
        Command::Replace {
            input,
            pattern,
            template,
            limit,
        } => {
            let pattern =
                Regex::new(&pattern).with_context(|| format!("Invalid pattern '{pattern}'"))?;
            let mut text = read_json(&input)?;
            text.replacen(&pattern, limit, template.as_str());
            write_json(&text, config)
        }
        Command::Slice { input, start, end } => {
            write_json(&read_json(&input)?.substring(start, end), config)
        }
        Command::Append { input, tail } => {
            let head = read_json(&input)?;
            let joined = match tail {
                Tail::Json(path) => head.append(&read_json(&path)?),
                Tail::Text(text) => head.append(text.as_str()),
            };
            write_json(&joined, config)
        }
    }
}
