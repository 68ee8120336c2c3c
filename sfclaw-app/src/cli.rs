use anyhow::{bail, Context, Result};
use serde_json::Value;
use sfclaw_tools::{function_definition, SalesforceTool, DESCRIPTION, TOOL_NAME};
use std::io::Read;

pub const USAGE: &str = "\
Usage:
  sfclaw schema            Print the tool's function-calling definition
  sfclaw run '<json>'      Run one tool call, e.g. '{\"operation\":\"list_objects\"}'
  sfclaw run -             Read the tool call JSON from stdin
  sfclaw help              Show this message";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Schema,
    Run(Value),
}

#[derive(Debug, Clone, PartialEq)]
enum RunSource {
    Inline(String),
    Stdin,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self> {
        match args.first().map(String::as_str) {
            None | Some("help") | Some("-h") | Some("--help") => Ok(Command::Help),
            Some("schema") => Ok(Command::Schema),
            Some("run") => {
                let source = match args.get(1).map(String::as_str) {
                    None => bail!("'run' needs a JSON argument or '-' for stdin"),
                    Some("-") => RunSource::Stdin,
                    Some(raw) => RunSource::Inline(raw.to_string()),
                };
                Ok(Command::Run(read_input(source)?))
            }
            Some(other) => bail!("Unknown command: {}\n\n{}", other, USAGE),
        }
    }
}

fn read_input(source: RunSource) -> Result<Value> {
    let raw = match source {
        RunSource::Inline(raw) => raw,
        RunSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read tool call from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Tool call is not valid JSON")
}

/// Function-calling definition as published to model providers. Built
/// without a session so `sfclaw schema` needs no credentials.
pub fn tool_definition() -> Value {
    function_definition(TOOL_NAME, DESCRIPTION, SalesforceTool::parameters())
}
