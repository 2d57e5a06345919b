// Command line interface for expanding templates and building requests

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches};
use reqwest::Method;
use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;

use crate::config::VariablesFile;
use crate::domain::template::{TemplateExpander, Variables};
use crate::services::{Body, TemplateClient};

/// Variable values gathered from the command line and an optional file
#[derive(Debug, PartialEq)]
enum VariableInput {
    Named(HashMap<String, String>),
    Positional(Vec<String>),
}

impl VariableInput {
    fn as_variables(&self) -> Variables<'_> {
        match self {
            VariableInput::Named(map) => Variables::Named(map),
            VariableInput::Positional(values) => Variables::Positional(values),
        }
    }
}

fn variable_args() -> [Arg; 5] {
    [
        Arg::new("var")
            .short('v')
            .long("var")
            .value_name("NAME=VALUE")
            .action(ArgAction::Append)
            .help("Named variable; may be repeated"),
        Arg::new("arg")
            .short('p')
            .long("arg")
            .value_name("VALUE")
            .action(ArgAction::Append)
            .conflicts_with_all(["var", "vars_file"])
            .help("Positional variable, consumed in placeholder order; may be repeated"),
        Arg::new("vars_file")
            .short('f')
            .long("vars-file")
            .value_name("FILE")
            .help("Path to a YAML file with named variables"),
        Arg::new("encode")
            .long("encode")
            .action(ArgAction::SetTrue)
            .help("Percent-encode substituted values"),
        Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help("Fail when placeholders remain after named expansion"),
    ]
}

pub fn command() -> clap::Command {
    clap::Command::new("uri-templates")
        .about("Expand {name} placeholders in request paths")
        .subcommand_required(true)
        .subcommand(
            clap::Command::new("expand")
                .about("Expand a path template and print it")
                .arg(Arg::new("template").required(true).value_name("TEMPLATE"))
                .args(variable_args()),
        )
        .subcommand(
            clap::Command::new("request")
                .about("Build an HTTP request from a path template")
                .arg(Arg::new("method").required(true).value_name("METHOD"))
                .arg(Arg::new("template").required(true).value_name("TEMPLATE"))
                .args(variable_args())
                .arg(
                    Arg::new("base_url")
                        .short('b')
                        .long("base-url")
                        .value_name("URL")
                        .help("Base URL the expanded path is resolved against"),
                )
                .arg(
                    Arg::new("header")
                        .short('H')
                        .long("header")
                        .value_name("NAME:VALUE")
                        .action(ArgAction::Append)
                        .help("Request header; may be repeated"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .value_name("BODY")
                        .help("JSON request body"),
                )
                .arg(
                    Arg::new("send")
                        .long("send")
                        .action(ArgAction::SetTrue)
                        .help("Send the request and print the response status"),
                ),
        )
}

/// Run the parsed command line and return what should be printed
pub async fn run(matches: &ArgMatches) -> Result<String> {
    match matches.subcommand() {
        Some(("expand", sub)) => run_expand(sub),
        Some(("request", sub)) => run_request(sub).await,
        _ => bail!("Unknown command"),
    }
}

fn run_expand(matches: &ArgMatches) -> Result<String> {
    let template = required(matches, "template")?;
    let file = load_vars_file(matches)?;
    let input = variable_input(matches, file.as_ref())?;

    let expanded = expander(matches).expand(template, input.as_variables())?;
    check_strict(matches, &input, &expanded)?;
    Ok(expanded)
}

async fn run_request(matches: &ArgMatches) -> Result<String> {
    let method_name = required(matches, "method")?;
    let method = Method::from_bytes(method_name.to_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method '{}'", method_name))?;
    let template = required(matches, "template")?;
    let file = load_vars_file(matches)?;
    let input = variable_input(matches, file.as_ref())?;

    let base_url = matches
        .get_one::<String>("base_url")
        .cloned()
        .or_else(|| file.as_ref().and_then(|f| f.base_url.clone()))
        .context("A base URL is required (--base-url or base_url in the variables file)")?;

    let mut headers = file.map(|f| f.headers).unwrap_or_default();
    for header in matches.get_many::<String>("header").into_iter().flatten() {
        let (name, value) = split_pair(header, ':')
            .with_context(|| format!("Header '{}' must look like NAME:VALUE", header))?;
        headers.insert(name.to_string(), value.trim().to_string());
    }

    let body = matches
        .get_one::<String>("json")
        .map(|raw| serde_json::from_str(raw).map(Body::Json))
        .transpose()
        .context("Invalid JSON body")?;

    // Leftover placeholders are checked before the URL parser escapes their braces
    if matches.get_flag("strict") {
        let expanded = expander(matches).expand(template, input.as_variables())?;
        check_strict(matches, &input, &expanded)?;
    }

    let client = TemplateClient::new(&base_url)?.with_expander(expander(matches));
    let request = client.request(
        method,
        template,
        input.as_variables(),
        Some(&headers),
        body.as_ref(),
    )?;

    if matches.get_flag("send") {
        let response = client.send(request).await?;
        return Ok(format!("{}", response.status()));
    }

    let mut output = format!("{} {}", request.method(), request.url());
    for (name, value) in request.headers() {
        write!(output, "\n{}: {}", name, value.to_str().unwrap_or("<binary>"))?;
    }
    Ok(output)
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("Missing argument '{}'", id))
}

fn expander(matches: &ArgMatches) -> TemplateExpander {
    if matches.get_flag("encode") {
        TemplateExpander::new().with_value_encoding()
    } else {
        TemplateExpander::new()
    }
}

fn load_vars_file(matches: &ArgMatches) -> Result<Option<VariablesFile>> {
    matches
        .get_one::<String>("vars_file")
        .map(|path| VariablesFile::load(Path::new(path)))
        .transpose()
}

/// Positional values win when given; otherwise file variables overlaid by `--var`
fn variable_input(matches: &ArgMatches, file: Option<&VariablesFile>) -> Result<VariableInput> {
    if let Some(values) = matches.get_many::<String>("arg") {
        return Ok(VariableInput::Positional(values.cloned().collect()));
    }

    let mut vars = match file {
        Some(file) => file.string_variables()?,
        None => HashMap::new(),
    };
    for pair in matches.get_many::<String>("var").into_iter().flatten() {
        let (name, value) = split_pair(pair, '=')
            .with_context(|| format!("Variable '{}' must look like NAME=VALUE", pair))?;
        vars.insert(name.to_string(), value.to_string());
    }
    Ok(VariableInput::Named(vars))
}

fn split_pair(pair: &str, separator: char) -> Option<(&str, &str)> {
    let (name, value) = pair.split_once(separator)?;
    let name = name.trim();
    (!name.is_empty()).then_some((name, value))
}

fn check_strict(matches: &ArgMatches, input: &VariableInput, expanded: &str) -> Result<()> {
    if !matches.get_flag("strict") || input.as_variables().is_positional() {
        return Ok(());
    }
    let unresolved = TemplateExpander::unresolved(expanded);
    if !unresolved.is_empty() {
        bail!("Unresolved placeholders: {}", unresolved.join(", "));
    }
    Ok(())
}
