#![deny(missing_docs)]

//! # Request Command
//!
//! Synthesizes the request behind a request identifier and prints it next to the
//! response the description promises. Nothing is sent.

use crate::error::CliResult;
use crate::list::SpecArg;
use apidesc_core::{Describer, ExpectedResponse};
use http::Request;
use serde_json::json;
use std::io::Write;

/// Arguments for `request`.
#[derive(clap::Args, Debug, Clone)]
pub struct RequestArgs {
    #[clap(flatten)]
    pub spec: SpecArg,

    /// Request identifier, e.g. `findPets.200.0`.
    pub request_id: String,

    /// Body sent verbatim instead of the documented example.
    #[clap(long, default_value = "")]
    pub body: String,

    /// Synthesis parameter as `KEY=VALUE`, where KEY starts with `:` (header),
    /// `&` (query) or `=` (template substitution).
    /// Example: `--param :X-Token=abc --param &limit=5 --param =id=42`
    #[clap(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Print a JSON object instead of the HTTP-like listing.
    #[clap(long)]
    pub json: bool,
}

/// Splits `KEY=VALUE` at the first `=` after the prefix character.
fn parse_param(s: &str) -> Result<(String, String), String> {
    let mut chars = s.chars();
    let prefix = chars
        .next()
        .ok_or_else(|| "empty parameter".to_string())?;
    let rest = chars.as_str();
    let pos = rest
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    let key = format!("{}{}", prefix, &rest[..pos]);
    Ok((key, rest[pos + 1..].to_string()))
}

/// Executes the request command against a loaded describer.
pub fn execute(args: &RequestArgs, api: &dyn Describer, out: &mut impl Write) -> CliResult<()> {
    let flat: Vec<&str> = args
        .params
        .iter()
        .flat_map(|(k, v)| [k.as_str(), v.as_str()])
        .collect();
    let (request, expected) = api.get_request(&args.request_id, &args.body, &flat)?;

    if args.json {
        write_json(&request, &expected, out)
    } else {
        write_listing(&request, &expected, out)
    }
}

fn write_listing(
    request: &Request<String>,
    expected: &ExpectedResponse,
    out: &mut impl Write,
) -> CliResult<()> {
    writeln!(out, "{} {}", request.method(), request.uri())?;
    for (name, value) in request.headers() {
        writeln!(out, "{}: {}", name, String::from_utf8_lossy(value.as_bytes()))?;
    }
    if !request.body().is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", request.body())?;
    }

    writeln!(out)?;
    match expected.status {
        Some(_) => writeln!(
            out,
            "Expected: {} {}",
            expected.status_code(),
            expected.status_text
        )?,
        None => writeln!(out, "Expected: any status (default)")?,
    }
    if !expected.description.is_empty() {
        writeln!(out, "Description: {}", expected.description)?;
    }
    if !expected.headers.is_empty() {
        writeln!(out, "Headers: {}", expected.headers.join(", "))?;
    }
    Ok(())
}

fn write_json(
    request: &Request<String>,
    expected: &ExpectedResponse,
    out: &mut impl Write,
) -> CliResult<()> {
    let headers: serde_json::Map<String, serde_json::Value> = request
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                json!(String::from_utf8_lossy(value.as_bytes())),
            )
        })
        .collect();

    let doc = json!({
        "request": {
            "method": request.method().as_str(),
            "uri": request.uri().to_string(),
            "headers": headers,
            "body": request.body(),
        },
        "expected": {
            "status": expected.status_code(),
            "statusText": expected.status_text,
            "description": expected.description,
            "headers": expected.headers,
            "schema": expected.schema,
        },
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
    Ok(())
}
