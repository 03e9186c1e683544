//! Output rendering for get/list results.
//!
//! Records arrive as untyped maps straight from the API. The table view pulls
//! the four standard columns out with `-` defaults; the json/yaml/pretty
//! views re-wrap each record in the `beamlit.com/v1alpha1` envelope first,
//! which requires `workspace` and `name` to be present as strings.

use chrono::DateTime;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

pub const API_VERSION: &str = "beamlit.com/v1alpha1";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Pretty,
    Yaml,
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    api_version: &'static str,
    kind: &'a str,
    metadata: EnvelopeMetadata<'a>,
    spec: &'a Value,
}

#[derive(Serialize)]
struct EnvelopeMetadata<'a> {
    workspace: &'a str,
    name: &'a str,
}

/// Render records in the requested format and print to stdout.
pub fn output(kind: &str, records: &[Value], format: OutputFormat) -> Result<(), Error> {
    match format {
        OutputFormat::Table => print!("{}", render_table(records)),
        OutputFormat::Json => println!("{}", render_json(kind, records)?),
        OutputFormat::Yaml => println!("{}", render_yaml(kind, records)?),
        OutputFormat::Pretty => {
            let yaml = render_yaml(kind, records)?;
            print!("{}", colorize_yaml(&yaml));
        }
    }
    Ok(())
}

fn field_str<'v>(record: &'v Value, key: &str) -> Option<&'v str> {
    record.get(key).and_then(Value::as_str)
}

/// Format an RFC3339 timestamp for the table. Unparsable values are printed
/// raw rather than rejected; a badly formatted date is still a date.
fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn cell(record: &Value, key: &str) -> String {
    match field_str(record, key) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}

fn time_cell(record: &Value, key: &str) -> String {
    match field_str(record, key) {
        Some(s) if !s.is_empty() => format_timestamp(s),
        _ => "-".to_string(),
    }
}

pub fn render_table(records: &[Value]) -> String {
    let mut out = format!(
        "{:<15} {:<20} {:<20} {:<20}\n",
        "WORKSPACE", "NAME", "CREATED_AT", "UPDATED_AT"
    );
    for record in records {
        if !record.is_object() {
            continue;
        }
        out.push_str(&format!(
            "{:<15} {:<20} {:<20} {:<20}\n",
            cell(record, "workspace"),
            cell(record, "name"),
            time_cell(record, "createdAt"),
            time_cell(record, "updatedAt"),
        ));
    }
    out
}

/// Wrap records in envelopes, in input order. Records without a string
/// `workspace` and `name` cannot be wrapped and fail the whole render.
fn envelopes<'a>(kind: &'a str, records: &'a [Value]) -> Result<Vec<Envelope<'a>>, Error> {
    let mut wrapped = Vec::with_capacity(records.len());
    for record in records {
        if !record.is_object() {
            continue;
        }
        let workspace = field_str(record, "workspace").ok_or(Error::Decode {
            expected: "record with a string workspace",
            detail: "missing or non-string workspace field".to_string(),
        })?;
        let name = field_str(record, "name").ok_or(Error::Decode {
            expected: "record with a string name",
            detail: "missing or non-string name field".to_string(),
        })?;
        wrapped.push(Envelope {
            api_version: API_VERSION,
            kind,
            metadata: EnvelopeMetadata { workspace, name },
            spec: record,
        });
    }
    Ok(wrapped)
}

pub fn render_json(kind: &str, records: &[Value]) -> Result<String, Error> {
    let wrapped = envelopes(kind, records)?;
    serde_json::to_string_pretty(&wrapped).map_err(|e| Error::Decode {
        expected: "JSON document",
        detail: e.to_string(),
    })
}

pub fn render_yaml(kind: &str, records: &[Value]) -> Result<String, Error> {
    let mut out = String::new();
    for envelope in envelopes(kind, records)? {
        let doc = serde_yaml::to_string(&envelope).map_err(|e| Error::Decode {
            expected: "YAML document",
            detail: e.to_string(),
        })?;
        out.push_str("---\n");
        out.push_str(&doc);
    }
    Ok(out)
}

/// Colorize serialized YAML line by line. Purely lexical: keys blue, quoted
/// values green, numeric values yellow. Lines are split at the first colon so
/// values containing colons stay intact; blank lines are skipped.
pub fn colorize_yaml(yaml: &str) -> String {
    let mut out = String::new();
    for line in yaml.lines() {
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            out.push_str(line);
            out.push('\n');
            continue;
        };
        let trimmed = value.trim_start();
        let rendered = if trimmed.starts_with('"') || trimmed.starts_with('\'') {
            trimmed.green().to_string()
        } else if !trimmed.is_empty() && trimmed.parse::<f64>().is_ok() {
            trimmed.yellow().to_string()
        } else {
            trimmed.to_string()
        };
        out.push_str(&format!("{}: {}\n", key.blue(), rendered));
    }
    out
}
