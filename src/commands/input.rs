//! Manifest reading and multi-document parsing.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::resource::GenericDocument;

/// Read documents from a file, a directory (with `recursive`), or stdin
/// (`"-"`). Directory walks visit entries in path order so applies are
/// deterministic.
pub fn collect_documents(path: &str, recursive: bool) -> Result<Vec<GenericDocument>> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return parse_documents(&text);
    }

    let meta = fs::metadata(path).with_context(|| format!("opening {path}"))?;
    if meta.is_dir() {
        if !recursive {
            bail!("{path} is a directory; use -R to process it recursively");
        }
        let mut documents = Vec::new();
        collect_dir(Path::new(path), &mut documents)?;
        Ok(documents)
    } else {
        let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        parse_documents(&text)
    }
}

fn collect_dir(dir: &Path, documents: &mut Vec<GenericDocument>) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_dir(&path, documents)?;
            continue;
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") | Some("json") => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                documents.extend(parse_documents(&text)?);
            }
            _ => {}
        }
    }
    Ok(())
}

/// Parse a multi-document YAML stream (JSON being a YAML subset, plain JSON
/// files parse too). Empty documents are skipped.
pub fn parse_documents(text: &str) -> Result<Vec<GenericDocument>> {
    let mut documents = Vec::new();
    for deserializer in serde_yaml::Deserializer::from_str(text) {
        let value = serde_json::Value::deserialize(deserializer).context("decoding document")?;
        if value.is_null() {
            continue;
        }
        let document: GenericDocument =
            serde_json::from_value(value).context("decoding document envelope")?;
        documents.push(document);
    }
    Ok(documents)
}
