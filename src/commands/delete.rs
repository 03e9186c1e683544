//! `bl delete` - delete resources by manifest file or by kind and name.

use anyhow::Result;

use crate::commands::collect_documents;
use crate::error::Error;
use crate::resource::outcome::{self, Outcome};
use crate::resource::Registry;

/// Delete every resource named by the manifest, matching documents to
/// descriptors the same way apply does (unregistered kinds skipped, per-item
/// failure isolation).
pub async fn run_file(registry: &Registry, path: &str) -> Result<Vec<Outcome>> {
    let documents = collect_documents(path, false)?;

    let mut outcomes = Vec::new();
    for document in &documents {
        for descriptor in registry.iter() {
            if descriptor.kind == document.kind {
                outcomes.push(outcome::delete(descriptor, &document.metadata.name).await);
            }
        }
    }
    Ok(outcomes)
}

/// Delete one resource addressed as `bl delete <kind> <name>`.
pub async fn run_named(registry: &Registry, kind: &str, name: &str) -> Result<Outcome, Error> {
    let descriptor = registry
        .lookup(kind)
        .ok_or_else(|| Error::Lookup(kind.to_string()))?;
    Ok(outcome::delete(descriptor, name).await)
}
