//! `bl apply -f` - create or update resources from a manifest file.

use anyhow::Result;

use crate::commands::collect_documents;
use crate::resource::outcome::{self, Outcome};
use crate::resource::Registry;

/// Apply every document against every matching descriptor, strictly in file
/// order. Documents whose kind is not registered are skipped silently, and a
/// failing (document, descriptor) pair does not stop its siblings.
pub async fn run(registry: &Registry, path: &str, recursive: bool) -> Result<Vec<Outcome>> {
    let documents = collect_documents(path, recursive)?;

    let mut outcomes = Vec::new();
    for document in &documents {
        for descriptor in registry.iter() {
            if descriptor.kind == document.kind {
                outcomes.push(outcome::apply(descriptor, document).await);
            }
        }
    }
    Ok(outcomes)
}

/// True when no outcome in the batch failed.
pub fn all_succeeded(outcomes: &[Outcome]) -> bool {
    outcomes.iter().all(|outcome| !outcome.failed())
}
