//! Resource catalogue and generic CRUD dispatch.
//!
//! This is the data-driven heart of the CLI: a static catalogue of resource
//! kinds is mapped onto the control plane's CRUD operations without a
//! hand-written command per kind.
//!
//! # Module Structure
//!
//! - [`registry`] - static catalogue of resource descriptors with alias lookup
//! - [`ops`] - per-kind operation bindings and their REST implementation
//! - [`coerce`] - structural coercion from untyped values into payload shapes
//! - [`types`] - wire payload shapes for each resource kind
//! - [`outcome`] - classification of invocation results into apply/delete outcomes

pub mod coerce;
pub mod ops;
pub mod outcome;
pub mod registry;
pub mod types;

pub use registry::{Registry, ResourceDescriptor};

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn empty_spec() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A YAML/JSON document as read from user input: the envelope identifying the
/// target resource plus its untyped spec.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GenericDocument {
    pub api_version: String,
    pub kind: String,
    pub metadata: DocumentMetadata,
    #[serde(default = "empty_spec")]
    pub spec: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DocumentMetadata {
    pub name: String,
    pub workspace: Option<String>,
}
