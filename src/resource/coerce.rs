//! Structural coercion from untyped values into typed payload shapes.
//!
//! The untyped side is `serde_json::Value`, the tagged form every YAML/JSON
//! document decodes into. Coercion is a single explicit, fallible conversion
//! into the target shape: extra fields are dropped and optionals default, the
//! same tolerance the wire contract has, while a missing required field or an
//! unconvertible value fails without partially constructing the target.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// Strip the module path from a type name for error messages.
fn shape_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Coerce an untyped value into the target payload shape.
pub fn coerce<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| Error::ShapeMismatch {
        target: shape_name::<T>(),
        detail: e.to_string(),
    })
}

/// Coerce the flat CLI options map into an operation's query-parameter shape.
pub fn coerce_options<P: DeserializeOwned>(options: &HashMap<String, String>) -> Result<P, Error> {
    let value = Value::Object(
        options
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    );
    coerce(value)
}
