//! Error taxonomy for resource operations.
//!
//! Every failure the core can produce maps onto one of these variants so that
//! callers can tell an HTTP-level failure apart from a body that would not
//! decode, and a payload that would not coerce apart from a transport fault.

use crate::resource::ops::Operation;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No descriptor in the registry matches the given kind or alias.
    #[error("unknown resource kind {0:?}")]
    Lookup(String),

    /// The descriptor exists but does not bind the requested operation.
    #[error("operation {op} is not supported for {kind}")]
    UnsupportedOperation { op: Operation, kind: &'static str },

    /// The untyped input could not be coerced into the operation's payload shape.
    #[error("payload does not match the {target} shape: {detail}")]
    ShapeMismatch { target: &'static str, detail: String },

    /// Network or request-building failure surfaced by the transport.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a status >= 400.
    #[error("API request failed with status {status}")]
    HttpStatus { status: u16, body: String },

    /// A successful response whose body does not parse into the expected shape.
    #[error("response is not a valid {expected}: {detail}")]
    Decode { expected: &'static str, detail: String },
}

impl Error {
    /// True when the failure was already printed through the error handler at
    /// the point it was classified. The top level exits nonzero on these but
    /// must not print a second message.
    pub fn already_reported(&self) -> bool {
        matches!(self, Error::HttpStatus { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Extract a human-readable message from an API error payload.
///
/// The control plane wraps failures as `{"error": "..."}` or
/// `{"error": {"message": "..."}}`; anything else is passed through raw.
pub fn render_api_error(body: &str) -> String {
    let parsed: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return body.trim().to_string(),
    };
    let error = match parsed.get("error") {
        Some(e) => e,
        None => return body.trim().to_string(),
    };
    if let Some(msg) = error.as_str() {
        return msg.to_string();
    }
    if let Some(msg) = error.get("message").and_then(|m| m.as_str()) {
        return msg.to_string();
    }
    body.trim().to_string()
}

/// Print the user-facing error line for one classified failure.
///
/// Called exactly once per failure; `name` may be empty for list operations.
pub fn report_api_error(kind: &str, name: &str, body: &str) {
    let message = render_api_error(body);
    if name.is_empty() {
        eprintln!("Resource {kind} error: {message}");
    } else {
        eprintln!("Resource {kind}:{name} error: {message}");
    }
}
