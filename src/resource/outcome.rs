//! Classification of invocation results into user-facing outcomes.
//!
//! Apply follows the create-if-missing state machine: Put first, and a 404
//! answer re-invokes the binding as Post. Each step makes at most one round
//! trip and no step is ever retried.

use std::fmt;

use serde_json::Value;

use crate::api::ApiResponse;
use crate::error::report_api_error;
use crate::resource::{GenericDocument, ResourceDescriptor};

/// Normalized status of one create/update/delete attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Created,
    Configured,
    Deleted,
    Failed,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Created => "created",
            OutcomeStatus::Configured => "configured",
            OutcomeStatus::Deleted => "deleted",
            OutcomeStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one operation against one named resource.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub kind: String,
    pub name: String,
    pub status: OutcomeStatus,
}

impl Outcome {
    fn new(kind: &str, name: &str, status: OutcomeStatus) -> Self {
        Self { kind: kind.to_string(), name: name.to_string(), status }
    }

    pub fn failed(&self) -> bool {
        self.status == OutcomeStatus::Failed
    }
}

fn report_success(kind: &str, name: &str, status: OutcomeStatus) {
    println!("Resource {kind}:{name} {status}");
}

fn report_error(kind: &str, name: &str, err: &dyn fmt::Display) {
    eprintln!("Resource {kind}:{name} error: {err}");
}

/// A 2xx answer still has to carry a parseable body; a body that does not
/// decode is a failure distinct from an HTTP error.
fn classify_body(
    kind: &str,
    name: &str,
    response: &ApiResponse,
    success: OutcomeStatus,
) -> Outcome {
    match serde_json::from_slice::<Value>(&response.body) {
        Ok(_) => {
            report_success(kind, name, success);
            Outcome::new(kind, name, success)
        }
        Err(e) => {
            report_error(kind, name, &e);
            Outcome::new(kind, name, OutcomeStatus::Failed)
        }
    }
}

/// Apply one document to one matching descriptor: update, falling back to
/// create when the target does not exist yet.
pub async fn apply(descriptor: &ResourceDescriptor, document: &GenericDocument) -> Outcome {
    let kind = descriptor.kind;
    let name = document.metadata.name.as_str();

    match descriptor.ops.put(name, &document.spec).await {
        Err(e) => {
            report_error(kind, name, &e);
            Outcome::new(kind, name, OutcomeStatus::Failed)
        }
        Ok(response) if response.status == 404 => create(descriptor, document).await,
        Ok(response) if response.status >= 400 => {
            report_api_error(kind, name, &response.body_text());
            Outcome::new(kind, name, OutcomeStatus::Failed)
        }
        Ok(response) => classify_body(kind, name, &response, OutcomeStatus::Configured),
    }
}

async fn create(descriptor: &ResourceDescriptor, document: &GenericDocument) -> Outcome {
    let kind = descriptor.kind;
    let name = document.metadata.name.as_str();

    match descriptor.ops.post(&document.spec).await {
        Err(e) => {
            report_error(kind, name, &e);
            Outcome::new(kind, name, OutcomeStatus::Failed)
        }
        Ok(response) if response.status >= 400 => {
            report_api_error(kind, name, &response.body_text());
            Outcome::new(kind, name, OutcomeStatus::Failed)
        }
        Ok(response) => classify_body(kind, name, &response, OutcomeStatus::Created),
    }
}

/// Delete one named resource: 2xx is `deleted`, anything else fails through
/// the error handler.
pub async fn delete(descriptor: &ResourceDescriptor, name: &str) -> Outcome {
    let kind = descriptor.kind;

    match descriptor.ops.delete(name).await {
        Err(e) => {
            report_error(kind, name, &e);
            Outcome::new(kind, name, OutcomeStatus::Failed)
        }
        Ok(response) if response.is_success() => {
            report_success(kind, name, OutcomeStatus::Deleted);
            Outcome::new(kind, name, OutcomeStatus::Deleted)
        }
        Ok(response) => {
            report_api_error(kind, name, &response.body_text());
            Outcome::new(kind, name, OutcomeStatus::Failed)
        }
    }
}
