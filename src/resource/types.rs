//! Wire payload shapes for each resource kind.
//!
//! These mirror the control-plane API contract, so coercion into them is
//! exactly as lenient as the wire: unknown fields are dropped, declared
//! optionals default, and a value that cannot convert to its declared field
//! type is an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Query parameters accepted by environment-scoped get/list operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentScope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// Marker shape for operations that take no extra query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NoParams {}

/// A compute flavor offered by a location or requested by a deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flavor {
    #[serde(rename = "type")]
    pub flavor_type: String,
    pub name: String,
}

/// Container runtime settings shared by function and model deployments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Runtime {
    pub image: Option<String>,
    pub memory: Option<u64>,
    pub command: Option<Vec<String>>,
    pub envs: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentSpec {
    pub display_name: Option<String>,
    pub policies: Option<Vec<String>>,
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PolicySpec {
    #[serde(rename = "type")]
    pub policy_type: String,
    pub display_name: Option<String>,
    pub locations: Option<Vec<PolicyLocation>>,
    pub flavors: Option<Vec<Flavor>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyLocation {
    #[serde(rename = "type")]
    pub location_type: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelSpec {
    pub display_name: Option<String>,
    pub flavors: Option<Vec<Flavor>>,
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelDeploymentSpec {
    pub model: String,
    pub environment: Option<String>,
    pub min_num_replicas: Option<u32>,
    pub max_num_replicas: Option<u32>,
    pub policies: Option<Vec<String>>,
    pub runtime: Option<Runtime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionSpec {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub runtime: Option<Runtime>,
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeploymentSpec {
    pub function: String,
    pub environment: Option<String>,
    pub policies: Option<Vec<String>>,
    pub runtime: Option<Runtime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConnectionSpec {
    pub integration: String,
    pub config: Option<HashMap<String, String>>,
    pub secret: Option<HashMap<String, String>>,
}
