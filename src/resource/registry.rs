//! Resource Registry - the static catalogue of supported kinds.
//!
//! Adding a resource kind means adding an entry to [`Registry::new`]; there
//! is no runtime registration, which keeps the catalogue auditable and makes
//! alias collisions impossible to introduce dynamically.

use crate::api::ApiClient;
use crate::resource::ops::{Capabilities, ResourceOps, RestOps};
use crate::resource::types::{
    EnvironmentScope, EnvironmentSpec, FunctionDeploymentSpec, FunctionSpec,
    IntegrationConnectionSpec, ModelDeploymentSpec, ModelSpec, PolicySpec,
};

/// One supported resource kind: its names plus the bound operations.
pub struct ResourceDescriptor {
    pub kind: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
    pub short: &'static str,
    pub ops: Box<dyn ResourceOps>,
}

impl ResourceDescriptor {
    /// True when the token names this kind under any of its aliases.
    pub fn matches(&self, token: &str) -> bool {
        token == self.kind
            || token == self.singular
            || token == self.plural
            || token == self.short
    }

    fn aliases(&self) -> [&'static str; 4] {
        [self.kind, self.singular, self.plural, self.short]
    }
}

pub struct Registry {
    entries: Vec<ResourceDescriptor>,
}

impl Registry {
    pub fn new(client: &ApiClient) -> Self {
        let entries = vec![
            ResourceDescriptor {
                kind: "Environment",
                singular: "environment",
                plural: "environments",
                short: "env",
                ops: Box::new(RestOps::<EnvironmentSpec>::new(
                    client.clone(),
                    "Environment",
                    "environments",
                    Capabilities::crud(),
                )),
            },
            ResourceDescriptor {
                kind: "Policy",
                singular: "policy",
                plural: "policies",
                short: "pol",
                ops: Box::new(RestOps::<PolicySpec>::new(
                    client.clone(),
                    "Policy",
                    "policies",
                    Capabilities::crud(),
                )),
            },
            ResourceDescriptor {
                kind: "Model",
                singular: "model",
                plural: "models",
                short: "ml",
                ops: Box::new(
                    RestOps::<ModelSpec, EnvironmentScope>::new(
                        client.clone(),
                        "Model",
                        "models",
                        Capabilities::crud(),
                    )
                    .scoped(),
                ),
            },
            ResourceDescriptor {
                kind: "ModelDeployment",
                singular: "modeldeployment",
                plural: "modeldeployments",
                short: "mdeploy",
                ops: Box::new(
                    RestOps::<ModelDeploymentSpec, EnvironmentScope>::new(
                        client.clone(),
                        "ModelDeployment",
                        "modeldeployments",
                        Capabilities::crud(),
                    )
                    .scoped(),
                ),
            },
            ResourceDescriptor {
                kind: "Function",
                singular: "function",
                plural: "functions",
                short: "func",
                ops: Box::new(RestOps::<FunctionSpec>::new(
                    client.clone(),
                    "Function",
                    "functions",
                    Capabilities::crud(),
                )),
            },
            ResourceDescriptor {
                kind: "FunctionDeployment",
                singular: "functiondeployment",
                plural: "functiondeployments",
                short: "fdeploy",
                ops: Box::new(
                    RestOps::<FunctionDeploymentSpec, EnvironmentScope>::new(
                        client.clone(),
                        "FunctionDeployment",
                        "functiondeployments",
                        Capabilities::crud(),
                    )
                    .scoped(),
                ),
            },
            ResourceDescriptor {
                kind: "IntegrationConnection",
                singular: "integrationconnection",
                plural: "integrationconnections",
                short: "int",
                ops: Box::new(RestOps::<IntegrationConnectionSpec>::new(
                    client.clone(),
                    "IntegrationConnection",
                    "integrationconnections",
                    Capabilities::crud(),
                )),
            },
            // Workspaces are managed through the console; the CLI only reads them.
            ResourceDescriptor {
                kind: "Workspace",
                singular: "workspace",
                plural: "workspaces",
                short: "ws",
                ops: Box::new(RestOps::<EnvironmentSpec>::new(
                    client.clone(),
                    "Workspace",
                    "workspaces",
                    Capabilities::read_only(),
                )),
            },
        ];

        Self { entries }
    }

    /// Find the descriptor a kind string or alias refers to.
    pub fn lookup(&self, token: &str) -> Option<&ResourceDescriptor> {
        self.entries.iter().find(|entry| entry.matches(token))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceDescriptor> {
        self.entries.iter()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.kind).collect()
    }
}
