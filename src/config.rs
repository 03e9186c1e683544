//! Configuration and per-invocation context.
//!
//! The persisted context file only supplies defaults; everything a command
//! needs is resolved once at startup into a [`Context`] and passed down, so
//! no component reads ambient process state on its own.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::render::OutputFormat;

pub const DEFAULT_BASE_URL: &str = "https://api.beamlit.dev/v0";

/// Persisted defaults from the context file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

impl Config {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("beamlit").join("config.json"))
    }

    /// Load configuration from disk; anything unreadable means defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}

/// Everything one command invocation needs, resolved once at startup.
/// Flags win over the context file; the base URL and API key come from
/// `BEAMLIT_API_URL` / `BEAMLIT_API_KEY` when set.
#[derive(Debug, Clone)]
pub struct Context {
    pub base_url: String,
    pub api_key: Option<String>,
    pub workspace: Option<String>,
    pub environment: Option<String>,
    pub output: OutputFormat,
}

impl Context {
    pub fn resolve(
        workspace: Option<String>,
        environment: Option<String>,
        output: OutputFormat,
    ) -> Self {
        let config = Config::load();
        Self {
            base_url: std::env::var("BEAMLIT_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("BEAMLIT_API_KEY").ok(),
            workspace: workspace.or(config.workspace),
            environment: environment.or(config.environment),
            output,
        }
    }

    /// The flat options map handed to environment-scoped operations.
    pub fn options(&self) -> HashMap<String, String> {
        let mut options = HashMap::new();
        if let Some(environment) = &self.environment {
            options.insert("environment".to_string(), environment.clone());
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_carry_environment_when_set() {
        let ctx = Context {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            workspace: Some("acme".to_string()),
            environment: Some("production".to_string()),
            output: OutputFormat::Table,
        };
        let options = ctx.options();
        assert_eq!(options.get("environment").map(String::as_str), Some("production"));
    }

    #[test]
    fn options_empty_without_environment() {
        let ctx = Context {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            workspace: None,
            environment: None,
            output: OutputFormat::Table,
        };
        assert!(ctx.options().is_empty());
    }
}
