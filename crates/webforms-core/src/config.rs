//! Route configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a single page route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Unique route name (e.g., "ProductsByCategoryRoute").
    pub name: String,
    /// URL pattern (e.g., "Category/{categoryName}").
    pub pattern: String,
    /// Virtual path of the target page.
    #[serde(default = "default_virtual_path")]
    pub virtual_path: String,
}

fn default_virtual_path() -> String {
    "~/".to_string()
}

impl RouteConfig {
    /// Create a new route configuration.
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        virtual_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            virtual_path: virtual_path.into(),
        }
    }
}

/// Routing section of the engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Application root that `~/` virtual paths resolve against.
    #[serde(default = "default_application_path")]
    pub application_path: String,

    /// Routes in precedence order.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

fn default_application_path() -> String {
    "/".to_string()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            application_path: default_application_path(),
            routes: Vec::new(),
        }
    }
}

impl RoutingConfig {
    /// Load routing config from a TOML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_file(path.as_ref())
    }

    /// Add a route.
    pub fn with_route(mut self, route: RouteConfig) -> Self {
        self.routes.push(route);
        self
    }

    /// Set the application path.
    pub fn with_application_path(mut self, path: impl Into<String>) -> Self {
        self.application_path = path.into();
        self
    }
}

/// Read a config file, choosing JSON or TOML by extension.
pub fn load_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }
}
