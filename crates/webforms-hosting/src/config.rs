//! Engine configuration file.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use webforms_core::{load_file, RoutingConfig};
use webforms_observability::ObservabilityConfig;
use webforms_routing::{RouteError, RouteTable};

/// Routing plus logging, as read from `webforms.toml` or `webforms.json`.
///
/// ```toml
/// [routing]
/// application_path = "/"
///
/// [[routing.routes]]
/// name = "ProductsByCategoryRoute"
/// pattern = "Category/{categoryName}"
///
/// [logging]
/// log_level = "debug"
/// log_format = "human"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub logging: ObservabilityConfig,
}

impl EngineConfig {
    /// Load from a TOML or JSON file, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_file(path.as_ref())
    }

    /// Build the route table described by the routing section.
    pub fn route_table(&self) -> Result<RouteTable, RouteError> {
        RouteTable::from_config(&self.routing)
    }
}
