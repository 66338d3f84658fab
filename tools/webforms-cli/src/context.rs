//! CLI execution context.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use webforms_hosting::EngineConfig;
use webforms_routing::RouteTable;

use crate::config::find_config_file;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Engine configuration (defaults when no file was found).
    pub config: EngineConfig,
    /// File the configuration came from.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or by discovery.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(cwd.join(path)),
            None => find_config_file(&cwd),
        };

        let config = match &config_path {
            Some(path) => {
                output.debug(&format!("Using config {}", path.display()));
                EngineConfig::load(path)?
            }
            None => {
                output.debug("No config file found, using defaults");
                EngineConfig::default()
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Context with default configuration that never reads a config file.
    pub fn without_config(output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::in_dir(cwd, output))
    }

    pub(crate) fn in_dir(cwd: PathBuf, output: Output) -> Self {
        Self {
            config: EngineConfig::default(),
            config_path: None,
            output,
            cwd,
        }
    }

    /// Build the route table from the loaded configuration.
    pub fn route_table(&self) -> Result<RouteTable> {
        self.config
            .route_table()
            .context("Invalid routing configuration")
    }
}
