//! Config file discovery and generation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use webforms_core::{RouteConfig, RoutingConfig};
use webforms_hosting::EngineConfig;

/// File names searched in each directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["webforms.toml", ".webforms.toml", "webforms.json"];

/// Find a config file in `start` or any of its ancestors.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Starter configuration written by `webforms config init`.
pub fn default_config() -> EngineConfig {
    EngineConfig {
        routing: RoutingConfig::default().with_route(RouteConfig::new(
            "ProductsByCategoryRoute",
            "Category/{categoryName}",
            "~/",
        )),
        ..Default::default()
    }
}

/// Serialize a config in the format implied by the path's extension.
pub fn render_config(config: &EngineConfig, path: &Path) -> Result<String> {
    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::to_string_pretty(config).context("Failed to serialize JSON config")
    } else {
        toml::to_string_pretty(config).context("Failed to serialize TOML config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".webforms.toml"), "").unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, root.path().join(".webforms.toml"));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("webforms.json"), "{}").unwrap();
        std::fs::write(root.path().join("webforms.toml"), "").unwrap();

        let found = find_config_file(root.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "webforms.toml");
    }

    #[test]
    fn test_default_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["webforms.toml", "webforms.json"] {
            let path = dir.path().join(name);
            std::fs::write(&path, render_config(&default_config(), &path).unwrap()).unwrap();

            let loaded = EngineConfig::load(&path).unwrap();
            assert_eq!(loaded, default_config());
            assert_eq!(loaded.route_table().unwrap().len(), 1);
        }
    }
}
