//! Tool catalog loading

use super::ConfigError;
use crate::catalog::{Tool, ToolCatalog};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for tool configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(rename = "tools")]
    pub tools: Vec<Tool>,
}

/// Load the tool catalog from a TOML file
pub fn load_tool_catalog(path: &Path) -> Result<ToolCatalog, ConfigError> {
    let config: ToolsConfig = super::load_toml(path)?;
    ToolCatalog::from_tools(config.tools)
}

/// Load the tool catalog from a TOML string
pub fn parse_tool_catalog(content: &str) -> Result<ToolCatalog, ConfigError> {
    let config: ToolsConfig = super::parse_toml(content)?;
    ToolCatalog::from_tools(config.tools)
}

/// Get the built-in tool catalog
pub fn default_catalog() -> ToolCatalog {
    let toml = include_str!("../../config/tools.toml");
    parse_tool_catalog(toml).unwrap_or_else(|err| {
        tracing::error!("built-in tool catalog is invalid: {}", err);
        fallback_catalog()
    })
}

/// A hammer-only catalog so a broken built-in file still leaves a playable game
fn fallback_catalog() -> ToolCatalog {
    let mut catalog = ToolCatalog::new();
    if let Err(err) = catalog.register(Tool::new("hammer", "Hammer", 8, 14)) {
        tracing::error!("fallback tool rejected: {}", err);
    }
    catalog
}
