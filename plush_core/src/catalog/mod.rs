//! Tool catalog - every action the player can take

mod tool;

pub use tool::{DamageRange, Prize, Tool, ToolEffect, ToolModifier};

use crate::config::ConfigError;
use crate::types::ToolId;
use std::collections::{BTreeSet, HashMap};

/// Ordered tool registry
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    /// Catalog order, which is also display order
    tools: Vec<Tool>,
    /// Mapping from tool ID to its position in `tools`
    index: HashMap<ToolId, usize>,
}

impl ToolCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        ToolCatalog {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build and validate a catalog from a list of tools
    pub fn from_tools(tools: Vec<Tool>) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        for tool in tools {
            catalog.register(tool)?;
        }
        Ok(catalog)
    }

    /// Register a tool, rejecting duplicates and inconsistent data
    pub fn register(&mut self, tool: Tool) -> Result<(), ConfigError> {
        if self.index.contains_key(&tool.id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate tool id '{}'",
                tool.id
            )));
        }
        validate_tool(&tool)?;
        self.index.insert(tool.id.clone(), self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Get a tool by ID
    pub fn get(&self, id: &ToolId) -> Option<&Tool> {
        self.index.get(id).map(|&i| &self.tools[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tools owned from the start (no unlock price)
    pub fn starter_tools(&self) -> BTreeSet<ToolId> {
        self.tools
            .iter()
            .filter(|t| t.is_starter())
            .map(|t| t.id.clone())
            .collect()
    }

    /// Tools sold in the shop
    pub fn shop_tools(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter().filter(|t| t.unlock_price.is_some())
    }
}

/// Check a single tool's data for consistency
pub fn validate_tool(tool: &Tool) -> Result<(), ConfigError> {
    let fail = |msg: String| Err(ConfigError::ValidationError(format!("tool '{}': {}", tool.id, msg)));

    if tool.id.as_str().is_empty() {
        return Err(ConfigError::ValidationError("tool with empty id".to_string()));
    }
    if tool.damage.min > tool.damage.max {
        return fail(format!(
            "damage min {} exceeds max {}",
            tool.damage.min, tool.damage.max
        ));
    }

    for modifier in &tool.modifiers {
        match modifier {
            ToolModifier::Jackpot { chance, .. } if !(0.0..=1.0).contains(chance) => {
                return fail(format!("jackpot chance {} outside [0, 1]", chance));
            }
            ToolModifier::StatusMultiplier { multiplier, .. } if *multiplier <= 0.0 => {
                return fail(format!("status multiplier {} must be positive", multiplier));
            }
            _ => {}
        }
    }

    for effect in &tool.effects {
        if let ToolEffect::Surprise { prizes } = effect {
            if prizes.is_empty() {
                return fail("surprise effect has no prizes".to_string());
            }
        }
    }

    Ok(())
}
