//! Tool - a catalog-defined action the player can trigger

use crate::types::{Rarity, StatusKind, ToolId};
use serde::{Deserialize, Serialize};

/// Describes one tool in the catalog
/// Loaded from TOML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Unique tool identifier
    pub id: ToolId,
    /// Display name
    pub name: String,
    /// Flavour text
    #[serde(default)]
    pub description: String,

    // === Damage ===
    /// Signed damage range; negative heals, zero is a utility tool
    pub damage: DamageRange,
    /// Damage shaping applied before shield/ghost/crit
    #[serde(default)]
    pub modifiers: Vec<ToolModifier>,

    // === Effects ===
    /// Status applied on every activation
    #[serde(default)]
    pub status: Option<StatusKind>,
    /// Side effects run after damage is applied
    #[serde(default)]
    pub effects: Vec<ToolEffect>,
    /// Presentation-only shove strength
    #[serde(default)]
    pub knockback: Option<u32>,

    // === Gating ===
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    /// Coins paid per activation
    #[serde(default)]
    pub cost: Option<u64>,
    /// Shop price; tools without one are owned from the start
    #[serde(default)]
    pub unlock_price: Option<u64>,
    #[serde(default)]
    pub rarity: Rarity,
}

fn default_cooldown_ms() -> u64 {
    300
}

impl Tool {
    /// Create a plain damage tool with default gating
    pub fn new(id: impl Into<ToolId>, name: impl Into<String>, min: i32, max: i32) -> Self {
        Tool {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            damage: DamageRange::new(min, max),
            modifiers: Vec::new(),
            status: None,
            effects: Vec::new(),
            knockback: None,
            cooldown_ms: default_cooldown_ms(),
            cost: None,
            unlock_price: None,
            rarity: Rarity::Common,
        }
    }

    pub fn is_starter(&self) -> bool {
        self.unlock_price.is_none()
    }

    pub fn is_healing(&self) -> bool {
        self.damage.max < 0
    }

    pub fn with_status(mut self, status: StatusKind) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_modifier(mut self, modifier: ToolModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_effect(mut self, effect: ToolEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_price(mut self, price: u64) -> Self {
        self.unlock_price = Some(price);
        self
    }

    pub fn with_cost(mut self, cost: u64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_cooldown(mut self, cooldown_ms: u64) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }
}

/// Inclusive damage range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: i32,
    pub max: i32,
}

impl DamageRange {
    pub fn new(min: i32, max: i32) -> Self {
        DamageRange { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }
}

/// Per-tool damage shaping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolModifier {
    /// Multiply the amount while the target carries `status`
    StatusMultiplier { status: StatusKind, multiplier: f64 },
    /// With probability `chance`, replace the amount with `amount`
    Jackpot { chance: f64, amount: f64 },
    /// Draw a whole number uniformly over the full range instead of a continuous value
    IntegerRoll,
}

/// Side effect run after the tool's damage has been applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolEffect {
    GrantCoins { amount: u64 },
    /// Overwrite (not stack) a status counter
    SetStatus { status: StatusKind, ticks: u32 },
    /// Pick one prize uniformly
    Surprise { prizes: Vec<Prize> },
    MarkLegend,
    /// Refill hp and wipe statuses without counting a kill
    RestartBattle,
}

/// Outcome of a surprise roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Prize {
    Coins { amount: u64 },
    /// Healed through the regular damage path
    Heal { amount: f64 },
    SetStatus { status: StatusKind, ticks: u32 },
}
