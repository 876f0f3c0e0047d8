//! Core types shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Timed status effect that can sit on the plush
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Burn,
    Freeze,
    Shock,
    Paint,
    Slime,
    Wind,
    Wet,
    Ghost,
    Shield,
}

impl StatusKind {
    /// Get all status kinds
    pub fn all() -> &'static [StatusKind] {
        &[
            StatusKind::Burn,
            StatusKind::Freeze,
            StatusKind::Shock,
            StatusKind::Paint,
            StatusKind::Slime,
            StatusKind::Wind,
            StatusKind::Wet,
            StatusKind::Ghost,
            StatusKind::Shield,
        ]
    }

    /// Stable key used in save records and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Burn => "burn",
            StatusKind::Freeze => "freeze",
            StatusKind::Shock => "shock",
            StatusKind::Paint => "paint",
            StatusKind::Slime => "slime",
            StatusKind::Wind => "wind",
            StatusKind::Wet => "wet",
            StatusKind::Ghost => "ghost",
            StatusKind::Shield => "shield",
        }
    }

    /// Parse a save/config key back into a kind
    pub fn from_key(key: &str) -> Option<StatusKind> {
        StatusKind::all().iter().copied().find(|k| k.as_str() == key)
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::Burn => "Burning",
            StatusKind::Freeze => "Frozen",
            StatusKind::Shock => "Shocked",
            StatusKind::Paint => "Painted",
            StatusKind::Slime => "Slimed",
            StatusKind::Wind => "Windswept",
            StatusKind::Wet => "Wet",
            StatusKind::Ghost => "Ghostly",
            StatusKind::Shield => "Shielded",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tool rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legend,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legend => "legend",
        }
    }
}

/// Identifier for a catalog tool
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolId(pub String);

impl ToolId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ToolId {
    fn from(s: &str) -> Self {
        ToolId(s.to_string())
    }
}

impl From<String> for ToolId {
    fn from(s: String) -> Self {
        ToolId(s)
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Round half away from negative infinity, the way the game has always rounded
/// (2.5 -> 3, -2.5 -> -2)
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
