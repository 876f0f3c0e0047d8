//! BattleState - the single mutable root owned by the engine

use crate::status::StatusRegistry;
use crate::types::ToolId;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Complete battle and progression state
#[derive(Debug, Clone, PartialEq)]
pub struct BattleState {
    // === Target ===
    pub hp: i64,
    pub max_hp: i64,
    pub statuses: StatusRegistry,

    // === Economy & streaks ===
    pub coins: u64,
    /// Lifetime count of non-zero activations
    pub hits: u64,
    pub combo: u32,
    pub combo_best: u32,
    pub unique_streak: u32,
    /// Previous tool used; kept in memory only
    pub last_tool: Option<ToolId>,

    // === Progression ===
    pub boss_kills: u32,
    pub owned_tools: BTreeSet<ToolId>,
    /// Epoch-ms timestamp until which each tool is unusable
    pub cooldown_until: BTreeMap<ToolId, u64>,
    pub achievements_unlocked: BTreeSet<String>,
    pub quests_claimed: BTreeSet<String>,
    pub legend_used: bool,
    pub daily_bonus_claimed_date: Option<NaiveDate>,

    // === Settings ===
    pub muted: bool,
}

impl BattleState {
    /// Factory defaults: full health, no coins, starter tools owned
    pub fn new(max_hp: i64, starter_tools: BTreeSet<ToolId>) -> Self {
        BattleState {
            hp: max_hp,
            max_hp,
            statuses: StatusRegistry::new(),
            coins: 0,
            hits: 0,
            combo: 0,
            combo_best: 0,
            unique_streak: 0,
            last_tool: None,
            boss_kills: 0,
            owned_tools: starter_tools,
            cooldown_until: BTreeMap::new(),
            achievements_unlocked: BTreeSet::new(),
            quests_claimed: BTreeSet::new(),
            legend_used: false,
            daily_bonus_claimed_date: None,
            muted: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn hp_percent(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f64 / self.max_hp as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn owns(&self, id: &ToolId) -> bool {
        self.owned_tools.contains(id)
    }

    /// Subtract signed damage, keeping hp inside [0, max_hp]
    pub fn apply_hp_delta(&mut self, dmg: i64) {
        self.hp = (self.hp - dmg).clamp(0, self.max_hp);
    }

    /// Milliseconds of cooldown left for a tool at `now`
    pub fn cooldown_remaining(&self, id: &ToolId, now: u64) -> u64 {
        self.cooldown_until
            .get(id)
            .map(|&until| until.saturating_sub(now))
            .unwrap_or(0)
    }

    /// Drop cooldown entries that have expired
    pub fn prune_cooldowns(&mut self, now: u64) {
        self.cooldown_until.retain(|_, until| *until > now);
    }

    /// Check every documented invariant; used by tests and debug assertions
    pub fn invariants_hold(&self) -> bool {
        self.max_hp >= 1 && self.hp >= 0 && self.hp <= self.max_hp && self.combo_best >= self.combo
    }
}
