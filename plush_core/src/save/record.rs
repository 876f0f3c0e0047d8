//! Versioned JSON save record

use super::SaveError;
use crate::state::BattleState;
use crate::types::{StatusKind, ToolId};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Storage key for the current save schema
pub const SAVE_KEY: &str = "plush_save_v2";

/// Everything persisted between sessions
///
/// Sets are stored as `{key: true}` maps and statuses by their snake_case key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub hp: i64,
    pub max_hp: i64,
    pub coins: u64,
    pub hits: u64,
    pub combo_best: u32,
    pub cooldowns: BTreeMap<String, u64>,
    pub status_effects: BTreeMap<String, u32>,
    pub status_seen: BTreeMap<String, bool>,
    pub achievements_unlocked: BTreeMap<String, bool>,
    pub boss_kills: u32,
    pub owned_tools: BTreeMap<String, bool>,
    pub muted: bool,
    pub legend_used: bool,
    pub unique_streak: u32,
    pub last_daily_bonus_date: Option<NaiveDate>,
    pub quests_claimed: BTreeMap<String, bool>,
}

impl Default for SaveRecord {
    fn default() -> Self {
        SaveRecord::from_state(&BattleState::new(100, BTreeSet::new()))
    }
}

fn flags<'a>(keys: impl Iterator<Item = &'a str>) -> BTreeMap<String, bool> {
    keys.map(|k| (k.to_string(), true)).collect()
}

fn set_keys<'a>(map: &'a BTreeMap<String, bool>) -> impl Iterator<Item = &'a str> + 'a {
    map.iter().filter(|(_, on)| **on).map(|(k, _)| k.as_str())
}

impl SaveRecord {
    pub fn from_state(state: &BattleState) -> Self {
        SaveRecord {
            hp: state.hp,
            max_hp: state.max_hp,
            coins: state.coins,
            hits: state.hits,
            combo_best: state.combo_best,
            cooldowns: state
                .cooldown_until
                .iter()
                .map(|(id, &until)| (id.to_string(), until))
                .collect(),
            status_effects: state
                .statuses
                .active()
                .map(|(kind, ticks)| (kind.as_str().to_string(), ticks))
                .collect(),
            status_seen: flags(state.statuses.seen().iter().map(|k| k.as_str())),
            achievements_unlocked: flags(state.achievements_unlocked.iter().map(String::as_str)),
            boss_kills: state.boss_kills,
            owned_tools: flags(state.owned_tools.iter().map(ToolId::as_str)),
            muted: state.muted,
            legend_used: state.legend_used,
            unique_streak: state.unique_streak,
            last_daily_bonus_date: state.daily_bonus_claimed_date,
            quests_claimed: flags(state.quests_claimed.iter().map(String::as_str)),
        }
    }

    /// Rebuild the battle state; unknown status keys are dropped
    ///
    /// Range clamping and starter tools are left to `Engine::restore`.
    pub fn into_state(self) -> BattleState {
        let owned = set_keys(&self.owned_tools).map(ToolId::from).collect();
        let mut state = BattleState::new(self.max_hp, owned);
        state.hp = self.hp;
        state.coins = self.coins;
        state.hits = self.hits;
        state.combo_best = self.combo_best;
        state.boss_kills = self.boss_kills;
        state.muted = self.muted;
        state.legend_used = self.legend_used;
        state.unique_streak = self.unique_streak;
        state.daily_bonus_claimed_date = self.last_daily_bonus_date;

        state.cooldown_until = self
            .cooldowns
            .into_iter()
            .map(|(id, until)| (ToolId::from(id), until))
            .collect();

        for (key, ticks) in &self.status_effects {
            match StatusKind::from_key(key) {
                Some(kind) => state.statuses.set(kind, *ticks),
                None => tracing::warn!(key = %key, "dropping unknown status in save"),
            }
        }
        for key in set_keys(&self.status_seen) {
            match StatusKind::from_key(key) {
                Some(kind) => state.statuses.mark_seen(kind),
                None => tracing::warn!(key = %key, "dropping unknown seen status in save"),
            }
        }

        state.achievements_unlocked = set_keys(&self.achievements_unlocked)
            .map(str::to_string)
            .collect();
        state.quests_claimed = set_keys(&self.quests_claimed).map(str::to_string).collect();
        state
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        serde_json::to_string(self).map_err(|e| SaveError::Serialization(e.to_string()))
    }

    /// Parse a save field by field
    ///
    /// A field that is missing or has the wrong type takes its default with a
    /// warning; only a non-object document is rejected.
    pub fn from_json(raw: &str) -> Result<Self, SaveError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| SaveError::Malformed(e.to_string()))?;
        let obj = value
            .as_object()
            .ok_or_else(|| SaveError::Malformed("save root is not a JSON object".to_string()))?;

        let d = SaveRecord::default();
        Ok(SaveRecord {
            hp: field(obj, "hp", d.hp),
            max_hp: field(obj, "maxHp", d.max_hp),
            coins: field(obj, "coins", d.coins),
            hits: field(obj, "hits", d.hits),
            combo_best: field(obj, "comboBest", d.combo_best),
            cooldowns: field(obj, "cooldowns", d.cooldowns),
            status_effects: field(obj, "statusEffects", d.status_effects),
            status_seen: field(obj, "statusSeen", d.status_seen),
            achievements_unlocked: field(obj, "achievementsUnlocked", d.achievements_unlocked),
            boss_kills: field(obj, "bossKills", d.boss_kills),
            owned_tools: field(obj, "ownedTools", d.owned_tools),
            muted: field(obj, "muted", d.muted),
            legend_used: field(obj, "legendUsed", d.legend_used),
            unique_streak: field(obj, "uniqueStreak", d.unique_streak),
            last_daily_bonus_date: field(obj, "lastDailyBonusDate", d.last_daily_bonus_date),
            quests_claimed: field(obj, "questsClaimed", d.quests_claimed),
        })
    }
}

fn field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str, default: T) -> T {
    let Some(value) = obj.get(key) else {
        tracing::warn!(field = key, "save field missing, using default");
        return default;
    };
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(field = key, error = %err, "save field has wrong type, using default");
            default
        }
    }
}
