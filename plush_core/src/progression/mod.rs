//! Progression - rounds, achievements, quests and the daily bonus

mod achievements;
mod daily;
mod quests;
mod round;

pub use achievements::{evaluate_achievements, Achievement, UnlockedAchievement};
pub use daily::{claim_daily_bonus, is_daily_available};
pub use quests::{claim_quest, quest_status, Quest, QuestStatus};
pub use round::{check_round_clear, clear_reward, next_max_hp, restart_battle, RoundCleared};

use crate::state::BattleState;
use crate::types::StatusKind;
use serde::{Deserialize, Serialize};

/// Declarative predicate over the battle state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Goal {
    Hits { at_least: u64 },
    /// Current combo, not the best one
    Combo { at_least: u32 },
    ComboBest { at_least: u32 },
    StatusSeen { status: StatusKind },
    DistinctStatusesSeen { at_least: usize },
    BossKills { at_least: u32 },
    LegendUsed,
    UniqueStreak { at_least: u32 },
}

impl Goal {
    pub fn is_met(&self, state: &BattleState) -> bool {
        let (current, target) = self.progress(state);
        current >= target
    }

    /// (current, target) for progress display
    pub fn progress(&self, state: &BattleState) -> (u64, u64) {
        match self {
            Goal::Hits { at_least } => (state.hits, *at_least),
            Goal::Combo { at_least } => (state.combo as u64, *at_least as u64),
            Goal::ComboBest { at_least } => (state.combo_best as u64, *at_least as u64),
            Goal::StatusSeen { status } => (state.statuses.has_seen(*status) as u64, 1),
            Goal::DistinctStatusesSeen { at_least } => {
                (state.statuses.seen().len() as u64, *at_least as u64)
            }
            Goal::BossKills { at_least } => (state.boss_kills as u64, *at_least as u64),
            Goal::LegendUsed => (state.legend_used as u64, 1),
            Goal::UniqueStreak { at_least } => (state.unique_streak as u64, *at_least as u64),
        }
    }
}
