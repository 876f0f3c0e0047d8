//! Snapshot - read-only view of the engine for presentation

use crate::catalog::ToolCatalog;
use crate::config::{GameConstants, ProgressionConfig};
use crate::economy;
use crate::progression::{quest_status, QuestStatus};
use crate::state::BattleState;
use crate::types::{Rarity, StatusKind, ToolId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub hp: i64,
    pub max_hp: i64,
    pub hp_percent: f64,
    pub coins: u64,
    pub combo: u32,
    pub combo_best: u32,
    pub hits: u64,
    pub boss_kills: u32,
    pub unique_streak: u32,
    pub legend_used: bool,
    pub muted: bool,
    pub statuses: Vec<StatusView>,
    pub tools: Vec<ToolView>,
    pub achievements: Vec<AchievementView>,
    pub quests: Vec<QuestView>,
    pub last_daily_bonus_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    pub kind: StatusKind,
    pub ticks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolView {
    pub id: ToolId,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub owned: bool,
    /// Shop price, for tools that are sold
    pub price: Option<u64>,
    /// Coins paid per activation
    pub cost: Option<u64>,
    pub cooldown_ms: u64,
    pub cooldown_remaining_ms: u64,
}

impl ToolView {
    pub fn is_ready(&self) -> bool {
        self.owned && self.cooldown_remaining_ms == 0
    }

    /// Fraction of the cooldown still to run, 0.0 when ready
    pub fn cooldown_fraction(&self) -> f64 {
        if self.cooldown_ms == 0 {
            return 0.0;
        }
        (self.cooldown_remaining_ms as f64 / self.cooldown_ms as f64).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementView {
    pub id: String,
    pub title: String,
    pub reward: u64,
    pub unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestView {
    pub id: String,
    pub text: String,
    pub reward: u64,
    pub status: QuestStatus,
    pub progress: u64,
    pub target: u64,
}

impl Snapshot {
    pub fn capture(
        state: &BattleState,
        catalog: &ToolCatalog,
        progression: &ProgressionConfig,
        constants: &GameConstants,
        now: u64,
    ) -> Self {
        let tools = catalog
            .iter()
            .map(|tool| ToolView {
                id: tool.id.clone(),
                name: tool.name.clone(),
                description: tool.description.clone(),
                rarity: tool.rarity,
                owned: state.owns(&tool.id),
                price: tool
                    .unlock_price
                    .map(|_| economy::shop_price(tool, &constants.economy)),
                cost: tool.cost,
                cooldown_ms: tool.cooldown_ms,
                cooldown_remaining_ms: state.cooldown_remaining(&tool.id, now),
            })
            .collect();

        let achievements = progression
            .achievements
            .iter()
            .map(|a| AchievementView {
                id: a.id.clone(),
                title: a.title.clone(),
                reward: a.reward,
                unlocked: state.achievements_unlocked.contains(&a.id),
            })
            .collect();

        let quests = progression
            .quests
            .iter()
            .map(|q| {
                let (progress, target) = q.goal.progress(state);
                QuestView {
                    id: q.id.clone(),
                    text: q.text.clone(),
                    reward: q.reward,
                    status: quest_status(state, q),
                    progress: progress.min(target),
                    target,
                }
            })
            .collect();

        Snapshot {
            hp: state.hp,
            max_hp: state.max_hp,
            hp_percent: state.hp_percent(),
            coins: state.coins,
            combo: state.combo,
            combo_best: state.combo_best,
            hits: state.hits,
            boss_kills: state.boss_kills,
            unique_streak: state.unique_streak,
            legend_used: state.legend_used,
            muted: state.muted,
            statuses: state
                .statuses
                .active()
                .map(|(kind, ticks)| StatusView { kind, ticks })
                .collect(),
            tools,
            achievements,
            quests,
            last_daily_bonus_date: state.daily_bonus_claimed_date,
        }
    }

    pub fn daily_available(&self, today: NaiveDate) -> bool {
        self.last_daily_bonus_date != Some(today)
    }

    pub fn tool(&self, id: &ToolId) -> Option<&ToolView> {
        self.tools.iter().find(|t| &t.id == id)
    }

    pub fn owned_tools(&self) -> impl Iterator<Item = &ToolView> {
        self.tools.iter().filter(|t| t.owned)
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }

    pub fn quest_ready(&self) -> bool {
        self.quests.iter().any(|q| q.status == QuestStatus::Ready)
    }
}
