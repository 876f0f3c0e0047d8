//! Engine events - what just happened, for presentation feedback

use crate::damage::HitResult;
use crate::progression::{RoundCleared, UnlockedAchievement};
use crate::types::{StatusKind, ToolId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a hit came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HitSource {
    Tool { id: ToolId },
    DamageOverTime,
    Prize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    Hit {
        source: HitSource,
        damage: i64,
        crit: bool,
        coins: u64,
        hp: i64,
    },
    Healed {
        source: HitSource,
        amount: i64,
        crit: bool,
        hp: i64,
    },
    ShieldAbsorbed {
        source: HitSource,
    },
    /// `ticks` is the counter after the change
    StatusApplied {
        status: StatusKind,
        ticks: u32,
    },
    /// Coins from tool effects and prizes (hit rewards ride on `Hit`)
    CoinsGained {
        amount: u64,
    },
    RoundCleared(RoundCleared),
    AchievementUnlocked(UnlockedAchievement),
    QuestClaimed {
        id: String,
        reward: u64,
    },
    ToolPurchased {
        tool: ToolId,
        price: u64,
    },
    DailyBonusClaimed {
        reward: u64,
        date: NaiveDate,
    },
    LegendUsed,
    BattleRestarted,
    ProgressReset,
    MuteToggled {
        muted: bool,
    },
}

impl EngineEvent {
    /// Translate a hit result into its event (none for a zero-damage activation)
    pub fn from_hit(source: HitSource, result: &HitResult) -> Option<EngineEvent> {
        if result.absorbed {
            return Some(EngineEvent::ShieldAbsorbed { source });
        }
        if result.damage > 0 {
            Some(EngineEvent::Hit {
                source,
                damage: result.damage,
                crit: result.is_critical,
                coins: result.coins_awarded,
                hp: result.hp_after,
            })
        } else if result.damage < 0 {
            Some(EngineEvent::Healed {
                source,
                amount: -result.damage,
                crit: result.is_critical,
                hp: result.hp_after,
            })
        } else {
            None
        }
    }

    /// One-line description for toasts and logs
    pub fn describe(&self) -> String {
        match self {
            EngineEvent::Hit {
                damage, crit, coins, ..
            } => {
                let crit = if *crit { " CRIT!" } else { "" };
                format!("-{} hp{} (+{} coins)", damage, crit, coins)
            }
            EngineEvent::Healed { amount, .. } => format!("+{} hp", amount),
            EngineEvent::ShieldAbsorbed { .. } => "Blocked by the shield".to_string(),
            EngineEvent::StatusApplied { status, ticks } => {
                format!("{} ({} ticks)", status.name(), ticks)
            }
            EngineEvent::CoinsGained { amount } => format!("+{} coins", amount),
            EngineEvent::RoundCleared(cleared) => format!(
                "Boss defeated! +{} coins, next boss has {} hp",
                cleared.reward, cleared.new_max_hp
            ),
            EngineEvent::AchievementUnlocked(unlocked) => {
                format!("Achievement: {} (+{})", unlocked.title, unlocked.reward)
            }
            EngineEvent::QuestClaimed { id, reward } => format!("Quest {} claimed (+{})", id, reward),
            EngineEvent::ToolPurchased { tool, price } => format!("Bought {} for {}", tool, price),
            EngineEvent::DailyBonusClaimed { reward, .. } => format!("Daily bonus +{} coins", reward),
            EngineEvent::LegendUsed => "Legendary!".to_string(),
            EngineEvent::BattleRestarted => "Fight restarted".to_string(),
            EngineEvent::ProgressReset => "Progress reset".to_string(),
            EngineEvent::MuteToggled { muted } => {
                if *muted {
                    "Sound off".to_string()
                } else {
                    "Sound on".to_string()
                }
            }
        }
    }
}
