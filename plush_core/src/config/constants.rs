//! Game constants configuration

use crate::types::StatusKind;
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub hit: HitConstants,
    #[serde(default)]
    pub economy: EconomyConstants,
    #[serde(default)]
    pub round: RoundConstants,
    #[serde(default)]
    pub dot: DotConstants,
    #[serde(default)]
    pub timing: TimingConstants,
    #[serde(default)]
    pub daily: DailyConstants,
}

impl GameConstants {
    /// Constants with crits disabled, for reproducible damage numbers
    pub fn without_crits() -> Self {
        let mut constants = Self::default();
        constants.hit.crit_chance = 0.0;
        constants
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitConstants {
    /// Chance for any resolved hit to crit (0.05 = 5%)
    #[serde(default = "default_crit_chance")]
    pub crit_chance: f64,
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f64,
    /// Ticks added per status application
    #[serde(default = "default_status_duration")]
    pub status_duration_ticks: u32,
}

impl Default for HitConstants {
    fn default() -> Self {
        HitConstants {
            crit_chance: 0.05,
            crit_multiplier: 2.0,
            status_duration_ticks: 8,
        }
    }
}

fn default_crit_chance() -> f64 {
    0.05
}
fn default_crit_multiplier() -> f64 {
    2.0
}
fn default_status_duration() -> u32 {
    8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConstants {
    /// Shop price for a tool that has no configured price
    pub shop_default_price: u64,
    /// Floor for coins awarded per damaging hit
    pub min_hit_reward: u64,
}

impl Default for EconomyConstants {
    fn default() -> Self {
        EconomyConstants {
            shop_default_price: 50,
            min_hit_reward: 1,
        }
    }
}

/// Round scaling: next max = round(max * hp_growth + hp_flat_bonus)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConstants {
    pub starting_max_hp: i64,
    pub base_reward: u64,
    /// Reward adds round(max_hp / reward_hp_divisor)
    pub reward_hp_divisor: f64,
    pub hp_growth: f64,
    pub hp_flat_bonus: f64,
}

impl Default for RoundConstants {
    fn default() -> Self {
        RoundConstants {
            starting_max_hp: 100,
            base_reward: 50,
            reward_hp_divisor: 5.0,
            hp_growth: 1.25,
            hp_flat_bonus: 25.0,
        }
    }
}

/// Damage per DoT tick contributed by each active status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DotConstants {
    pub burn: f64,
    pub shock: f64,
    pub slime: f64,
}

impl Default for DotConstants {
    fn default() -> Self {
        DotConstants {
            burn: 1.0,
            shock: 0.5,
            slime: 0.2,
        }
    }
}

impl DotConstants {
    /// Per-tick damage for a status (zero for non-damaging statuses)
    pub fn rate(&self, kind: StatusKind) -> f64 {
        match kind {
            StatusKind::Burn => self.burn,
            StatusKind::Shock => self.shock,
            StatusKind::Slime => self.slime,
            _ => 0.0,
        }
    }
}

/// Scheduler periods in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConstants {
    pub status_tick_ms: u64,
    pub dot_tick_ms: u64,
    pub cooldown_refresh_ms: u64,
    /// Idle time before a pending save is flushed
    pub save_debounce_ms: u64,
}

impl Default for TimingConstants {
    fn default() -> Self {
        TimingConstants {
            status_tick_ms: 250,
            dot_tick_ms: 750,
            cooldown_refresh_ms: 250,
            save_debounce_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyConstants {
    pub min_reward: u64,
    pub max_reward: u64,
}

impl Default for DailyConstants {
    fn default() -> Self {
        DailyConstants {
            min_reward: 50,
            max_reward: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_constants_from_toml() {
        let constants: GameConstants = toml::from_str(
            r#"
[hit]
crit_chance = 0.25

[round]
starting_max_hp = 200
"#,
        )
        .unwrap();

        assert!((constants.hit.crit_chance - 0.25).abs() < f64::EPSILON);
        assert!((constants.hit.crit_multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(constants.round.starting_max_hp, 200);
        assert_eq!(constants.round.base_reward, 50);
        assert_eq!(constants.timing.dot_tick_ms, 750);
    }

    #[test]
    fn test_dot_rates() {
        let dot = DotConstants::default();
        assert!((dot.rate(StatusKind::Burn) - 1.0).abs() < f64::EPSILON);
        assert!((dot.rate(StatusKind::Slime) - 0.2).abs() < f64::EPSILON);
        assert_eq!(dot.rate(StatusKind::Wet), 0.0);
    }
}
