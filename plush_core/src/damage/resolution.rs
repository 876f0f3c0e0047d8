//! Damage resolution - turn a tool activation into a signed hp delta

use super::result::HitResult;
use crate::catalog::{Tool, ToolModifier};
use crate::config::{GameConstants, HitConstants};
use crate::economy;
use crate::state::BattleState;
use crate::status::StatusRegistry;
use crate::types::{round_half_up, StatusKind};
use rand::Rng;

/// Outcome of resolving a raw amount against the target's statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A positive amount hit an active shield
    Absorbed,
    /// Final rounded damage (negative heals)
    Hit { dmg: i64, crit: bool },
}

/// Roll a tool's raw amount: base draw, then its modifiers
pub fn roll_tool_amount(tool: &Tool, statuses: &StatusRegistry, rng: &mut impl Rng) -> f64 {
    let range = tool.damage;
    let integer_roll = tool
        .modifiers
        .iter()
        .any(|m| matches!(m, ToolModifier::IntegerRoll));

    let mut amount = if range.min >= range.max {
        range.max as f64
    } else if integer_roll {
        rng.gen_range(range.min..=range.max) as f64
    } else {
        rng.gen_range(range.min as f64..=range.max as f64)
    };

    for modifier in &tool.modifiers {
        match modifier {
            ToolModifier::Jackpot { chance, amount: jackpot } => {
                if rng.gen::<f64>() < *chance {
                    amount = *jackpot;
                }
            }
            ToolModifier::StatusMultiplier { status, multiplier } => {
                if statuses.is_active(*status) {
                    amount *= *multiplier;
                }
            }
            ToolModifier::IntegerRoll => {}
        }
    }

    amount
}

/// Resolve a raw amount through shield, ghost, crit and rounding
///
/// 1. A positive amount against an active shield is absorbed outright
/// 2. Ghost halves positive amounts
/// 3. Crit multiplies whatever is left, heals included
/// 4. Round half up to the final integer
pub fn resolve_amount(
    amount: f64,
    statuses: &StatusRegistry,
    hit: &HitConstants,
    rng: &mut impl Rng,
) -> Resolution {
    if amount > 0.0 && statuses.is_active(StatusKind::Shield) {
        return Resolution::Absorbed;
    }

    let mut amount = amount;
    if amount > 0.0 && statuses.is_active(StatusKind::Ghost) {
        amount *= 0.5;
    }

    let crit = rng.gen::<f64>() < hit.crit_chance;
    if crit {
        amount *= hit.crit_multiplier;
    }

    Resolution::Hit {
        dmg: round_half_up(amount),
        crit,
    }
}

/// Resolve a tool activation without touching the state
pub fn resolve_tool(
    state: &BattleState,
    tool: &Tool,
    constants: &GameConstants,
    rng: &mut impl Rng,
) -> Resolution {
    let amount = roll_tool_amount(tool, &state.statuses, rng);
    resolve_amount(amount, &state.statuses, &constants.hit, rng)
}

/// Commit a resolution: hit/combo/coin book-keeping, then clamp hp
pub fn apply_resolution(
    state: &mut BattleState,
    resolution: Resolution,
    constants: &GameConstants,
) -> HitResult {
    let mut result = HitResult::new();
    result.hp_before = state.hp;

    match resolution {
        Resolution::Absorbed => {
            result.absorbed = true;
        }
        Resolution::Hit { dmg, crit } => {
            result.damage = dmg;
            result.is_critical = crit;
            result.coins_awarded = economy::record_damage(state, dmg, &constants.economy);
            state.apply_hp_delta(dmg);
        }
    }

    result.hp_after = state.hp;
    result.is_killing_blow = result.hp_before > 0 && state.hp <= 0;
    result
}

/// Resolve and apply a raw amount (DoT ticks, surprise heals)
pub fn apply_damage(
    state: &mut BattleState,
    amount: f64,
    constants: &GameConstants,
    rng: &mut impl Rng,
) -> HitResult {
    let resolution = resolve_amount(amount, &state.statuses, &constants.hit, rng);
    apply_resolution(state, resolution, constants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Tool;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn no_crit() -> GameConstants {
        GameConstants::without_crits()
    }

    fn state() -> BattleState {
        BattleState::new(100, BTreeSet::new())
    }

    #[test]
    fn test_roll_stays_in_range() {
        let tool = Tool::new("hammer", "Hammer", 8, 14);
        let statuses = StatusRegistry::new();
        let mut rng = rng();
        for _ in 0..1000 {
            let amount = roll_tool_amount(&tool, &statuses, &mut rng);
            assert!((8.0..=14.0).contains(&amount));
        }
    }

    #[test]
    fn test_integer_roll_is_whole() {
        let tool = Tool::new("dice", "Dice", 0, 30).with_modifier(ToolModifier::IntegerRoll);
        let statuses = StatusRegistry::new();
        let mut rng = rng();
        let mut saw_extremes = (false, false);
        for _ in 0..5000 {
            let amount = roll_tool_amount(&tool, &statuses, &mut rng);
            assert_eq!(amount.fract(), 0.0);
            assert!((0.0..=30.0).contains(&amount));
            saw_extremes.0 |= amount == 0.0;
            saw_extremes.1 |= amount == 30.0;
        }
        assert!(saw_extremes.0 && saw_extremes.1);
    }

    #[test]
    fn test_status_multiplier_only_when_active() {
        let tool = Tool::new("zap", "Zap", 10, 10).with_modifier(ToolModifier::StatusMultiplier {
            status: StatusKind::Wet,
            multiplier: 1.5,
        });
        let mut statuses = StatusRegistry::new();
        let mut rng = rng();

        assert_eq!(roll_tool_amount(&tool, &statuses, &mut rng), 10.0);
        statuses.apply(StatusKind::Wet, 8);
        assert_eq!(roll_tool_amount(&tool, &statuses, &mut rng), 15.0);
    }

    #[test]
    fn test_jackpot_always_and_never() {
        let statuses = StatusRegistry::new();
        let mut rng = rng();

        let always = Tool::new("feather", "Feather", 1, 1).with_modifier(ToolModifier::Jackpot {
            chance: 1.0,
            amount: 5.0,
        });
        let never = Tool::new("feather", "Feather", 1, 1).with_modifier(ToolModifier::Jackpot {
            chance: 0.0,
            amount: 5.0,
        });

        assert_eq!(roll_tool_amount(&always, &statuses, &mut rng), 5.0);
        assert_eq!(roll_tool_amount(&never, &statuses, &mut rng), 1.0);
    }

    #[test]
    fn test_shield_absorbs_positive_only() {
        let mut statuses = StatusRegistry::new();
        statuses.set(StatusKind::Shield, 8);
        let hit = no_crit().hit;
        let mut rng = rng();

        assert_eq!(resolve_amount(12.0, &statuses, &hit, &mut rng), Resolution::Absorbed);
        assert_eq!(
            resolve_amount(-12.0, &statuses, &hit, &mut rng),
            Resolution::Hit { dmg: -12, crit: false }
        );
    }

    #[test]
    fn test_ghost_halves_positive() {
        let mut statuses = StatusRegistry::new();
        statuses.apply(StatusKind::Ghost, 8);
        let hit = no_crit().hit;
        let mut rng = rng();

        assert_eq!(
            resolve_amount(10.0, &statuses, &hit, &mut rng),
            Resolution::Hit { dmg: 5, crit: false }
        );
        assert_eq!(
            resolve_amount(-10.0, &statuses, &hit, &mut rng),
            Resolution::Hit { dmg: -10, crit: false }
        );
    }

    #[test]
    fn test_guaranteed_crit_doubles() {
        let mut constants = GameConstants::default();
        constants.hit.crit_chance = 1.0;
        let statuses = StatusRegistry::new();
        let mut rng = rng();

        assert_eq!(
            resolve_amount(7.0, &statuses, &constants.hit, &mut rng),
            Resolution::Hit { dmg: 14, crit: true }
        );
    }

    #[test]
    fn test_apply_resolution_updates_state() {
        let constants = no_crit();
        let mut state = state();

        let result = apply_resolution(&mut state, Resolution::Hit { dmg: 10, crit: false }, &constants);
        assert_eq!(result.hp_before, 100);
        assert_eq!(result.hp_after, 90);
        assert_eq!(result.coins_awarded, 5);
        assert_eq!(state.combo, 1);
        assert!(!result.is_killing_blow);
    }

    #[test]
    fn test_absorbed_leaves_state() {
        let constants = no_crit();
        let mut state = state();
        state.combo = 3;
        state.combo_best = 3;

        let result = apply_resolution(&mut state, Resolution::Absorbed, &constants);
        assert!(result.absorbed);
        assert_eq!(state.hp, 100);
        assert_eq!(state.combo, 3);
        assert_eq!(state.hits, 0);
    }

    #[test]
    fn test_killing_blow_clamps_to_zero() {
        let constants = no_crit();
        let mut state = state();
        state.hp = 5;

        let result = apply_damage(&mut state, 40.0, &constants, &mut rng());
        assert!(result.is_killing_blow);
        assert_eq!(state.hp, 0);
    }

    #[test]
    fn test_small_dot_rounds_to_zero_and_resets_combo() {
        let constants = no_crit();
        let mut state = state();
        state.combo = 4;
        state.combo_best = 4;

        let result = apply_damage(&mut state, 0.2, &constants, &mut rng());
        assert_eq!(result.damage, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.hits, 0);
    }
}
