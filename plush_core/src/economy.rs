//! Combo & economy tracking - coins, hit streaks and tool variety

use crate::catalog::Tool;
use crate::config::EconomyConstants;
use crate::error::EngineError;
use crate::state::BattleState;
use crate::types::{round_half_up, ToolId};

/// Add coins, saturating at the numeric ceiling
pub fn credit(state: &mut BattleState, amount: u64) {
    state.coins = state.coins.saturating_add(amount);
}

/// Remove coins, or fail without touching the balance
pub fn spend(state: &mut BattleState, amount: u64) -> Result<(), EngineError> {
    ensure_funds(state, amount)?;
    state.coins -= amount;
    Ok(())
}

/// Fail with `InsufficientFunds` if the balance can't cover `amount`
pub fn ensure_funds(state: &BattleState, amount: u64) -> Result<(), EngineError> {
    if state.coins < amount {
        return Err(EngineError::InsufficientFunds {
            needed: amount,
            available: state.coins,
        });
    }
    Ok(())
}

/// Coins awarded for a damaging hit: max(floor, round(dmg / 2))
pub fn hit_reward(dmg: i64, economy: &EconomyConstants) -> u64 {
    let half = round_half_up(dmg as f64 / 2.0).max(0) as u64;
    half.max(economy.min_hit_reward)
}

/// Book-keep a resolved damage value: hit counter, combo and coin reward
///
/// Returns the coins awarded.
pub fn record_damage(state: &mut BattleState, dmg: i64, economy: &EconomyConstants) -> u64 {
    if dmg != 0 {
        state.hits += 1;
    }

    if dmg > 0 {
        state.combo += 1;
        state.combo_best = state.combo_best.max(state.combo);
        let reward = hit_reward(dmg, economy);
        credit(state, reward);
        reward
    } else {
        state.combo = 0;
        0
    }
}

/// Track runs of back-to-back activations with differing tools
pub fn update_unique_streak(state: &mut BattleState, tool_id: &ToolId) {
    state.unique_streak = match &state.last_tool {
        Some(last) if last != tool_id => state.unique_streak.saturating_add(1),
        _ => 1,
    };
    state.last_tool = Some(tool_id.clone());
}

/// Shop price for a tool
pub fn shop_price(tool: &Tool, economy: &EconomyConstants) -> u64 {
    tool.unlock_price.unwrap_or(economy.shop_default_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn state() -> BattleState {
        BattleState::new(100, BTreeSet::new())
    }

    #[test]
    fn test_spend_insufficient_leaves_balance() {
        let mut state = state();
        state.coins = 10;

        let err = spend(&mut state, 20).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientFunds {
                needed: 20,
                available: 10
            }
        );
        assert_eq!(state.coins, 10);

        spend(&mut state, 10).unwrap();
        assert_eq!(state.coins, 0);
    }

    #[test]
    fn test_hit_reward() {
        let economy = EconomyConstants::default();
        assert_eq!(hit_reward(1, &economy), 1);
        assert_eq!(hit_reward(3, &economy), 2);
        assert_eq!(hit_reward(14, &economy), 7);
    }

    #[test]
    fn test_record_positive_damage() {
        let economy = EconomyConstants::default();
        let mut state = state();

        let reward = record_damage(&mut state, 10, &economy);
        assert_eq!(reward, 5);
        assert_eq!(state.hits, 1);
        assert_eq!(state.combo, 1);
        assert_eq!(state.combo_best, 1);
        assert_eq!(state.coins, 5);
    }

    #[test]
    fn test_heal_resets_combo_but_counts_hit() {
        let economy = EconomyConstants::default();
        let mut state = state();
        record_damage(&mut state, 10, &economy);
        record_damage(&mut state, 10, &economy);

        let reward = record_damage(&mut state, -12, &economy);
        assert_eq!(reward, 0);
        assert_eq!(state.hits, 3);
        assert_eq!(state.combo, 0);
        assert_eq!(state.combo_best, 2);
    }

    #[test]
    fn test_zero_damage_resets_combo_without_hit() {
        let economy = EconomyConstants::default();
        let mut state = state();
        record_damage(&mut state, 4, &economy);

        record_damage(&mut state, 0, &economy);
        assert_eq!(state.hits, 1);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn test_unique_streak() {
        let mut state = state();
        let hammer = ToolId::from("hammer");
        let saw = ToolId::from("saw");

        update_unique_streak(&mut state, &hammer);
        assert_eq!(state.unique_streak, 1);
        update_unique_streak(&mut state, &saw);
        assert_eq!(state.unique_streak, 2);
        update_unique_streak(&mut state, &hammer);
        assert_eq!(state.unique_streak, 3);
        update_unique_streak(&mut state, &hammer);
        assert_eq!(state.unique_streak, 1);
    }

    #[test]
    fn test_shop_price_default() {
        let economy = EconomyConstants::default();
        let priced = Tool::new("tnt", "TNT", 10, 25).with_price(120);
        let unpriced = Tool::new("sun", "Sun", 3, 6);
        assert_eq!(shop_price(&priced, &economy), 120);
        assert_eq!(shop_price(&unpriced, &economy), 50);
    }
}
