//! Round controller - boss defeat, reward and difficulty scaling

use crate::config::RoundConstants;
use crate::economy;
use crate::state::BattleState;
use crate::types::round_half_up;
use serde::{Deserialize, Serialize};

/// A completed round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundCleared {
    /// Kill count after this clear
    pub boss_kills: u32,
    pub reward: u64,
    pub previous_max_hp: i64,
    pub new_max_hp: i64,
}

/// Max hp of the next round: round(max * growth + flat)
pub fn next_max_hp(max_hp: i64, round: &RoundConstants) -> i64 {
    round_half_up(max_hp as f64 * round.hp_growth + round.hp_flat_bonus).max(1)
}

/// Coins for clearing a round with the given max hp
pub fn clear_reward(max_hp: i64, round: &RoundConstants) -> u64 {
    let scaled = round_half_up(max_hp as f64 / round.reward_hp_divisor).max(0) as u64;
    round.base_reward + scaled
}

/// Run the ACTIVE -> CLEARED -> ACTIVE transition if hp has hit zero
///
/// The next round starts immediately at full health with statuses wiped and
/// the combo reset. The seen-status record survives.
pub fn check_round_clear(state: &mut BattleState, round: &RoundConstants) -> Option<RoundCleared> {
    if state.hp > 0 {
        return None;
    }

    let previous_max_hp = state.max_hp;
    let reward = clear_reward(previous_max_hp, round);
    let new_max_hp = next_max_hp(previous_max_hp, round);

    state.boss_kills += 1;
    economy::credit(state, reward);
    state.max_hp = new_max_hp;
    state.hp = new_max_hp;
    state.statuses.clear();
    state.combo = 0;

    Some(RoundCleared {
        boss_kills: state.boss_kills,
        reward,
        previous_max_hp,
        new_max_hp,
    })
}

/// Refill hp and wipe statuses without counting a kill
pub fn restart_battle(state: &mut BattleState) {
    state.hp = state.max_hp;
    state.statuses.clear();
    state.combo = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatusKind;
    use std::collections::BTreeSet;

    #[test]
    fn test_round_scaling_from_100() {
        let round = RoundConstants::default();
        assert_eq!(next_max_hp(100, &round), 150);
        assert_eq!(clear_reward(100, &round), 70);
        assert_eq!(next_max_hp(150, &round), 213);
        assert_eq!(clear_reward(150, &round), 80);
    }

    #[test]
    fn test_no_clear_while_alive() {
        let mut state = BattleState::new(100, BTreeSet::new());
        state.hp = 1;
        assert!(check_round_clear(&mut state, &RoundConstants::default()).is_none());
        assert_eq!(state.boss_kills, 0);
    }

    #[test]
    fn test_clear_transition() {
        let mut state = BattleState::new(100, BTreeSet::new());
        state.hp = 0;
        state.coins = 3;
        state.combo = 7;
        state.combo_best = 7;
        state.statuses.apply(StatusKind::Burn, 8);

        let cleared = check_round_clear(&mut state, &RoundConstants::default()).unwrap();
        assert_eq!(cleared.boss_kills, 1);
        assert_eq!(cleared.reward, 70);
        assert_eq!(cleared.new_max_hp, 150);
        assert_eq!(state.hp, 150);
        assert_eq!(state.max_hp, 150);
        assert_eq!(state.coins, 73);
        assert_eq!(state.combo, 0);
        assert_eq!(state.combo_best, 7);
        assert!(!state.statuses.is_active(StatusKind::Burn));
        assert!(state.statuses.has_seen(StatusKind::Burn));
    }

    #[test]
    fn test_restart_battle() {
        let mut state = BattleState::new(100, BTreeSet::new());
        state.hp = 12;
        state.combo = 2;
        state.combo_best = 2;
        state.statuses.apply(StatusKind::Slime, 8);

        restart_battle(&mut state);
        assert_eq!(state.hp, 100);
        assert_eq!(state.combo, 0);
        assert_eq!(state.boss_kills, 0);
        assert!(!state.statuses.is_active(StatusKind::Slime));
    }
}
