//! Achievement evaluation

use super::Goal;
use crate::economy;
use crate::state::BattleState;
use serde::{Deserialize, Serialize};

/// A one-time goal that unlocks and pays out automatically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub reward: u64,
    pub goal: Goal,
}

/// An achievement newly unlocked by an evaluation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub id: String,
    pub title: String,
    pub reward: u64,
}

/// Unlock every achievement whose goal now holds, in definition order
///
/// Already-unlocked ids are skipped, so repeated calls never pay twice.
pub fn evaluate_achievements(
    state: &mut BattleState,
    achievements: &[Achievement],
) -> Vec<UnlockedAchievement> {
    let mut unlocked = Vec::new();

    for achievement in achievements {
        if state.achievements_unlocked.contains(&achievement.id) {
            continue;
        }
        if !achievement.goal.is_met(state) {
            continue;
        }

        state.achievements_unlocked.insert(achievement.id.clone());
        economy::credit(state, achievement.reward);
        tracing::debug!(id = %achievement.id, reward = achievement.reward, "achievement unlocked");

        unlocked.push(UnlockedAchievement {
            id: achievement.id.clone(),
            title: achievement.title.clone(),
            reward: achievement.reward,
        });
    }

    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatusKind;
    use std::collections::BTreeSet;

    fn achievements() -> Vec<Achievement> {
        vec![
            Achievement {
                id: "firstHit".into(),
                title: "First Smack".into(),
                reward: 5,
                goal: Goal::Hits { at_least: 1 },
            },
            Achievement {
                id: "burn".into(),
                title: "Well Done".into(),
                reward: 10,
                goal: Goal::StatusSeen {
                    status: StatusKind::Burn,
                },
            },
        ]
    }

    #[test]
    fn test_nothing_unlocks_on_fresh_state() {
        let mut state = BattleState::new(100, BTreeSet::new());
        assert!(evaluate_achievements(&mut state, &achievements()).is_empty());
        assert_eq!(state.coins, 0);
    }

    #[test]
    fn test_unlocks_in_order_and_pays() {
        let mut state = BattleState::new(100, BTreeSet::new());
        state.hits = 1;
        state.statuses.apply(StatusKind::Burn, 8);

        let unlocked = evaluate_achievements(&mut state, &achievements());
        let ids: Vec<_> = unlocked.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["firstHit", "burn"]);
        assert_eq!(state.coins, 15);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let mut state = BattleState::new(100, BTreeSet::new());
        state.hits = 3;

        assert_eq!(evaluate_achievements(&mut state, &achievements()).len(), 1);
        assert!(evaluate_achievements(&mut state, &achievements()).is_empty());
        assert_eq!(state.coins, 5);
    }

    #[test]
    fn test_stays_unlocked_when_goal_regresses() {
        let defs = vec![Achievement {
            id: "combo3".into(),
            title: "Combo 3".into(),
            reward: 1,
            goal: Goal::Combo { at_least: 3 },
        }];
        let mut state = BattleState::new(100, BTreeSet::new());
        state.combo = 3;
        state.combo_best = 3;
        evaluate_achievements(&mut state, &defs);

        state.combo = 0;
        evaluate_achievements(&mut state, &defs);
        assert!(state.achievements_unlocked.contains("combo3"));
        assert_eq!(state.coins, 1);
    }
}
