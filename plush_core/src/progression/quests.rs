//! Quests - player-claimed goals

use super::Goal;
use crate::economy;
use crate::error::EngineError;
use crate::state::BattleState;
use serde::{Deserialize, Serialize};

/// A goal whose reward the player claims by hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub text: String,
    pub reward: u64,
    pub goal: Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    InProgress,
    Ready,
    Claimed,
}

impl QuestStatus {
    pub fn name(&self) -> &'static str {
        match self {
            QuestStatus::InProgress => "In progress",
            QuestStatus::Ready => "Ready",
            QuestStatus::Claimed => "Claimed",
        }
    }
}

pub fn quest_status(state: &BattleState, quest: &Quest) -> QuestStatus {
    if state.quests_claimed.contains(&quest.id) {
        QuestStatus::Claimed
    } else if quest.goal.is_met(state) {
        QuestStatus::Ready
    } else {
        QuestStatus::InProgress
    }
}

/// Pay out a completed quest, once
pub fn claim_quest(state: &mut BattleState, quests: &[Quest], id: &str) -> Result<u64, EngineError> {
    let quest = quests
        .iter()
        .find(|q| q.id == id)
        .ok_or_else(|| EngineError::UnknownQuest(id.to_string()))?;

    match quest_status(state, quest) {
        QuestStatus::Claimed => Err(EngineError::DuplicateClaim(quest.id.clone())),
        QuestStatus::InProgress => Err(EngineError::QuestIncomplete(quest.id.clone())),
        QuestStatus::Ready => {
            state.quests_claimed.insert(quest.id.clone());
            economy::credit(state, quest.reward);
            Ok(quest.reward)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn quests() -> Vec<Quest> {
        vec![Quest {
            id: "q_combo10".into(),
            text: "Reach a combo of 10".into(),
            reward: 20,
            goal: Goal::ComboBest { at_least: 10 },
        }]
    }

    #[test]
    fn test_claim_lifecycle() {
        let quests = quests();
        let mut state = BattleState::new(100, BTreeSet::new());

        assert_eq!(quest_status(&state, &quests[0]), QuestStatus::InProgress);
        assert_eq!(
            claim_quest(&mut state, &quests, "q_combo10"),
            Err(EngineError::QuestIncomplete("q_combo10".into()))
        );

        state.combo_best = 10;
        assert_eq!(quest_status(&state, &quests[0]), QuestStatus::Ready);
        assert_eq!(claim_quest(&mut state, &quests, "q_combo10"), Ok(20));
        assert_eq!(state.coins, 20);

        assert_eq!(
            claim_quest(&mut state, &quests, "q_combo10"),
            Err(EngineError::DuplicateClaim("q_combo10".into()))
        );
        assert_eq!(state.coins, 20);
        assert_eq!(quest_status(&state, &quests[0]), QuestStatus::Claimed);
    }

    #[test]
    fn test_unknown_quest() {
        let mut state = BattleState::new(100, BTreeSet::new());
        assert_eq!(
            claim_quest(&mut state, &quests(), "nope"),
            Err(EngineError::UnknownQuest("nope".into()))
        );
    }
}
