//! Engine error taxonomy
//!
//! Every failure leaves the battle state untouched. The `Display` text is what
//! the presentation layer shows as a toast.

use crate::types::ToolId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Not enough coins: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("Buy {0} in the shop first")]
    ToolLocked(ToolId),
    #[error("{tool} is cooling down ({remaining_ms} ms)")]
    OnCooldown { tool: ToolId, remaining_ms: u64 },
    #[error("Unknown tool: {0}")]
    UnknownTool(ToolId),
    #[error("{0} is already owned")]
    AlreadyOwned(ToolId),
    #[error("Unknown quest: {0}")]
    UnknownQuest(String),
    #[error("Quest {0} is not complete yet")]
    QuestIncomplete(String),
    #[error("Reward for {0} was already claimed")]
    DuplicateClaim(String),
    #[error("Daily bonus already claimed today")]
    DailyAlreadyClaimed,
}

impl EngineError {
    /// Errors the presentation layer should swallow without a toast
    /// (spam clicks, repeat claims)
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            EngineError::OnCooldown { .. }
                | EngineError::AlreadyOwned(_)
                | EngineError::DuplicateClaim(_)
                | EngineError::DailyAlreadyClaimed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_is_silent() {
        let err = EngineError::OnCooldown {
            tool: ToolId::from("hammer"),
            remaining_ms: 120,
        };
        assert!(err.is_silent());
        assert!(!EngineError::ToolLocked(ToolId::from("tnt")).is_silent());
    }

    #[test]
    fn test_insufficient_funds_message() {
        let err = EngineError::InsufficientFunds {
            needed: 20,
            available: 3,
        };
        assert_eq!(err.to_string(), "Not enough coins: need 20, have 3");
    }
}
