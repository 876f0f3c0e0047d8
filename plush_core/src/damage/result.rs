//! HitResult - outcome of applying one damage resolution

use serde::{Deserialize, Serialize};

/// Result of applying a resolved amount to the battle state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitResult {
    /// Signed damage dealt (negative = healed)
    pub damage: i64,
    /// Whether the shield swallowed the hit
    pub absorbed: bool,
    pub is_critical: bool,
    /// Coins earned from this hit
    pub coins_awarded: u64,

    // === State Changes ===
    pub hp_before: i64,
    pub hp_after: i64,

    /// Whether this hit brought hp to zero
    pub is_killing_blow: bool,
}

impl HitResult {
    /// Create a new empty hit result
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_heal(&self) -> bool {
        self.damage < 0
    }

    /// Get hp change (negative when damaged)
    pub fn hp_change(&self) -> i64 {
        self.hp_after - self.hp_before
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if self.absorbed {
            return "Shield absorbed the hit".to_string();
        }

        let mut parts = Vec::new();

        if self.damage > 0 {
            parts.push(format!("{} damage", self.damage));
        } else if self.damage < 0 {
            parts.push(format!("healed {}", -self.damage));
        }

        if self.is_critical {
            parts.push("CRIT".to_string());
        }

        if self.coins_awarded > 0 {
            parts.push(format!("+{} coins", self.coins_awarded));
        }

        if self.is_killing_blow {
            parts.push("KO".to_string());
        }

        if parts.is_empty() {
            "No effect".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_damage() {
        let result = HitResult {
            damage: 12,
            is_critical: true,
            coins_awarded: 6,
            hp_before: 100,
            hp_after: 88,
            ..Default::default()
        };

        let summary = result.summary();
        assert!(summary.contains("12 damage"));
        assert!(summary.contains("CRIT"));
        assert!(summary.contains("+6 coins"));
        assert_eq!(result.hp_change(), -12);
    }

    #[test]
    fn test_summary_absorbed() {
        let result = HitResult {
            absorbed: true,
            ..Default::default()
        };
        assert_eq!(result.summary(), "Shield absorbed the hit");
    }

    #[test]
    fn test_summary_heal_and_noop() {
        let heal = HitResult {
            damage: -11,
            ..Default::default()
        };
        assert!(heal.is_heal());
        assert!(heal.summary().contains("healed 11"));
        assert_eq!(HitResult::new().summary(), "No effect");
    }
}
