//! Achievement and quest configuration loading

use super::ConfigError;
use crate::progression::{Achievement, Quest};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for achievement and quest definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionConfig {
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub quests: Vec<Quest>,
}

impl ProgressionConfig {
    /// Reject duplicate ids within each list
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for achievement in &self.achievements {
            if !seen.insert(achievement.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate achievement id '{}'",
                    achievement.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for quest in &self.quests {
            if !seen.insert(quest.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate quest id '{}'",
                    quest.id
                )));
            }
        }

        Ok(())
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }
}

/// Load progression definitions from a TOML file
pub fn load_progression(path: &Path) -> Result<ProgressionConfig, ConfigError> {
    let config: ProgressionConfig = super::load_toml(path)?;
    config.validate()?;
    Ok(config)
}

/// Load progression definitions from a TOML string
pub fn parse_progression(content: &str) -> Result<ProgressionConfig, ConfigError> {
    let config: ProgressionConfig = super::parse_toml(content)?;
    config.validate()?;
    Ok(config)
}

/// Get the built-in achievements and quests
pub fn default_progression() -> ProgressionConfig {
    let toml = include_str!("../../config/progression.toml");
    parse_progression(toml).unwrap_or_else(|err| {
        tracing::error!("built-in progression config is invalid: {}", err);
        ProgressionConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::Goal;
    use crate::types::StatusKind;

    #[test]
    fn test_parse_progression() {
        let toml = r#"
[[achievements]]
id = "burn"
title = "Well Done"
reward = 10
goal = { type = "status_seen", status = "burn" }

[[quests]]
id = "q_combo10"
text = "Reach a combo of 10"
reward = 20
goal = { type = "combo_best", at_least = 10 }
"#;

        let config = parse_progression(toml).unwrap();
        assert_eq!(
            config.achievement("burn").unwrap().goal,
            Goal::StatusSeen {
                status: StatusKind::Burn
            }
        );
        assert_eq!(config.quest("q_combo10").unwrap().reward, 20);
    }

    #[test]
    fn test_duplicate_quest_rejected() {
        let toml = r#"
[[quests]]
id = "q"
text = "one"
reward = 1
goal = { type = "legend_used" }

[[quests]]
id = "q"
text = "two"
reward = 2
goal = { type = "legend_used" }
"#;
        assert!(parse_progression(toml).is_err());
    }

    #[test]
    fn test_default_progression_loads_all() {
        let config = default_progression();
        assert_eq!(config.achievements.len(), 11);
        assert_eq!(config.quests.len(), 3);

        let first = &config.achievements[0];
        assert_eq!(first.id, "firstHit");
        assert_eq!(first.reward, 5);
        assert_eq!(config.achievement("bossWin").unwrap().reward, 100);
        assert_eq!(config.quest("q_fiveTools").unwrap().reward, 30);
    }
}
