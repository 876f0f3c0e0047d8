//! plush_core - Battle & progression engine for a plush-toy clicker
//!
//! This library provides:
//! - ToolCatalog: Data-driven tools with damage modifiers and side effects
//! - StatusRegistry: Tick-based status effects and damage over time
//! - Damage resolution: Shield, ghost, crit and rounding
//! - Progression: Rounds, achievements, quests and the daily bonus
//! - Engine: Intent handling, periodic ticks and snapshots
//! - Save: Tolerant JSON persistence with debounced writes

pub mod catalog;
pub mod config;
pub mod damage;
pub mod economy;
pub mod engine;
pub mod error;
pub mod prelude;
pub mod progression;
pub mod save;
pub mod session;
pub mod state;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use catalog::{Prize, Tool, ToolCatalog, ToolEffect, ToolModifier};
pub use config::{default_catalog, default_progression, ConfigError, GameConstants, ProgressionConfig};
pub use damage::{HitResult, Resolution};
pub use engine::{Engine, EngineEvent, HitSource, Snapshot, TickReport};
pub use error::EngineError;
pub use progression::{Achievement, Goal, Quest, QuestStatus, RoundCleared};
pub use save::{FileSaveStore, MemorySaveStore, SaveError, SaveRecord, SaveStore};
pub use session::GameSession;
pub use state::BattleState;
pub use status::StatusRegistry;
pub use types::{Rarity, StatusKind, ToolId};
