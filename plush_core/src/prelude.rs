//! Prelude module for convenient imports
//!
//! ```rust
//! use plush_core::prelude::*;
//! ```

// Core types
pub use crate::state::BattleState;
pub use crate::types::{Rarity, StatusKind, ToolId};

// Catalog
pub use crate::catalog::{Tool, ToolCatalog};

// Engine
pub use crate::engine::{Engine, EngineEvent, Snapshot, TickReport};
pub use crate::error::EngineError;

// Persistence
pub use crate::save::{FileSaveStore, MemorySaveStore, SaveStore};
pub use crate::session::GameSession;

// Config
pub use crate::config::{default_catalog, default_progression, GameConstants};
