//! GameSession - an engine wired to persistent storage

use crate::catalog::ToolCatalog;
use crate::config::{default_catalog, default_progression, GameConstants, ProgressionConfig};
use crate::engine::{Engine, EngineEvent, Snapshot, TickReport};
use crate::error::EngineError;
use crate::save::{SaveDebouncer, SaveError, SaveRecord, SaveStore};
use crate::types::ToolId;
use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Engine plus save store, with writes debounced after every mutation
pub struct GameSession<S: SaveStore, R: Rng = ChaCha8Rng> {
    engine: Engine<R>,
    store: S,
    debouncer: SaveDebouncer,
}

impl<S: SaveStore> GameSession<S> {
    /// Built-in content, OS-seeded RNG
    pub fn open_default(store: S) -> Self {
        Self::open(
            store,
            default_catalog(),
            default_progression(),
            GameConstants::default(),
            ChaCha8Rng::from_entropy(),
        )
    }

    /// Built-in content, deterministic RNG
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self::open(
            store,
            default_catalog(),
            default_progression(),
            GameConstants::default(),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }
}

impl<S: SaveStore, R: Rng> GameSession<S, R> {
    /// Load the stored save if there is a usable one, else start fresh
    pub fn open(
        store: S,
        catalog: ToolCatalog,
        progression: ProgressionConfig,
        constants: GameConstants,
        rng: R,
    ) -> Self {
        let debouncer = SaveDebouncer::new(constants.timing.save_debounce_ms);

        let record = match store.load() {
            Ok(Some(raw)) => match SaveRecord::from_json(&raw) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!("ignoring unreadable save: {}", err);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("could not read save: {}", err);
                None
            }
        };

        let engine = match record {
            Some(record) => {
                tracing::info!(coins = record.coins, kills = record.boss_kills, "save loaded");
                Engine::restore(record.into_state(), catalog, progression, constants, rng)
            }
            None => Engine::new(catalog, progression, constants, rng),
        };

        GameSession {
            engine,
            store,
            debouncer,
        }
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self, now: u64) -> Snapshot {
        self.engine.snapshot(now)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.debouncer.is_dirty()
    }

    // === Intents ===

    pub fn activate_tool(&mut self, id: &ToolId, now: u64) -> Result<Vec<EngineEvent>, EngineError> {
        let events = self.engine.activate_tool(id, now)?;
        self.debouncer.mark_dirty(now);
        Ok(events)
    }

    pub fn purchase_tool(&mut self, id: &ToolId, now: u64) -> Result<Vec<EngineEvent>, EngineError> {
        let events = self.engine.purchase_tool(id)?;
        self.debouncer.mark_dirty(now);
        Ok(events)
    }

    pub fn claim_quest(&mut self, id: &str, now: u64) -> Result<Vec<EngineEvent>, EngineError> {
        let events = self.engine.claim_quest(id)?;
        self.debouncer.mark_dirty(now);
        Ok(events)
    }

    pub fn claim_daily_bonus(
        &mut self,
        today: NaiveDate,
        now: u64,
    ) -> Result<Vec<EngineEvent>, EngineError> {
        let events = self.engine.claim_daily_bonus(today)?;
        self.debouncer.mark_dirty(now);
        Ok(events)
    }

    pub fn toggle_mute(&mut self, now: u64) -> Vec<EngineEvent> {
        let events = self.engine.toggle_mute();
        self.debouncer.mark_dirty(now);
        events
    }

    /// Factory reset; the stored save is deleted rather than overwritten
    pub fn reset_progress(&mut self) -> Vec<EngineEvent> {
        let events = self.engine.reset_progress();
        self.debouncer.take_pending();
        if let Err(err) = self.store.delete() {
            tracing::warn!("could not delete save: {}", err);
        }
        events
    }

    /// Run due ticks and flush the save once the debounce window has passed
    pub fn update(&mut self, now: u64) -> TickReport {
        let report = self.engine.advance(now);
        if report.state_changed {
            self.debouncer.mark_dirty(now);
        }

        if self.debouncer.take_due(now) {
            if let Err(err) = self.write() {
                tracing::error!("save failed: {}", err);
            }
        }
        report
    }

    /// Write any pending changes immediately (shutdown path)
    pub fn flush(&mut self) -> Result<(), SaveError> {
        if self.debouncer.take_pending() {
            self.write()?;
        }
        Ok(())
    }

    fn write(&mut self) -> Result<(), SaveError> {
        let json = SaveRecord::from_state(self.engine.state()).to_json()?;
        self.store.save(&json)
    }
}
