//! Battle engine - owns the state and runs every intent to completion
//!
//! Presentation sends intents (`activate_tool`, `purchase_tool`, ...) and the
//! periodic `advance(now)`; each call returns the events it produced. A failed
//! intent returns an `EngineError` and leaves the state exactly as it was.

mod event;
mod scheduler;
mod snapshot;

pub use event::{EngineEvent, HitSource};
pub use scheduler::{DueTick, Scheduler, TickKind};
pub use snapshot::{AchievementView, QuestView, Snapshot, StatusView, ToolView};

use crate::catalog::{Prize, Tool, ToolCatalog, ToolEffect};
use crate::config::{default_catalog, default_progression, GameConstants, ProgressionConfig};
use crate::damage::{apply_damage, apply_resolution, resolve_tool, HitResult};
use crate::economy;
use crate::error::EngineError;
use crate::progression;
use crate::state::BattleState;
use crate::status::dot_amount;
use crate::types::ToolId;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// What a call to `advance` did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub status_ticks: u32,
    pub dot_ticks: u32,
    pub cooldown_refreshes: u32,
    /// Whether any persisted field changed
    pub state_changed: bool,
    pub events: Vec<EngineEvent>,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        self.status_ticks == 0 && self.dot_ticks == 0 && self.cooldown_refreshes == 0
    }
}

/// The battle and progression engine
pub struct Engine<R: Rng = ChaCha8Rng> {
    state: BattleState,
    catalog: ToolCatalog,
    progression: ProgressionConfig,
    constants: GameConstants,
    scheduler: Scheduler,
    rng: R,
}

impl Engine<ChaCha8Rng> {
    /// Built-in content with a deterministic RNG
    pub fn with_seed(seed: u64) -> Self {
        Self::new(
            default_catalog(),
            default_progression(),
            GameConstants::default(),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    /// Built-in content with an OS-seeded RNG
    pub fn from_entropy() -> Self {
        Self::new(
            default_catalog(),
            default_progression(),
            GameConstants::default(),
            ChaCha8Rng::from_entropy(),
        )
    }
}

impl<R: Rng> Engine<R> {
    /// Fresh game at factory defaults
    pub fn new(
        catalog: ToolCatalog,
        progression: ProgressionConfig,
        constants: GameConstants,
        rng: R,
    ) -> Self {
        let state = BattleState::new(constants.round.starting_max_hp, catalog.starter_tools());
        let scheduler = Scheduler::new(&constants.timing);
        Engine {
            state,
            catalog,
            progression,
            constants,
            scheduler,
            rng,
        }
    }

    /// Resume from a previously saved state
    ///
    /// The state is normalised first: hp is clamped into range, starter tools
    /// are granted and a boss saved at 0 hp is settled as a clear.
    pub fn restore(
        mut state: BattleState,
        catalog: ToolCatalog,
        progression: ProgressionConfig,
        constants: GameConstants,
        rng: R,
    ) -> Self {
        state.max_hp = state.max_hp.max(1);
        state.hp = state.hp.clamp(0, state.max_hp);
        state.combo_best = state.combo_best.max(state.combo);
        state.owned_tools.extend(catalog.starter_tools());

        let scheduler = Scheduler::new(&constants.timing);
        let mut engine = Engine {
            state,
            catalog,
            progression,
            constants,
            scheduler,
            rng,
        };

        let mut events = Vec::new();
        engine.settle(&mut events);
        for event in &events {
            tracing::info!("restored save: {}", event.describe());
        }
        engine
    }

    // === Accessors ===

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn progression(&self) -> &ProgressionConfig {
        &self.progression
    }

    pub fn constants(&self) -> &GameConstants {
        &self.constants
    }

    pub fn snapshot(&self, now: u64) -> Snapshot {
        Snapshot::capture(
            &self.state,
            &self.catalog,
            &self.progression,
            &self.constants,
            now,
        )
    }

    // === Intents ===

    /// Use a tool at `now` (epoch ms)
    pub fn activate_tool(&mut self, id: &ToolId, now: u64) -> Result<Vec<EngineEvent>, EngineError> {
        let tool = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownTool(id.clone()))?;

        if !self.state.owns(&tool.id) {
            return Err(EngineError::ToolLocked(tool.id));
        }
        let remaining_ms = self.state.cooldown_remaining(&tool.id, now);
        if remaining_ms > 0 {
            return Err(EngineError::OnCooldown {
                tool: tool.id,
                remaining_ms,
            });
        }
        if let Some(cost) = tool.cost {
            economy::ensure_funds(&self.state, cost)?;
        }

        // Every check passed; from here on the activation commits.
        if let Some(cost) = tool.cost {
            economy::spend(&mut self.state, cost)?;
        }
        if tool.cooldown_ms > 0 {
            self.state
                .cooldown_until
                .insert(tool.id.clone(), now.saturating_add(tool.cooldown_ms));
        }
        economy::update_unique_streak(&mut self.state, &tool.id);

        let mut events = Vec::new();
        let resolution = resolve_tool(&self.state, &tool, &self.constants, &mut self.rng);
        let result = apply_resolution(&mut self.state, resolution, &self.constants);
        tracing::debug!(tool = %tool.id, "{}", result.summary());
        self.record_hit(HitSource::Tool { id: tool.id.clone() }, &result, &mut events);

        if let Some(status) = tool.status {
            self.state
                .statuses
                .apply(status, self.constants.hit.status_duration_ticks);
            events.push(EngineEvent::StatusApplied {
                status,
                ticks: self.state.statuses.remaining(status),
            });
        }

        self.run_effects(&tool, &mut events);
        self.settle(&mut events);
        Ok(events)
    }

    /// Buy a tool from the shop
    pub fn purchase_tool(&mut self, id: &ToolId) -> Result<Vec<EngineEvent>, EngineError> {
        let tool = self
            .catalog
            .get(id)
            .ok_or_else(|| EngineError::UnknownTool(id.clone()))?;
        if self.state.owns(&tool.id) {
            return Err(EngineError::AlreadyOwned(tool.id.clone()));
        }

        let price = economy::shop_price(tool, &self.constants.economy);
        let tool_id = tool.id.clone();
        economy::spend(&mut self.state, price)?;
        self.state.owned_tools.insert(tool_id.clone());
        tracing::info!(tool = %tool_id, price, "tool purchased");

        let mut events = vec![EngineEvent::ToolPurchased {
            tool: tool_id,
            price,
        }];
        self.settle(&mut events);
        Ok(events)
    }

    pub fn claim_quest(&mut self, id: &str) -> Result<Vec<EngineEvent>, EngineError> {
        let reward = progression::claim_quest(&mut self.state, &self.progression.quests, id)?;
        tracing::info!(quest = id, reward, "quest claimed");

        let mut events = vec![EngineEvent::QuestClaimed {
            id: id.to_string(),
            reward,
        }];
        self.settle(&mut events);
        Ok(events)
    }

    /// Claim the once-per-day bonus for the caller's local date
    pub fn claim_daily_bonus(&mut self, today: NaiveDate) -> Result<Vec<EngineEvent>, EngineError> {
        let reward = progression::claim_daily_bonus(
            &mut self.state,
            today,
            &self.constants.daily,
            &mut self.rng,
        )?;
        tracing::info!(%today, reward, "daily bonus claimed");

        let mut events = vec![EngineEvent::DailyBonusClaimed {
            reward,
            date: today,
        }];
        self.settle(&mut events);
        Ok(events)
    }

    pub fn is_daily_available(&self, today: NaiveDate) -> bool {
        progression::is_daily_available(&self.state, today)
    }

    pub fn toggle_mute(&mut self) -> Vec<EngineEvent> {
        self.state.muted = !self.state.muted;
        vec![EngineEvent::MuteToggled {
            muted: self.state.muted,
        }]
    }

    /// Back to factory defaults; the mute setting is kept
    pub fn reset_progress(&mut self) -> Vec<EngineEvent> {
        let muted = self.state.muted;
        self.state = BattleState::new(
            self.constants.round.starting_max_hp,
            self.catalog.starter_tools(),
        );
        self.state.muted = muted;
        tracing::info!("progress reset");
        vec![EngineEvent::ProgressReset]
    }

    /// Run every periodic tick due up to `now` (epoch ms)
    pub fn advance(&mut self, now: u64) -> TickReport {
        let mut report = TickReport::default();

        for tick in self.scheduler.advance(now) {
            match tick.kind {
                TickKind::Status => {
                    report.status_ticks = report.status_ticks.saturating_add(tick.count);
                    if self.state.statuses.active().next().is_some() {
                        let expired = self.state.statuses.tick_by(tick.count);
                        if !expired.is_empty() {
                            tracing::debug!(?expired, "statuses expired");
                        }
                        report.state_changed = true;
                    }
                }
                TickKind::Dot => {
                    report.dot_ticks += 1;
                    let amount = dot_amount(&self.state.statuses, &self.constants.dot);
                    if amount > 0.0 {
                        let result = apply_damage(&mut self.state, amount, &self.constants, &mut self.rng);
                        tracing::debug!(amount, "dot tick: {}", result.summary());
                        self.record_hit(HitSource::DamageOverTime, &result, &mut report.events);
                        report.state_changed = true;
                    }
                }
                TickKind::CooldownRefresh => {
                    report.cooldown_refreshes += 1;
                    let before = self.state.cooldown_until.len();
                    self.state.prune_cooldowns(tick.at);
                    report.state_changed |= self.state.cooldown_until.len() != before;
                }
            }
        }

        if report.state_changed {
            self.settle(&mut report.events);
        }
        report
    }

    // === Internals ===

    /// Emit the event for a hit and clear the round if it was lethal
    ///
    /// Achievements are checked before the clear resets the combo.
    fn record_hit(&mut self, source: HitSource, result: &HitResult, events: &mut Vec<EngineEvent>) {
        events.extend(EngineEvent::from_hit(source, result));
        self.unlock_achievements(events);
        if let Some(cleared) = progression::check_round_clear(&mut self.state, &self.constants.round) {
            tracing::info!(
                kills = cleared.boss_kills,
                reward = cleared.reward,
                next_max_hp = cleared.new_max_hp,
                "round cleared"
            );
            events.push(EngineEvent::RoundCleared(cleared));
        }
    }

    fn run_effects(&mut self, tool: &Tool, events: &mut Vec<EngineEvent>) {
        for effect in &tool.effects {
            match effect {
                ToolEffect::GrantCoins { amount } => {
                    economy::credit(&mut self.state, *amount);
                    events.push(EngineEvent::CoinsGained { amount: *amount });
                }
                ToolEffect::SetStatus { status, ticks } => {
                    self.state.statuses.set(*status, *ticks);
                    events.push(EngineEvent::StatusApplied {
                        status: *status,
                        ticks: *ticks,
                    });
                }
                ToolEffect::Surprise { prizes } => {
                    if let Some(prize) = prizes.choose(&mut self.rng) {
                        self.award_prize(prize, events);
                    }
                }
                ToolEffect::MarkLegend => {
                    self.state.legend_used = true;
                    events.push(EngineEvent::LegendUsed);
                }
                ToolEffect::RestartBattle => {
                    progression::restart_battle(&mut self.state);
                    events.push(EngineEvent::BattleRestarted);
                }
            }
        }
    }

    fn award_prize(&mut self, prize: &Prize, events: &mut Vec<EngineEvent>) {
        tracing::debug!(?prize, "surprise prize");
        match prize {
            Prize::Coins { amount } => {
                economy::credit(&mut self.state, *amount);
                events.push(EngineEvent::CoinsGained { amount: *amount });
            }
            Prize::Heal { amount } => {
                let result = apply_damage(&mut self.state, -amount, &self.constants, &mut self.rng);
                self.record_hit(HitSource::Prize, &result, events);
            }
            Prize::SetStatus { status, ticks } => {
                self.state.statuses.set(*status, *ticks);
                events.push(EngineEvent::StatusApplied {
                    status: *status,
                    ticks: *ticks,
                });
            }
        }
    }

    /// Achievement pass, round check, then a second pass for what the
    /// clear itself credited. Runs at the end of every mutation.
    fn settle(&mut self, events: &mut Vec<EngineEvent>) {
        self.unlock_achievements(events);
        if let Some(cleared) = progression::check_round_clear(&mut self.state, &self.constants.round) {
            tracing::info!(kills = cleared.boss_kills, reward = cleared.reward, "round cleared");
            events.push(EngineEvent::RoundCleared(cleared));
        }
        self.unlock_achievements(events);

        debug_assert!(self.state.invariants_hold());
    }

    fn unlock_achievements(&mut self, events: &mut Vec<EngineEvent>) {
        for unlocked in progression::evaluate_achievements(&mut self.state, &self.progression.achievements) {
            tracing::info!(id = %unlocked.id, reward = unlocked.reward, "achievement unlocked");
            events.push(EngineEvent::AchievementUnlocked(unlocked));
        }
    }
}
