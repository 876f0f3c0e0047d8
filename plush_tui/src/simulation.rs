//! Headless autoplay for balance checks

use plush_core::{
    BattleState, Engine, EngineEvent, GameConstants, ProgressionConfig, ToolCatalog, ToolId,
};
use rand::Rng;

/// Frame length used to drive the engine
const FRAME_MS: u64 = 16;

/// Outcome of an autoplay run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoplayReport {
    pub duration_ms: u64,
    pub activations: u32,
    pub rounds_cleared: u32,
    pub damage_dealt: i64,
    pub coins_earned: u64,
}

impl AutoplayReport {
    /// Play from a copy of `state` for `duration_ms`, always using the
    /// strongest ready tool. The caller's state is never touched.
    pub fn run<R: Rng>(
        state: &BattleState,
        catalog: &ToolCatalog,
        progression: &ProgressionConfig,
        constants: &GameConstants,
        duration_ms: u64,
        rng: R,
    ) -> Self {
        // Runs on its own clock starting at zero
        let mut start = state.clone();
        start.cooldown_until.clear();

        let mut engine = Engine::restore(
            start,
            catalog.clone(),
            progression.clone(),
            constants.clone(),
            rng,
        );
        let mut report = AutoplayReport {
            duration_ms,
            ..Default::default()
        };
        let coins_at_start = engine.state().coins;

        let mut now = 0;
        engine.advance(now);
        while now < duration_ms {
            now += FRAME_MS;
            let ticks = engine.advance(now);
            report.record(&ticks.events);

            if let Some(tool) = best_ready_tool(&engine, now) {
                if let Ok(events) = engine.activate_tool(&tool, now) {
                    report.activations += 1;
                    report.record(&events);
                }
            }
        }

        report.coins_earned = engine.state().coins.saturating_sub(coins_at_start);
        report
    }

    fn record(&mut self, events: &[EngineEvent]) {
        for event in events {
            match event {
                EngineEvent::Hit { damage, .. } => self.damage_dealt += damage,
                EngineEvent::RoundCleared(_) => self.rounds_cleared += 1,
                _ => {}
            }
        }
    }

    /// Calculate average coins per activation
    pub fn coins_per_activation(&self) -> f64 {
        if self.activations > 0 {
            self.coins_earned as f64 / self.activations as f64
        } else {
            0.0
        }
    }

    /// Calculate damage per second
    pub fn dps(&self) -> f64 {
        if self.duration_ms > 0 {
            self.damage_dealt as f64 / (self.duration_ms as f64 / 1000.0)
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{}s autoplay: {} rounds, {:.1} dps, {:.2} coins/use",
            self.duration_ms / 1000,
            self.rounds_cleared,
            self.dps(),
            self.coins_per_activation()
        )
    }
}

/// Owned, free, off-cooldown tool with the highest average damage
fn best_ready_tool<R: Rng>(engine: &Engine<R>, now: u64) -> Option<ToolId> {
    let state = engine.state();
    engine
        .catalog()
        .iter()
        .filter(|t| state.owns(&t.id) && t.cost.is_none() && t.damage.midpoint() > 0.0)
        .filter(|t| state.cooldown_remaining(&t.id, now) == 0)
        .max_by(|a, b| a.damage.midpoint().total_cmp(&b.damage.midpoint()))
        .map(|t| t.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plush_core::{default_catalog, default_progression};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_autoplay_clears_rounds() {
        let catalog = default_catalog();
        let state = BattleState::new(100, catalog.starter_tools());

        let report = AutoplayReport::run(
            &state,
            &catalog,
            &default_progression(),
            &GameConstants::default(),
            60_000,
            ChaCha8Rng::seed_from_u64(42),
        );

        assert!(report.activations > 0);
        assert!(report.rounds_cleared > 0);
        assert!(report.damage_dealt > 0);
        assert!(report.coins_per_activation() > 0.0);
        assert!(report.summary().contains("autoplay"));
    }

    #[test]
    fn test_autoplay_leaves_input_state() {
        let catalog = default_catalog();
        let state = BattleState::new(100, catalog.starter_tools());
        let before = state.clone();

        AutoplayReport::run(
            &state,
            &catalog,
            &default_progression(),
            &GameConstants::default(),
            5_000,
            ChaCha8Rng::seed_from_u64(1),
        );
        assert_eq!(state, before);
    }
}
