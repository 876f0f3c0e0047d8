//! Property tests: state invariants under arbitrary play

use plush_core::prelude::*;
use plush_core::SaveRecord;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
enum Action {
    Activate(usize),
    Buy(usize),
    Wait(u64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => (0usize..64).prop_map(Action::Activate),
        1 => (0usize..64).prop_map(Action::Buy),
        3 => (1u64..2_000).prop_map(Action::Wait),
    ]
}

fn started_engine(seed: u64) -> Engine {
    let mut engine = Engine::with_seed(seed);
    engine.advance(0);
    engine
}

fn run(engine: &mut Engine, actions: &[Action], mut check: impl FnMut(&Engine, &Snapshot)) {
    let ids: Vec<ToolId> = engine.catalog().iter().map(|t| t.id.clone()).collect();
    let mut now = 0u64;

    for action in actions {
        match action {
            Action::Activate(i) => {
                let _ = engine.activate_tool(&ids[i % ids.len()], now);
            }
            Action::Buy(i) => {
                let _ = engine.purchase_tool(&ids[i % ids.len()]);
            }
            Action::Wait(ms) => {
                now += ms;
                engine.advance(now);
            }
        }
        now += 16;
        let snapshot = engine.snapshot(now);
        check(engine, &snapshot);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_state_invariants_hold(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..200)) {
        let mut engine = started_engine(seed);
        run(&mut engine, &actions, |engine, snapshot| {
            let state = engine.state();
            assert!(state.max_hp >= 1);
            assert!(state.hp >= 0 && state.hp <= state.max_hp);
            assert!(state.combo_best >= state.combo);
            assert!(snapshot.hp_percent >= 0.0 && snapshot.hp_percent <= 100.0);
        });
    }

    #[test]
    fn prop_progress_is_monotonic(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..200)) {
        let mut engine = started_engine(seed);
        let mut previous = engine.state().clone();
        run(&mut engine, &actions, |engine, _| {
            let state = engine.state();
            assert!(state.owned_tools.is_superset(&previous.owned_tools));
            assert!(state.achievements_unlocked.is_superset(&previous.achievements_unlocked));
            assert!(state.statuses.seen().is_superset(previous.statuses.seen()));
            assert!(state.boss_kills >= previous.boss_kills);
            assert!(state.hits >= previous.hits);
            assert!(state.max_hp >= previous.max_hp);
            assert!(!previous.legend_used || state.legend_used);
            previous = state.clone();
        });
    }

    #[test]
    fn prop_save_round_trip(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..100)) {
        let mut engine = started_engine(seed);
        run(&mut engine, &actions, |_, _| {});

        let record = SaveRecord::from_state(engine.state());
        let json = record.to_json().unwrap();
        let loaded = SaveRecord::from_json(&json).unwrap();
        prop_assert_eq!(&loaded, &record);

        let restored = Engine::restore(
            loaded.into_state(),
            engine.catalog().clone(),
            engine.progression().clone(),
            engine.constants().clone(),
            ChaCha8Rng::seed_from_u64(seed),
        );
        prop_assert_eq!(SaveRecord::from_state(restored.state()), record);
    }

    #[test]
    fn prop_failed_activation_changes_nothing(seed in any::<u64>(), idx in 0usize..64) {
        let mut engine = started_engine(seed);
        let ids: Vec<ToolId> = engine.catalog().iter().map(|t| t.id.clone()).collect();
        let id = &ids[idx % ids.len()];

        let before = engine.state().clone();
        if engine.activate_tool(id, 0).is_err() {
            prop_assert_eq!(engine.state(), &before);
        }
    }
}
