//! # sm_core - Sphere Match Minigame Core
//!
//! Rendering-agnostic core of a 3D matching ("memory") minigame: cubes are
//! arranged on the surface of a sphere, the player picks pairs by clicking,
//! and matched pairs are removed until the level win condition is reached.
//!
//! ## Features
//! - Synchronous, depth-first event bus with per-subscriber failure isolation
//! - Matching state machine with pause/resume gating and win-condition tracking
//! - Uniformly random pairing assignment over an entity pool
//! - Deterministic golden-angle sphere layout for cube placement
//!
//! The presentation layer (renderer, input, audio) stays external: it publishes
//! selection and pause/resume events and reacts to the engine's outcome events
//! and visual intents.

pub mod engine;
pub mod error;
pub mod events;
pub mod layout;
pub mod level;
pub mod models;
pub mod pairing;

pub use engine::{connect_engine, EngineState, MatchEngine, StepOutput, VisualIntent};
pub use error::{GameError, Result};
pub use events::{EventBus, EventChannel, GameEvent, SelectionEvent, SubscriptionHandle};
pub use layout::generate_directions;
pub use level::LevelPlan;
pub use models::{EntityId, PairTag, PickableEntity};
pub use pairing::{EntityPair, PairAssignment};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn pick(bus: &EventBus, plan: &LevelPlan, id: EntityId) {
        let entity = plan.assignment().pickable(id).expect("entity belongs to the level");
        bus.publish(&GameEvent::Selected(SelectionEvent::new(entity)));
    }

    #[test]
    fn test_full_level_session() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let plan = LevelPlan::generate(12, &mut rng).unwrap();

        let bus = Rc::new(EventBus::new());
        let engine = Rc::new(RefCell::new(MatchEngine::new()));
        engine.borrow_mut().initialize_level(plan.assignment()).unwrap();

        let hidden = Rc::new(RefCell::new(HashSet::new()));
        let hidden_sink = Rc::clone(&hidden);
        connect_engine(&bus, &engine, move |intent| {
            if let VisualIntent::Hide(id) = intent {
                hidden_sink.borrow_mut().insert(id);
            }
        });

        let completions = Rc::new(RefCell::new(0u32));
        let completions_sink = Rc::clone(&completions);
        bus.subscribe(EventChannel::LevelCompleted, move |_| {
            *completions_sink.borrow_mut() += 1;
        });

        bus.publish(&GameEvent::GameResumed);

        // Clear the board pair by pair, always picking an entity and then its
        // partner, the way a player with perfect memory would.
        for pair in plan.assignment().pairs().to_vec() {
            pick(&bus, &plan, pair.first);
            pick(&bus, &plan, pair.second);
        }

        assert_eq!(engine.borrow().matched_pair_count(), plan.total_pairs());
        assert_eq!(*completions.borrow(), 1, "LevelCompleted fires exactly once");
        assert_eq!(hidden.borrow().len(), 12, "Every matched cube gets a hide intent");
    }

    #[test]
    fn test_session_with_mismatches_and_pause() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let plan = LevelPlan::generate(4, &mut rng).unwrap();

        let bus = Rc::new(EventBus::new());
        let engine = Rc::new(RefCell::new(MatchEngine::new()));
        engine.borrow_mut().initialize_level(plan.assignment()).unwrap();
        connect_engine(&bus, &engine, |_| {});

        let pairs = plan.assignment().pairs().to_vec();
        let (first_pair, second_pair) = (pairs[0], pairs[1]);

        bus.publish(&GameEvent::GameResumed);

        // Mismatch: one entity from each pair.
        pick(&bus, &plan, first_pair.first);
        pick(&bus, &plan, second_pair.first);
        assert_eq!(engine.borrow().matched_pair_count(), 0);
        assert_eq!(engine.borrow().state(), EngineState::Idle);

        // Pause mid-attempt, then resume and finish the pair.
        pick(&bus, &plan, first_pair.first);
        bus.publish(&GameEvent::GamePaused);
        pick(&bus, &plan, first_pair.second);
        assert_eq!(engine.borrow().matched_pair_count(), 0, "Pick during pause is dropped");

        bus.publish(&GameEvent::GameResumed);
        pick(&bus, &plan, first_pair.second);
        assert_eq!(engine.borrow().matched_pair_count(), 1);

        pick(&bus, &plan, second_pair.first);
        pick(&bus, &plan, second_pair.second);
        assert_eq!(engine.borrow().matched_pair_count(), 2);
        assert_eq!(engine.borrow().state(), EngineState::Idle);
    }
}
