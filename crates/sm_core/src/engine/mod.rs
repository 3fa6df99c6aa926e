//! Matching engine state machine.
//!
//! Consumes selection events, decides match/mismatch, tracks progress toward
//! the level win condition and reports the outcome events and visual intents
//! each step produced. The engine never mutates entity geometry; it signals
//! intent and lets the presentation layer perform the visual mutation.

mod wiring;

pub use wiring::connect_engine;

use std::collections::HashMap;

use crate::error::{GameError, Result};
use crate::events::{GameEvent, SelectionEvent};
use crate::models::{EntityId, PairTag, PickableEntity};
use crate::pairing::PairAssignment;

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Matching gate closed; selection events are dropped.
    Disabled,
    /// Gate open, no selection pending.
    Idle,
    /// Gate open, one selection awaiting its partner pick.
    AwaitingSecondPick,
}

/// Visual side effect for the presentation layer to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualIntent {
    Highlight(EntityId),
    ClearHighlight(EntityId),
    Hide(EntityId),
}

/// Everything one engine step produced: visual intents for the presentation
/// layer and outcome events to publish back onto the bus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutput {
    pub intents: Vec<VisualIntent>,
    pub events: Vec<GameEvent>,
}

/// Event-driven state machine interpreting raw pick events into match and
/// mismatch outcomes.
///
/// Created once per play session and reset between levels via
/// [`MatchEngine::initialize_level`] or
/// [`MatchEngine::update_level_win_condition`]. The engine starts `Disabled`:
/// gameplay must follow an overt start action, so the first `GameResumed`
/// event opens the matching gate.
pub struct MatchEngine {
    pending_selection: Option<PickableEntity>,
    matching_enabled: bool,
    matched_pair_count: u32,
    total_pair_count: u32,
    level_completed_announced: bool,
    pair_tags: HashMap<EntityId, PairTag>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchEngine {
    pub fn new() -> Self {
        Self {
            pending_selection: None,
            matching_enabled: false,
            matched_pair_count: 0,
            total_pair_count: 0,
            level_completed_announced: false,
            pair_tags: HashMap::new(),
        }
    }

    // ========================
    // Level Setup
    // ========================

    /// Install a level's pair assignment: the id-to-tag table used to validate
    /// inbound selections plus the win condition derived from it.
    ///
    /// Resets match progress and drops any pending selection from a previous
    /// level. Does not alter the matching gate.
    pub fn initialize_level(&mut self, assignment: &PairAssignment) -> Result<()> {
        if assignment.pair_count() == 0 {
            return Err(GameError::InvalidConfiguration(
                "Level must contain at least one pair".to_string(),
            ));
        }
        self.pair_tags = assignment.tag_table().clone();
        self.total_pair_count = assignment.pair_count();
        self.matched_pair_count = 0;
        self.level_completed_announced = false;
        self.pending_selection = None;
        Ok(())
    }

    /// Reset match progress and set a new win condition.
    ///
    /// Callable only between levels; leaves `pending_selection` and the
    /// matching gate untouched. Calling it twice in a row is harmless.
    pub fn update_level_win_condition(&mut self, new_total: u32) -> Result<()> {
        if new_total == 0 {
            return Err(GameError::InvalidConfiguration(
                "Total pair count must be positive".to_string(),
            ));
        }
        self.matched_pair_count = 0;
        self.total_pair_count = new_total;
        self.level_completed_announced = false;
        Ok(())
    }

    // ========================
    // State Accessors
    // ========================

    pub fn state(&self) -> EngineState {
        if !self.matching_enabled {
            EngineState::Disabled
        } else if self.pending_selection.is_some() {
            EngineState::AwaitingSecondPick
        } else {
            EngineState::Idle
        }
    }

    pub fn matched_pair_count(&self) -> u32 {
        self.matched_pair_count
    }

    pub fn total_pair_count(&self) -> u32 {
        self.total_pair_count
    }

    pub fn pending_selection(&self) -> Option<PickableEntity> {
        self.pending_selection
    }

    // ========================
    // Event Handling
    // ========================

    /// Run one synchronous step of the state machine.
    ///
    /// `GamePaused` closes the matching gate without clearing the pending
    /// selection; pause only blocks new input, it does not cancel an in-flight
    /// pair attempt. `GameResumed` reopens the gate with the prior state
    /// preserved. Redundant pause/resume transitions are no-ops.
    pub fn handle_event(&mut self, event: &GameEvent) -> Result<StepOutput> {
        match event {
            GameEvent::GamePaused => {
                self.matching_enabled = false;
                Ok(StepOutput::default())
            }
            GameEvent::GameResumed => {
                self.matching_enabled = true;
                Ok(StepOutput::default())
            }
            GameEvent::Selected(selection) => self.on_selected(selection),
            // Outcome events are produced by this engine, not consumed by it.
            GameEvent::MatchFound { .. } | GameEvent::LevelCompleted => Ok(StepOutput::default()),
        }
    }

    fn on_selected(&mut self, selection: &SelectionEvent) -> Result<StepOutput> {
        let mut out = StepOutput::default();
        if !self.matching_enabled {
            // Gate closed: drop the event, no state change, nothing emitted.
            return Ok(out);
        }

        let picked = selection.entity;
        self.check_payload(picked)?;

        let pending = match self.pending_selection {
            None => {
                out.intents.push(VisualIntent::Highlight(picked.id));
                self.pending_selection = Some(picked);
                return Ok(out);
            }
            Some(pending) => pending,
        };

        if picked.id == pending.id {
            // Re-picking the highlighted entity is not a second pick; two
            // distinct entities with equal pair tag constitute a match.
            return Ok(out);
        }

        if picked.pair_tag == pending.pair_tag {
            log::debug!("Match found: {:?} and {:?}", pending.id, picked.id);
            out.intents.push(VisualIntent::ClearHighlight(pending.id));
            out.intents.push(VisualIntent::Hide(pending.id));
            out.intents.push(VisualIntent::Hide(picked.id));
            self.matched_pair_count += 1;
            out.events.push(GameEvent::MatchFound { first: pending.id, second: picked.id });
            if self.matched_pair_count >= self.total_pair_count && !self.level_completed_announced {
                self.level_completed_announced = true;
                out.events.push(GameEvent::LevelCompleted);
            }
        } else {
            log::debug!("Match NOT found: {:?} vs {:?}", pending.id, picked.id);
            // Only the first pick was highlighted; the failed second pick is
            // not retained as a new pending selection.
            out.intents.push(VisualIntent::ClearHighlight(pending.id));
        }

        self.pending_selection = None;
        Ok(out)
    }

    /// A selection naming an entity outside the installed assignment, or
    /// carrying a tag that contradicts it, is a programming error in the
    /// presentation layer and fails fast. Engines driven without an installed
    /// table (win condition set directly) skip the check.
    fn check_payload(&self, entity: PickableEntity) -> Result<()> {
        if self.pair_tags.is_empty() {
            return Ok(());
        }
        match self.pair_tags.get(&entity.id) {
            Some(tag) if *tag == entity.pair_tag => Ok(()),
            Some(tag) => Err(GameError::InvalidEventPayload(format!(
                "Entity {:?} carries tag {:?} but the level assigned {:?}",
                entity.id, entity.pair_tag, tag
            ))),
            None => Err(GameError::InvalidEventPayload(format!(
                "Entity {:?} is not part of the current level",
                entity.id
            ))),
        }
    }
}
