//! Game events and the channels they travel on.
//!
//! The presentation layer publishes `Selected`, `GamePaused` and `GameResumed`;
//! the matching engine publishes `MatchFound` and `LevelCompleted` back for
//! downstream reactors (visuals, audio, UI).

pub mod bus;

pub use bus::{EventBus, SubscriptionHandle};

use serde::{Deserialize, Serialize};

use crate::models::{EntityId, PickableEntity};

/// Notification that a pickable entity was chosen by the player.
///
/// Ephemeral: consumed synchronously during dispatch, never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEvent {
    pub entity: PickableEntity,
}

impl SelectionEvent {
    pub fn new(entity: PickableEntity) -> Self {
        Self { entity }
    }
}

/// Events carried on the game event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player picked an entity.
    Selected(SelectionEvent),
    /// Gameplay paused; the matching engine stops consuming selections.
    GamePaused,
    /// Gameplay resumed; the matching engine consumes selections again.
    GameResumed,
    /// Two distinct entities with equal pair tag were picked in sequence.
    MatchFound { first: EntityId, second: EntityId },
    /// The matched pair count reached the level win condition.
    LevelCompleted,
}

/// Named publish/subscribe channels, one per event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventChannel {
    Selected,
    GamePaused,
    GameResumed,
    MatchFound,
    LevelCompleted,
}

impl GameEvent {
    /// Channel this event is dispatched on.
    pub fn channel(&self) -> EventChannel {
        match self {
            GameEvent::Selected(_) => EventChannel::Selected,
            GameEvent::GamePaused => EventChannel::GamePaused,
            GameEvent::GameResumed => EventChannel::GameResumed,
            GameEvent::MatchFound { .. } => EventChannel::MatchFound,
            GameEvent::LevelCompleted => EventChannel::LevelCompleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PairTag, PickableEntity};

    #[test]
    fn test_event_channel_mapping() {
        let entity = PickableEntity::new(EntityId(3), PairTag(1));

        assert_eq!(
            GameEvent::Selected(SelectionEvent::new(entity)).channel(),
            EventChannel::Selected
        );
        assert_eq!(GameEvent::GamePaused.channel(), EventChannel::GamePaused);
        assert_eq!(GameEvent::GameResumed.channel(), EventChannel::GameResumed);
        assert_eq!(
            GameEvent::MatchFound { first: EntityId(1), second: EntityId(2) }.channel(),
            EventChannel::MatchFound
        );
        assert_eq!(GameEvent::LevelCompleted.channel(), EventChannel::LevelCompleted);
    }
}
