//! Core data model for pickable entities.
//!
//! The matching engine only ever reads entity identity and pair tag; geometry
//! and visibility stay owned by the presentation layer.

use serde::{Deserialize, Serialize};

/// Opaque handle for a clickable object owned by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Value shared by exactly two entities that constitute a matching pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairTag(pub u32);

/// A clickable game object as the matching engine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickableEntity {
    pub id: EntityId,
    pub pair_tag: PairTag,
}

impl PickableEntity {
    pub fn new(id: EntityId, pair_tag: PairTag) -> Self {
        Self { id, pair_tag }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_identity_is_id_and_tag() {
        let a = PickableEntity::new(EntityId(1), PairTag(7));
        let b = PickableEntity::new(EntityId(1), PairTag(7));
        let c = PickableEntity::new(EntityId(2), PairTag(7));

        assert_eq!(a, b);
        assert_ne!(a, c, "Different ids should not compare equal");
    }
}
