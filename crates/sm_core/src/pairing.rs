//! Pairing assignment for level setup.
//!
//! Partitions an entity pool into randomly shuffled pairs sharing a pair tag.
//! The id-to-tag table is the typed association the matching layer owns,
//! replacing any per-object metadata slot on the renderer side.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::models::{EntityId, PairTag, PickableEntity};

/// One matched couple sharing a pair tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPair {
    pub first: EntityId,
    pub second: EntityId,
    pub tag: PairTag,
}

/// Uniformly random partition of an entity pool into tagged pairs.
///
/// Invariants: every entity of the pool appears in exactly one pair, pairs are
/// disjoint, and each tag in `0..pool_len/2` labels exactly two entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PairAssignment {
    pairs: Vec<EntityPair>,
    tags: HashMap<EntityId, PairTag>,
}

impl PairAssignment {
    /// Build a random assignment over `ids`.
    ///
    /// The pool is shuffled with a Fisher-Yates pass (uniform over all
    /// permutations), then consecutive entries are paired and tagged. `ids`
    /// must be nonempty, of even length and free of duplicates. Pass a seeded
    /// RNG (`ChaCha8Rng::seed_from_u64`) for a reproducible layout.
    pub fn generate<R: Rng + ?Sized>(ids: &[EntityId], rng: &mut R) -> Result<Self> {
        if ids.is_empty() || ids.len() % 2 != 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "Pairing needs a nonempty even pool, got {} entities",
                ids.len()
            )));
        }

        let mut pool = ids.to_vec();
        pool.shuffle(rng);

        let mut pairs = Vec::with_capacity(pool.len() / 2);
        let mut tags = HashMap::with_capacity(pool.len());
        for (tag_value, chunk) in pool.chunks_exact(2).enumerate() {
            let tag = PairTag(tag_value as u32);
            let (first, second) = (chunk[0], chunk[1]);
            if tags.insert(first, tag).is_some() || tags.insert(second, tag).is_some() {
                return Err(GameError::InvalidConfiguration(
                    "Entity pool contains duplicate ids".to_string(),
                ));
            }
            pairs.push(EntityPair { first, second, tag });
        }

        Ok(Self { pairs, tags })
    }

    pub fn pairs(&self) -> &[EntityPair] {
        &self.pairs
    }

    pub fn pair_count(&self) -> u32 {
        self.pairs.len() as u32
    }

    /// Tag assigned to `id`, if the entity belongs to this assignment.
    pub fn tag_of(&self, id: EntityId) -> Option<PairTag> {
        self.tags.get(&id).copied()
    }

    /// The other half of `id`'s pair.
    pub fn partner_of(&self, id: EntityId) -> Option<EntityId> {
        self.pairs.iter().find_map(|pair| {
            if pair.first == id {
                Some(pair.second)
            } else if pair.second == id {
                Some(pair.first)
            } else {
                None
            }
        })
    }

    /// Entity record the presentation layer should attach to a spawned cube.
    pub fn pickable(&self, id: EntityId) -> Option<PickableEntity> {
        self.tag_of(id).map(|tag| PickableEntity::new(id, tag))
    }

    /// Full id-to-tag lookup, consumed by the matching engine at level load.
    pub fn tag_table(&self) -> &HashMap<EntityId, PairTag> {
        &self.tags
    }
}
