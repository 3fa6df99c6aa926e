//! Level setup: spatial layout plus pair assignment.
//!
//! A `LevelPlan` is built once when a level loads. Entity ids are indices
//! into the direction list, so the presentation layer spawns cube `i` at
//! `directions()[i]` and feeds the same ids back through selection events,
//! while the matching engine takes the assignment for its win condition.

use nalgebra::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::generate_directions;
use crate::models::EntityId;
use crate::pairing::PairAssignment;

/// Everything one level needs: where each cube goes and which cubes match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelPlan {
    directions: Vec<Vector3<f32>>,
    assignment: PairAssignment,
}

impl LevelPlan {
    /// Generate a level with `num_cubes` cubes placed on the unit sphere.
    ///
    /// `num_cubes` must be even and nonzero. The layout is deterministic; the
    /// pairing is drawn from `rng`.
    pub fn generate<R: Rng + ?Sized>(num_cubes: usize, rng: &mut R) -> Result<Self> {
        let ids: Vec<EntityId> = (0..num_cubes).map(|i| EntityId(i as u32)).collect();
        let assignment = PairAssignment::generate(&ids, rng)?;
        Ok(Self { directions: generate_directions(num_cubes), assignment })
    }

    pub fn directions(&self) -> &[Vector3<f32>] {
        &self.directions
    }

    pub fn assignment(&self) -> &PairAssignment {
        &self.assignment
    }

    pub fn total_pairs(&self) -> u32 {
        self.assignment.pair_count()
    }

    /// Placement direction for a spawned entity.
    pub fn direction_of(&self, id: EntityId) -> Option<Vector3<f32>> {
        self.directions.get(id.0 as usize).copied()
    }
}
