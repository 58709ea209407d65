//! Typed per-body metadata
//!
//! Every gameplay-relevant body carries exactly one `ArchetypeData` record.
//! The closed enum makes reading the wrong payload shape impossible: callers
//! match on the variant instead of casting.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Discriminant tag identifying what kind of game object a body is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Runner,
    Ground,
}

/// Archetype tag plus the archetype's tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArchetypeData {
    Runner {
        /// Impulse applied at the center of mass on jump
        jump_impulse: Vec2,
        /// Body rotation while dodging
        dodge_angle: f32,
    },
    Ground,
}

impl ArchetypeData {
    /// Runner payload with default tunables
    pub fn runner() -> Self {
        ArchetypeData::Runner {
            jump_impulse: RUNNER_JUMP_IMPULSE,
            dodge_angle: RUNNER_DODGE_ANGLE,
        }
    }

    /// Resolve the archetype tag in O(1)
    pub fn archetype(&self) -> Archetype {
        match self {
            ArchetypeData::Runner { .. } => Archetype::Runner,
            ArchetypeData::Ground => Archetype::Ground,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_matches_payload() {
        assert_eq!(ArchetypeData::runner().archetype(), Archetype::Runner);
        assert_eq!(ArchetypeData::Ground.archetype(), Archetype::Ground);
    }

    #[test]
    fn test_runner_defaults() {
        let ArchetypeData::Runner {
            jump_impulse,
            dodge_angle,
        } = ArchetypeData::runner()
        else {
            panic!("expected Runner payload");
        };
        assert_eq!(jump_impulse, RUNNER_JUMP_IMPULSE);
        assert!((dodge_angle - RUNNER_DODGE_ANGLE).abs() < f32::EPSILON);
    }
}
