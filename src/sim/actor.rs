//! Actors: logical game objects bound to physics bodies
//!
//! An `Actor` owns exactly one rigid body and its `ArchetypeData`, and only
//! exposes gameplay-level operations. Physics primitives (impulses, rotation
//! changes) stay inside the archetype-specific wrappers.

use std::collections::HashMap;

use thiserror::Error;

use super::archetype::{Archetype, ArchetypeData};
use super::physics::{BodyRef, PhysicsWorld};

/// Stable identity of an actor; stored in the body's `user_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

impl ActorId {
    /// Reserved sentinel; `user_data` of a body nothing ever bound
    pub const INVALID: ActorId = ActorId(0);
}

/// Actor/body binding failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("actor {0:?} is already bound to a body")]
    AlreadyBound(ActorId),
    #[error("the invalid actor id cannot be bound")]
    InvalidId,
}

/// Tracks which actor ids are bound and what archetype each one is.
///
/// Enforces the one-to-one invariant: binding the same id twice fails, so no
/// body can ever answer to two actors.
#[derive(Debug)]
pub struct ActorRegistry {
    bound: HashMap<ActorId, Archetype>,
    next_id: u32,
}

impl Default for ActorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self {
            bound: HashMap::new(),
            next_id: 1,
        }
    }

    /// Allocate a fresh, never-reused actor id
    pub fn allocate_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Record a binding; fails if the id is already bound
    pub fn bind(&mut self, id: ActorId, archetype: Archetype) -> Result<(), BindError> {
        if id == ActorId::INVALID {
            return Err(BindError::InvalidId);
        }
        if self.bound.contains_key(&id) {
            return Err(BindError::AlreadyBound(id));
        }
        self.bound.insert(id, archetype);
        Ok(())
    }

    /// Release a binding (actor destroyed)
    pub fn unbind(&mut self, id: ActorId) {
        self.bound.remove(&id);
    }

    /// Archetype of a bound actor, `None` if unknown
    pub fn archetype_of(&self, id: ActorId) -> Option<Archetype> {
        self.bound.get(&id).copied()
    }
}

/// A logical game object owning one rigid body and its metadata
#[derive(Debug)]
pub struct Actor {
    id: ActorId,
    body: BodyRef,
    data: ArchetypeData,
}

impl Actor {
    pub fn new(id: ActorId, body: BodyRef, data: ArchetypeData) -> Self {
        Self { id, body, data }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn body(&self) -> &BodyRef {
        &self.body
    }

    /// The actor's metadata; non-null for the actor's whole lifetime
    pub fn user_data(&self) -> &ArchetypeData {
        &self.data
    }

    pub fn archetype(&self) -> Archetype {
        self.data.archetype()
    }

    /// Destroy the actor, removing its body from the world
    pub fn detach(self, physics: &mut PhysicsWorld, registry: &mut ActorRegistry) {
        physics.remove_body(&self.body);
        registry.unbind(self.id);
    }
}

/// The controllable actor: jump/dodge state layered over an [`Actor`].
///
/// `jumping` and `dodging` are two independent flags, not one exclusive
/// state; dodging while airborne is allowed. Invalid command sequencing
/// (double jump, redundant toggles, stray landings) is absorbed as no-ops,
/// which is the intended gameplay feel rather than an error condition.
#[derive(Debug)]
pub struct Runner {
    actor: Actor,
    jumping: bool,
    dodging: bool,
}

impl Runner {
    /// Wrap an actor carrying a Runner payload.
    ///
    /// Panics if the actor is not a Runner: a tag/payload mismatch means the
    /// world setup is corrupted, so fail fast instead of limping on.
    pub fn new(actor: Actor) -> Self {
        assert_eq!(
            actor.archetype(),
            Archetype::Runner,
            "runner wrapper requires a Runner actor"
        );
        Self {
            actor,
            jumping: false,
            dodging: false,
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn id(&self) -> ActorId {
        self.actor.id()
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn is_dodging(&self) -> bool {
        self.dodging
    }

    /// Jump: applies the configured impulse at the center of mass exactly
    /// once. No-op while already airborne, so impulses cannot stack.
    pub fn jump(&mut self, physics: &mut PhysicsWorld) {
        if self.jumping {
            return;
        }
        let ArchetypeData::Runner { jump_impulse, .. } = *self.actor.user_data() else {
            unreachable!("checked at construction");
        };
        physics.apply_impulse(self.actor.body(), jump_impulse);
        self.jumping = true;
        log::debug!("runner {:?} jumped", self.actor.id());
    }

    /// Landed: clears the jumping flag. Idempotent; only the contact
    /// dispatcher calls this, never player input.
    pub fn landed(&mut self) {
        self.jumping = false;
    }

    /// Dodge: rotates the body to the slide angle. No-op while dodging.
    pub fn dodge(&mut self, physics: &mut PhysicsWorld) {
        if self.dodging {
            return;
        }
        let ArchetypeData::Runner { dodge_angle, .. } = *self.actor.user_data() else {
            unreachable!("checked at construction");
        };
        physics.set_rotation(self.actor.body(), dodge_angle);
        self.dodging = true;
        log::debug!("runner {:?} dodging", self.actor.id());
    }

    /// Stop dodging: restores the upright rotation. No-op while not dodging.
    pub fn stop_dodge(&mut self, physics: &mut PhysicsWorld) {
        if !self.dodging {
            return;
        }
        physics.set_rotation(self.actor.body(), 0.0);
        self.dodging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::physics::{BodyDesc, Material, ShapeDesc};
    use glam::Vec2;

    fn runner_in_vacuum() -> (PhysicsWorld, Runner) {
        // No gravity so velocity deltas come from jump impulses alone.
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let body = physics.create_body(
            ActorId(1),
            &BodyDesc::dynamic(ShapeDesc::Cuboid {
                half_width: 0.5,
                half_height: 1.0,
            })
            .with_fixed_rotation(false),
            Material {
                density: RUNNER_DENSITY,
                ..Material::default()
            },
        );
        let actor = Actor::new(ActorId(1), body, ArchetypeData::runner());
        (physics, Runner::new(actor))
    }

    // 1x2 box at density 0.5 -> mass 1.0, so linvel.y equals applied impulse.
    fn vertical_speed(physics: &PhysicsWorld, runner: &Runner) -> f32 {
        physics.velocity(runner.actor().body()).y
    }

    #[test]
    fn test_jump_applies_impulse_once() {
        let (mut physics, mut runner) = runner_in_vacuum();
        runner.jump(&mut physics);
        runner.jump(&mut physics);
        assert!(runner.is_jumping());
        let v = vertical_speed(&physics, &runner);
        assert!(
            (v - RUNNER_JUMP_IMPULSE.y).abs() < 1e-3,
            "double jump must not stack impulses, vel.y = {v}"
        );
    }

    #[test]
    fn test_landed_is_idempotent() {
        let (mut physics, mut runner) = runner_in_vacuum();
        runner.landed();
        assert!(!runner.is_jumping());
        runner.jump(&mut physics);
        runner.landed();
        runner.landed();
        runner.landed();
        assert!(!runner.is_jumping());
    }

    #[test]
    fn test_jump_rearms_after_landing() {
        let (mut physics, mut runner) = runner_in_vacuum();
        runner.jump(&mut physics);
        runner.landed();
        runner.jump(&mut physics);
        let v = vertical_speed(&physics, &runner);
        assert!(
            (v - 2.0 * RUNNER_JUMP_IMPULSE.y).abs() < 1e-3,
            "jump; landed; jump applies the impulse exactly twice, vel.y = {v}"
        );
    }

    #[test]
    fn test_dodge_toggle() {
        let (mut physics, mut runner) = runner_in_vacuum();
        assert!(!runner.is_dodging());
        runner.dodge(&mut physics);
        assert!(runner.is_dodging());
        // Redundant dodge is absorbed
        runner.dodge(&mut physics);
        assert!(runner.is_dodging());
        let (_, angle) = physics.body_position(runner.actor().body());
        assert!((angle - RUNNER_DODGE_ANGLE).abs() < 1e-4);

        runner.stop_dodge(&mut physics);
        assert!(!runner.is_dodging());
        let (_, angle) = physics.body_position(runner.actor().body());
        assert!(angle.abs() < 1e-4);
        // Redundant stop is absorbed
        runner.stop_dodge(&mut physics);
        assert!(!runner.is_dodging());
    }

    #[test]
    fn test_dodge_independent_of_jump() {
        let (mut physics, mut runner) = runner_in_vacuum();
        runner.jump(&mut physics);
        runner.dodge(&mut physics);
        assert!(runner.is_jumping());
        assert!(runner.is_dodging());
        runner.landed();
        assert!(runner.is_dodging(), "landing must not clear the dodge flag");
    }

    #[test]
    fn test_registry_rejects_double_bind() {
        let mut registry = ActorRegistry::new();
        let id = registry.allocate_id();
        assert_eq!(registry.bind(id, Archetype::Runner), Ok(()));
        assert_eq!(
            registry.bind(id, Archetype::Ground),
            Err(BindError::AlreadyBound(id))
        );
        assert_eq!(registry.archetype_of(id), Some(Archetype::Runner));
    }

    #[test]
    fn test_registry_rejects_invalid_id() {
        let mut registry = ActorRegistry::new();
        assert_eq!(
            registry.bind(ActorId::INVALID, Archetype::Ground),
            Err(BindError::InvalidId)
        );
    }

    #[test]
    fn test_detach_removes_body() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut registry = ActorRegistry::new();
        let id = registry.allocate_id();
        let body = physics.create_body(
            id,
            &BodyDesc::fixed(ShapeDesc::Cuboid {
                half_width: 1.0,
                half_height: 1.0,
            }),
            Material::default(),
        );
        registry.bind(id, Archetype::Ground).unwrap();
        let actor = Actor::new(id, body, ArchetypeData::Ground);

        assert_eq!(physics.body_count(), 1);
        actor.detach(&mut physics, &mut registry);
        assert_eq!(physics.body_count(), 0);
        assert_eq!(registry.archetype_of(id), None);
    }
}
