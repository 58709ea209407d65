//! World construction helpers
//!
//! Factories that place the initial bodies in the simulation and return
//! ready-made, registry-bound actors.

use crate::sim::actor::{Actor, ActorRegistry, BindError};
use crate::sim::archetype::ArchetypeData;
use crate::sim::physics::{BodyDesc, Material, PhysicsWorld, ShapeDesc};
use crate::tuning::Tuning;
use glam::Vec2;

/// Create the physics world with the configured gravity and solver setup
pub fn create_world(tuning: &Tuning) -> PhysicsWorld {
    let mut physics = PhysicsWorld::new(tuning.gravity);
    physics.set_dt(tuning.time_step);
    physics.set_solver_iterations(tuning.velocity_iterations, tuning.position_iterations);
    physics
}

/// Create the static ground slab and bind it as an actor
pub fn create_ground(
    physics: &mut PhysicsWorld,
    registry: &mut ActorRegistry,
    tuning: &Tuning,
) -> Result<Actor, BindError> {
    let id = registry.allocate_id();
    let data = ArchetypeData::Ground;
    registry.bind(id, data.archetype())?;

    let body = physics.create_body(
        id,
        &BodyDesc::fixed(ShapeDesc::Cuboid {
            half_width: tuning.ground.width / 2.0,
            half_height: tuning.ground.height / 2.0,
        })
        .with_position(Vec2::new(tuning.viewport_width / 2.0, tuning.ground.y)),
        Material::default(),
    );
    Ok(Actor::new(id, body, data))
}

/// Create the dynamic runner body resting on the ground and bind it
pub fn create_runner(
    physics: &mut PhysicsWorld,
    registry: &mut ActorRegistry,
    tuning: &Tuning,
) -> Result<Actor, BindError> {
    let id = registry.allocate_id();
    let data = ArchetypeData::Runner {
        jump_impulse: tuning.runner.jump_impulse,
        dodge_angle: tuning.runner.dodge_angle,
    };
    registry.bind(id, data.archetype())?;

    let body = physics.create_body(
        id,
        &BodyDesc::dynamic(ShapeDesc::Cuboid {
            half_width: tuning.runner.width / 2.0,
            half_height: tuning.runner.height / 2.0,
        })
        .with_position(tuning.runner_spawn())
        .with_gravity_scale(tuning.runner.gravity_scale)
        .with_fixed_rotation(true),
        Material {
            density: tuning.runner.density,
            ..Material::default()
        },
    );
    Ok(Actor::new(id, body, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::archetype::Archetype;

    #[test]
    fn test_factories_bind_distinct_actors() {
        let tuning = Tuning::default();
        let mut physics = create_world(&tuning);
        let mut registry = ActorRegistry::new();

        let ground = create_ground(&mut physics, &mut registry, &tuning).expect("ground");
        let runner = create_runner(&mut physics, &mut registry, &tuning).expect("runner");

        assert_ne!(ground.id(), runner.id());
        assert_eq!(physics.body_count(), 2);
        assert_eq!(registry.archetype_of(ground.id()), Some(Archetype::Ground));
        assert_eq!(registry.archetype_of(runner.id()), Some(Archetype::Runner));
    }

    #[test]
    fn test_runner_spawns_on_ground_surface() {
        let tuning = Tuning::default();
        let mut physics = create_world(&tuning);
        let mut registry = ActorRegistry::new();
        let runner = create_runner(&mut physics, &mut registry, &tuning).expect("runner");

        let (pos, _) = physics.body_position(runner.body());
        assert!((pos.y - tuning.runner_spawn().y).abs() < 1e-4);
        assert!((pos.x - tuning.runner.x).abs() < 1e-4);
    }
}
