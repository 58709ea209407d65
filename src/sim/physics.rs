//! Rigid-body world wrapper
//!
//! Owns all Rapier2D pipeline state and exposes the handful of operations the
//! gameplay layer needs. The owning `ActorId` of every body is stored in its
//! `user_data`, so collision events can be resolved back to typed actors
//! without any downcasting.
//!
//! Collision events are collected by the engine *during* `step` and drained
//! afterwards; nothing observes them mid-step, so dispatcher logic can never
//! mutate the body list while the pipeline is running.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use glam::Vec2;
use rapier2d::geometry::ContactPair as ContactPair2D;
use rapier2d::prelude::*;

use super::actor::ActorId;

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// The kind of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Collision shape for a body's fixture
#[derive(Debug, Clone, Copy)]
pub enum ShapeDesc {
    /// Axis-aligned box given by half extents
    Cuboid { half_width: f32, half_height: f32 },
}

impl ShapeDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ShapeDesc::Cuboid {
                half_width,
                half_height,
            } => ColliderBuilder::cuboid(half_width, half_height),
        }
    }
}

/// Physical material properties for a fixture
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 1.0,
            restitution: 0.0,
            friction: 0.5,
        }
    }
}

/// Builder for describing a rigid body before creation
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub gravity_scale: f32,
    pub fixed_rotation: bool,
    pub shape: ShapeDesc,
}

impl BodyDesc {
    /// Dynamic body with the given fixture shape
    pub fn dynamic(shape: ShapeDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            gravity_scale: 1.0,
            fixed_rotation: false,
            shape,
        }
    }

    /// Fixed (static) body with the given fixture shape
    pub fn fixed(shape: ShapeDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            position: Vec2::ZERO,
            gravity_scale: 0.0,
            fixed_rotation: true,
            shape,
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }
}

/// Handle pair referencing a body and its fixture inside the world
#[derive(Debug, Clone, Copy)]
pub struct BodyRef {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// A begin/end contact between two actor-owned bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactPair {
    pub a: ActorId,
    pub b: ActorId,
    /// `true` at contact begin, `false` at contact end
    pub started: bool,
}

/// Collects engine collision events raised during a pipeline step
struct StepEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl StepEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain(&self) -> Vec<CollisionEvent> {
        // Nothing panics while holding this lock; recover rather than poison
        let mut collisions = self.collisions.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *collisions)
    }
}

impl EventHandler for StepEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair2D>,
    ) {
        self.collisions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair2D,
        _total_force_magnitude: f32,
    ) {
        // Force events carry no gameplay meaning here.
    }
}

/// Wraps all Rapier2D boilerplate into a single owning struct
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: StepEventCollector,
}

impl PhysicsWorld {
    /// Create an empty world with the given gravity (y-up)
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: StepEventCollector::new(),
        }
    }

    /// Set the fixed integration timestep
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Fix the solver iteration counts; these are configuration constants,
    /// never derived at runtime
    pub fn set_solver_iterations(&mut self, velocity: usize, position: usize) {
        self.integration_parameters.num_solver_iterations =
            NonZeroUsize::new(velocity.max(1)).unwrap_or(NonZeroUsize::MIN);
        self.integration_parameters.num_internal_pgs_iterations = position.max(1);
    }

    /// Create a rigid body + fixture and return handles.
    /// The owning `ActorId` is stored in the body's `user_data`.
    pub fn create_body(&mut self, owner: ActorId, desc: &BodyDesc, material: Material) -> BodyRef {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .gravity_scale(desc.gravity_scale)
            .locked_axes(if desc.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .user_data(owner.0 as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .shape
            .build_collider()
            .density(material.density)
            .restitution(material.restitution)
            .friction(material.friction)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        BodyRef {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and its fixtures from the simulation.
    /// Must not be called from contact-dispatch logic; structural mutation is
    /// only legal between steps.
    pub fn remove_body(&mut self, body: &BodyRef) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Advance the pipeline by one fixed step, appending begin/end contacts
    /// between actor-owned bodies to `contacts`.
    ///
    /// Panics if a collision event involves a body without an owning actor:
    /// every gameplay body is created through [`create_body`], so a missing
    /// owner means the world was corrupted elsewhere.
    ///
    /// [`create_body`]: PhysicsWorld::create_body
    pub fn step_into(&mut self, contacts: &mut Vec<ContactPair>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        for event in self.event_collector.drain() {
            let (h1, h2, started) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };
            let a = self.collider_owner(h1);
            let b = self.collider_owner(h2);
            contacts.push(ContactPair { a, b, started });
        }
    }

    /// Apply an instantaneous impulse at the body's center of mass
    pub fn apply_impulse(&mut self, body: &BodyRef, impulse: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.apply_impulse(vec2_to_na(impulse), true);
        }
    }

    /// Rotate a body in place, waking it
    pub fn set_rotation(&mut self, body: &BodyRef, angle: f32) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_rotation(Rotation::new(angle), true);
        }
    }

    /// Current linear velocity of a body
    pub fn velocity(&self, body: &BodyRef) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Current position and rotation of a body
    pub fn body_position(&self, body: &BodyRef) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| {
                let iso = rb.position();
                (
                    Vec2::new(iso.translation.x, iso.translation.y),
                    iso.rotation.angle(),
                )
            })
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Number of rigid bodies in the simulation
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn collider_owner(&self, collider_handle: ColliderHandle) -> ActorId {
        let owner = self
            .colliders
            .get(collider_handle)
            .and_then(|c| c.parent())
            .and_then(|h| self.bodies.get(h))
            .map(|b| ActorId(b.user_data as u32));
        match owner {
            Some(id) if id != ActorId::INVALID => id,
            _ => panic!("collision event on a body with no owning actor"),
        }
    }
}
