//! Per-session wiring
//!
//! The `Scene` owns one physics world, the ground and runner actors, the
//! fixed-step clock and the contact rules. The host calls `update` once per
//! frame with the wall-clock delta and forwards raw pointer events to
//! `touch_down`/`touch_up`; rendering and UI live elsewhere.
//!
//! Per-frame control flow: accumulated time is converted into zero or more
//! fixed physics steps; contacts drained from each step are dispatched into
//! semantic events; events are then applied to the runner state machine.

use glam::Vec2;
use thiserror::Error;

use crate::input::{Camera, Command, TouchZones};
use crate::setup;
use crate::sim::actor::{Actor, ActorId, ActorRegistry, BindError, Runner};
use crate::sim::archetype::Archetype;
use crate::sim::contact::{ContactRules, GameEvent, dispatch};
use crate::sim::physics::{ContactPair, PhysicsWorld};
use crate::sim::stepper::StepClock;
use crate::tuning::Tuning;

/// Session construction failures
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to bind actor: {0}")]
    Bind(#[from] BindError),
}

/// One active game session: world, actors, stepper, dispatcher, input zones
pub struct Scene {
    physics: PhysicsWorld,
    registry: ActorRegistry,
    clock: StepClock,
    rules: ContactRules,
    ground: Actor,
    runner: Runner,
    camera: Camera,
    zones: TouchZones,
    /// Scratch buffer reused across steps
    contacts: Vec<ContactPair>,
    /// Semantic events raised during the current frame
    events: Vec<GameEvent>,
}

impl Scene {
    /// Build a session from tuning, for a host screen of the given pixel size
    pub fn new(tuning: &Tuning, screen_w: f32, screen_h: f32) -> Result<Self, SetupError> {
        let mut physics = setup::create_world(tuning);
        let mut registry = ActorRegistry::new();
        let ground = setup::create_ground(&mut physics, &mut registry, tuning)?;
        let runner_actor = setup::create_runner(&mut physics, &mut registry, tuning)?;
        let runner = Runner::new(runner_actor);

        let rules = ContactRules::new().on_contact(
            Archetype::Runner,
            Archetype::Ground,
            GameEvent::RunnerLanded,
        );

        let clock = StepClock::new(tuning.time_step)
            .with_max_substeps(tuning.max_substeps)
            .with_max_frame_delta(tuning.max_frame_delta);

        let camera = Camera::new(
            tuning.viewport_width,
            tuning.viewport_height,
            screen_w,
            screen_h,
        );
        let zones = TouchZones::new(tuning.viewport_width);

        log::info!(
            "scene ready: step {:.4}s, viewport {}x{}",
            tuning.time_step,
            tuning.viewport_width,
            tuning.viewport_height
        );

        Ok(Self {
            physics,
            registry,
            clock,
            rules,
            ground,
            runner,
            camera,
            zones,
            contacts: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Advance the session by one frame's wall-clock delta.
    ///
    /// Returns the semantic events raised this frame, in order.
    pub fn update(&mut self, frame_delta: f32) -> &[GameEvent] {
        self.events.clear();

        let steps = self.clock.advance(frame_delta);
        for _ in 0..steps {
            self.contacts.clear();
            self.physics.step_into(&mut self.contacts);
            let registry = &self.registry;
            dispatch(
                &self.contacts,
                |id| registry.archetype_of(id),
                &self.rules,
                &mut self.events,
            );
        }

        for event in &self.events {
            match event {
                GameEvent::RunnerLanded => self.runner.landed(),
            }
        }

        &self.events
    }

    /// Raw pointer-down: unproject, classify the touch zone, issue a command
    pub fn touch_down(&mut self, x: f32, y: f32, _pointer: i32, _button: i32) {
        let world_point = self.camera.unproject(Vec2::new(x, y));
        match self.zones.classify(world_point) {
            Command::Jump => self.runner.jump(&mut self.physics),
            Command::Dodge => self.runner.dodge(&mut self.physics),
        }
    }

    /// Raw pointer-up: ends an active dodge
    pub fn touch_up(&mut self, _x: f32, _y: f32, _pointer: i32, _button: i32) {
        if self.runner.is_dodging() {
            self.runner.stop_dodge(&mut self.physics);
        }
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn ground(&self) -> &Actor {
        &self.ground
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Runner position, for debug rendering hosts
    pub fn runner_position(&self) -> Vec2 {
        self.physics.body_position(self.runner.actor().body()).0
    }

    /// Archetype of a bound actor id
    pub fn archetype_of(&self, id: ActorId) -> Option<Archetype> {
        self.registry.archetype_of(id)
    }
}
