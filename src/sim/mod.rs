//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable actor identity (ids never reused)
//! - No rendering or platform dependencies

pub mod actor;
pub mod archetype;
pub mod contact;
pub mod physics;
pub mod stepper;

pub use actor::{Actor, ActorId, ActorRegistry, BindError, Runner};
pub use archetype::{Archetype, ArchetypeData};
pub use contact::{ContactRules, GameEvent, dispatch};
pub use physics::{BodyDesc, BodyRef, BodyType, ContactPair, Material, PhysicsWorld, ShapeDesc};
pub use stepper::{LoopThreshold, StepClock};
