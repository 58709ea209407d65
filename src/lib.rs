//! Tap Runner - a side-view touch runner game core
//!
//! Core modules:
//! - `sim`: Deterministic fixed-timestep simulation (physics, actors, contacts)
//! - `input`: Screen-to-world projection and touch-zone command mapping
//! - `scene`: Per-session wiring of world, actors, stepper and dispatcher
//! - `setup`: World-construction helpers (ground + runner bodies)
//! - `tuning`: Data-driven gameplay configuration

pub mod input;
pub mod scene;
pub mod setup;
pub mod sim;
pub mod tuning;

pub use scene::Scene;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (300 Hz keeps the small world stable)
    pub const TIME_STEP: f32 = 1.0 / 300.0;
    /// Maximum fixed steps consumed per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame delta clamp; a debugger pause must not trigger seconds of catch-up
    pub const MAX_FRAME_DELTA: f32 = 0.25;

    /// Solver iteration counts (fixed configuration, never derived at runtime)
    pub const VELOCITY_ITERATIONS: usize = 6;
    pub const POSITION_ITERATIONS: usize = 2;

    /// World gravity, y-up
    pub const WORLD_GRAVITY: Vec2 = Vec2::new(0.0, -10.0);

    /// Camera viewport in world units
    pub const VIEWPORT_WIDTH: f32 = 20.0;
    pub const VIEWPORT_HEIGHT: f32 = 13.0;

    /// Ground slab
    pub const GROUND_WIDTH: f32 = 25.0;
    pub const GROUND_HEIGHT: f32 = 2.0;
    pub const GROUND_Y: f32 = 0.0;

    /// Runner body
    pub const RUNNER_WIDTH: f32 = 1.0;
    pub const RUNNER_HEIGHT: f32 = 2.0;
    pub const RUNNER_X: f32 = 2.0;
    pub const RUNNER_DENSITY: f32 = 0.5;
    /// Runner falls faster than free bodies for a snappier arc
    pub const RUNNER_GRAVITY_SCALE: f32 = 3.0;
    pub const RUNNER_JUMP_IMPULSE: Vec2 = Vec2::new(0.0, 13.0);
    /// Body rotation while sliding under obstacles
    pub const RUNNER_DODGE_ANGLE: f32 = -std::f32::consts::FRAC_PI_2;
}
