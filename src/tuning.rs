//! Data-driven gameplay configuration
//!
//! Defaults come from `consts`; a JSON file can override any subset of
//! fields (`#[serde(default)]` keeps old configs loadable as fields are
//! added).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Runner body and behavior tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub density: f32,
    pub gravity_scale: f32,
    pub jump_impulse: Vec2,
    pub dodge_angle: f32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            width: RUNNER_WIDTH,
            height: RUNNER_HEIGHT,
            x: RUNNER_X,
            density: RUNNER_DENSITY,
            gravity_scale: RUNNER_GRAVITY_SCALE,
            jump_impulse: RUNNER_JUMP_IMPULSE,
            dodge_angle: RUNNER_DODGE_ANGLE,
        }
    }
}

/// Ground slab geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTuning {
    pub width: f32,
    pub height: f32,
    pub y: f32,
}

impl Default for GroundTuning {
    fn default() -> Self {
        Self {
            width: GROUND_WIDTH,
            height: GROUND_HEIGHT,
            y: GROUND_Y,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: Vec2,
    /// Fixed simulation step size `h`
    pub time_step: f32,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    pub max_substeps: u32,
    pub max_frame_delta: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub runner: RunnerTuning,
    pub ground: GroundTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: WORLD_GRAVITY,
            time_step: TIME_STEP,
            velocity_iterations: VELOCITY_ITERATIONS,
            position_iterations: POSITION_ITERATIONS,
            max_substeps: MAX_SUBSTEPS,
            max_frame_delta: MAX_FRAME_DELTA,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            runner: RunnerTuning::default(),
            ground: GroundTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse a JSON override file; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Top surface of the ground slab
    pub fn ground_top(&self) -> f32 {
        self.ground.y + self.ground.height / 2.0
    }

    /// Runner spawn position: resting on the ground at the configured x
    pub fn runner_spawn(&self) -> Vec2 {
        Vec2::new(self.runner.x, self.ground_top() + self.runner.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gravity, WORLD_GRAVITY);
        assert!((tuning.time_step - TIME_STEP).abs() < f32::EPSILON);
        assert_eq!(tuning.velocity_iterations, VELOCITY_ITERATIONS);
        assert_eq!(tuning.runner.jump_impulse, RUNNER_JUMP_IMPULSE);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"time_step": 0.005, "runner": {"density": 0.8}}"#)
            .expect("valid override");
        assert!((tuning.time_step - 0.005).abs() < f32::EPSILON);
        assert!((tuning.runner.density - 0.8).abs() < f32::EPSILON);
        // Untouched fields fall back to defaults
        assert_eq!(tuning.gravity, WORLD_GRAVITY);
        assert_eq!(tuning.runner.jump_impulse, RUNNER_JUMP_IMPULSE);
    }

    #[test]
    fn test_round_trip() {
        let tuning = Tuning::default();
        let json = serde_json::to_string(&tuning).expect("serialize");
        let back = Tuning::from_json(&json).expect("parse");
        assert_eq!(back, tuning);
    }

    #[test]
    fn test_spawn_rests_on_ground() {
        let tuning = Tuning::default();
        let spawn = tuning.runner_spawn();
        assert!((spawn.y - (tuning.ground_top() + tuning.runner.height / 2.0)).abs() < 1e-6);
    }
}
