//! Touch input mapping
//!
//! Converts raw pointer coordinates (y-down screen pixels) into world space
//! and classifies them into the two command zones: left half dodges, right
//! half jumps. The host pushes pointer events in explicitly; nothing here
//! registers itself as a global input handler.

use glam::Vec2;

use crate::consts::*;

/// Player commands produced by the touch-zone mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    Dodge,
}

/// Orthographic camera: maps screen pixels to world units.
///
/// The world origin sits at the bottom-left of the viewport, y-up; screen
/// coordinates are y-down with origin at the top-left.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    viewport_w: f32,
    viewport_h: f32,
    screen_w: f32,
    screen_h: f32,
}

impl Camera {
    pub fn new(viewport_w: f32, viewport_h: f32, screen_w: f32, screen_h: f32) -> Self {
        assert!(screen_w > 0.0 && screen_h > 0.0, "degenerate screen size");
        Self {
            viewport_w,
            viewport_h,
            screen_w,
            screen_h,
        }
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_w
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_h
    }

    /// Inverse projection: screen pixels to world units, flipping y
    pub fn unproject(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.screen_w * self.viewport_w,
            (1.0 - screen.y / self.screen_h) * self.viewport_h,
        )
    }
}

/// The two disjoint, viewport-spanning half-regions.
///
/// Geometry is fixed at setup time from the viewport size; resizing
/// mid-session is not supported.
#[derive(Debug, Clone, Copy)]
pub struct TouchZones {
    midline_x: f32,
}

impl TouchZones {
    pub fn new(viewport_w: f32) -> Self {
        Self {
            midline_x: viewport_w / 2.0,
        }
    }

    /// Classify a world-space point: left of the midline dodges, everything
    /// else (x >= W/2) jumps. The two zones partition the viewport.
    pub fn classify(&self, world_point: Vec2) -> Command {
        if world_point.x < self.midline_x {
            Command::Dodge
        } else {
            Command::Jump
        }
    }
}

impl Default for TouchZones {
    fn default() -> Self {
        Self::new(VIEWPORT_WIDTH)
    }
}
