//! Pong Arena - a ball bouncing in a box, deflected by a paddle
//!
//! Core modules:
//! - `sim`: Rigid-body world, arena construction and the frame stepper
//! - `renderer`: 2D drawing-context contract and the scene renderer
//! - `frame`: The per-frame callback a frame driver invokes
//! - `settings`: Serializable configuration with validation

pub mod error;
pub mod frame;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use frame::step_and_render;
pub use settings::Settings;

use glam::Vec2;

/// Demo configuration constants
pub mod consts {
    /// Fixed physics sub-step (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum sub-steps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 10;
    /// Longest wall-clock gap (seconds) a single frame may simulate
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Arena (and drawing surface) dimensions
    pub const ARENA_WIDTH: f32 = 320.0;
    pub const ARENA_HEIGHT: f32 = 480.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_MASS: f32 = 10.0;

    /// Paddle defaults - sits just inside the bottom wall
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_MARGIN: f32 = 10.0;
    /// Horizontal paddle speed at full steer (units/s)
    pub const PADDLE_SPEED: f32 = 240.0;

    /// Velocity decay applied to bodies that don't override it
    pub const DEFAULT_DAMPING: f32 = 0.1;
    /// Contact solver iterations per sub-step
    pub const SOLVER_ITERATIONS: u32 = 10;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
