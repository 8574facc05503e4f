//! Frame-driven simulation stepping
//!
//! `Simulation` is the whole mutable state of the demo: the arena world, the
//! frame clock and the current paddle steering. The caller owns it and hands
//! it to `step` once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, ArenaConfig, build_arena};
use super::clock::FrameClock;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::{ConfigError, positive};
use crate::settings::Settings;

/// Time-stepping parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Fixed physics sub-step (seconds)
    pub fixed_dt: f32,
    /// Sub-steps allowed per frame
    pub max_sub_steps: u32,
    /// Longest wall-clock gap a single frame may simulate (seconds)
    pub max_frame_dt: f32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            fixed_dt: SIM_DT,
            max_sub_steps: MAX_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl StepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fixed_dt", self.fixed_dt)?;
        positive("max_sub_steps", self.max_sub_steps as f32)?;
        positive("max_frame_dt", self.max_frame_dt)?;
        Ok(())
    }
}

/// Simulation context passed to every frame
#[derive(Debug, Clone)]
pub struct Simulation {
    arena: Arena,
    step: StepConfig,
    clock: FrameClock,
    /// Paddle steering in [-1, 1]
    steer: f32,
    line_width: f32,
}

impl Simulation {
    pub fn new(arena: &ArenaConfig, step: StepConfig) -> Result<Self, ConfigError> {
        step.validate()?;
        Ok(Self {
            arena: build_arena(arena)?,
            step,
            clock: FrameClock::new(),
            steer: 0.0,
            line_width: 1.0,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut sim = Self::new(&settings.arena, settings.step.clone())?;
        sim.line_width = settings.line_width;
        Ok(sim)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    pub fn step_config(&self) -> &StepConfig {
        &self.step
    }

    pub fn steer(&self) -> f32 {
        self.steer
    }

    /// Steer the paddle: -1 full left, 1 full right, 0 stop
    pub fn set_steer(&mut self, direction: f32) {
        self.steer = if direction.is_nan() {
            0.0
        } else {
            direction.clamp(-1.0, 1.0)
        };
    }

    /// Advance to the frame at `timestamp_ms`.
    ///
    /// The first frame after start or `reset` only records the timestamp.
    pub fn step(&mut self, timestamp_ms: f64) {
        let Some(elapsed) = self.clock.advance(timestamp_ms) else {
            log::debug!("Priming frame at {:.3} ms", timestamp_ms);
            return;
        };
        self.advance(elapsed);
    }

    /// Simulate `elapsed` seconds, capped at `max_frame_dt`
    fn advance(&mut self, elapsed: f32) {
        let dt = if elapsed > self.step.max_frame_dt {
            log::debug!(
                "Clamping frame dt {:.3}s to {:.3}s",
                elapsed,
                self.step.max_frame_dt
            );
            self.step.max_frame_dt
        } else {
            elapsed
        };

        let paddle_velocity = Vec2::new(self.steer * self.arena.config.paddle_speed, 0.0);
        self.arena.world.set_velocity(self.arena.paddle, paddle_velocity);

        self.arena
            .world
            .step(self.step.fixed_dt, dt, self.step.max_sub_steps);
    }

    /// Rebuild the arena and forget the frame clock
    pub fn reset(&mut self) {
        match build_arena(&self.arena.config) {
            Ok(arena) => self.arena = arena,
            Err(e) => log::warn!("Keeping current arena, rebuild failed: {}", e),
        }
        self.clock.reset();
        self.steer = 0.0;
        log::info!("Simulation reset");
    }

    /// Stroke width the scene should be drawn with
    pub fn line_width(&self) -> f32 {
        self.line_width
    }
}
