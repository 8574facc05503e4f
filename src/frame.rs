//! Per-frame entry point
//!
//! A frame driver calls `step_and_render` once per display refresh with a
//! monotonically non-decreasing timestamp in milliseconds. Each call is one
//! synchronous unit of work: advance the simulation, then draw it.

use crate::renderer::{DrawContext, Scene, draw_scene};
use crate::sim::Simulation;

/// Advance `sim` to `timestamp_ms` and draw the result into `ctx`
pub fn step_and_render<C: DrawContext + ?Sized>(sim: &mut Simulation, ctx: &mut C, timestamp_ms: f64) {
    sim.step(timestamp_ms);
    draw_scene(ctx, &Scene::from_simulation(sim));
}
