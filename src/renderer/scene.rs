//! Scene renderer
//!
//! Draws the arena outline, the ball and the paddle. Physics coordinates put
//! the origin at the arena centre with +Y up; the renderer moves the origin
//! to the surface centre and flips Y inside a saved transform.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::context::{DrawContext, SavedTransform};
use crate::sim::{Arena, Simulation};

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Arena (and surface) size
    pub size: Vec2,
    pub ball: Vec2,
    pub ball_radius: f32,
    pub paddle: Vec2,
    pub paddle_size: Vec2,
    pub line_width: f32,
}

impl Scene {
    pub fn from_arena(arena: &Arena, line_width: f32) -> Self {
        let config = &arena.config;
        Self {
            size: Vec2::new(config.width, config.height),
            ball: arena.ball().position,
            ball_radius: config.ball_radius,
            paddle: arena.paddle().position,
            paddle_size: config.paddle_size(),
            line_width,
        }
    }

    pub fn from_simulation(sim: &Simulation) -> Self {
        Self::from_arena(sim.arena(), sim.line_width())
    }
}

/// Draw one frame of `scene` into `ctx`
pub fn draw_scene<C: DrawContext + ?Sized>(ctx: &mut C, scene: &Scene) {
    ctx.clear_rect(0.0, 0.0, scene.size.x, scene.size.y);
    ctx.set_line_width(scene.line_width);

    let mut ctx = SavedTransform::new(ctx);
    ctx.translate(scene.size.x / 2.0, scene.size.y / 2.0);
    ctx.scale(1.0, -1.0);

    ctx.begin_path();
    ctx.arc(scene.ball.x, scene.ball.y, scene.ball_radius, 0.0, TAU);
    ctx.stroke();

    draw_rect_outline(&mut *ctx, Vec2::ZERO, scene.size);
    draw_rect_outline(&mut *ctx, scene.paddle, scene.paddle_size);
}

/// Outline a rectangle centred on `center` as four separately stroked edges
fn draw_rect_outline<C: DrawContext + ?Sized>(ctx: &mut C, center: Vec2, size: Vec2) {
    let min = center - size / 2.0;
    let max = center + size / 2.0;
    let edges = [
        (Vec2::new(min.x, min.y), Vec2::new(max.x, min.y)),
        (Vec2::new(min.x, max.y), Vec2::new(max.x, max.y)),
        (Vec2::new(min.x, min.y), Vec2::new(min.x, max.y)),
        (Vec2::new(max.x, min.y), Vec2::new(max.x, max.y)),
    ];

    for (from, to) in edges {
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCommand, RecordingContext};
    use crate::sim::{ArenaConfig, StepConfig};

    fn scene() -> Scene {
        let sim = Simulation::new(&ArenaConfig::default(), StepConfig::default()).expect("valid");
        Scene::from_simulation(&sim)
    }

    #[test]
    fn test_frame_layout() {
        let mut rec = RecordingContext::new();
        draw_scene(&mut rec, &scene());
        let cmds = rec.commands();

        assert_eq!(
            &cmds[..6],
            &[
                DrawCommand::ClearRect {
                    x: 0.0,
                    y: 0.0,
                    width: 320.0,
                    height: 480.0
                },
                DrawCommand::LineWidth { width: 1.0 },
                DrawCommand::Save,
                DrawCommand::Translate { x: 160.0, y: 240.0 },
                DrawCommand::Scale { x: 1.0, y: -1.0 },
                DrawCommand::BeginPath,
            ]
        );
        assert_eq!(
            cmds[6],
            DrawCommand::Arc {
                x: 0.0,
                y: 0.0,
                radius: 10.0,
                start: 0.0,
                end: TAU
            }
        );
        assert_eq!(cmds.last(), Some(&DrawCommand::Restore));
        assert_eq!(rec.depth(), 0);
        // Ball + four arena edges + four paddle edges
        assert_eq!(rec.stroke_count(), 9);
    }

    #[test]
    fn test_paddle_outline_follows_position() {
        let mut rec = RecordingContext::new();
        draw_scene(&mut rec, &scene());
        // Paddle centred at (0, -230), 20x20
        assert!(rec.commands().contains(&DrawCommand::MoveTo { x: -10.0, y: -240.0 }));
        assert!(rec.commands().contains(&DrawCommand::LineTo { x: 10.0, y: -220.0 }));
        // Arena corners
        assert!(rec.commands().contains(&DrawCommand::MoveTo { x: -160.0, y: -240.0 }));
        assert!(rec.commands().contains(&DrawCommand::LineTo { x: 160.0, y: 240.0 }));
    }

    #[test]
    fn test_each_stroke_draws_one_segment() {
        let mut rec = RecordingContext::new();
        draw_scene(&mut rec, &scene());

        let mut segments = 0;
        for cmd in rec.commands() {
            match cmd {
                DrawCommand::BeginPath => segments = 0,
                DrawCommand::LineTo { .. } | DrawCommand::Arc { .. } => segments += 1,
                DrawCommand::Stroke => assert_eq!(segments, 1),
                _ => {}
            }
        }
        let paths = rec
            .commands()
            .iter()
            .filter(|c| **c == DrawCommand::BeginPath)
            .count();
        assert_eq!(paths, rec.stroke_count());
    }

    #[test]
    fn test_drawing_is_idempotent() {
        let sim = Simulation::new(&ArenaConfig::default(), StepConfig::default()).expect("valid");
        let before = sim.arena().ball().clone();

        let mut first = RecordingContext::new();
        let mut second = RecordingContext::new();
        draw_scene(&mut first, &Scene::from_simulation(&sim));
        draw_scene(&mut second, &Scene::from_simulation(&sim));

        assert_eq!(first.commands(), second.commands());
        assert_eq!(sim.arena().ball().position, before.position);
        assert_eq!(sim.arena().ball().velocity, before.velocity);
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut rec = RecordingContext::new();
        let ctx: &mut dyn DrawContext = &mut rec;
        draw_scene(ctx, &scene());
        assert_eq!(rec.depth(), 0);
    }
}
