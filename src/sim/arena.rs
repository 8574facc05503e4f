//! Arena construction
//!
//! Builds the fixed scene: four walls, a ball and a paddle, plus the contact
//! rules between them. Coordinates have their origin at the arena centre and
//! +Y pointing up.
//!
//! All four walls are the same plane primitive, rotated so its normal faces
//! into the arena:
//! - floor   `(0, -h/2)`, angle `0`
//! - ceiling `(0, +h/2)`, angle `π`
//! - left    `(-w/2, 0)`, angle `-π/2`
//! - right   `(+w/2, 0)`, angle `π/2`
//!
//! The ball bounces off every wall and the paddle. There is deliberately no
//! rule between the paddle and the walls, so the paddle can slide through
//! them.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyDesc, BodyId};
use super::material::{ContactMaterial, MaterialId};
use super::shape::Shape;
use super::world::World;
use crate::consts::*;
use crate::error::{ConfigError, non_negative, positive};

/// Arena, ball and paddle dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from the floor to the paddle centre
    pub paddle_margin: f32,
    /// Horizontal paddle speed at full steer (units/s)
    pub paddle_speed: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            paddle_speed: PADDLE_SPEED,
        }
    }
}

impl ArenaConfig {
    /// Initial ball speed, tied to the arena height
    pub fn ball_speed(&self) -> f32 {
        self.height / 2.0
    }

    pub fn paddle_size(&self) -> Vec2 {
        Vec2::new(self.paddle_width, self.paddle_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("ball_radius", self.ball_radius)?;
        positive("ball_mass", self.ball_mass)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        non_negative("paddle_margin", self.paddle_margin)?;
        non_negative("paddle_speed", self.paddle_speed)?;

        let diameter = self.ball_radius * 2.0;
        if diameter >= self.width || diameter >= self.height {
            return Err(ConfigError::BallTooLarge {
                radius: self.ball_radius,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Handles to the four boundary bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub floor: BodyId,
    pub ceiling: BodyId,
    pub left: BodyId,
    pub right: BodyId,
}

impl Walls {
    pub fn all(&self) -> [BodyId; 4] {
        [self.floor, self.left, self.right, self.ceiling]
    }
}

/// Material tags handed out while building the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaMaterials {
    pub walls: [MaterialId; 4],
    pub ball: MaterialId,
    pub paddle: MaterialId,
}

/// A fully wired world plus handles to the bodies callers read back
#[derive(Debug, Clone)]
pub struct Arena {
    pub world: World,
    pub ball: BodyId,
    pub paddle: BodyId,
    pub walls: Walls,
    pub materials: ArenaMaterials,
    pub config: ArenaConfig,
}

impl Arena {
    pub fn ball(&self) -> &Body {
        &self.world[self.ball]
    }

    pub fn paddle(&self) -> &Body {
        &self.world[self.paddle]
    }

    /// Whether the ball lies within the walls, allowing `slack` of overlap
    pub fn contains_ball(&self, slack: f32) -> bool {
        let half = Vec2::new(self.config.width, self.config.height) * 0.5;
        let limit = half - Vec2::splat(self.config.ball_radius) + Vec2::splat(slack);
        let pos = self.ball().position;
        pos.x.abs() <= limit.x && pos.y.abs() <= limit.y
    }
}

/// Build the arena world from `config` (zero gravity)
pub fn build_arena(config: &ArenaConfig) -> Result<Arena, ConfigError> {
    config.validate()?;

    let mut world = World::new(Vec2::ZERO);
    let (w, h) = (config.width, config.height);

    let ball_material = world.new_material();
    let ball = world.add_body(
        BodyDesc::dynamic(config.ball_mass, Vec2::ZERO)
            .with_velocity(Vec2::new(0.0, -config.ball_speed()))
            .with_damping(0.0)
            .with_shape(Shape::circle(config.ball_radius, ball_material)),
    );

    let paddle_material = world.new_material();
    let paddle = world.add_body(
        BodyDesc::kinematic(Vec2::new(0.0, -h / 2.0 + config.paddle_margin)).with_shape(
            Shape::rect(config.paddle_width, config.paddle_height, paddle_material),
        ),
    );

    let sides = [
        (Vec2::new(0.0, -h / 2.0), 0.0),
        (Vec2::new(-w / 2.0, 0.0), -FRAC_PI_2),
        (Vec2::new(w / 2.0, 0.0), FRAC_PI_2),
        (Vec2::new(0.0, h / 2.0), PI),
    ];

    let mut wall_ids = [BodyId(0); 4];
    let mut wall_materials = [MaterialId(0); 4];
    for (i, (position, angle)) in sides.into_iter().enumerate() {
        let material = world.new_material();
        wall_ids[i] = world.add_body(BodyDesc::fixed(position, angle).with_shape(Shape::plane(material)));
        wall_materials[i] = material;
        world.add_contact_material(ContactMaterial::elastic(material, ball_material));
    }

    world.add_contact_material(ContactMaterial::elastic(ball_material, paddle_material));

    let [floor, left, right, ceiling] = wall_ids;
    log::info!(
        "Arena built: {}x{}, ball r={} at {:.1} u/s, paddle {}x{}",
        w,
        h,
        config.ball_radius,
        config.ball_speed(),
        config.paddle_width,
        config.paddle_height
    );

    Ok(Arena {
        world,
        ball,
        paddle,
        walls: Walls {
            floor,
            ceiling,
            left,
            right,
        },
        materials: ArenaMaterials {
            walls: wall_materials,
            ball: ball_material,
            paddle: paddle_material,
        },
        config: config.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::BodyKind;
    use crate::sim::collision::plane_normal;
    use crate::sim::shape::Geometry;

    fn arena() -> Arena {
        build_arena(&ArenaConfig::default()).expect("default config is valid")
    }

    #[test]
    fn test_default_layout() {
        let arena = arena();
        let ball = arena.ball();
        assert_eq!(ball.kind, BodyKind::Dynamic);
        assert_eq!(ball.position, Vec2::ZERO);
        assert_eq!(ball.velocity, Vec2::new(0.0, -240.0));
        assert_eq!(ball.damping, 0.0);
        assert!(ball.mass > 0.0);

        let paddle = arena.paddle();
        assert_eq!(paddle.kind, BodyKind::Kinematic);
        assert_eq!(paddle.position, Vec2::new(0.0, -230.0));

        assert_eq!(arena.world.bodies().len(), 6);
    }

    #[test]
    fn test_walls_face_inward() {
        let arena = arena();
        for id in arena.walls.all() {
            let wall = &arena.world[id];
            assert_eq!(wall.kind, BodyKind::Static);
            assert!(matches!(wall.shapes[0].geometry, Geometry::Plane));
            // Normal points from the wall toward the arena centre
            let inward = -wall.position.normalize();
            assert!((plane_normal(wall.angle) - inward).length() < 1e-5);
        }
        assert_eq!(arena.world[arena.walls.ceiling].position, Vec2::new(0.0, 240.0));
        assert_eq!(arena.world[arena.walls.left].position, Vec2::new(-160.0, 0.0));
    }

    #[test]
    fn test_contact_rules() {
        let arena = arena();
        let world = &arena.world;
        let m = arena.materials;

        assert_eq!(world.contact_materials().len(), 5);
        for wall in m.walls {
            let rule = world.contact_material(wall, m.ball).expect("wall/ball rule");
            assert_eq!(rule.restitution, 1.0);
            assert_eq!(rule.stiffness, f32::MAX);
            // Paddle slides through walls
            assert!(world.contact_material(wall, m.paddle).is_none());
        }
        assert!(world.contact_material(m.paddle, m.ball).is_some());
    }

    #[test]
    fn test_every_moving_body_has_a_material() {
        let arena = arena();
        for body in arena.world.bodies().iter().filter(|b| !b.is_static()) {
            assert!(!body.shapes.is_empty());
        }
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let config = ArenaConfig {
            width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            build_arena(&config),
            Err(ConfigError::NonPositive { field: "width", .. })
        ));

        let config = ArenaConfig {
            ball_radius: -1.0,
            ..Default::default()
        };
        assert!(build_arena(&config).is_err());

        let config = ArenaConfig {
            paddle_margin: -3.0,
            ..Default::default()
        };
        assert!(matches!(
            build_arena(&config),
            Err(ConfigError::Negative { field: "paddle_margin", .. })
        ));

        let config = ArenaConfig {
            ball_radius: 160.0,
            ..Default::default()
        };
        assert!(matches!(build_arena(&config), Err(ConfigError::BallTooLarge { .. })));
    }

    #[test]
    fn test_side_walls_bounce_ball() {
        use crate::sim::world::ContactEvent;

        for (side, start) in [(1.0, 140.0), (-1.0, -140.0)] {
            let mut arena = arena();
            let wall = if side > 0.0 { arena.walls.right } else { arena.walls.left };
            if let Some(ball) = arena.world.body_mut(arena.ball) {
                ball.position = Vec2::new(start, 0.0);
            }
            arena.world.set_velocity(arena.ball, Vec2::new(side * 240.0, 60.0));

            let mut hit_wall = false;
            for _ in 0..10 {
                arena.world.step(SIM_DT, SIM_DT, 1);
                hit_wall |= arena.world.events().iter().any(|e| {
                    matches!(e, ContactEvent::Bounce { a, b, .. }
                        if (*a == wall && *b == arena.ball) || (*a == arena.ball && *b == wall))
                });
            }

            assert!(hit_wall);
            let v = arena.ball().velocity;
            assert!((v.x + side * 240.0).abs() < 1e-3);
            assert!((v.y - 60.0).abs() < 1e-3);
            assert!(arena.contains_ball(0.5));
        }
    }

    #[test]
    fn test_contains_ball() {
        let mut arena = arena();
        assert!(arena.contains_ball(0.0));
        if let Some(ball) = arena.world.body_mut(arena.ball) {
            ball.position = Vec2::new(0.0, 235.0);
        }
        assert!(!arena.contains_ball(0.0));
        assert!(arena.contains_ball(5.0));
    }
}
