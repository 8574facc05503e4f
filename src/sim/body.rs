//! Rigid bodies
//!
//! Bodies are owned by the `World` and addressed by `BodyId`, which stays
//! valid for the lifetime of that world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::Shape;
use crate::consts::DEFAULT_DAMPING;
use crate::normalize_angle;

/// Stable handle to a body inside its world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// How a body takes part in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Never moves (mass 0)
    Static,
    /// Moved by forces and contact impulses
    Dynamic,
    /// Moved only by its own velocity; infinite mass in contacts
    Kinematic,
}

/// Construction parameters for a body
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub mass: f32,
    pub position: Vec2,
    pub angle: f32,
    pub velocity: Vec2,
    pub damping: f32,
    pub shapes: Vec<Shape>,
}

impl BodyDesc {
    /// An immovable body at `position`, rotated by `angle`
    pub fn fixed(position: Vec2, angle: f32) -> Self {
        Self {
            kind: BodyKind::Static,
            mass: 0.0,
            position,
            angle,
            velocity: Vec2::ZERO,
            damping: DEFAULT_DAMPING,
            shapes: Vec::new(),
        }
    }

    /// A body with `mass` driven by the solver
    pub fn dynamic(mass: f32, position: Vec2) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            mass,
            ..Self::fixed(position, 0.0)
        }
    }

    /// A body moved from outside by setting its velocity
    pub fn kinematic(position: Vec2) -> Self {
        Self {
            kind: BodyKind::Kinematic,
            ..Self::fixed(position, 0.0)
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }
}

/// A rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub mass: f32,
    pub position: Vec2,
    /// Orientation (radians, counter-clockwise, in [-π, π))
    pub angle: f32,
    pub velocity: Vec2,
    /// Fraction of velocity lost per second (0 = none)
    pub damping: f32,
    pub shapes: Vec<Shape>,
}

impl Body {
    pub(crate) fn from_desc(id: BodyId, desc: BodyDesc) -> Self {
        let (mass, velocity) = match desc.kind {
            BodyKind::Static => (0.0, Vec2::ZERO),
            BodyKind::Kinematic => (0.0, desc.velocity),
            BodyKind::Dynamic => (desc.mass, desc.velocity),
        };
        Self {
            id,
            kind: desc.kind,
            mass,
            position: desc.position,
            angle: normalize_angle(desc.angle),
            velocity,
            damping: desc.damping,
            shapes: desc.shapes,
        }
    }

    /// Inverse mass used by the contact solver (0 = immovable)
    #[inline]
    pub fn inv_mass(&self) -> f32 {
        match self.kind {
            BodyKind::Dynamic if self.mass > 0.0 => 1.0 / self.mass,
            _ => 0.0,
        }
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// Apply per-second damping over `dt` seconds
    pub fn apply_damping(&mut self, dt: f32) {
        if self.damping > 0.0 {
            let keep = (1.0 - self.damping).clamp(0.0, 1.0).powf(dt);
            self.velocity *= keep;
        }
    }

    /// Semi-implicit Euler position update. Bodies never spin, so the angle
    /// stays where it was built.
    pub fn integrate(&mut self, dt: f32) {
        if self.is_static() {
            return;
        }
        self.position += self.velocity * dt;
    }
}
