//! Collider geometry attached to bodies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::material::MaterialId;

/// Collider geometry, in the owning body's local frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Infinite half-space. The surface passes through the body origin and
    /// the local normal is +Y; everything below the surface is solid.
    Plane,
    /// Circle centred on the body origin
    Circle { radius: f32 },
    /// Axis-aligned (in local space) rectangle centred on the body origin
    Box { width: f32, height: f32 },
}

/// A collider with the material used to pick a contact rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub geometry: Geometry,
    pub material: MaterialId,
}

impl Shape {
    pub fn plane(material: MaterialId) -> Self {
        Self {
            geometry: Geometry::Plane,
            material,
        }
    }

    pub fn circle(radius: f32, material: MaterialId) -> Self {
        Self {
            geometry: Geometry::Circle { radius },
            material,
        }
    }

    pub fn rect(width: f32, height: f32, material: MaterialId) -> Self {
        Self {
            geometry: Geometry::Box { width, height },
            material,
        }
    }
}

impl Geometry {
    /// Half extents of a box, `None` for other geometry
    pub fn half_extents(&self) -> Option<Vec2> {
        match *self {
            Geometry::Box { width, height } => Some(Vec2::new(width, height) * 0.5),
            _ => None,
        }
    }
}
