//! Narrowphase collision detection for planes, circles and boxes
//!
//! Every test takes two posed shapes (A, B) and reports the contact normal
//! pointing from A toward B, so pushing B along the normal separates them.

use glam::Vec2;

use crate::rotate;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal from shape A toward shape B
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// Same contact seen from the other shape
    pub fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

/// World-space normal of a plane body rotated by `angle`
#[inline]
pub fn plane_normal(angle: f32) -> Vec2 {
    rotate(Vec2::Y, angle)
}

/// Plane (A) against circle (B)
pub fn plane_circle(
    plane_pos: Vec2,
    plane_angle: f32,
    center: Vec2,
    radius: f32,
) -> CollisionResult {
    let normal = plane_normal(plane_angle);
    let dist = (center - plane_pos).dot(normal);

    if dist < radius {
        return CollisionResult {
            hit: true,
            normal,
            penetration: radius - dist,
        };
    }

    CollisionResult::miss()
}

/// Box (A) against circle (B)
pub fn box_circle(
    box_pos: Vec2,
    box_angle: f32,
    half: Vec2,
    center: Vec2,
    radius: f32,
) -> CollisionResult {
    // Work in the box's local frame
    let local = rotate(center - box_pos, -box_angle);
    let clamped = local.clamp(-half, half);

    let (local_normal, penetration) = if local == clamped {
        // Circle centre inside the box: push out through the nearest face
        let dx = half.x - local.x.abs();
        let dy = half.y - local.y.abs();
        if dx < dy {
            (Vec2::new(local.x.signum(), 0.0), radius + dx)
        } else {
            (Vec2::new(0.0, local.y.signum()), radius + dy)
        }
    } else {
        let diff = local - clamped;
        let dist = diff.length();
        if dist >= radius {
            return CollisionResult::miss();
        }
        (diff / dist, radius - dist)
    };

    CollisionResult {
        hit: true,
        normal: rotate(local_normal, box_angle),
        penetration,
    }
}

/// Circle (A) against circle (B)
pub fn circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> CollisionResult {
    let diff = center_b - center_a;
    let dist = diff.length();
    let reach = radius_a + radius_b;

    if dist >= reach {
        return CollisionResult::miss();
    }

    // Concentric circles: pick an arbitrary but stable axis
    let normal = if dist > f32::EPSILON { diff / dist } else { Vec2::Y };
    CollisionResult {
        hit: true,
        normal,
        penetration: reach - dist,
    }
}

/// Plane (A) against box (B): deepest box corner below the surface
pub fn plane_box(
    plane_pos: Vec2,
    plane_angle: f32,
    box_pos: Vec2,
    box_angle: f32,
    half: Vec2,
) -> CollisionResult {
    let normal = plane_normal(plane_angle);
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ];

    let deepest = corners
        .iter()
        .map(|&c| (box_pos + rotate(c, box_angle) - plane_pos).dot(normal))
        .min_by(f32::total_cmp);

    match deepest {
        Some(dist) if dist < 0.0 => CollisionResult {
            hit: true,
            normal,
            penetration: -dist,
        },
        _ => CollisionResult::miss(),
    }
}

/// Mirror `velocity` about a surface with unit `normal`: v' = v - 2(v·n)n
#[cfg(test)]
pub(crate) fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_plane_normals_face_inward() {
        // top, bottom, left, right walls of a box centred on the origin
        assert!((plane_normal(0.0) - Vec2::Y).length() < 1e-6);
        assert!((plane_normal(PI) - Vec2::NEG_Y).length() < 1e-6);
        assert!((plane_normal(-FRAC_PI_2) - Vec2::X).length() < 1e-6);
        assert!((plane_normal(FRAC_PI_2) - Vec2::NEG_X).length() < 1e-6);
    }

    #[test]
    fn test_plane_circle() {
        let wall = Vec2::new(0.0, 240.0);

        // Ball well inside the arena
        let result = plane_circle(wall, PI, Vec2::new(0.0, 200.0), 10.0);
        assert!(!result.hit);

        // Ball touching the wall from inside
        let result = plane_circle(wall, PI, Vec2::new(5.0, 235.0), 10.0);
        assert!(result.hit);
        assert!((result.penetration - 5.0).abs() < 1e-4);
        assert!((result.normal - Vec2::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_box_circle_from_above() {
        let half = Vec2::new(10.0, 10.0);
        let result = box_circle(Vec2::new(0.0, -230.0), 0.0, half, Vec2::new(2.0, -212.0), 10.0);
        assert!(result.hit);
        assert!((result.normal - Vec2::Y).length() < 1e-6);
        assert!((result.penetration - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_box_circle_corner_and_miss() {
        let half = Vec2::new(10.0, 10.0);
        let result = box_circle(Vec2::ZERO, 0.0, half, Vec2::new(15.0, 15.0), 10.0);
        assert!(result.hit);
        let diag = Vec2::new(1.0, 1.0).normalize();
        assert!((result.normal - diag).length() < 1e-5);

        let result = box_circle(Vec2::ZERO, 0.0, half, Vec2::new(25.0, 0.0), 10.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_box_circle_centre_inside() {
        let half = Vec2::new(10.0, 5.0);
        let result = box_circle(Vec2::ZERO, 0.0, half, Vec2::new(1.0, 3.0), 2.0);
        assert!(result.hit);
        // Closest face is the top one (2 units away)
        assert!((result.normal - Vec2::Y).length() < 1e-6);
        assert!((result.penetration - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_box_circle_rotated_box() {
        let half = Vec2::new(10.0, 10.0);
        // After a quarter turn the local +X face points up
        let result = box_circle(Vec2::ZERO, FRAC_PI_2, half, Vec2::new(0.0, 18.0), 10.0);
        assert!(result.hit);
        assert!((result.normal - Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn test_circle_circle() {
        let result = circle_circle(Vec2::ZERO, 5.0, Vec2::new(8.0, 0.0), 5.0);
        assert!(result.hit);
        assert!((result.normal - Vec2::X).length() < 1e-6);
        assert!((result.penetration - 2.0).abs() < 1e-6);

        assert!(!circle_circle(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0).hit);
        assert!(circle_circle(Vec2::ZERO, 1.0, Vec2::ZERO, 1.0).hit);
    }

    #[test]
    fn test_plane_box() {
        let half = Vec2::new(10.0, 10.0);
        let floor = Vec2::new(0.0, -240.0);

        // Resting exactly on the plane is not an overlap
        assert!(!plane_box(floor, 0.0, Vec2::new(0.0, -230.0), 0.0, half).hit);

        let result = plane_box(floor, 0.0, Vec2::new(0.0, -235.0), 0.0, half);
        assert!(result.hit);
        assert!((result.penetration - 5.0).abs() < 1e-4);
        assert!((result.normal - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_flipped() {
        let result = circle_circle(Vec2::ZERO, 5.0, Vec2::new(8.0, 0.0), 5.0).flipped();
        assert!((result.normal - Vec2::NEG_X).length() < 1e-6);
    }
}
