//! The physics world
//!
//! Owns every body, the material registry and the contact rules, and is only
//! ever mutated by `step`. Time is advanced in fixed sub-steps: the caller
//! hands in real elapsed time, the world runs as many whole sub-steps as fit
//! (up to a cap) and carries the remainder to the next call.

use std::ops::Index;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyDesc, BodyId, BodyKind};
use super::collision::{self, CollisionResult};
use super::material::{ContactMaterial, ContactMaterialTable, MaterialId};
use super::shape::{Geometry, Shape};
use crate::consts::SOLVER_ITERATIONS;

/// Accumulated time within this much of a full sub-step still runs it
const STEP_EPSILON: f32 = 1e-6;

/// Something notable that happened between two shapes during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContactEvent {
    /// A contact rule resolved an approaching pair
    Bounce {
        a: BodyId,
        b: BodyId,
        /// Approach speed along the normal before the impulse
        normal_speed: f32,
    },
    /// Two shapes overlap but no contact rule covers their materials
    PassThrough { a: BodyId, b: BodyId },
}

/// A resolvable contact gathered by the narrowphase
#[derive(Debug, Clone)]
struct Contact {
    a: usize,
    b: usize,
    normal: Vec2,
    penetration: f32,
    correction: f32,
    /// Normal velocity the solver drives toward
    bias: f32,
    /// Relative normal velocity at the start of the sub-step
    approach: f32,
    inv_mass_sum: f32,
    impulse: f32,
}

/// Rigid-body world
#[derive(Debug, Clone)]
pub struct World {
    pub gravity: Vec2,
    bodies: Vec<Body>,
    contact_materials: ContactMaterialTable,
    next_material: u32,
    accumulator: f32,
    solver_iterations: u32,
    events: Vec<ContactEvent>,
}

impl World {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            contact_materials: ContactMaterialTable::new(),
            next_material: 0,
            accumulator: 0.0,
            solver_iterations: SOLVER_ITERATIONS,
            events: Vec::new(),
        }
    }

    /// Allocate a fresh material tag
    pub fn new_material(&mut self) -> MaterialId {
        let id = MaterialId(self.next_material);
        self.next_material += 1;
        id
    }

    /// Add a body; the returned id stays valid for the life of the world
    pub fn add_body(&mut self, desc: BodyDesc) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(Body::from_desc(id, desc));
        id
    }

    /// Register the response rule for a material pair
    pub fn add_contact_material(&mut self, rule: ContactMaterial) {
        if self.contact_materials.insert(rule).is_some() {
            log::debug!("Replaced contact rule for {:?}/{:?}", rule.a, rule.b);
        }
    }

    pub fn contact_material(&self, a: MaterialId, b: MaterialId) -> Option<&ContactMaterial> {
        self.contact_materials.get(a, b)
    }

    pub fn contact_materials(&self) -> &ContactMaterialTable {
        &self.contact_materials
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0 as usize)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Set the velocity of a non-static body. Returns false for static or
    /// unknown bodies, which are left untouched.
    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) -> bool {
        match self.bodies.get_mut(id.0 as usize) {
            Some(body) if !body.is_static() => {
                body.velocity = velocity;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0 as usize)
    }

    /// Events produced by the most recent `step` call
    pub fn events(&self) -> &[ContactEvent] {
        &self.events
    }

    /// Simulated time carried over to the next call (seconds)
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Advance by `elapsed` seconds of real time using fixed sub-steps of
    /// `fixed_dt`, running at most `max_sub_steps` of them.
    ///
    /// Returns the number of sub-steps taken. Whole sub-steps beyond the cap
    /// are dropped rather than carried, so a long stall never snowballs.
    pub fn step(&mut self, fixed_dt: f32, elapsed: f32, max_sub_steps: u32) -> u32 {
        self.events.clear();
        if elapsed.is_nan() || elapsed <= 0.0 || fixed_dt <= 0.0 {
            return 0;
        }

        self.accumulator += elapsed;
        let mut substeps = 0;
        while self.accumulator + STEP_EPSILON >= fixed_dt && substeps < max_sub_steps {
            self.internal_step(fixed_dt);
            self.accumulator -= fixed_dt;
            substeps += 1;
        }
        self.accumulator = self.accumulator.max(0.0);

        if self.accumulator + STEP_EPSILON >= fixed_dt {
            let dropped = self.accumulator - self.accumulator % fixed_dt;
            log::warn!(
                "Sub-step cap ({}) hit, discarding {:.3}s of simulated time",
                max_sub_steps,
                dropped
            );
            self.accumulator %= fixed_dt;
        }

        substeps
    }

    /// One fixed sub-step: forces, contacts, integration
    fn internal_step(&mut self, h: f32) {
        for body in self.bodies.iter_mut().filter(|b| b.kind == BodyKind::Dynamic) {
            body.velocity += self.gravity * h;
            body.apply_damping(h);
        }

        let mut contacts = self.narrowphase(h);
        self.solve_velocities(&mut contacts);
        self.correct_positions(&contacts);

        for contact in contacts.iter().filter(|c| c.approach < 0.0) {
            let (a, b) = (self.bodies[contact.a].id, self.bodies[contact.b].id);
            log::trace!("Bounce {:?}/{:?} at {:.2} u/s", a, b, -contact.approach);
            self.events.push(ContactEvent::Bounce {
                a,
                b,
                normal_speed: -contact.approach,
            });
        }

        for body in &mut self.bodies {
            body.integrate(h);
        }
    }

    /// Gather contacts for every pair with at least one moving body
    fn narrowphase(&mut self, h: f32) -> Vec<Contact> {
        let mut contacts = Vec::new();

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (body_a, body_b) = (&self.bodies[i], &self.bodies[j]);
                if body_a.is_static() && body_b.is_static() {
                    continue;
                }

                for shape_a in &body_a.shapes {
                    for shape_b in &body_b.shapes {
                        let Some(hit) = collide(body_a, shape_a, body_b, shape_b) else {
                            continue;
                        };

                        let Some(rule) = self.contact_materials.get(shape_a.material, shape_b.material)
                        else {
                            let event = ContactEvent::PassThrough {
                                a: body_a.id,
                                b: body_b.id,
                            };
                            if !self.events.contains(&event) {
                                log::debug!(
                                    "No contact rule for {:?}/{:?}: {:?} and {:?} pass through",
                                    shape_a.material,
                                    shape_b.material,
                                    body_a.id,
                                    body_b.id
                                );
                                self.events.push(event);
                            }
                            continue;
                        };

                        let inv_mass_sum = body_a.inv_mass() + body_b.inv_mass();
                        if inv_mass_sum <= 0.0 {
                            continue;
                        }

                        let approach = (body_b.velocity - body_a.velocity).dot(hit.normal);
                        contacts.push(Contact {
                            a: i,
                            b: j,
                            normal: hit.normal,
                            penetration: hit.penetration,
                            correction: rule.correction_fraction(h),
                            bias: if approach < 0.0 { -rule.restitution * approach } else { 0.0 },
                            approach,
                            inv_mass_sum,
                            impulse: 0.0,
                        });
                    }
                }
            }
        }

        contacts
    }

    /// Sequential impulses along contact normals (frictionless)
    fn solve_velocities(&mut self, contacts: &mut [Contact]) {
        if contacts.is_empty() {
            return;
        }

        for _ in 0..self.solver_iterations {
            for contact in contacts.iter_mut() {
                let inv_a = self.bodies[contact.a].inv_mass();
                let inv_b = self.bodies[contact.b].inv_mass();
                let rel = self.bodies[contact.b].velocity - self.bodies[contact.a].velocity;
                let vn = rel.dot(contact.normal);

                let lambda = (contact.bias - vn) / contact.inv_mass_sum;
                let total = (contact.impulse + lambda).max(0.0);
                let delta = total - contact.impulse;
                contact.impulse = total;

                let impulse = contact.normal * delta;
                self.bodies[contact.a].velocity -= impulse * inv_a;
                self.bodies[contact.b].velocity += impulse * inv_b;
            }
        }
    }

    /// Push overlapping bodies apart, split by inverse mass
    fn correct_positions(&mut self, contacts: &[Contact]) {
        for contact in contacts {
            let depth = contact.penetration * contact.correction;
            if depth <= 0.0 {
                continue;
            }
            let inv_a = self.bodies[contact.a].inv_mass();
            let inv_b = self.bodies[contact.b].inv_mass();
            let push = contact.normal * (depth / contact.inv_mass_sum);
            self.bodies[contact.a].position -= push * inv_a;
            self.bodies[contact.b].position += push * inv_b;
        }
    }
}

impl Index<BodyId> for World {
    type Output = Body;

    fn index(&self, id: BodyId) -> &Body {
        &self.bodies[id.0 as usize]
    }
}

/// Dispatch to the narrowphase test for a shape pair.
///
/// Returns `None` for pairs that don't overlap or that the narrowphase does
/// not handle (plane-plane, box-box).
fn collide(body_a: &Body, shape_a: &Shape, body_b: &Body, shape_b: &Shape) -> Option<CollisionResult> {
    use Geometry::*;

    let (pa, aa) = (body_a.position, body_a.angle);
    let (pb, ab) = (body_b.position, body_b.angle);

    let result = match (shape_a.geometry, shape_b.geometry) {
        (Plane, Circle { radius }) => collision::plane_circle(pa, aa, pb, radius),
        (Circle { radius }, Plane) => collision::plane_circle(pb, ab, pa, radius).flipped(),
        (Box { .. }, Circle { radius }) => {
            collision::box_circle(pa, aa, shape_a.geometry.half_extents()?, pb, radius)
        }
        (Circle { radius }, Box { .. }) => {
            collision::box_circle(pb, ab, shape_b.geometry.half_extents()?, pa, radius).flipped()
        }
        (Circle { radius: ra }, Circle { radius: rb }) => collision::circle_circle(pa, ra, pb, rb),
        (Plane, Box { .. }) => {
            collision::plane_box(pa, aa, pb, ab, shape_b.geometry.half_extents()?)
        }
        (Box { .. }, Plane) => {
            collision::plane_box(pb, ab, pa, aa, shape_a.geometry.half_extents()?).flipped()
        }
        (Plane, Plane) | (Box { .. }, Box { .. }) => return None,
    };

    result.hit.then_some(result)
}
