//! Rigid-body simulation
//!
//! Everything that moves lives here. This module must stay free of drawing
//! and platform code:
//! - Fixed sub-steps only, driven by real elapsed time
//! - Stable iteration order (by body ID)
//! - All mutation goes through `World::step`

pub mod arena;
pub mod body;
pub mod clock;
pub mod collision;
pub mod material;
pub mod shape;
pub mod stepper;
pub mod world;

pub use arena::{Arena, ArenaConfig, ArenaMaterials, Walls, build_arena};
pub use body::{Body, BodyDesc, BodyId, BodyKind};
pub use clock::FrameClock;
pub use collision::CollisionResult;
pub use material::{ContactMaterial, ContactMaterialTable, MaterialId};
pub use shape::{Geometry, Shape};
pub use stepper::{Simulation, StepConfig};
pub use world::{ContactEvent, World};
