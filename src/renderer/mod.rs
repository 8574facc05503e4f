//! 2D canvas rendering module
//!
//! The scene is drawn through the `DrawContext` trait, so the same renderer
//! feeds the browser canvas and the recording context used headless.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod context;
pub mod recording;
pub mod scene;

pub use context::{DrawContext, SavedTransform};
pub use recording::{DrawCommand, RecordingContext};
pub use scene::{Scene, draw_scene};
