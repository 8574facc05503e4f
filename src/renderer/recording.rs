//! Recording draw context
//!
//! Captures draw calls as data. Used by the headless driver and by tests.

use serde::{Deserialize, Serialize};

use super::context::DrawContext;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    BeginPath,
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    Arc { x: f32, y: f32, radius: f32, start: f32, end: f32 },
    Stroke,
    Save,
    Restore,
    Translate { x: f32, y: f32 },
    Scale { x: f32, y: f32 },
    LineWidth { width: f32 },
}

/// `DrawContext` that appends every call to a list
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    depth: i32,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded calls, keep nothing from the previous frame
    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        self.depth = 0;
        std::mem::take(&mut self.commands)
    }

    /// Outstanding `save` calls without a matching `restore`
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Number of `stroke` calls recorded
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke))
            .count()
    }
}

impl DrawContext for RecordingContext {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32) {
        self.commands.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start: start_angle,
            end: end_angle,
        });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth -= 1;
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Scale { x, y });
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth { width });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&DrawCommand::MoveTo { x: 1.0, y: 2.0 }).expect("serialize");
        assert_eq!(json, r#"{"op":"move_to","x":1.0,"y":2.0}"#);
    }

    #[test]
    fn test_take_empties() {
        let mut rec = RecordingContext::new();
        rec.begin_path();
        rec.stroke();
        assert_eq!(rec.stroke_count(), 1);
        assert_eq!(rec.take().len(), 2);
        assert!(rec.commands().is_empty());
    }
}
