//! Browser canvas backend
//!
//! `CanvasRenderingContext2d` already speaks this vocabulary; the only work
//! is widening to `f64` and dropping the JS exceptions the transform calls
//! can return (they only fire for non-finite arguments).

use web_sys::CanvasRenderingContext2d;

use super::context::DrawContext;

impl DrawContext for CanvasRenderingContext2d {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        CanvasRenderingContext2d::clear_rect(self, x as f64, y as f64, width as f64, height as f64);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        CanvasRenderingContext2d::move_to(self, x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        CanvasRenderingContext2d::line_to(self, x as f64, y as f64);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32) {
        if let Err(e) = CanvasRenderingContext2d::arc(
            self,
            x as f64,
            y as f64,
            radius as f64,
            start_angle as f64,
            end_angle as f64,
        ) {
            log::warn!("arc failed: {:?}", e);
        }
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = CanvasRenderingContext2d::translate(self, x as f64, y as f64);
    }

    fn scale(&mut self, x: f32, y: f32) {
        let _ = CanvasRenderingContext2d::scale(self, x as f64, y as f64);
    }

    fn set_line_width(&mut self, width: f32) {
        CanvasRenderingContext2d::set_line_width(self, width as f64);
    }
}
