//! 2D drawing-context contract
//!
//! The subset of a canvas 2D context the scene renderer needs. The frame
//! driver owns the real surface; renderers only ever see this trait.

/// Immediate-mode 2D drawing surface
pub trait DrawContext {
    /// Clear a rectangle in surface coordinates
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Circular arc around `(x, y)`, angles in radians
    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32);
    /// Outline the current path
    fn stroke(&mut self);

    /// Push the transform (and style) state
    fn save(&mut self);
    /// Pop the state pushed by the matching `save`
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, x: f32, y: f32);

    fn set_line_width(&mut self, width: f32);
}

/// Saved context state that is restored on drop.
///
/// Everything drawn through the guard is undone when it goes out of scope,
/// including when drawing panics and unwinds.
pub struct SavedTransform<'a, C: DrawContext + ?Sized> {
    ctx: &'a mut C,
}

impl<'a, C: DrawContext + ?Sized> SavedTransform<'a, C> {
    pub fn new(ctx: &'a mut C) -> Self {
        ctx.save();
        Self { ctx }
    }
}

impl<C: DrawContext + ?Sized> std::ops::Deref for SavedTransform<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: DrawContext + ?Sized> std::ops::DerefMut for SavedTransform<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

impl<C: DrawContext + ?Sized> Drop for SavedTransform<'_, C> {
    fn drop(&mut self) {
        self.ctx.restore();
    }
}
