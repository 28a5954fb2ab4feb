//! Viewport camera: pan, clamped zoom, and screen/world conversion.
//!
//! World space is stitch space (one fabric cell = 1.0). Screen space is in
//! host pixels with the origin at the top-left of the canvas element.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::config::CanvasConfig;

/// Camera state for pan/zoom over the pattern.
///
/// `pan` is the screen position of the world origin. `scale` is screen pixels
/// per stitch and always lies within `[min_scale, max_scale]`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    scale: f64,
    pan: Vec2,
    screen: Size,
    min_scale: f64,
    max_scale: f64,
    dirty: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl Camera {
    #[must_use]
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            scale: config.initial_scale.clamp(config.min_scale, config.max_scale),
            pan: Vec2::ZERO,
            screen: Size::ZERO,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            dirty: true,
        }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen
    }

    /// Whether the camera moved since the last [`Camera::mark_clean`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Set the screen size. The world point at the center of the screen stays put.
    pub fn resize(&mut self, size: Size) {
        let center = self.center();
        self.screen = size;
        self.move_center(center);
    }

    /// Set the zoom, clamped to the configured range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(self.min_scale, self.max_scale);
        self.dirty = true;
    }

    /// Pan so that `world` sits at the center of the screen.
    pub fn move_center(&mut self, world: Point) {
        let center = Point::new(self.screen.width / 2.0, self.screen.height / 2.0);
        self.pan = center.to_vec2() - world.to_vec2() * self.scale;
        self.dirty = true;
    }

    /// World point currently at the center of the screen.
    #[must_use]
    pub fn center(&self) -> Point {
        self.screen_to_world(Point::new(self.screen.width / 2.0, self.screen.height / 2.0))
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
        self.dirty = true;
    }

    /// Multiply the zoom by `factor`, keeping the world point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        let anchor = self.screen_to_world(screen);
        self.set_scale(self.scale * factor);
        self.pan = screen.to_vec2() - anchor.to_vec2() * self.scale;
    }

    /// World-to-screen transform.
    #[must_use]
    pub fn affine(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.scale)
    }

    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.pan) / self.scale).to_point()
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        (world.to_vec2() * self.scale + self.pan).to_point()
    }

    /// Convert a screen-space distance to a world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// The world-space rectangle covered by the screen.
    #[must_use]
    pub fn visible_bounds(&self) -> Rect {
        let origin = self.screen_to_world(Point::ORIGIN);
        Rect::from_origin_size(origin, self.screen / self.scale)
    }
}
