//! Viewport state and the resolution uniform.

use glam::Vec2;

/// Device pixel ratios above this add cost without visible benefit.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Window size and pixel density, as pushed into the shading stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f32,
}

impl Viewport {
    /// Create a viewport. The pixel ratio is capped at [`MAX_PIXEL_RATIO`].
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: pixel_ratio.clamp(0.0, MAX_PIXEL_RATIO),
        }
    }

    /// Apply a resize event. Zero-sized updates are ignored so a minimized
    /// window never produces a degenerate surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    /// Update the pixel ratio, e.g. after a monitor change.
    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        self.pixel_ratio = pixel_ratio.clamp(0.0, MAX_PIXEL_RATIO);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Physical resolution in device pixels, fed to the `resolution` uniform.
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.pixel_ratio,
            self.height as f32 * self.pixel_ratio,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720, 1.0)
    }
}
