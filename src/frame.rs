//! Per-frame CPU simulation step.
//!
//! Glue between the pointer, the camera, the reference plane, and the
//! trail surface. Runs once per redraw, before GPU upload.

use crate::camera::Camera;
use crate::pointer::PointerTracker;
use crate::raycast::ReferencePlane;
use crate::trail::TrailSurface;
use crate::viewport::Viewport;

/// CPU-side state advanced once per frame.
pub struct FrameState {
    pub pointer: PointerTracker,
    pub trail: TrailSurface,
    pub plane: ReferencePlane,
}

impl FrameState {
    pub fn new(trail: TrailSurface, plane_extent: f32) -> Self {
        Self {
            pointer: PointerTracker::new(),
            trail,
            plane: ReferencePlane::new(plane_extent),
        }
    }

    /// Project the pointer onto the trail surface and advance it one frame.
    /// On a plane miss the cursor keeps its previous position, so the next
    /// frame sees zero travel and paints nothing.
    pub fn tick(&mut self, camera: &Camera, viewport: &Viewport) {
        let ray = camera.ndc_ray(self.pointer.ndc(), viewport.aspect());
        if let Some(texel) = self
            .plane
            .project(&ray, self.trail.width(), self.trail.height())
        {
            self.trail.set_cursor(texel);
        }
        self.trail.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textures::TextureConfig;
    use crate::trail::{GlowStamp, TrailConfig, OFF_SURFACE};

    fn frame_state() -> FrameState {
        let mut trail = TrailSurface::new(TrailConfig::new(128, 128));
        trail.set_stamp(GlowStamp::new(TextureConfig::radial_glow(32)));
        FrameState::new(trail, 10.0)
    }

    #[test]
    fn test_pointer_at_sentinel_paints_nothing() {
        let mut state = frame_state();
        let camera = Camera::new();
        let viewport = Viewport::default();
        for _ in 0..5 {
            state.tick(&camera, &viewport);
        }
        assert_eq!(state.trail.mean_intensity(), 0.0);
        assert_eq!(state.trail.cursor(), OFF_SURFACE);
    }

    #[test]
    fn test_center_pointer_paints_center() {
        let mut state = frame_state();
        let camera = Camera::new();
        let viewport = Viewport::default();

        state.pointer.record(640.0, 360.0, &viewport);
        state.tick(&camera, &viewport);
        let cursor = state.trail.cursor();
        assert!((cursor.x - 64.0).abs() < 0.5, "cursor = {:?}", cursor);
        assert!((cursor.y - 64.0).abs() < 0.5, "cursor = {:?}", cursor);
        assert!(state.trail.mean_intensity() > 0.0);
    }

    #[test]
    fn test_plane_miss_keeps_cursor() {
        let mut state = frame_state();
        let camera = Camera::new();
        let viewport = Viewport::default();

        state.pointer.record(640.0, 360.0, &viewport);
        state.tick(&camera, &viewport);
        let on_plane = state.trail.cursor();

        // Top-left window corner unprojects past the plane's quad.
        state.pointer.record(0.0, 0.0, &viewport);
        state.tick(&camera, &viewport);
        assert_eq!(state.trail.cursor(), on_plane);
    }

    #[test]
    fn test_motion_paints_more_than_hover() {
        let mut still = frame_state();
        let mut moving = frame_state();
        let camera = Camera::new();
        let viewport = Viewport::default();

        for i in 0..20 {
            still.pointer.record(640.0, 360.0, &viewport);
            still.tick(&camera, &viewport);

            let x = 540.0 + (i % 2) as f32 * 200.0;
            moving.pointer.record(x, 360.0, &viewport);
            moving.tick(&camera, &viewport);
        }
        assert!(moving.trail.mean_intensity() > still.trail.mean_intensity());
    }
}
