//! Pointer tracking: raw cursor events to normalized device coordinates.
//!
//! Pointer-move events arrive asynchronously between frames and coalesce to
//! the latest value. The projector reads the cell once per tick, so there is
//! no event queue and the last write wins.

use glam::Vec2;

use crate::viewport::Viewport;

/// NDC value used until the first pointer event arrives. Far enough
/// off-screen that the projected ray can never hit the reference plane.
pub const OFFSCREEN_NDC: Vec2 = Vec2::splat(9999.0);

/// Latest pointer position in normalized device coordinates.
#[derive(Debug, Clone, Copy)]
pub struct PointerTracker {
    ndc: Vec2,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self { ndc: OFFSCREEN_NDC }
    }

    /// Record a pointer-move event in window client coordinates.
    ///
    /// `x = (cx / w) * 2 - 1`, `y = -(cy / h) * 2 + 1`. No clamping: events
    /// outside the window produce coordinates outside [-1, 1], which simply
    /// miss the reference plane in the raycast step.
    pub fn record(&mut self, client_x: f32, client_y: f32, viewport: &Viewport) {
        let w = viewport.width() as f32;
        let h = viewport.height() as f32;
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        self.ndc = Vec2::new(
            (client_x / w) * 2.0 - 1.0,
            -(client_y / h) * 2.0 + 1.0,
        );
    }

    /// Current NDC position, or [`OFFSCREEN_NDC`] if nothing arrived yet.
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_offscreen_sentinel() {
        let tracker = PointerTracker::new();
        assert_eq!(tracker.ndc(), OFFSCREEN_NDC);
    }

    #[test]
    fn test_center_maps_to_origin() {
        let vp = Viewport::new(800, 600, 1.0);
        let mut tracker = PointerTracker::new();
        tracker.record(400.0, 300.0, &vp);
        assert!(tracker.ndc().x.abs() < 1e-6);
        assert!(tracker.ndc().y.abs() < 1e-6);
    }

    #[test]
    fn test_y_axis_flipped() {
        let vp = Viewport::new(800, 600, 1.0);
        let mut tracker = PointerTracker::new();
        // Top-left client corner is (-1, +1) in NDC.
        tracker.record(0.0, 0.0, &vp);
        assert_eq!(tracker.ndc(), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_no_clamping_outside_window() {
        let vp = Viewport::new(800, 600, 1.0);
        let mut tracker = PointerTracker::new();
        tracker.record(1600.0, -300.0, &vp);
        assert_eq!(tracker.ndc(), Vec2::new(3.0, 2.0));
    }

    #[test]
    fn test_last_write_wins() {
        let vp = Viewport::new(800, 600, 1.0);
        let mut tracker = PointerTracker::new();
        tracker.record(0.0, 0.0, &vp);
        tracker.record(800.0, 600.0, &vp);
        assert_eq!(tracker.ndc(), Vec2::new(1.0, -1.0));
    }
}
