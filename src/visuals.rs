//! Tunable shading parameters uploaded to the GPU each frame.

/// Controls how trail intensity displaces and sizes particles.
#[derive(Debug, Clone, Copy)]
pub struct DisplacementParams {
    /// Maximum displacement distance in world units.
    pub strength: f32,
    /// How much of the displacement direction lies in the field plane.
    pub planar_bias: f32,
    /// Trail intensity below this contributes nothing.
    pub threshold_low: f32,
    /// Trail intensity at or above this displaces fully.
    pub threshold_high: f32,
    /// Base point size as a fraction of viewport height at unit depth.
    pub point_scale: f32,
}

impl Default for DisplacementParams {
    fn default() -> Self {
        Self {
            strength: 3.0,
            planar_bias: 0.2,
            threshold_low: 0.1,
            threshold_high: 0.3,
            point_scale: 0.4,
        }
    }
}
