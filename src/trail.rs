//! The fading glow-trail surface.
//!
//! A fixed-resolution RGBA raster that records recent cursor motion. Every
//! frame it fades toward black, then composites a glow stamp at the cursor's
//! projected position with an opacity proportional to cursor speed. The
//! buffer is CPU-write-only; the GPU consumes it through
//! [`crate::gpu::TrailTexture`].

use glam::Vec2;

use crate::textures::TextureConfig;

/// Texel-space sentinel for a cursor that has never hit the reference
/// plane. Far enough off-surface that no stamp pixel can land on it.
pub const OFF_SURFACE: Vec2 = Vec2::splat(9999.0);

/// Configuration for a trail surface.
#[derive(Debug, Clone)]
pub struct TrailConfig {
    /// Surface width in texels.
    pub width: u32,
    /// Surface height in texels.
    pub height: u32,
    /// Opacity of the per-frame black overpaint. Higher fades faster.
    pub fade_alpha: f32,
    /// Texels-per-frame of cursor motion that saturate stamp opacity.
    pub speed_scale: f32,
    /// Stamp size as a fraction of surface width.
    pub stamp_fraction: f32,
}

impl TrailConfig {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "trail surface must be non-empty");
        Self {
            width,
            height,
            fade_alpha: 0.02,
            speed_scale: 0.1,
            stamp_fraction: 0.25,
        }
    }

    pub fn with_fade_alpha(mut self, fade_alpha: f32) -> Self {
        self.fade_alpha = fade_alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_speed_scale(mut self, speed_scale: f32) -> Self {
        self.speed_scale = speed_scale.max(0.0);
        self
    }

    pub fn with_stamp_fraction(mut self, fraction: f32) -> Self {
        self.stamp_fraction = fraction.clamp(0.0, 1.0);
        self
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self::new(128, 128)
    }
}

/// Immutable glow image composited onto the trail at the cursor position.
#[derive(Debug, Clone)]
pub struct GlowStamp {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GlowStamp {
    pub fn new(config: TextureConfig) -> Self {
        Self {
            data: config.data,
            width: config.width,
            height: config.height,
        }
    }

    /// Bilinear sample at UV in [0, 1]². Returns RGBA in [0, 1].
    fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        let fx = (u * self.width as f32 - 0.5).clamp(0.0, self.width as f32 - 1.0);
        let fy = (v * self.height as f32 - 0.5).clamp(0.0, self.height as f32 - 1.0);
        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let px = |x: u32, y: u32| -> [f32; 4] {
            let i = ((y * self.width + x) * 4) as usize;
            [
                self.data[i] as f32 / 255.0,
                self.data[i + 1] as f32 / 255.0,
                self.data[i + 2] as f32 / 255.0,
                self.data[i + 3] as f32 / 255.0,
            ]
        };

        let (a, b, c, d) = (px(x0, y0), px(x1, y0), px(x0, y1), px(x1, y1));
        let mut out = [0.0f32; 4];
        for i in 0..4 {
            let top = a[i] + (b[i] - a[i]) * tx;
            let bottom = c[i] + (d[i] - c[i]) * tx;
            out[i] = top + (bottom - top) * ty;
        }
        out
    }
}

/// Off-screen 2D surface holding fading glow imprints.
pub struct TrailSurface {
    config: TrailConfig,
    /// RGBA8, row-major, top-left origin. Alpha stays opaque; the glow
    /// lives in the color channels.
    pixels: Vec<u8>,
    cursor: Vec2,
    prev_cursor: Vec2,
    stamp: Option<GlowStamp>,
}

impl TrailSurface {
    /// Create an opaque black surface with the cursor at the off-surface
    /// sentinel.
    pub fn new(config: TrailConfig) -> Self {
        let count = (config.width * config.height) as usize;
        let mut pixels = vec![0u8; count * 4];
        for px in pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            config,
            pixels,
            cursor: OFF_SURFACE,
            prev_cursor: OFF_SURFACE,
            stamp: None,
        }
    }

    /// Install the glow stamp. Until one is set, the stamp pass is a
    /// silent no-op (mirrors an image asset that has not decoded yet).
    pub fn set_stamp(&mut self, stamp: GlowStamp) {
        self.stamp = Some(stamp);
    }

    pub fn has_stamp(&self) -> bool {
        self.stamp.is_some()
    }

    /// Record the cursor's projected texel position. Called only on a
    /// reference-plane hit; on a miss the previous value persists.
    pub fn set_cursor(&mut self, texel: Vec2) {
        self.cursor = texel;
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn prev_cursor(&self) -> Vec2 {
        self.prev_cursor
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Raw RGBA pixels for GPU upload.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Instantaneous stamp opacity for a given cursor travel distance.
    pub fn speed_alpha(&self, travel: f32) -> f32 {
        (travel * self.config.speed_scale).clamp(0.0, 1.0)
    }

    /// Advance one frame: fade, estimate speed, stamp, record position.
    pub fn advance(&mut self) {
        self.fade();

        let speed = self.speed_alpha(self.prev_cursor.distance(self.cursor));
        let center = self.cursor;
        self.prev_cursor = self.cursor;

        if speed <= 0.0 {
            return;
        }
        if let Some(stamp) = &self.stamp {
            let size = self.config.width as f32 * self.config.stamp_fraction;
            composite_lighten(
                &mut self.pixels,
                self.config.width,
                self.config.height,
                stamp,
                center,
                size,
                speed,
            );
        }
    }

    /// Mean color-channel intensity in [0, 1]. Used by the decay tests and
    /// by callers that want to know whether the surface has gone quiet.
    pub fn mean_intensity(&self) -> f32 {
        let mut sum = 0u64;
        for px in self.pixels.chunks_exact(4) {
            sum += px[0] as u64 + px[1] as u64 + px[2] as u64;
        }
        let texels = (self.config.width * self.config.height) as u64;
        sum as f32 / (texels * 3 * 255) as f32
    }

    /// Overpaint the whole surface with low-opacity black. Truncating the
    /// product guarantees every non-zero texel strictly decreases, so the
    /// trail reaches exactly zero in bounded frames.
    fn fade(&mut self) {
        let keep = 1.0 - self.config.fade_alpha;
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = (px[0] as f32 * keep) as u8;
            px[1] = (px[1] as f32 * keep) as u8;
            px[2] = (px[2] as f32 * keep) as u8;
        }
    }
}

/// Composite `stamp` onto the surface centered at `center`, scaled to
/// `size`×`size` texels, with per-channel "lighten" blending modulated by
/// `intensity`: `out = max(dst, src) * a + dst * (1 - a)` where
/// `a = src_alpha * intensity`. Output never exceeds the stamp's own
/// values, so repeated stamping cannot accumulate unbounded brightness.
fn composite_lighten(
    pixels: &mut [u8],
    surface_width: u32,
    surface_height: u32,
    stamp: &GlowStamp,
    center: Vec2,
    size: f32,
    intensity: f32,
) {
    if size <= 0.0 {
        return;
    }
    let left = center.x - size * 0.5;
    let top = center.y - size * 0.5;

    let x0 = left.floor().max(0.0) as i64;
    let y0 = top.floor().max(0.0) as i64;
    let x1 = ((left + size).ceil() as i64).min(surface_width as i64);
    let y1 = ((top + size).ceil() as i64).min(surface_height as i64);

    for y in y0..y1 {
        for x in x0..x1 {
            let u = (x as f32 + 0.5 - left) / size;
            let v = (y as f32 + 0.5 - top) / size;
            if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                continue;
            }
            let src = stamp.sample(u, v);
            let a = (src[3] * intensity).clamp(0.0, 1.0);
            if a <= 0.0 {
                continue;
            }
            let idx = ((y as u32 * surface_width + x as u32) * 4) as usize;
            for c in 0..3 {
                let dst = pixels[idx + c] as f32 / 255.0;
                let lightened = dst.max(src[c]);
                let out = lightened * a + dst * (1.0 - a);
                pixels[idx + c] = (out * 255.0).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_with_stamp() -> TrailSurface {
        let mut surface = TrailSurface::new(TrailConfig::new(64, 64));
        surface.set_stamp(GlowStamp::new(TextureConfig::radial_glow(32)));
        surface
    }

    #[test]
    fn test_new_surface_is_black() {
        let surface = TrailSurface::new(TrailConfig::new(16, 16));
        assert_eq!(surface.mean_intensity(), 0.0);
        assert_eq!(surface.cursor(), OFF_SURFACE);
        assert_eq!(surface.prev_cursor(), OFF_SURFACE);
    }

    #[test]
    fn test_sentinel_produces_no_ink() {
        let mut surface = surface_with_stamp();
        for _ in 0..10 {
            surface.advance();
        }
        assert_eq!(surface.mean_intensity(), 0.0);
        assert_eq!(surface.cursor(), OFF_SURFACE);
    }

    #[test]
    fn test_moving_cursor_leaves_ink() {
        let mut surface = surface_with_stamp();
        surface.set_cursor(Vec2::new(32.0, 32.0));
        surface.advance();
        assert!(surface.mean_intensity() > 0.0);
    }

    #[test]
    fn test_decay_is_strict_and_bounded() {
        let mut surface = surface_with_stamp();
        surface.set_cursor(Vec2::new(32.0, 32.0));
        surface.advance();

        let mut prev = surface.mean_intensity();
        assert!(prev > 0.0);

        let epsilon = 1e-4;
        let mut frames = 0;
        while surface.mean_intensity() >= epsilon {
            surface.advance();
            let now = surface.mean_intensity();
            assert!(now < prev, "intensity did not decrease: {} -> {}", prev, now);
            prev = now;
            frames += 1;
            assert!(frames < 600, "trail failed to decay within bounded frames");
        }
    }

    #[test]
    fn test_speed_alpha_monotone_and_clamped() {
        let surface = surface_with_stamp();
        let mut last = -1.0;
        for travel in [0.0, 1.0, 3.0, 5.0, 9.0, 50.0] {
            let alpha = surface.speed_alpha(travel);
            assert!(alpha >= last);
            assert!(alpha <= 1.0);
            last = alpha;
        }
        assert_eq!(surface.speed_alpha(0.0), 0.0);
        assert_eq!(surface.speed_alpha(1000.0), 1.0);
    }

    #[test]
    fn test_stationary_cursor_adds_no_ink() {
        let mut surface = surface_with_stamp();
        surface.set_cursor(Vec2::new(32.0, 32.0));
        surface.advance();
        let after_first = surface.mean_intensity();

        // Same position again: zero speed, fade only.
        surface.advance();
        assert!(surface.mean_intensity() < after_first);
    }

    #[test]
    fn test_lighten_caps_at_stamp_values() {
        let mut surface = surface_with_stamp();
        // Stamp the same spot at full speed many times; brightness must not
        // exceed the stamp's own peak (255).
        for i in 0..50 {
            // Alternate between two distant points to keep speed saturated.
            let x = if i % 2 == 0 { 20.0 } else { 44.0 };
            surface.set_cursor(Vec2::new(x, 32.0));
            surface.advance();
        }
        assert!(surface.pixels().iter().all(|&b| b <= 255));
        assert!(surface.mean_intensity() <= 1.0);
    }

    #[test]
    fn test_stamp_clipped_off_surface() {
        let mut surface = surface_with_stamp();
        // First land on the surface edge, then move just off it; both
        // stamps must clip without panicking.
        surface.set_cursor(Vec2::new(0.0, 0.0));
        surface.advance();
        surface.set_cursor(Vec2::new(-30.0, -30.0));
        surface.advance();
        assert!(surface.mean_intensity() >= 0.0);
    }

    #[test]
    fn test_missing_stamp_is_noop() {
        let mut surface = TrailSurface::new(TrailConfig::new(32, 32));
        assert!(!surface.has_stamp());
        surface.set_cursor(Vec2::new(16.0, 16.0));
        surface.advance();
        assert_eq!(surface.mean_intensity(), 0.0);
    }

    #[test]
    fn test_prev_cursor_recorded_after_advance() {
        let mut surface = surface_with_stamp();
        surface.set_cursor(Vec2::new(10.0, 20.0));
        surface.advance();
        assert_eq!(surface.prev_cursor(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_bilinear_sample_center() {
        let stamp = GlowStamp::new(TextureConfig::radial_glow(32));
        let center = stamp.sample(0.5, 0.5);
        let edge = stamp.sample(0.0, 0.0);
        assert!(center[0] > edge[0]);
    }
}
