//! Image assets: file loading and procedural generation.
//!
//! The field needs two images: a base-color picture sampled per particle,
//! and a glow stamp composited onto the trail surface. Both can be loaded
//! from disk or generated so the binary runs without assets.

use std::path::Path;

use crate::error::TextureError;

/// Raw RGBA pixel data with dimensions.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
}

impl TextureConfig {
    /// Create a texture from raw RGBA data (4 bytes per pixel).
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Load a texture from an image file (PNG or JPEG).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color texture (1x1 pixel).
    pub fn solid(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            data: vec![r, g, b, a],
            width: 1,
            height: 1,
        }
    }

    /// Generate a soft radial glow: white at the center, falling off
    /// smoothly to transparent at the edge. Default trail stamp.
    pub fn radial_glow(size: u32) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let center = (size as f32 - 1.0) * 0.5;
        let radius = size as f32 * 0.5;
        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 - center) / radius;
                let dy = (y as f32 - center) / radius;
                let d = (dx * dx + dy * dy).sqrt().min(1.0);
                // Quadratic falloff keeps a bright core with soft edges.
                let v = ((1.0 - d) * (1.0 - d) * 255.0) as u8;
                data.extend_from_slice(&[v, v, v, v]);
            }
        }
        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Generate a grayscale gradient grid used as the fallback base
    /// picture: cells of varying luminance so displacement and point
    /// sizing stay visible without an asset on disk.
    pub fn luminance_grid(size: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let cx = x / cell_size;
                let cy = y / cell_size;
                let v = hash_noise(cx, cy, 7);
                let v = 64 + (v / 2);
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Self {
            data,
            width: size,
            height: size,
        }
    }
}

/// Simple hash-based noise function.
fn hash_noise(x: u32, y: u32, seed: u32) -> u8 {
    let mut n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(seed.wrapping_mul(1013904223));
    n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    n = n ^ (n >> 16);
    (n & 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_size() {
        let tex = TextureConfig::from_rgba(vec![0; 2 * 2 * 4], 2, 2);
        assert_eq!(tex.width, 2);
        assert_eq!(tex.height, 2);
    }

    #[test]
    #[should_panic(expected = "RGBA data size mismatch")]
    fn test_from_rgba_bad_size_panics() {
        TextureConfig::from_rgba(vec![0; 3], 2, 2);
    }

    #[test]
    fn test_from_file_missing_is_error() {
        assert!(TextureConfig::from_file("/nonexistent/glow.png").is_err());
    }

    #[test]
    fn test_radial_glow_bright_center_dark_edge() {
        let glow = TextureConfig::radial_glow(32);
        assert_eq!(glow.data.len(), 32 * 32 * 4);

        let center_idx = ((16 * 32 + 16) * 4) as usize;
        let corner_idx = 0usize;
        assert!(glow.data[center_idx] > 200);
        assert_eq!(glow.data[corner_idx], 0);
    }

    #[test]
    fn test_radial_glow_alpha_matches_luminance() {
        let glow = TextureConfig::radial_glow(16);
        for px in glow.data.chunks_exact(4) {
            assert_eq!(px[0], px[3]);
        }
    }

    #[test]
    fn test_luminance_grid_opaque() {
        let tex = TextureConfig::luminance_grid(64, 8);
        assert_eq!(tex.data.len(), 64 * 64 * 4);
        for px in tex.data.chunks_exact(4) {
            assert_eq!(px[3], 255);
            assert!(px[0] >= 64);
        }
    }
}
